//! End-to-end integration tests for the `zeek-format` and `zeek-script`
//! binaries.

use std::path::PathBuf;
use std::process::Command;

fn find_bin(name: &str) -> PathBuf {
    let mut path = std::env::current_exe()
        .expect("cannot find current exe")
        .parent()
        .expect("cannot find parent dir")
        .to_path_buf();
    if path.ends_with("deps") {
        path.pop();
    }
    path.join(name)
}

#[test]
fn format_rewrites_single_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("test.zeek");
    std::fs::write(&file, "global x = 1 ;\n").unwrap();

    let output = Command::new(find_bin("zeek-format"))
        .args(["-i", file.to_str().unwrap()])
        .output()
        .expect("failed to run zeek-format");

    assert!(
        output.status.success(),
        "zeek-format failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 file processed, 0 errors"));
}

#[test]
fn format_without_inplace_prints_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("test.zeek");
    let original = "global x = 1;\n";
    std::fs::write(&file, original).unwrap();

    let output = Command::new(find_bin("zeek-format"))
        .arg(file.to_str().unwrap())
        .output()
        .expect("failed to run zeek-format");

    assert!(output.status.success());

    // Output went to stdout; the file on disk is untouched.
    let contents = std::fs::read_to_string(&file).unwrap();
    assert_eq!(contents, original);
}

#[test]
fn format_multiple_files_without_inplace_errors() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.zeek");
    let b = dir.path().join("b.zeek");
    std::fs::write(&a, "global x = 1;\n").unwrap();
    std::fs::write(&b, "global y = 2;\n").unwrap();

    let output = Command::new(find_bin("zeek-format"))
        .args([a.to_str().unwrap(), b.to_str().unwrap()])
        .output()
        .expect("failed to run zeek-format");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn format_recursive_without_inplace_errors() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(find_bin("zeek-format"))
        .args(["-r", dir.path().to_str().unwrap()])
        .output()
        .expect("failed to run zeek-format");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn format_directory_without_recursive_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.zeek"), "global x = 1;\n").unwrap();

    let output = Command::new(find_bin("zeek-format"))
        .args(["-i", dir.path().to_str().unwrap()])
        .output()
        .expect("failed to run zeek-format");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0 files processed, 0 errors"));
}

#[test]
fn format_recursive_inplace_formats_nested_files() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir_all(&sub).unwrap();
    std::fs::write(dir.path().join("a.zeek"), "global x = 1;\n").unwrap();
    std::fs::write(sub.join("b.zeek"), "global y = 2;\n").unwrap();
    std::fs::write(dir.path().join("readme.txt"), "hello").unwrap();

    let output = Command::new(find_bin("zeek-format"))
        .args(["-i", "-r", dir.path().to_str().unwrap()])
        .output()
        .expect("failed to run zeek-format -r");

    assert!(
        output.status.success(),
        "zeek-format -i -r failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let readme = std::fs::read_to_string(dir.path().join("readme.txt")).unwrap();
    assert_eq!(readme, "hello");
}

#[test]
fn script_parse_exits_zero_on_clean_source() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("test.zeek");
    std::fs::write(&file, "global x = 1;\n").unwrap();

    let output = Command::new(find_bin("zeek-script"))
        .args(["parse", "--quiet", file.to_str().unwrap()])
        .output()
        .expect("failed to run zeek-script parse");

    assert!(
        output.status.success(),
        "zeek-script parse failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn script_parse_prints_tree_unless_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("test.zeek");
    std::fs::write(&file, "global x = 1;\n").unwrap();

    let output = Command::new(find_bin("zeek-script"))
        .args(["parse", file.to_str().unwrap()])
        .output()
        .expect("failed to run zeek-script parse");

    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}

#[test]
fn script_format_subcommand_matches_top_level_binary() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("test.zeek");
    std::fs::write(&file, "global x = 1 ;\n").unwrap();

    let output = Command::new(find_bin("zeek-script"))
        .args(["format", "-i", file.to_str().unwrap()])
        .output()
        .expect("failed to run zeek-script format");

    assert!(
        output.status.success(),
        "zeek-script format failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
