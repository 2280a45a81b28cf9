//! Recursive `.zeek` file discovery for `format -r` (spec §6).

use std::path::{Path, PathBuf};

pub fn discover_zeek_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    discover_recursive(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn discover_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        if name_str.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            discover_recursive(&path, files)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("zeek") {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_zeek_files_recursively_and_skips_others() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(dir.path().join("a.zeek"), "").unwrap();
        std::fs::write(sub.join("b.zeek"), "").unwrap();
        std::fs::write(dir.path().join("readme.txt"), "").unwrap();

        let found = discover_zeek_files(dir.path()).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.extension().unwrap() == "zeek"));
    }

    #[test]
    fn skips_hidden_directories() {
        let dir = tempfile::tempdir().unwrap();
        let hidden = dir.path().join(".git");
        std::fs::create_dir_all(&hidden).unwrap();
        std::fs::write(hidden.join("c.zeek"), "").unwrap();
        std::fs::write(dir.path().join("a.zeek"), "").unwrap();

        let found = discover_zeek_files(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
    }
}
