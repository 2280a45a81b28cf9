//! The `format` and `parse` command implementations shared by both binaries
//! (spec §6 "CLI surface"), ported from `original_source/zeekscript/cli.py`'s
//! `cmd_format`/`cmd_parse`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ariadne::{Label, Report, ReportKind, Source};

use zeek_script::{Input, Script};

use crate::discovery::discover_zeek_files;

pub fn print_error(msg: &str) {
    eprintln!("zeekfmt: {msg}");
}

/// `format [-i/--inplace] [-r/--recursive] [--no-linebreaks] [files...]`.
pub fn cmd_format(scripts: Vec<String>, inplace: bool, recursive: bool, no_linebreaks: bool) -> i32 {
    let scripts = if scripts.is_empty() {
        vec!["-".to_string()]
    } else {
        scripts
    };

    if recursive && !inplace {
        print_error("error: --recursive requires --inplace");
        return 1;
    }
    if scripts.len() > 1 && !inplace {
        print_error("error: formatting multiple files requires --inplace");
        return 1;
    }

    let mut targets: Vec<Option<PathBuf>> = Vec::new();
    for name in &scripts {
        if name == "-" {
            targets.push(None);
            continue;
        }
        let path = PathBuf::from(name);
        if path.is_dir() {
            if recursive {
                match discover_zeek_files(&path) {
                    Ok(found) => targets.extend(found.into_iter().map(Some)),
                    Err(e) => print_error(&format!("error: cannot walk '{}': {e}", path.display())),
                }
            } else {
                print_error(&format!(
                    "warning: skipping directory '{}' (use --recursive)",
                    path.display()
                ));
            }
        } else {
            targets.push(Some(path));
        }
    }

    let mut processed = 0usize;
    let mut errors = 0usize;

    for target in targets {
        let mut file_inplace = inplace;
        if target.is_none() && file_inplace {
            print_error("warning: ignoring --inplace when reading from stdin");
            file_inplace = false;
        }

        let input = match &target {
            Some(path) => Input::from_path(path.clone()),
            None => Input::Stdin,
        };
        let mut script = Script::new(input);

        let had_error = match script.parse() {
            Ok(clean) => !clean,
            Err(e) => {
                print_error(&format!("parsing error: {e}"));
                if let Err(e) = write_unchanged(target.as_deref(), script.source(), file_inplace) {
                    print_error(&format!("error: cannot write unchanged source: {e}"));
                    errors += 1;
                }
                processed += 1;
                errors += 1;
                continue;
            }
        };

        if had_error {
            errors += 1;
        }
        processed += 1;

        match (&target, file_inplace) {
            (Some(path), true) => match fs::File::create(path) {
                Ok(file) => script.format(Box::new(file), !no_linebreaks),
                Err(e) => {
                    print_error(&format!("internal error: cannot write '{}': {e}", path.display()));
                    errors += 1;
                }
            },
            _ => script.format_to_stdout(!no_linebreaks),
        }
    }

    if inplace {
        let file_s = if processed == 1 { "" } else { "s" };
        let err_s = if errors == 1 { "" } else { "s" };
        println!("{processed} file{file_s} processed, {errors} error{err_s}");
        if errors == 0 {
            0
        } else {
            1
        }
    } else if errors == 0 {
        0
    } else {
        1
    }
}

fn write_unchanged(path: Option<&Path>, source: &[u8], inplace: bool) -> io::Result<()> {
    match (path, inplace) {
        (Some(path), true) => fs::write(path, source),
        _ => io::stdout().write_all(source),
    }
}

/// `parse [-c/--concrete] [-q/--quiet] [file]`.
pub fn cmd_parse(script: Option<String>, concrete: bool, quiet: bool) -> i32 {
    let name = script.unwrap_or_else(|| "-".to_string());
    let mut script = Script::new(Input::from_name(&name));

    if let Err(e) = script.parse() {
        print_error(&format!("parsing error: {e}"));
        return 1;
    }

    if !quiet {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        let _ = script.write_tree(&mut lock, concrete);
    }

    if script.has_error() {
        if let Some((line, lineno, msg)) = script.get_error() {
            print_error(&format!("parse tree has problems: {msg}"));
            report_source_line(&name, &line, lineno, &msg);
        }
        return 2;
    }

    0
}

/// Point at the offending line with an `ariadne` report, the same
/// diagnostics-rendering crate the CLI's batch-compile sibling uses.
fn report_source_line(file_name: &str, line: &str, lineno: usize, msg: &str) {
    if line.is_empty() {
        return;
    }
    let end = line.len().max(1);
    let _ = Report::<std::ops::Range<usize>>::build(ReportKind::Error, 0..end)
        .with_message(format!("{file_name}:{}", lineno + 1))
        .with_label(Label::new(0..end).with_message(msg))
        .finish()
        .eprint(Source::from(line));
}
