//! The `zeek-format` command.
//!
//! A thin wrapper with no subcommands — just the `format` arguments at the
//! top level, mirroring `original_source/zeekscript/zeek_format.py`.
//!
//! - `-i`/`--inplace` - Rewrite each file instead of printing to stdout
//! - `-r`/`--recursive` - Recurse into directories (requires `--inplace`)
//! - `--no-linebreaks` - Disable the formatter's automatic line-wrapping

use std::process;

use clap::Parser;

use zeekfmt_cli::cmd_format;

#[derive(Parser)]
#[command(name = "zeek-format", version, about = "Format Zeek scripts")]
struct Cli {
    /// Zeek script(s) to format; "-" or omitted reads from stdin
    scripts: Vec<String>,

    /// Rewrite each file in place instead of printing to stdout
    #[arg(short = 'i', long = "inplace")]
    inplace: bool,

    /// Recurse into directories looking for .zeek files (requires --inplace)
    #[arg(short = 'r', long = "recursive")]
    recursive: bool,

    /// Disable automatic line-wrapping
    #[arg(long = "no-linebreaks")]
    no_linebreaks: bool,
}

fn main() {
    let cli = Cli::parse();
    let code = cmd_format(cli.scripts, cli.inplace, cli.recursive, cli.no_linebreaks);
    process::exit(code);
}
