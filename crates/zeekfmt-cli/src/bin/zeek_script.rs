//! The `zeek-script` command.
//!
//! Provides the `format` and `parse` subcommands, mirroring
//! `original_source/zeekscript/zeek_script.py`.

use std::process;

use clap::{Parser, Subcommand};

use zeekfmt_cli::{cmd_format, cmd_parse};

#[derive(Parser)]
#[command(name = "zeek-script", version, about = "Parse and format Zeek scripts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format Zeek scripts
    Format {
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
    },

    /// Parse a Zeek script and dump its parse tree
    Parse {
        /// Zeek script to parse; "-" or omitted reads from stdin
        script: Option<String>,

        /// Include concrete-syntax-tree nodes (comments, whitespace) in the dump
        #[arg(short = 'c', long = "concrete")]
        concrete: bool,

        /// Suppress the tree dump, reporting only the exit status
        #[arg(short = 'q', long = "quiet")]
        quiet: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Format { scripts, inplace, recursive, no_linebreaks } => {
            cmd_format(scripts, inplace, recursive, no_linebreaks)
        }
        Commands::Parse { script, concrete, quiet } => cmd_parse(script, concrete, quiet),
    };

    process::exit(code);
}
