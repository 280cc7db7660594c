// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! CLI argument parsing for xenon.

use std::path::PathBuf;

use clap::Parser;

/// xenon - compile Xenon source to bytecode and inspect the result
#[derive(Parser, Debug)]
#[command(name = "xenon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source files to compile
    pub files: Vec<PathBuf>,

    /// Compile CODE given on the command line
    #[arg(short, long, value_name = "CODE")]
    pub eval: Option<String>,

    /// Print the lexemes of each input
    #[arg(long)]
    pub tokens: bool,

    /// Print the syntax tree of each input
    #[arg(long)]
    pub ast: bool,

    /// Print the disassembled module of each input
    #[arg(long)]
    pub disasm: bool,

    /// Fail on names that resolve nowhere
    #[arg(long)]
    pub deny_undefined: bool,

    /// Configuration file (default: ./xenon.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Start the interactive REPL
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// Returns true if no input was given and the REPL should start.
    pub fn wants_repl(&self) -> bool {
        self.interactive || (self.files.is_empty() && self.eval.is_none())
    }

    /// Returns true if `--disasm` was given or no other view was chosen.
    pub fn shows_disasm(&self) -> bool {
        self.disasm || !(self.tokens || self.ast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("xenon").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_input_starts_repl() {
        assert!(cli(&[]).wants_repl());
        assert!(!cli(&["a.xe"]).wants_repl());
        assert!(cli(&["-i", "a.xe"]).wants_repl());
    }

    #[test]
    fn test_default_view_is_disasm() {
        assert!(cli(&["-e", "1"]).shows_disasm());
        assert!(!cli(&["-e", "1", "--ast"]).shows_disasm());
        assert!(cli(&["-e", "1", "--ast", "--disasm"]).shows_disasm());
    }

    #[test]
    fn test_flags() {
        let cli = cli(&["--deny-undefined", "--config", "x.toml", "-v", "a.xe", "b.xe"]);
        assert!(cli.deny_undefined);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert_eq!(cli.files.len(), 2);
    }
}
