// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Colored terminal output shared by the batch driver and the REPL.

use owo_colors::OwoColorize;
use xenon_core::ast::printer;
use xenon_core::{disassemble, Compilation, Diagnostic, Error, Lexeme, Severity};

/// Which views to print for a compiled input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Views {
    /// Lexemes
    pub tokens: bool,
    /// Syntax tree
    pub ast: bool,
    /// Disassembled module
    pub disasm: bool,
}

/// Formats one lexeme per line: location, class, text.
pub fn format_tokens(lexemes: &[Lexeme]) -> String {
    lexemes
        .iter()
        .map(|l| format!("{:>7}  {:<22} {}", l.location.to_string(), l.class, l.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints the requested views of `source`.
pub fn print_views(source: &str, compilation: &Compilation, views: Views) {
    if views.tokens {
        if let Ok(lexemes) = xenon_core::scan(source) {
            println!("{}", "tokens:".white().bold());
            println!("{}", format_tokens(&lexemes).dimmed());
        }
    }
    if views.ast {
        if let Ok(root) = xenon_core::parse(source) {
            print!("{}", printer::print(&root).cyan());
        }
    }
    if views.disasm {
        print!("{}", disassemble(&compilation.module));
    }
}

/// Prints warnings and errors attached to a compilation.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Warning => eprintln!(
                "{} {}: {}",
                "warning".yellow().bold(),
                diagnostic.location.dimmed(),
                diagnostic.message
            ),
            Severity::Error => eprintln!(
                "{} {}: {}",
                "error".red().bold(),
                diagnostic.location.dimmed(),
                diagnostic.message
            ),
        }
    }
}

/// Prints a failed compilation.
pub fn print_error(error: &Error) {
    eprintln!("{}: {}", "Error".red().bold(), error);
    if error.is_internal() {
        eprintln!("{}", "This is a bug in the compiler.".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tokens() {
        let lexemes = xenon_core::scan("x = 1").unwrap();
        let text = format_tokens(&lexemes);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Identifier"));
        assert!(lines[1].trim_start().starts_with("1:2"));
        assert!(lines[2].ends_with(" 1"));
    }
}
