// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interactive REPL (Read-Eval-Print Loop) for the Xenon compiler.
//!
//! Every line is compiled in a fresh session and its bytecode printed.

use std::borrow::Cow;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Config, Editor, Helper};
use xenon_core::lexer::{Keyword, OPERATOR_WORDS};
use xenon_core::{CompileOptions, Session};

use crate::config::ReplSection;
use crate::report::{self, Views};

/// REPL configuration constants
const HISTORY_FILE: &str = ".xenon_history";

/// REPL commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
    Tokens,
    Ast,
    Load,
}

impl ReplCommand {
    /// Parse a REPL command from input string
    pub fn parse(input: &str) -> Option<(Self, Option<&str>)> {
        let input = input.trim();
        let rest = input.strip_prefix('.')?;

        let mut parts = rest.splitn(2, char::is_whitespace);
        let cmd = parts.next()?.to_lowercase();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        match cmd.as_str() {
            "help" | "h" | "?" => Some((ReplCommand::Help, arg)),
            "exit" | "quit" | "q" => Some((ReplCommand::Exit, arg)),
            "clear" | "cls" => Some((ReplCommand::Clear, arg)),
            "version" | "v" => Some((ReplCommand::Version, arg)),
            "tokens" | "t" => Some((ReplCommand::Tokens, arg)),
            "ast" | "a" => Some((ReplCommand::Ast, arg)),
            "load" | "l" => Some((ReplCommand::Load, arg)),
            _ => None,
        }
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
            (".tokens", "Toggle printing of lexemes"),
            (".ast", "Toggle printing of the syntax tree"),
            (".load <file>", "Compile a Xenon source file"),
        ]
    }
}

/// Helper struct for rustyline that provides completion, hints, and validation
#[derive(Default)]
struct XenonHelper {
    /// Keywords, operator words and commands for completion
    words: Vec<String>,
}

impl XenonHelper {
    fn new() -> Self {
        let words = Keyword::ALL
            .iter()
            .map(|k| k.as_str())
            .chain(OPERATOR_WORDS.iter().copied())
            .chain(std::iter::once("when"))
            .chain(ReplCommand::all_commands().iter().map(|&(cmd, _)| {
                cmd.split_whitespace().next().unwrap_or(cmd)
            }))
            .map(String::from)
            .collect();

        Self { words }
    }
}

/// Start of the word ending at `pos`.
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
        .map(|i| i + 1)
        .unwrap_or(0)
}

impl Completer for XenonHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let word = &line[word_start(line, pos)..pos];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches = self
            .words
            .iter()
            .filter(|w| w.starts_with(word))
            .map(|w| Pair {
                display: w.clone(),
                replacement: w[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for XenonHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        let word = &line[word_start(line, pos)..];
        if word.len() < 2 {
            return None;
        }

        self.words
            .iter()
            .find(|w| w.starts_with(word) && w.len() > word.len())
            .map(|w| w[word.len()..].to_string().dimmed().to_string())
    }
}

impl Highlighter for XenonHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut current_word = String::new();

        for c in line.chars() {
            if c.is_alphanumeric() || c == '_' {
                current_word.push(c);
                continue;
            }
            if !current_word.is_empty() {
                result.push_str(&highlight_word(&current_word));
                current_word.clear();
            }
            let colored = match c {
                '(' | ')' | '[' | ']' | '{' | '}' => c.yellow().to_string(),
                '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '~'
                | '?' => c.cyan().to_string(),
                '"' | '\'' | '`' => c.green().to_string(),
                '.' if line.starts_with('.') => c.magenta().to_string(),
                _ => c.to_string(),
            };
            result.push_str(&colored);
        }

        if !current_word.is_empty() {
            result.push_str(&highlight_word(&current_word));
        }

        Cow::Owned(result)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn highlight_word(word: &str) -> String {
    match Keyword::lookup(word) {
        Some(Keyword::True | Keyword::False | Keyword::Null) => word.blue().to_string(),
        Some(_) => word.magenta().bold().to_string(),
        None if OPERATOR_WORDS.contains(&word) || word == "when" => word.cyan().to_string(),
        None if word.chars().all(|c| c.is_ascii_digit()) => word.yellow().to_string(),
        None => word.to_string(),
    }
}

impl Validator for XenonHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();

        if !is_balanced(input) {
            return Ok(ValidationResult::Incomplete);
        }

        // A trailing operator or opener expects more input
        let trimmed = input.trim_end();
        if trimmed.ends_with(['\\', '+', '-', '*', '/', '=', ',', '{', '(', '[']) {
            return Ok(ValidationResult::Incomplete);
        }

        Ok(ValidationResult::Valid(None))
    }
}

/// Check if brackets, braces, and parentheses are balanced
fn is_balanced(input: &str) -> bool {
    let mut stack = Vec::new();
    let mut in_string = None;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        if c == '\\' && in_string.is_some() {
            escape_next = true;
            continue;
        }

        match in_string {
            Some(quote) if c == quote => in_string = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' | '`' => in_string = Some(c),
                '(' => stack.push(')'),
                '[' => stack.push(']'),
                '{' => stack.push('}'),
                ')' | ']' | '}' => {
                    if stack.pop() != Some(c) {
                        // Let the parser report the mismatch
                        return true;
                    }
                }
                _ => {}
            },
        }
    }

    stack.is_empty() && in_string.is_none()
}

impl Helper for XenonHelper {}

/// The interactive REPL for the Xenon compiler
pub struct Repl {
    options: CompileOptions,
    views: Views,
    editor: Editor<XenonHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(options: CompileOptions, settings: &ReplSection) -> rustyline::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(settings.max_history)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(XenonHelper::new()));

        let history_path = settings.history_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("xenon")
                .join(HISTORY_FILE)
        });

        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.load_history(&history_path);

        Ok(Self {
            options,
            views: Views {
                tokens: settings.show_tokens,
                ast: settings.show_ast,
                disasm: true,
            },
            editor,
            history_path,
        })
    }

    /// Run the REPL main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = format!("{} ", "xenon>".bright_green().bold());

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    if let Some((cmd, arg)) = ReplCommand::parse(trimmed) {
                        match self.execute_command(cmd, arg) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    self.compile_and_print(trimmed);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        if let Err(err) = self.editor.save_history(&self.history_path) {
            tracing::warn!(path = %self.history_path.display(), %err, "could not save history");
        }
        Ok(())
    }

    fn print_banner(&self) {
        let version = env!("CARGO_PKG_VERSION");
        println!();
        println!(
            "  {} {} {}",
            "Xenon".white().bold(),
            "v".dimmed(),
            version.bright_yellow()
        );
        println!(
            "  {} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn execute_command(&mut self, cmd: ReplCommand, arg: Option<&str>) -> CommandResult {
        match cmd {
            ReplCommand::Help => self.print_help(),
            ReplCommand::Exit => return CommandResult::Exit,
            ReplCommand::Clear => print!("\x1B[2J\x1B[H"),
            ReplCommand::Version => {
                println!("{} {}", "xenon".bright_cyan().bold(), env!("CARGO_PKG_VERSION").yellow());
            }
            ReplCommand::Tokens => {
                self.views.tokens = !self.views.tokens;
                print_toggle("tokens", self.views.tokens);
            }
            ReplCommand::Ast => {
                self.views.ast = !self.views.ast;
                print_toggle("ast", self.views.ast);
            }
            ReplCommand::Load => match arg {
                Some(path) => self.load_file(path),
                None => eprintln!(
                    "{}: {} {}",
                    "Error".red().bold(),
                    ".load".cyan(),
                    "requires a file path".dimmed()
                ),
            },
        }
        CommandResult::Continue
    }

    fn print_help(&self) {
        println!();
        println!("{}", "REPL Commands:".white().bold());
        println!();
        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:16} {}", cmd.cyan(), desc.dimmed());
        }
        println!();
    }

    fn load_file(&mut self, path: &str) {
        match std::fs::read_to_string(path) {
            Ok(source) => self.compile_and_print(&source),
            Err(err) => eprintln!("{}: {}: {}", "Error".red().bold(), path, err),
        }
    }

    fn compile_and_print(&mut self, source: &str) {
        match Session::new(self.options.clone()).compile(source) {
            Ok(compilation) => {
                report::print_diagnostics(&compilation.diagnostics);
                report::print_views(source, &compilation, self.views);
            }
            Err(err) => report::print_error(&err),
        }
    }
}

/// Result of executing a REPL command
enum CommandResult {
    Continue,
    Exit,
}

fn print_toggle(name: &str, on: bool) {
    let state = if on { "on".green().to_string() } else { "off".red().to_string() };
    println!("{} {}", name.cyan(), state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repl_command_parse() {
        assert!(matches!(
            ReplCommand::parse(".help"),
            Some((ReplCommand::Help, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".tokens"),
            Some((ReplCommand::Tokens, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".AST"),
            Some((ReplCommand::Ast, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".load test.xe"),
            Some((ReplCommand::Load, Some("test.xe")))
        ));
        assert!(ReplCommand::parse("not a command").is_none());
        assert!(ReplCommand::parse(".frobnicate").is_none());
    }

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced("(1 + 2)"));
        assert!(is_balanced("fn f(a) { a }"));
        assert!(!is_balanced("fn f(a) {"));
        assert!(!is_balanced("[1, 2"));
        assert!(!is_balanced("'open"));
        assert!(is_balanced("'string with (unbalanced'"));
    }

    #[test]
    fn test_completion_words() {
        let helper = XenonHelper::new();
        assert!(helper.words.iter().any(|w| w == "fn"));
        assert!(helper.words.iter().any(|w| w == "isnot"));
        assert!(helper.words.iter().any(|w| w == ".load"));
    }

    #[test]
    fn test_hint_completes_word() {
        let helper = XenonHelper::new();
        let history = rustyline::history::DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);
        assert_eq!(helper.hint("isno", 4, &ctx), Some("t".dimmed().to_string()));
        assert_eq!(helper.hint("x", 1, &ctx), None);
        assert_eq!(helper.hint("isno x", 2, &ctx), None);
    }

    #[test]
    fn test_word_start() {
        assert_eq!(word_start("x = fo", 6), 4);
        assert_eq!(word_start(".he", 3), 0);
    }
}
