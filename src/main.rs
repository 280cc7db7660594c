// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Xenon - a compiler front-end for the Xenon scripting language
//!
//! This is the main entry point for the xenon CLI/REPL.
//!
//! ## Features
//!
//! - Parallel compilation of source files
//! - Token, syntax tree and bytecode listings
//! - Interactive REPL with highlighting and history

mod cli;
mod config;
mod repl;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use xenon_core::{CompileOptions, NamePolicy, Session};

use cli::Cli;
use config::Config;
use report::Views;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: {:#}", "Error".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "xenon=debug,xenon_core=debug"
    } else {
        "xenon=warn,xenon_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::discover(cli.config.as_deref())?;
    let mut options = config.compile_options()?;
    if cli.deny_undefined {
        options.undefined_names = NamePolicy::Deny;
    }
    tracing::debug!(?options, "configuration loaded");

    let views = Views {
        tokens: cli.tokens,
        ast: cli.ast,
        disasm: cli.shows_disasm(),
    };

    let mut failed = false;
    if let Some(code) = &cli.eval {
        failed |= !compile_eval(code, &options, views);
    }
    if !cli.files.is_empty() {
        failed |= !compile_files(&cli.files, &options, views)?;
    }

    if cli.wants_repl() {
        let mut repl = repl::Repl::new(options, &config.repl)?;
        repl.run()?;
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Compiles `-e` input. Returns false on failure.
fn compile_eval(code: &str, options: &CompileOptions, views: Views) -> bool {
    match Session::new(options.clone()).compile(code) {
        Ok(compilation) => {
            report::print_diagnostics(&compilation.diagnostics);
            report::print_views(code, &compilation, views);
            true
        }
        Err(err) => {
            report::print_error(&err);
            false
        }
    }
}

/// Compiles every file in parallel. Returns false if any failed.
fn compile_files(paths: &[PathBuf], options: &CompileOptions, views: Views) -> Result<bool> {
    let sources = paths
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let borrowed: Vec<&str> = sources.iter().map(String::as_str).collect();

    let results = xenon_core::compile_parallel(&borrowed, options);

    let mut ok = true;
    for ((path, source), result) in paths.iter().zip(&borrowed).zip(results) {
        if paths.len() > 1 {
            println!("{}", format!("==> {} <==", path.display()).bright_cyan().bold());
        }
        match result {
            Ok(compilation) => {
                report::print_diagnostics(&compilation.diagnostics);
                report::print_views(source, &compilation, views);
            }
            Err(err) => {
                report::print_error(&err);
                ok = false;
            }
        }
    }
    Ok(ok)
}
