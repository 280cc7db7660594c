// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Configuration management for xenon.
//!
//! Settings come from an optional `xenon.toml`:
//!
//! ```toml
//! [compiler]
//! undefined_names = "deny"
//! max_errors = 10
//!
//! [repl]
//! max_history = 500
//! show_ast = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use xenon_core::{CompileOptions, NamePolicy};

/// Name of the file looked up in the working directory.
pub const CONFIG_FILE: &str = "xenon.toml";

/// Configuration for xenon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compiler settings
    pub compiler: CompilerSection,

    /// REPL settings
    pub repl: ReplSection,
}

/// `[compiler]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSection {
    /// `allow`, `warn` or `deny`
    pub undefined_names: String,

    /// Parse errors collected before giving up
    pub max_errors: usize,
}

impl Default for CompilerSection {
    fn default() -> Self {
        let options = CompileOptions::default();
        Self {
            undefined_names: options.undefined_names.to_string(),
            max_errors: options.max_errors,
        }
    }
}

/// `[repl]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplSection {
    /// History file; defaults to the user's local data directory
    pub history_file: Option<PathBuf>,

    /// Entries kept in history
    pub max_history: usize,

    /// Print lexemes for each line
    pub show_tokens: bool,

    /// Print the tree for each line
    pub show_ast: bool,
}

impl Default for ReplSection {
    fn default() -> Self {
        Self {
            history_file: None,
            max_history: 1000,
            show_tokens: false,
            show_ast: false,
        }
    }
}

impl Config {
    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Parses configuration text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads `explicit` if given, else `./xenon.toml` if it exists, else
    /// the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Converts the compiler section into library options.
    pub fn compile_options(&self) -> Result<CompileOptions> {
        let undefined_names: NamePolicy = self
            .compiler
            .undefined_names
            .parse()
            .map_err(anyhow::Error::msg)?;
        Ok(CompileOptions {
            undefined_names,
            max_errors: self.compiler.max_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.compile_options().unwrap(), CompileOptions::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse("[compiler]\nundefined_names = \"deny\"\n").unwrap();
        let options = config.compile_options().unwrap();
        assert_eq!(options.undefined_names, NamePolicy::Deny);
        assert_eq!(options.max_errors, 32);
        assert_eq!(config.repl.max_history, 1000);
    }

    #[test]
    fn test_repl_section() {
        let config = Config::parse("[repl]\nshow_ast = true\nhistory_file = \"/tmp/h\"\n").unwrap();
        assert!(config.repl.show_ast);
        assert_eq!(config.repl.history_file, Some(PathBuf::from("/tmp/h")));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let config = Config::parse("[compiler]\nundefined_names = \"loud\"\n").unwrap();
        let err = config.compile_options().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Config::parse("[compiler\n").is_err());
    }
}
