// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Declarative macros for the closed tables of the Xenon compiler.
//!
//! A compiler front-end is full of small closed enumerations that need a
//! source spelling or a byte encoding: keywords, token classes, opcodes,
//! method flags. These macros generate the enum together with its lookup
//! tables so the spelling lives next to the variant.
//!
//! # Macros Overview
//!
//! - [`str_enum!`] - C-style enum with a source spelling per variant
//! - [`opcode_enum!`] - `#[repr(u8)]` enum with byte conversion and mnemonics
//! - [`flag_set!`] - Bit flag set over an unsigned integer
//!
//! # Examples
//!
//! ```
//! use xenon_macros::str_enum;
//!
//! str_enum! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub enum Word {
//!         Fn => "fn",
//!         Class => "class",
//!     }
//! }
//!
//! assert_eq!(Word::lookup("fn"), Some(Word::Fn));
//! assert_eq!(Word::Class.as_str(), "class");
//! assert_eq!(Word::ALL.len(), 2);
//! ```

#![warn(missing_docs)]

mod flags;
mod tables;
