// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Enum table macros.

/// Define a C-style enum where every variant has a source spelling.
///
/// Generates `as_str`, `lookup`, an `ALL` slice in declaration order and a
/// `Display` impl that writes the spelling.
///
/// # Example
///
/// ```
/// use xenon_macros::str_enum;
///
/// str_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub enum Keyword {
///         /// Conditional
///         If => "if",
///         Else => "else",
///     }
/// }
///
/// assert_eq!(Keyword::If.as_str(), "if");
/// assert_eq!(Keyword::lookup("else"), Some(Keyword::Else));
/// assert_eq!(Keyword::lookup("elif"), None);
/// assert_eq!(Keyword::Else.to_string(), "else");
/// ```
#[macro_export]
macro_rules! str_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $str:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the source spelling of this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }

            /// Finds the variant spelled `s`.
            pub fn lookup(s: &str) -> Option<Self> {
                match s {
                    $($str => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

/// Define a `#[repr(u8)]` instruction set.
///
/// Each variant gets an explicit byte and a mnemonic. The macro generates
/// `TryFrom<u8>` (the error carries the rejected byte), `mnemonic` and a
/// `Display` impl that writes the mnemonic.
///
/// # Example
///
/// ```
/// use xenon_macros::opcode_enum;
///
/// opcode_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Op {
///         Nop = 0 => "nop",
///         Load = 1 => "load",
///     }
/// }
///
/// assert_eq!(Op::Load as u8, 1);
/// assert_eq!(Op::try_from(0u8), Ok(Op::Nop));
/// assert_eq!(Op::try_from(9u8), Err(9));
/// assert_eq!(Op::Load.mnemonic(), "load");
/// ```
#[macro_export]
macro_rules! opcode_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal => $mnemonic:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// Every opcode, in encoding order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the assembler mnemonic.
            pub const fn mnemonic(&self) -> &'static str {
                match self {
                    $(Self::$variant => $mnemonic,)+
                }
            }
        }

        impl ::std::convert::TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(byte: u8) -> ::std::result::Result<Self, u8> {
                match byte {
                    $($value => Ok(Self::$variant),)+
                    other => Err(other),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad(self.mnemonic())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    str_enum! {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Punct {
            Comma => ",",
            Colon => ":",
            Arrow => "=>",
        }
    }

    opcode_enum! {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Code {
            Halt = 0 => "halt",
            Push = 4 => "push",
            Pop = 5 => "pop",
        }
    }

    #[test]
    fn test_str_enum_round_trips_spelling() {
        for punct in Punct::ALL {
            assert_eq!(Punct::lookup(punct.as_str()), Some(*punct));
        }
    }

    #[test]
    fn test_str_enum_rejects_unknown() {
        assert_eq!(Punct::lookup(";"), None);
        assert_eq!(Punct::lookup(""), None);
    }

    #[test]
    fn test_str_enum_display() {
        assert_eq!(format!("{}", Punct::Arrow), "=>");
        assert_eq!(format!("{:>3}", Punct::Comma), "  ,");
    }

    #[test]
    fn test_opcode_enum_sparse_values() {
        assert_eq!(Code::try_from(4u8), Ok(Code::Push));
        assert_eq!(Code::try_from(1u8), Err(1));
        assert_eq!(Code::Pop as u8, 5);
    }

    #[test]
    fn test_opcode_enum_display_pads() {
        assert_eq!(format!("{:<6}|", Code::Pop), "pop   |");
        assert_eq!(Code::ALL.len(), 3);
    }
}
