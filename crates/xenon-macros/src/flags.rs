// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Flag set macro.

/// Create a bit flag set over an unsigned integer.
///
/// The empty set displays as `None`; otherwise the names of the set flags
/// are joined with ` | ` in declaration order.
///
/// # Example
///
/// ```
/// use xenon_macros::flag_set;
///
/// flag_set! {
///     /// Parameter traits.
///     pub Traits: u32 {
///         VARIADIC = 0b01 => "Variadic",
///         HINTED = 0b10 => "Hinted",
///     }
/// }
///
/// let traits = Traits::VARIADIC | Traits::HINTED;
/// assert!(traits.contains(Traits::HINTED));
/// assert_eq!(traits.bits(), 3);
/// assert_eq!(traits.to_string(), "Variadic | Hinted");
/// assert_eq!(Traits::empty().to_string(), "None");
/// ```
#[macro_export]
macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident : $repr:ty {
            $($(#[$fmeta:meta])* $flag:ident = $value:expr => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name($repr);

        impl $name {
            $($(#[$fmeta])* pub const $flag: Self = Self($value);)+

            const NAMED: &'static [(Self, &'static str)] = &[$((Self::$flag, $label)),+];

            /// The set with no flags.
            pub const fn empty() -> Self {
                Self(0)
            }

            /// Rebuilds a set from raw bits, dropping unknown bits.
            pub const fn from_bits_truncate(bits: $repr) -> Self {
                Self(bits & ($($value)|+))
            }

            /// The raw bits.
            pub const fn bits(&self) -> $repr {
                self.0
            }

            /// True if every flag of `other` is set.
            pub const fn contains(&self, other: Self) -> bool {
                (self.0 & other.0) == other.0
            }

            /// Sets the flags of `other`.
            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            /// Clears the flags of `other`.
            pub fn remove(&mut self, other: Self) {
                self.0 &= !other.0;
            }

            /// True if no flag is set.
            pub const fn is_empty(&self) -> bool {
                self.0 == 0
            }

            /// Names of the set flags, in declaration order.
            pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
                Self::NAMED
                    .iter()
                    .filter(|(flag, _)| flag.0 != 0 && self.contains(*flag))
                    .map(|(_, label)| *label)
            }
        }

        impl ::std::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl ::std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl ::std::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let mut first = true;
                for label in self.names() {
                    if !first {
                        f.write_str(" | ")?;
                    }
                    f.write_str(label)?;
                    first = false;
                }
                if first {
                    f.write_str("None")?;
                }
                Ok(())
            }
        }
    };
}
