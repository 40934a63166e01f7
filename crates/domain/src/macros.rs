//! Macro for implementing Display and FromStr for string-backed enums
//!
//! Record type names, environment names and similar closed sets travel as
//! plain strings over the API and through configuration. This macro wires
//! one canonical spelling per variant into both directions.
//!
//! # Example
//!
//! ```rust
//! use nowip_domain::impl_str_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mode {
//!     Fast,
//!     Safe,
//! }
//!
//! impl_str_conversions!(Mode {
//!     Fast => "fast",
//!     Safe => "safe",
//! });
//!
//! assert_eq!("FAST".parse::<Mode>().unwrap(), Mode::Fast);
//! assert_eq!(Mode::Safe.to_string(), "safe");
//! ```

/// Implements `as_str`, Display and FromStr for a fieldless enum
///
/// - Display writes the canonical spelling given in the mapping
/// - FromStr matches ASCII case-insensitively and trims whitespace
/// - The parse error names the enum and echoes the rejected input
#[macro_export]
macro_rules! impl_str_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical string form.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Flavor {
        Plain,
        Quad,
    }

    impl_str_conversions!(Flavor {
        Plain => "A",
        Quad => "AAAA",
    });

    #[test]
    fn display_uses_canonical_spelling() {
        assert_eq!(Flavor::Plain.to_string(), "A");
        assert_eq!(Flavor::Quad.to_string(), "AAAA");
        assert_eq!(Flavor::Quad.as_str(), "AAAA");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Flavor::from_str("aaaa").unwrap(), Flavor::Quad);
        assert_eq!(Flavor::from_str(" a ").unwrap(), Flavor::Plain);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        let err = Flavor::from_str("AA").unwrap_err();
        assert!(err.contains("Flavor"));
        assert!(err.contains("AA"));
    }
}
