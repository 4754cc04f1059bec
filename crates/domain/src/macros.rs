//! Macro for implementing string conversions on status enums
//!
//! Order, dealer and role enums travel over the wire as lowercase strings.
//! The macro gives each one `as_str`, `Display` and a case-insensitive
//! `FromStr` from a single variant table.
//!
//! # Example
//!
//! ```rust
//! use eshop_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ShipmentState {
//!     Packed,
//!     InTransit,
//! }
//!
//! impl_domain_status_conversions!(ShipmentState {
//!     Packed => "packed",
//!     InTransit => "in_transit",
//! });
//!
//! assert_eq!(ShipmentState::InTransit.as_str(), "in_transit");
//! assert_eq!("PACKED".parse::<ShipmentState>(), Ok(ShipmentState::Packed));
//! ```

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for status enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire strings
///
/// Parsing is case-insensitive; output is always the wire string.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation of the variant.
            #[must_use]
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
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
