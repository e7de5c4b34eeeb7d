//! # Bit Helpers
//!
//! Free functions for two's-complement arithmetic on arbitrary-precision
//! integers:
//!
//! - minimum bit and byte widths of a value
//! - largest signed and unsigned values for a width
//! - signed/unsigned reinterpretation under a width
//! - bit-range extraction
//!
//! ```rust
//! use bitwidth::utils::{minimal_bits, to_signed, WidthSpec};
//! use num_bigint::BigInt;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! assert_eq!(minimal_bits(&BigInt::from(-255)), 9);
//! assert_eq!(to_signed(&BigInt::from(0b11), WidthSpec::bits(2))?, BigInt::from(-1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Tracing
//!
//! The `trace` module wraps the same helpers with an observer that sees
//! every call before it runs. See [`crate::config::TraceConfig`].

/// Two's-complement helper functions
pub mod bits;

/// Call tracing for the helpers
pub mod trace;

/// Width arguments in bits and/or bytes
pub mod width;

pub use bits::*;
pub use width::WidthSpec;
