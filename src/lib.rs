#![doc(html_root_url = "https://docs.rs/bitwidth/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

//! # bitwidth - width-tagged integers
//!
//! `bitwidth` pairs an arbitrary-precision signed integer with an explicit
//! bit width and provides the two's-complement helpers that go with it.
//!
//! ## Features
//!
//! - Minimum bit and byte widths of any integer
//! - Largest signed and unsigned values for a width
//! - Signed/unsigned reinterpretation under a width given in bits or bytes
//! - Bit-range extraction
//! - [`Bits`], a value that always fits its width, with comparison and
//!   arithmetic against plain integers
//!
//! ## Quick Start
//!
//! ```rust
//! use bitwidth::{to_unsigned, Bits, WidthSpec};
//! use num_bigint::BigInt;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     assert_eq!(to_unsigned(&BigInt::from(-1), WidthSpec::bytes(2))?, BigInt::from(65535));
//!
//!     let b = Bits::new(-2, WidthSpec::bits(4))?;
//!     assert_eq!(b.to_string(), "0b1110");
//!
//!     let sum = (&b + 10)?;
//!     assert_eq!(sum, 8);
//!     assert_eq!(sum.width(), 4);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - `utils`: the bit helpers, width arguments and call tracing
//! - `value`: the [`Bits`] type and its operators
//! - `error`: the error type and `Result` alias
//! - `config`: tracing configuration
//!
//! ## Logging
//!
//! Helpers log their intermediate results through the `log` facade at debug
//! and trace level. Nothing is emitted unless the application installs a
//! logger. Per-call tracing is opt-in, see [`config::TraceConfig`].

/// Tracing configuration
pub mod config;

/// Error types and utilities
pub mod error;

/// Bit helpers and width arguments
pub mod utils;

/// Width-tagged integer
pub mod value;

pub use error::{BitsError, Result};
pub use utils::{
    extract_bits, max_signed, max_unsigned, minimal_bits, minimal_bytes, sign_bit, to_signed,
    to_unsigned, WidthSpec,
};
pub use value::Bits;
