//! The width-tagged integer and its operators.

mod bits;
mod ops;

pub use bits::Bits;
