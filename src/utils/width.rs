use std::fmt;

use crate::error::{BitsError, Result};

/// An optional width given in bits, bytes, or both.
///
/// Every helper that takes a width accepts it in either unit. When both
/// are present they must describe the same number of bits.
///
/// ```
/// use bitwidth::WidthSpec;
///
/// assert_eq!(WidthSpec::bytes(2).resolve().unwrap(), Some(16));
/// assert_eq!(WidthSpec::none().resolve().unwrap(), None);
/// assert!(WidthSpec::both(7, 1).resolve().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidthSpec {
    /// Width in bits.
    pub bits: Option<u64>,
    /// Width in bytes.
    pub bytes: Option<u64>,
}

impl WidthSpec {
    /// No explicit width; the helper picks its default.
    pub const fn none() -> Self {
        WidthSpec {
            bits: None,
            bytes: None,
        }
    }

    /// A width of `bits` bits.
    pub const fn bits(bits: u64) -> Self {
        WidthSpec {
            bits: Some(bits),
            bytes: None,
        }
    }

    /// A width of `bytes` bytes.
    pub const fn bytes(bytes: u64) -> Self {
        WidthSpec {
            bits: None,
            bytes: Some(bytes),
        }
    }

    /// Both units at once. They are checked for agreement on use.
    pub const fn both(bits: u64, bytes: u64) -> Self {
        WidthSpec {
            bits: Some(bits),
            bytes: Some(bytes),
        }
    }

    /// Sets the width in bits, keeping any byte width.
    pub fn with_bits(mut self, bits: u64) -> Self {
        self.bits = Some(bits);
        self
    }

    /// Sets the width in bytes, keeping any bit width.
    pub fn with_bytes(mut self, bytes: u64) -> Self {
        self.bytes = Some(bytes);
        self
    }

    /// True when neither unit was given.
    pub fn is_unset(&self) -> bool {
        self.bits.is_none() && self.bytes.is_none()
    }

    /// Resolves to a number of bits.
    ///
    /// Returns `Ok(None)` when no width was given and an error when bits
    /// and bytes disagree.
    pub fn resolve(&self) -> Result<Option<u64>> {
        match (self.bits, self.bytes) {
            (Some(bits), Some(bytes)) => {
                if bytes_to_bits(bytes)? != bits {
                    return Err(BitsError::Width(format!(
                        "Incompatible bytes ({}) and bits ({})",
                        bytes, bits
                    )));
                }
                Ok(Some(bits))
            }
            (Some(bits), None) => Ok(Some(bits)),
            (None, Some(bytes)) => bytes_to_bits(bytes).map(Some),
            (None, None) => Ok(None),
        }
    }
}

pub(crate) fn bytes_to_bits(bytes: u64) -> Result<u64> {
    bytes
        .checked_mul(8)
        .ok_or_else(|| BitsError::Width(format!("{} bytes is too wide", bytes)))
}

impl fmt::Display for WidthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.bits, self.bytes) {
            (Some(bits), Some(bytes)) => write!(f, "width_bits={}, width_bytes={}", bits, bytes),
            (Some(bits), None) => write!(f, "width_bits={}", bits),
            (None, Some(bytes)) => write!(f, "width_bytes={}", bytes),
            (None, None) => Ok(()),
        }
    }
}

impl From<u64> for WidthSpec {
    fn from(bits: u64) -> Self {
        WidthSpec::bits(bits)
    }
}
