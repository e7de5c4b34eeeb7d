use std::cmp::Ordering;
use std::fmt;

use log::trace;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed};

use crate::error::{BitsError, Result};
use crate::utils::{extract_bits, minimal_bits, minimal_bytes, to_signed, to_unsigned, WidthSpec};

/// An arbitrary-precision signed integer tagged with a bit width.
///
/// The width always holds the value: `width >= minimal_bits(value)`, and
/// every constructor and setter checks this before anything changes.
///
/// Equality and ordering look at the value only, so two instances with the
/// same value and different widths compare equal.
///
/// Instances are plain data. Sharing one across threads for reading is fine;
/// mutating it needs `&mut`, so concurrent writers must bring their own lock.
///
/// Example:
/// ```
/// use bitwidth::{Bits, WidthSpec};
///
/// let b = Bits::from_value(127).unwrap();
/// assert_eq!(b.width(), 7);
///
/// let b = Bits::new(-1, WidthSpec::bytes(1)).unwrap();
/// assert_eq!(b.to_string(), "0b11111111");
/// ```
#[derive(Clone)]
pub struct Bits {
    value: BigInt,
    width: u64,
}

/// Width picked for `value` when the caller gives none.
///
/// Positive values get their minimal bit width, negative values are rounded
/// up to whole bytes, and zero has no inferable width.
fn inferred_width(value: &BigInt) -> Result<u64> {
    if value.is_positive() {
        Ok(minimal_bits(value))
    } else if value.is_negative() {
        Ok(minimal_bytes(value) * 8)
    } else {
        Err(BitsError::Width(
            "Can not infer a number of bits for 0".into(),
        ))
    }
}

fn check_width(value: &BigInt, width: u64) -> Result<()> {
    if width < 1 {
        return Err(BitsError::Width("Bits must be at least one bit wide".into()));
    }
    if width < minimal_bits(value) {
        return Err(BitsError::Width(format!(
            "{} is too few bits to fit {}",
            width, value
        )));
    }
    Ok(())
}

impl Bits {
    /// Creates a value with an explicit or inferred width.
    ///
    /// Bits and bytes given together must agree. With no width, positive
    /// values use [`minimal_bits`], negative values use whole bytes and zero
    /// is rejected.
    pub fn new(value: impl Into<BigInt>, width: WidthSpec) -> Result<Self> {
        let value = value.into();
        let width = match width.resolve()? {
            Some(bits) => bits,
            None => inferred_width(&value)?,
        };
        check_width(&value, width)?;
        trace!("Bits({}) with {} bits", value, width);
        Ok(Bits { value, width })
    }

    /// Creates a value with an inferred width.
    pub fn from_value(value: impl Into<BigInt>) -> Result<Self> {
        Self::new(value, WidthSpec::none())
    }

    /// Creates a value from a float, which has to be a whole number.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(BitsError::Type(format!("Invalid value {}: not an integer", value)));
        }
        let value = BigInt::from_f64(value)
            .ok_or_else(|| BitsError::Type(format!("Invalid value {}", value)))?;
        Self::from_value(value)
    }

    /// The stored value.
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// Width in bits.
    pub fn width(&self) -> u64 {
        self.width
    }

    /// Consumes `self`, returning the value.
    pub fn into_value(self) -> BigInt {
        self.value
    }

    /// Replaces the value, keeping the current width.
    ///
    /// Fails and leaves `self` untouched when the new value does not fit.
    pub fn set_value(&mut self, value: impl Into<BigInt>) -> Result<()> {
        let value = value.into();
        if minimal_bits(&value) > self.width {
            return Err(BitsError::Width(format!(
                "{} will not fit in {} bits",
                value, self.width
            )));
        }
        self.value = value;
        Ok(())
    }

    /// Replaces the width, keeping the current value.
    ///
    /// Fails and leaves `self` untouched when the value would not fit.
    pub fn set_width(&mut self, width: u64) -> Result<()> {
        check_width(&self.value, width)?;
        self.width = width;
        Ok(())
    }

    /// A copy with a different value and the same width.
    pub fn with_value(&self, value: impl Into<BigInt>) -> Result<Self> {
        let mut bits = self.clone();
        bits.set_value(value)?;
        Ok(bits)
    }

    /// A copy with a different width and the same value.
    pub fn with_width(&self, width: u64) -> Result<Self> {
        let mut bits = self.clone();
        bits.set_width(width)?;
        Ok(bits)
    }

    /// The two's-complement bit pattern at this width, read as unsigned.
    pub fn unsigned(&self) -> Result<BigInt> {
        to_unsigned(&self.value, WidthSpec::bits(self.width))
    }

    /// The bit pattern at this width read back as signed.
    ///
    /// A positive value whose top bit fills the width comes back negative,
    /// and one-bit values are rejected.
    pub fn signed(&self) -> Result<BigInt> {
        to_signed(&self.unsigned()?, WidthSpec::bits(self.width))
    }

    /// Extracts bits of the stored value, see [`extract_bits`].
    pub fn bit_range(&self, start: u64, end: Option<u64>, length: Option<u64>) -> Result<BigInt> {
        extract_bits(&self.value, start, end, length)
    }

    /// Compares the stored value against a plain integer.
    pub fn compare_to(&self, other: impl Into<BigInt>) -> Ordering {
        self.value.cmp(&other.into())
    }

    fn render(&self) -> std::result::Result<String, fmt::Error> {
        let pattern = self.unsigned().map_err(|_| fmt::Error)?;
        Ok(format!("0b{:0width$b}", pattern, width = self.width as usize))
    }
}

impl TryFrom<f64> for Bits {
    type Error = BitsError;

    fn try_from(value: f64) -> Result<Self> {
        Bits::from_f64(value)
    }
}

impl PartialEq for Bits {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Bits {}

impl PartialOrd for Bits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.value.cmp(&other.value))
    }
}

impl PartialEq<BigInt> for Bits {
    fn eq(&self, other: &BigInt) -> bool {
        self.value == *other
    }
}

impl PartialOrd<BigInt> for Bits {
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        Some(self.value.cmp(other))
    }
}

macro_rules! compare_with {
    ($($t:ty),*) => {$(
        impl PartialEq<$t> for Bits {
            fn eq(&self, other: &$t) -> bool {
                self.value == BigInt::from(*other)
            }
        }

        impl PartialOrd<$t> for Bits {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                Some(self.value.cmp(&BigInt::from(*other)))
            }
        }
    )*};
}

compare_with!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render()?)
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits({})", self.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_initialization() {
        assert!(Bits::from_f64(1.1).unwrap_err().is_type());
        assert!(Bits::try_from(f64::NAN).unwrap_err().is_type());
        assert!(Bits::new(1, WidthSpec::bits(0)).unwrap_err().is_width());
        assert!(Bits::new(1, WidthSpec::bytes(0)).unwrap_err().is_width());
        assert!(Bits::new(1, WidthSpec::both(0, 1)).unwrap_err().is_width());

        let b = Bits::from_value(127).unwrap();
        assert_eq!(b.value(), &BigInt::from(127));
        assert_eq!(b.width(), 7);

        let b = Bits::from_value(-255).unwrap();
        assert_eq!(b.value(), &BigInt::from(-255));
        assert_eq!(b.width(), 16);

        let b = Bits::from_f64(3.0).unwrap();
        assert_eq!(b.width(), 2);
    }

    #[test]
    fn test_explicit_widths() {
        assert_eq!(Bits::new(5, WidthSpec::bits(12)).unwrap().width(), 12);
        assert_eq!(Bits::new(5, WidthSpec::bytes(2)).unwrap().width(), 16);
        assert_eq!(Bits::new(5, WidthSpec::both(8, 1)).unwrap().width(), 8);
        assert_eq!(Bits::new(0, WidthSpec::bits(1)).unwrap().width(), 1);

        assert!(Bits::new(255, WidthSpec::bits(7)).unwrap_err().is_width());
        assert!(Bits::new(-128, WidthSpec::bits(8)).unwrap_err().is_width());
        assert!(Bits::new(5, WidthSpec::both(9, 1)).unwrap_err().is_width());
    }

    #[test]
    fn test_zero_needs_a_width() {
        assert!(Bits::from_value(0).unwrap_err().is_width());
    }

    #[test]
    fn test_inference_is_asymmetric() {
        assert_eq!(Bits::from_value(1).unwrap().width(), 1);
        assert_eq!(Bits::from_value(-1).unwrap().width(), 8);
        assert_eq!(Bits::from_value(256).unwrap().width(), 9);
        assert_eq!(Bits::from_value(-256).unwrap().width(), 16);
    }

    #[test]
    fn test_setters_revalidate() {
        let mut b = Bits::from_value(15).unwrap();
        assert!(b.set_value(16).unwrap_err().is_width());
        assert_eq!(b.value(), &BigInt::from(15));

        assert!(b.set_width(3).unwrap_err().is_width());
        assert_eq!(b.width(), 4);

        b.set_width(8).unwrap();
        b.set_value(200).unwrap();
        assert_eq!(b.value(), &BigInt::from(200));
        assert_eq!(b.width(), 8);

        b.set_value(-100).unwrap();
        assert!(b.set_width(7).is_err());
    }

    #[test]
    fn test_rederive() {
        let b = Bits::from_value(15).unwrap();
        let wide = b.with_width(16).unwrap();
        assert_eq!(wide.width(), 16);
        assert_eq!(b.width(), 4);

        let other = wide.with_value(-300).unwrap();
        assert_eq!(other.value(), &BigInt::from(-300));
        assert_eq!(other.width(), 16);
        assert!(b.with_value(-9).is_err());
        assert!(b.with_width(2).is_err());
    }

    #[test]
    fn test_comparisons() {
        let b = Bits::from_value(15).unwrap();
        assert!(b >= 2);
        assert!(b != 2);
        assert!(!(b == 2));
        assert!(b == 15u8);
        assert!(b < 16i64);
        assert!(b <= BigInt::from(15));
        assert!(b == BigInt::from(15) && b != BigInt::from(-15));
        assert!(b > 3usize && b < u128::MAX);
        assert!(b > -1);
        assert_eq!(b.compare_to(20), Ordering::Less);

        // Width plays no part in equality
        let wide = Bits::new(15, WidthSpec::bytes(4)).unwrap();
        assert_eq!(b, wide);
        assert!(Bits::from_value(3).unwrap() < wide);
    }

    #[test]
    fn test_display() {
        assert_eq!(Bits::from_value(5).unwrap().to_string(), "0b101");
        assert_eq!(Bits::new(5, WidthSpec::bytes(1)).unwrap().to_string(), "0b00000101");
        assert_eq!(Bits::from_value(-1).unwrap().to_string(), "0b11111111");
        assert_eq!(Bits::new(-2, WidthSpec::bits(3)).unwrap().to_string(), "0b110");
        assert_eq!(Bits::new(0, WidthSpec::bits(4)).unwrap().to_string(), "0b0000");
        assert_eq!(format!("{:?}", Bits::from_value(-1).unwrap()), "Bits(0b11111111)");
    }

    #[test]
    fn test_reinterpretation() {
        let b = Bits::new(-2, WidthSpec::bits(3)).unwrap();
        assert_eq!(b.unsigned().unwrap(), BigInt::from(6));
        assert_eq!(b.signed().unwrap(), BigInt::from(-2));

        let b = Bits::from_value(6).unwrap();
        assert_eq!(b.signed().unwrap(), BigInt::from(-2));
        assert_eq!(b.bit_range(1, Some(3), None).unwrap(), BigInt::from(0b11));
    }

    #[quickcheck]
    fn prop_width_always_fits(v: i64, extra: u8) -> bool {
        let width = minimal_bits(&BigInt::from(v)) + u64::from(extra % 8) + 1;
        match Bits::new(v, WidthSpec::bits(width)) {
            Ok(b) => b.width() == width && b.to_string().len() == width as usize + 2,
            Err(_) => false,
        }
    }

    #[quickcheck]
    fn prop_inferred_width(v: i64) -> bool {
        match Bits::from_value(v) {
            Ok(b) => b.width() >= minimal_bits(b.value()) && b == v,
            Err(e) => v == 0 && e.is_width(),
        }
    }
}
