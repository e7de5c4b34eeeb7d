//! Two's-complement helpers on arbitrary-precision integers.
//!
//! All functions are pure. Widths come in as a [`WidthSpec`] so callers can
//! say "8 bits", "1 byte" or both; disagreeing pairs are rejected.

use log::{debug, trace};
use num_bigint::BigInt;
use num_traits::{One, Signed};

use super::width::{bytes_to_bits, WidthSpec};
use crate::error::{BitsError, Result};

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn pow2(bits: u64) -> BigInt {
    BigInt::one() << bits
}

/// Returns 1 if `val` is negative, otherwise 0.
pub fn sign_bit(val: &BigInt) -> u8 {
    if val.is_negative() {
        1
    } else {
        0
    }
}

/// Smallest number of bits that can hold `val` in two's complement.
///
/// Negative values always reserve one extra bit for the sign, so
/// `minimal_bits(255) == 8` while `minimal_bits(-255) == 9`. Zero needs no
/// bits at all.
pub fn minimal_bits(val: &BigInt) -> u64 {
    let bits = val.bits() + u64::from(sign_bit(val));
    trace!("Minimum of {} bits for {}", bits, val);
    bits
}

/// [`minimal_bits`] rounded up to whole bytes.
pub fn minimal_bytes(val: &BigInt) -> u64 {
    let bytes = minimal_bits(val).div_ceil(8);
    trace!("Minimum of {} bytes for {}", bytes, val);
    bytes
}

fn required_width(width: WidthSpec, func: &str) -> Result<u64> {
    width
        .resolve()?
        .ok_or_else(|| BitsError::Width(format!("{} requires at least one width argument", func)))
}

/// Largest unsigned value that fits the given width: `2^width - 1`.
pub fn max_unsigned(width: WidthSpec) -> Result<BigInt> {
    let bits = required_width(width, "max_unsigned")?;
    Ok(pow2(bits) - 1)
}

/// Largest signed value that fits the given width: `2^(width-1) - 1`.
pub fn max_signed(width: WidthSpec) -> Result<BigInt> {
    let bits = required_width(width, "max_signed")?;
    if bits == 0 {
        return Err(BitsError::Width(
            "Signed integer must have at least one bit".into(),
        ));
    }
    Ok(pow2(bits - 1) - 1)
}

/// Reinterprets `val` as an unsigned two's-complement pattern.
///
/// Width rules:
/// - bits and bytes together must agree, nothing else is checked;
/// - bytes alone must be at least 1 and hold `minimal_bytes(val)`;
/// - bits alone must be at least 1 and hold `minimal_bits(val)`;
/// - with no width the value is framed in `minimal_bytes(val)` whole bytes.
///
/// Negative values map to `2^width + val`. Non-negative values are returned
/// unchanged, even when they are wider than an explicit bits+bytes width.
///
/// ```
/// use bitwidth::{to_unsigned, WidthSpec};
/// use num_bigint::BigInt;
///
/// let minus_one = BigInt::from(-1);
/// assert_eq!(to_unsigned(&minus_one, WidthSpec::none()).unwrap(), BigInt::from(255));
/// assert_eq!(to_unsigned(&minus_one, WidthSpec::bits(2)).unwrap(), BigInt::from(3));
/// ```
pub fn to_unsigned(val: &BigInt, width: WidthSpec) -> Result<BigInt> {
    let bits = match (width.bits, width.bytes) {
        (Some(bits), Some(_)) => {
            width.resolve()?;
            bits
        }
        (None, Some(bytes)) => {
            if bytes < 1 {
                return Err(BitsError::Width(
                    "Unsigned integer must have at least one byte".into(),
                ));
            }
            if bytes < minimal_bytes(val) {
                return Err(BitsError::Width(format!(
                    "{} can not fit in {} byte{}",
                    val,
                    bytes,
                    plural(bytes)
                )));
            }
            bytes_to_bits(bytes)?
        }
        (Some(bits), None) => {
            if bits < 1 {
                return Err(BitsError::Width(
                    "Unsigned integer must have at least one bit".into(),
                ));
            }
            if bits < minimal_bits(val) {
                return Err(BitsError::Width(format!(
                    "{} can not fit in {} bit{}",
                    val,
                    bits,
                    plural(bits)
                )));
            }
            bits
        }
        (None, None) => {
            let bits = minimal_bytes(val) * 8;
            debug!("Defaulting to {} bits", bits);
            bits
        }
    };

    let result = if val.is_negative() {
        pow2(bits) + val
    } else {
        val.clone()
    };

    debug!(
        "to_unsigned({}, {}): {:0width$b} ({})",
        val,
        bits,
        result,
        result,
        width = bits as usize
    );
    Ok(result)
}

/// Reinterprets the unsigned pattern `val` as a signed two's-complement value.
///
/// Width rules match [`to_unsigned`] except that an explicit bit width must
/// be at least 2 and the value is never checked against the width.
///
/// When `val >> (width - 1)` is exactly 1 the top bit of the frame is set and
/// the result is `val - 2^width`. Anything else, including values that are
/// already negative or that carry bits above the frame, is passed through.
pub fn to_signed(val: &BigInt, width: WidthSpec) -> Result<BigInt> {
    let bits = match (width.bits, width.bytes) {
        (Some(bits), Some(_)) => {
            width.resolve()?;
            bits
        }
        (None, Some(bytes)) => {
            if bytes < 1 {
                return Err(BitsError::Width(
                    "Signed integer must have at least one byte".into(),
                ));
            }
            bytes_to_bits(bytes)?
        }
        (Some(bits), None) => {
            if bits < 2 {
                return Err(BitsError::Width(
                    "Signed integer must have at least two bits".into(),
                ));
            }
            bits
        }
        (None, None) => {
            let bits = minimal_bytes(val) * 8;
            debug!("Defaulting to {} bits", bits);
            bits
        }
    };

    if bits == 0 {
        return Err(BitsError::Width(format!(
            "Can not frame {} in zero bits",
            val
        )));
    }

    let result = if (val >> (bits - 1)).is_one() {
        val - pow2(bits)
    } else {
        val.clone()
    };

    debug!("to_signed({}, {}): {}", val, bits, result);
    Ok(result)
}

/// Extracts a run of bits from `val`, counting from the least significant bit.
///
/// The run starts at `start` and is sized by `end` (exclusive), by `length`,
/// or by both if they agree. With neither a single bit is read. The result is
/// always non-negative; negative inputs are read as their infinite
/// two's-complement expansion.
///
/// ```
/// use bitwidth::extract_bits;
/// use num_bigint::BigInt;
///
/// let v = BigInt::from(0b1011_0110);
/// assert_eq!(extract_bits(&v, 1, Some(4), None).unwrap(), BigInt::from(0b011));
/// assert_eq!(extract_bits(&v, 4, None, Some(4)).unwrap(), BigInt::from(0b1011));
/// ```
pub fn extract_bits(
    val: &BigInt,
    start: u64,
    end: Option<u64>,
    length: Option<u64>,
) -> Result<BigInt> {
    let length = match (end, length) {
        (Some(end), Some(length)) => {
            if end.checked_sub(start) != Some(length) {
                return Err(BitsError::Width(format!(
                    "Incompatible length {} and end {}",
                    length, end
                )));
            }
            length
        }
        (None, Some(length)) => length,
        (Some(end), None) => end.checked_sub(start).ok_or_else(|| {
            BitsError::Width(format!("End bit {} comes before start bit {}", end, start))
        })?,
        (None, None) => 1,
    };

    let mask = pow2(length) - 1;
    let result = (val >> start) & mask;

    debug!(
        "extract_bits({}, {}, {:?}, {:?}): {}",
        val, start, end, length, result
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn test_sign_bit() {
        assert_eq!(sign_bit(&big(1)), 0);
        assert_eq!(sign_bit(&big(0)), 0);
        assert_eq!(sign_bit(&big(-1)), 1);
    }

    #[test]
    fn test_minimal_bits() {
        assert_eq!(minimal_bits(&big(255)), 8);
        assert_eq!(minimal_bits(&big(-255)), 9);
        assert_eq!(minimal_bits(&big(0)), 0);
        assert_eq!(minimal_bits(&big(1)), 1);
        assert_eq!(minimal_bits(&big(-1)), 2);
        assert_eq!(minimal_bits(&(BigInt::one() << 100u32)), 101);
    }

    #[test]
    fn test_minimal_bytes() {
        assert_eq!(minimal_bytes(&big(255)), 1);
        assert_eq!(minimal_bytes(&big(-255)), 2);
        assert_eq!(minimal_bytes(&big(256)), 2);
        assert_eq!(minimal_bytes(&big(0)), 0);
    }

    #[test]
    fn test_max_values() {
        assert_eq!(max_unsigned(WidthSpec::bits(8)).unwrap(), big(255));
        assert_eq!(max_unsigned(WidthSpec::bytes(1)).unwrap(), big(255));
        assert_eq!(max_signed(WidthSpec::bits(8)).unwrap(), big(127));
        assert_eq!(max_signed(WidthSpec::bytes(1)).unwrap(), big(127));
        assert_eq!(max_unsigned(WidthSpec::both(16, 2)).unwrap(), big(65535));

        assert!(max_unsigned(WidthSpec::none()).unwrap_err().is_width());
        assert!(max_signed(WidthSpec::none()).unwrap_err().is_width());
        assert!(max_unsigned(WidthSpec::both(9, 1)).unwrap_err().is_width());
        assert!(max_signed(WidthSpec::both(8, 2)).unwrap_err().is_width());
        assert!(max_signed(WidthSpec::bits(0)).unwrap_err().is_width());
    }

    #[test]
    fn test_to_unsigned() {
        assert_eq!(to_unsigned(&big(50), WidthSpec::none()).unwrap(), big(50));
        assert_eq!(to_unsigned(&big(-1), WidthSpec::none()).unwrap(), big(255));
        assert_eq!(to_unsigned(&big(-1), WidthSpec::bits(2)).unwrap(), big(3));
        assert_eq!(to_unsigned(&big(-1), WidthSpec::bytes(2)).unwrap(), big(65535));
        assert_eq!(to_unsigned(&big(-255), WidthSpec::none()).unwrap(), big(65281));
    }

    #[test]
    fn test_to_unsigned_errors() {
        assert!(to_unsigned(&big(1), WidthSpec::bits(0)).unwrap_err().is_width());
        assert!(to_unsigned(&big(1), WidthSpec::bytes(0)).unwrap_err().is_width());
        assert!(to_unsigned(&big(-255), WidthSpec::bits(8)).unwrap_err().is_width());
        assert!(to_unsigned(&big(256), WidthSpec::bytes(1)).unwrap_err().is_width());
        assert!(to_unsigned(&big(1), WidthSpec::both(8, 2)).unwrap_err().is_width());
    }

    #[test]
    fn test_to_unsigned_passes_wide_values_through() {
        // bits+bytes skips the fit check, so 300 comes back wider than 8 bits
        assert_eq!(to_unsigned(&big(300), WidthSpec::both(8, 1)).unwrap(), big(300));
    }

    #[test]
    fn test_to_signed() {
        assert_eq!(to_signed(&big(-1), WidthSpec::none()).unwrap(), big(-1));
        assert_eq!(to_signed(&big(0b1111_1111), WidthSpec::none()).unwrap(), big(-1));
        assert_eq!(to_signed(&big(0b11), WidthSpec::bits(2)).unwrap(), big(-1));
        assert_eq!(to_signed(&big(0b1111_1111), WidthSpec::bytes(2)).unwrap(), big(255));
        assert_eq!(to_signed(&big(0b0111_1111), WidthSpec::bytes(1)).unwrap(), big(127));
        assert_eq!(to_signed(&big(0x8000), WidthSpec::both(16, 2)).unwrap(), big(-32768));
    }

    #[test]
    fn test_to_signed_errors() {
        assert!(to_signed(&big(1), WidthSpec::bits(1)).unwrap_err().is_width());
        assert!(to_signed(&big(1), WidthSpec::bytes(0)).unwrap_err().is_width());
        assert!(to_signed(&big(1), WidthSpec::both(8, 2)).unwrap_err().is_width());
        assert!(to_signed(&big(0), WidthSpec::none()).unwrap_err().is_width());
    }

    #[test]
    fn test_extract_bits() {
        let v = big(0b1011_0110);
        assert_eq!(extract_bits(&v, 0, None, None).unwrap(), big(0));
        assert_eq!(extract_bits(&v, 1, None, None).unwrap(), big(1));
        assert_eq!(extract_bits(&v, 4, Some(8), None).unwrap(), big(0b1011));
        assert_eq!(extract_bits(&v, 4, None, Some(4)).unwrap(), big(0b1011));
        assert_eq!(extract_bits(&v, 2, Some(5), Some(3)).unwrap(), big(0b101));
        assert_eq!(extract_bits(&big(-1), 60, None, Some(8)).unwrap(), big(0xff));
    }

    #[test]
    fn test_extract_bits_errors() {
        let v = big(0xff);
        assert!(extract_bits(&v, 2, Some(5), Some(4)).unwrap_err().is_width());
        assert!(extract_bits(&v, 5, Some(2), None).unwrap_err().is_width());
    }

    #[quickcheck]
    fn prop_minimal_bits_matches_native(v: i64) -> bool {
        let magnitude = v.unsigned_abs();
        let expected = (64 - magnitude.leading_zeros()) as u64 + if v < 0 { 1 } else { 0 };
        minimal_bits(&big(v)) == expected && minimal_bytes(&big(v)) == expected.div_ceil(8)
    }

    #[quickcheck]
    fn prop_signed_unsigned_round_trip(v: i64, extra: u8) -> bool {
        let value = big(v);
        let width = (value.magnitude().bits() + 1 + u64::from(extra % 16)).max(2);
        let unsigned = match to_unsigned(&value, WidthSpec::bits(width)) {
            Ok(u) => u,
            Err(_) => return false,
        };
        !unsigned.is_negative() && to_signed(&unsigned, WidthSpec::bits(width)) == Ok(value)
    }

    #[quickcheck]
    fn prop_extract_end_matches_length(v: i64, start: u8, length: u8) -> bool {
        let value = big(v);
        let start = u64::from(start % 72);
        let length = u64::from(length % 72);
        let by_end = extract_bits(&value, start, Some(start + length), None);
        let by_length = extract_bits(&value, start, None, Some(length));
        let by_both = extract_bits(&value, start, Some(start + length), Some(length));
        by_end.is_ok() && by_end == by_length && by_length == by_both
    }

    #[quickcheck]
    fn prop_extract_matches_native(v: u32, start: u8, length: u8) -> bool {
        let start = u32::from(start % 32);
        let length = u32::from(length % 32);
        let expected = (u64::from(v) >> start) & ((1u64 << length) - 1);
        extract_bits(&BigInt::from(v), start.into(), None, Some(length.into()))
            == Ok(BigInt::from(expected))
    }
}
