//! Arithmetic on [`Bits`].
//!
//! Every operation takes a plain integer on the right, computes the exact
//! result and wraps it in a fresh [`Bits`] whose width is inferred again from
//! the result. Neither operand's width carries over, and a result of zero
//! fails like [`Bits::from_value(0)`](Bits::from_value) does.
//!
//! The operator traits are implemented for `&Bits` and yield `Result<Bits>`:
//!
//! ```
//! use bitwidth::Bits;
//!
//! let b = Bits::from_value(15).unwrap();
//! let sum = (&b + 1).unwrap();
//! assert_eq!(sum.width(), 5);
//! assert!((-&b).is_err());
//! ```
//!
//! Forms with the integer on the left, in-place forms, unary operators and
//! the sequence protocol are deliberately unsupported. They exist as methods
//! that fail with [`BitsError::Unsupported`] so callers get a clear signal.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};

use log::trace;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::Bits;
use crate::error::{BitsError, Result};

fn nonzero(divisor: BigInt, op: &str) -> Result<BigInt> {
    if divisor.is_zero() {
        return Err(BitsError::Arithmetic(format!("{} by zero", op)));
    }
    Ok(divisor)
}

/// `None` when the count is too large for a `u64`.
fn shift_count(count: &BigInt) -> Result<Option<u64>> {
    if count.is_negative() {
        return Err(BitsError::Arithmetic(format!("negative shift count {}", count)));
    }
    Ok(count.to_u64())
}

/// `base ** exponent` for a base of 0, 1 or -1, whatever the exponent.
fn unit_power(base: &BigInt, exponent: &BigInt) -> Option<BigInt> {
    if base.is_zero() {
        Some(if exponent.is_zero() { BigInt::one() } else { BigInt::zero() })
    } else if base.is_one() {
        Some(BigInt::one())
    } else if base.magnitude().is_one() {
        Some(if exponent.is_even() { BigInt::one() } else { -BigInt::one() })
    } else {
        None
    }
}

impl Bits {
    fn wrap(&self, op: &str, rhs: &BigInt, result: BigInt) -> Result<Bits> {
        trace!("{} {} {} = {}", self.value(), op, rhs, result);
        Bits::from_value(result)
    }

    /// Addition.
    pub fn add(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = rhs.into();
        self.wrap("+", &rhs, self.value() + &rhs)
    }

    /// Subtraction.
    pub fn sub(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = rhs.into();
        self.wrap("-", &rhs, self.value() - &rhs)
    }

    /// Multiplication.
    pub fn mul(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = rhs.into();
        self.wrap("*", &rhs, self.value() * &rhs)
    }

    /// Exact division.
    ///
    /// An integer cannot hold a fractional quotient, so a division that
    /// leaves a remainder fails with [`BitsError::Type`].
    pub fn true_div(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = nonzero(rhs.into(), "division")?;
        let (quotient, remainder) = self.value().div_rem(&rhs);
        if !remainder.is_zero() {
            return Err(BitsError::Type(format!(
                "{} / {} is not an integer",
                self.value(),
                rhs
            )));
        }
        self.wrap("/", &rhs, quotient)
    }

    /// Division rounding towards negative infinity.
    pub fn floor_div(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = nonzero(rhs.into(), "division")?;
        let quotient = self.value().div_floor(&rhs);
        self.wrap("//", &rhs, quotient)
    }

    /// Remainder taking the sign of the divisor.
    pub fn modulo(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = nonzero(rhs.into(), "modulo")?;
        let remainder = self.value().mod_floor(&rhs);
        self.wrap("%", &rhs, remainder)
    }

    /// Raises the value to a non-negative power.
    pub fn pow(&self, exponent: impl Into<BigInt>) -> Result<Bits> {
        let exponent = exponent.into();
        if exponent.is_negative() {
            return Err(BitsError::Type(format!(
                "{} ** {} is not an integer",
                self.value(),
                exponent
            )));
        }
        let power = match exponent.to_u32() {
            Some(power) => self.value().pow(power),
            None => unit_power(self.value(), &exponent).ok_or_else(|| {
                BitsError::Arithmetic(format!("exponent {} is too large", exponent))
            })?,
        };
        self.wrap("**", &exponent, power)
    }

    /// Shift left.
    pub fn shl(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = rhs.into();
        let count = shift_count(&rhs)?
            .ok_or_else(|| BitsError::Arithmetic(format!("shift count {} is too large", rhs)))?;
        self.wrap("<<", &rhs, self.value() << count)
    }

    /// Arithmetic shift right, rounding towards negative infinity.
    ///
    /// Counts past every bit of the value leave only the sign: `-1` for
    /// negative values and `0` otherwise.
    pub fn shr(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = rhs.into();
        let shifted = match shift_count(&rhs)? {
            Some(count) => self.value() >> count,
            None if self.value().is_negative() => -BigInt::one(),
            None => BigInt::zero(),
        };
        self.wrap(">>", &rhs, shifted)
    }

    /// Bitwise and, on two's-complement patterns.
    pub fn bit_and(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = rhs.into();
        self.wrap("&", &rhs, self.value() & &rhs)
    }

    /// Bitwise exclusive or.
    pub fn bit_xor(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = rhs.into();
        self.wrap("^", &rhs, self.value() ^ &rhs)
    }

    /// Bitwise or.
    pub fn bit_or(&self, rhs: impl Into<BigInt>) -> Result<Bits> {
        let rhs = rhs.into();
        self.wrap("|", &rhs, self.value() | &rhs)
    }
}

macro_rules! forward_binop {
    ($($Trait:ident :: $method:ident => $inherent:ident),* $(,)?) => {$(
        impl<T: Into<BigInt>> $Trait<T> for &Bits {
            type Output = Result<Bits>;

            fn $method(self, rhs: T) -> Result<Bits> {
                Bits::$inherent(self, rhs)
            }
        }
    )*};
}

forward_binop!(
    Add::add => add,
    Sub::sub => sub,
    Mul::mul => mul,
    Div::div => true_div,
    Rem::rem => modulo,
    Shl::shl => shl,
    Shr::shr => shr,
    BitAnd::bitand => bit_and,
    BitXor::bitxor => bit_xor,
    BitOr::bitor => bit_or,
);

// `5 + &bits` and friends
macro_rules! reject_reflected {
    ($lhs:ty; $($Trait:ident :: $method:ident => $name:literal),* $(,)?) => {$(
        impl $Trait<&Bits> for $lhs {
            type Output = Result<Bits>;

            fn $method(self, _rhs: &Bits) -> Result<Bits> {
                Err(BitsError::Unsupported($name))
            }
        }
    )*};
    ($($lhs:ty),*) => {$(
        reject_reflected!($lhs;
            Add::add => "radd",
            Sub::sub => "rsub",
            Mul::mul => "rmul",
            Div::div => "rtrue_div",
            Rem::rem => "rmodulo",
            Shl::shl => "rshl",
            Shr::shr => "rshr",
            BitAnd::bitand => "rbit_and",
            BitXor::bitxor => "rbit_xor",
            BitOr::bitor => "rbit_or",
        );
    )*};
}

reject_reflected!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, BigInt);

impl Neg for &Bits {
    type Output = Result<Bits>;

    fn neg(self) -> Result<Bits> {
        Bits::neg(self)
    }
}

impl Not for &Bits {
    type Output = Result<Bits>;

    fn not(self) -> Result<Bits> {
        self.invert()
    }
}

macro_rules! unsupported {
    ($doc:literal; mut $($name:ident(&mut self $(, $arg:ident: $ty:ty)*);)*) => {$(
        #[doc = $doc]
        pub fn $name(&mut self $(, $arg: $ty)*) -> Result<()> {
            $(let _ = $arg;)*
            Err(BitsError::Unsupported(stringify!($name)))
        }
    )*};
    ($doc:literal; $($name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty;)*) => {$(
        #[doc = $doc]
        pub fn $name(&self $(, $arg: $ty)*) -> Result<$ret> {
            $(let _ = $arg;)*
            Err(BitsError::Unsupported(stringify!($name)))
        }
    )*};
}

impl Bits {
    unsupported! {
        "Not supported: the integer operand must be on the right.";
        radd(&self, lhs: impl Into<BigInt>) -> Bits;
        rsub(&self, lhs: impl Into<BigInt>) -> Bits;
        rmul(&self, lhs: impl Into<BigInt>) -> Bits;
        rmatmul(&self, lhs: impl Into<BigInt>) -> Bits;
        rtrue_div(&self, lhs: impl Into<BigInt>) -> Bits;
        rfloor_div(&self, lhs: impl Into<BigInt>) -> Bits;
        rmodulo(&self, lhs: impl Into<BigInt>) -> Bits;
        rdivmod(&self, lhs: impl Into<BigInt>) -> (Bits, Bits);
        rpow(&self, lhs: impl Into<BigInt>) -> Bits;
        rshl(&self, lhs: impl Into<BigInt>) -> Bits;
        rshr(&self, lhs: impl Into<BigInt>) -> Bits;
        rbit_and(&self, lhs: impl Into<BigInt>) -> Bits;
        rbit_xor(&self, lhs: impl Into<BigInt>) -> Bits;
        rbit_or(&self, lhs: impl Into<BigInt>) -> Bits;
    }

    unsupported! {
        "Not supported.";
        matmul(&self, rhs: impl Into<BigInt>) -> Bits;
        divmod(&self, rhs: impl Into<BigInt>) -> (Bits, Bits);
    }

    unsupported! {
        "Not supported: results are new values, use the plain operation.";
        mut
        add_assign(&mut self, rhs: impl Into<BigInt>);
        sub_assign(&mut self, rhs: impl Into<BigInt>);
        mul_assign(&mut self, rhs: impl Into<BigInt>);
        matmul_assign(&mut self, rhs: impl Into<BigInt>);
        true_div_assign(&mut self, rhs: impl Into<BigInt>);
        floor_div_assign(&mut self, rhs: impl Into<BigInt>);
        modulo_assign(&mut self, rhs: impl Into<BigInt>);
        pow_assign(&mut self, rhs: impl Into<BigInt>);
        shl_assign(&mut self, rhs: impl Into<BigInt>);
        shr_assign(&mut self, rhs: impl Into<BigInt>);
        bit_and_assign(&mut self, rhs: impl Into<BigInt>);
        bit_xor_assign(&mut self, rhs: impl Into<BigInt>);
        bit_or_assign(&mut self, rhs: impl Into<BigInt>);
    }

    unsupported! {
        "Not supported: unary operators are not defined.";
        neg(&self) -> Bits;
        pos(&self) -> Bits;
        abs(&self) -> Bits;
        invert(&self) -> Bits;
        round(&self) -> Bits;
        trunc(&self) -> Bits;
        floor(&self) -> Bits;
        ceil(&self) -> Bits;
        index(&self) -> BigInt;
    }

    unsupported! {
        "Not supported: `Bits` is not a sequence.";
        len(&self) -> usize;
        get_bit(&self, key: u64) -> bool;
        iter(&self) -> std::vec::IntoIter<bool>;
        reversed(&self) -> std::vec::IntoIter<bool>;
        contains(&self, item: impl Into<BigInt>) -> bool;
    }

    unsupported! {
        "Not supported: `Bits` is not a sequence.";
        mut
        set_bit(&mut self, key: u64, bit: bool);
    }
}
