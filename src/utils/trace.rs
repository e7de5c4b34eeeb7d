//! Optional call tracing for the bit helpers.
//!
//! [`Traced`] wraps an observer and exposes the same helpers as
//! [`crate::utils::bits`]. Each call is reported to the observer before the
//! real helper runs, so results are identical to the untraced functions.
//!
//! ```
//! use std::cell::RefCell;
//! use bitwidth::utils::trace::{Call, Traced};
//! use bitwidth::WidthSpec;
//! use num_bigint::BigInt;
//!
//! let seen = RefCell::new(Vec::new());
//! let traced = Traced::with_fn(|call: &Call<'_>| seen.borrow_mut().push(call.to_string()));
//!
//! traced.to_unsigned(&BigInt::from(-1), WidthSpec::bits(2)).unwrap();
//! assert_eq!(seen.borrow()[0], "to_unsigned(-1, width_bits=2)");
//! ```

use std::fmt;

use log::Level;
use num_bigint::BigInt;

use super::bits;
use super::width::WidthSpec;
use crate::error::Result;

/// A single helper invocation.
#[derive(Debug, Clone, Copy)]
pub struct Call<'a> {
    /// Name of the helper.
    pub name: &'static str,
    /// Positional arguments, already rendered.
    pub args: &'a [String],
    /// Width arguments, if the helper takes any.
    pub width: Option<WidthSpec>,
}

impl fmt::Display for Call<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write!(f, "{}", self.args.join(", "))?;
        if let Some(width) = self.width.filter(|w| !w.is_unset()) {
            if !self.args.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "{}", width)?;
        }
        write!(f, ")")
    }
}

/// Receives every helper call made through [`Traced`].
pub trait CallObserver {
    /// Called before the helper runs.
    fn on_call(&self, call: &Call<'_>);
}

/// Adapts a closure into a [`CallObserver`].
#[derive(Debug, Clone, Copy)]
pub struct FnObserver<F>(pub F);

impl<F> CallObserver for FnObserver<F>
where
    F: Fn(&Call<'_>),
{
    fn on_call(&self, call: &Call<'_>) {
        (self.0)(call)
    }
}

/// Forwards calls to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    level: Level,
}

impl LogObserver {
    /// Logs each call at `level` under the `bitwidth` target.
    pub fn new(level: Level) -> Self {
        LogObserver { level }
    }

    /// The level calls are logged at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl CallObserver for LogObserver {
    fn on_call(&self, call: &Call<'_>) {
        log::log!(target: "bitwidth", self.level, "{}", call);
    }
}

/// Drops every call. Used when tracing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CallObserver for NoopObserver {
    fn on_call(&self, _call: &Call<'_>) {}
}

impl<O: CallObserver> CallObserver for Option<O> {
    fn on_call(&self, call: &Call<'_>) {
        if let Some(observer) = self {
            observer.on_call(call);
        }
    }
}

/// The bit helpers with an observer attached.
#[derive(Debug, Clone, Default)]
pub struct Traced<O> {
    observer: O,
}

impl<F: Fn(&Call<'_>)> Traced<FnObserver<F>> {
    /// Traces calls into a closure.
    pub fn with_fn(f: F) -> Self {
        Traced::new(FnObserver(f))
    }
}

impl<O: CallObserver> Traced<O> {
    /// Reports every call to `observer`.
    pub fn new(observer: O) -> Self {
        Traced { observer }
    }

    /// The attached observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn report(&self, name: &'static str, args: &[String], width: Option<WidthSpec>) {
        self.observer.on_call(&Call { name, args, width });
    }

    /// Traced [`bits::sign_bit`].
    pub fn sign_bit(&self, val: &BigInt) -> u8 {
        self.report("sign_bit", &[val.to_string()], None);
        bits::sign_bit(val)
    }

    /// Traced [`bits::minimal_bits`].
    pub fn minimal_bits(&self, val: &BigInt) -> u64 {
        self.report("minimal_bits", &[val.to_string()], None);
        bits::minimal_bits(val)
    }

    /// Traced [`bits::minimal_bytes`].
    pub fn minimal_bytes(&self, val: &BigInt) -> u64 {
        self.report("minimal_bytes", &[val.to_string()], None);
        bits::minimal_bytes(val)
    }

    /// Traced [`bits::max_unsigned`].
    pub fn max_unsigned(&self, width: WidthSpec) -> Result<BigInt> {
        self.report("max_unsigned", &[], Some(width));
        bits::max_unsigned(width)
    }

    /// Traced [`bits::max_signed`].
    pub fn max_signed(&self, width: WidthSpec) -> Result<BigInt> {
        self.report("max_signed", &[], Some(width));
        bits::max_signed(width)
    }

    /// Traced [`bits::to_unsigned`].
    pub fn to_unsigned(&self, val: &BigInt, width: WidthSpec) -> Result<BigInt> {
        self.report("to_unsigned", &[val.to_string()], Some(width));
        bits::to_unsigned(val, width)
    }

    /// Traced [`bits::to_signed`].
    pub fn to_signed(&self, val: &BigInt, width: WidthSpec) -> Result<BigInt> {
        self.report("to_signed", &[val.to_string()], Some(width));
        bits::to_signed(val, width)
    }

    /// Traced [`bits::extract_bits`].
    pub fn extract_bits(
        &self,
        val: &BigInt,
        start: u64,
        end: Option<u64>,
        length: Option<u64>,
    ) -> Result<BigInt> {
        let mut args = vec![val.to_string(), start.to_string()];
        if let Some(end) = end {
            args.push(format!("end={}", end));
        }
        if let Some(length) = length {
            args.push(format!("length={}", length));
        }
        self.report("extract_bits", &args, None);
        bits::extract_bits(val, start, end, length)
    }
}
