use std::fmt;

use rust_decimal::prelude::*;
use serde::Serialize;

use crate::error::GenError;

/// One pricing unit, in VND.
pub const MONETARY_UNIT: u64 = 1_000_000;

/// A whole, non-negative amount of money. Serializes as a plain integer.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Amount(value)
    }

    /// # Errors
    /// Errors when `units` scaled by [`MONETARY_UNIT`] would overflow
    pub fn from_units(units: u64) -> Result<Self, GenError> {
        units
            .checked_mul(MONETARY_UNIT)
            .map(Amount)
            .ok_or(GenError::InvalidAmount)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// # Errors
    /// Errors when `other` is > `self`, since the result would be negative
    pub fn checked_sub(self, other: Amount) -> Result<Amount, GenError> {
        if self >= other {
            self.0
                .checked_sub(other.0)
                .map(Amount)
                .ok_or(GenError::InvalidAmount)
        } else {
            Err(GenError::InsufficientAmount)
        }
    }

    /// The share of `self` given by `ratio`, truncated towards zero.
    ///
    /// # Errors
    /// Errors when `ratio` is not a finite number in `[0, 1]`
    pub fn portion(self, ratio: f64) -> Result<Amount, GenError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(GenError::InvalidRatio);
        }
        let ratio = Decimal::from_f64(ratio).ok_or(GenError::InvalidRatio)?;
        Decimal::from(self.0)
            .checked_mul(ratio)
            .and_then(|share| share.trunc().to_u64())
            .map(Amount)
            .ok_or(GenError::InvalidAmount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
