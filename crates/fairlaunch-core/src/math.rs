//! Widened integer arithmetic for reserve math.
//!
//! Reserves are `u64` lamports / token base units, but their product (the
//! curve invariant `k`) exceeds 2^63, so every multiply runs in `u128`.
//! All operations are checked and fail with a typed error; nothing here
//! panics, saturates, or wraps. Division truncates toward zero — the same
//! floor semantics every reserve computation in the engine relies on.

use crate::CurveError;

/// A non-negative amount wide enough to hold the product of two
/// reserve-scale quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(value: u128) -> Self {
        Amount(value)
    }

    pub fn get(self) -> u128 {
        self.0
    }

    /// Narrow back to u64, failing if the value no longer fits.
    pub fn to_u64(self) -> Result<u64, CurveError> {
        u64::try_from(self.0).map_err(|_| CurveError::Overflow)
    }

    pub fn add(self, other: Amount) -> Result<Amount, CurveError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(CurveError::Overflow)
    }

    /// Fails with `Underflow` if the result would be negative.
    pub fn sub(self, other: Amount) -> Result<Amount, CurveError> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or(CurveError::Underflow)
    }

    pub fn mul(self, other: Amount) -> Result<Amount, CurveError> {
        self.0
            .checked_mul(other.0)
            .map(Amount)
            .ok_or(CurveError::Overflow)
    }

    /// Floor division, truncating toward zero.
    pub fn div_floor(self, other: Amount) -> Result<Amount, CurveError> {
        self.0
            .checked_div(other.0)
            .map(Amount)
            .ok_or(CurveError::DivisionByZero)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(value as u128)
    }
}

/// Safe floor((a * b) / d) in widened arithmetic.
pub fn mul_div(a: u128, b: u128, d: u128) -> Result<u128, CurveError> {
    if d == 0 {
        return Err(CurveError::DivisionByZero);
    }
    a.checked_mul(b)
        .map(|p| p / d)
        .ok_or(CurveError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_sub() {
        let a = Amount::new(10);
        let b = Amount::new(3);
        assert_eq!(a.add(b).unwrap(), Amount::new(13));
        assert_eq!(a.sub(b).unwrap(), Amount::new(7));
    }

    #[test]
    fn test_sub_underflow() {
        let a = Amount::new(3);
        let b = Amount::new(10);
        assert_eq!(a.sub(b), Err(CurveError::Underflow));
    }

    #[test]
    fn test_mul_overflow() {
        let a = Amount::new(u128::MAX);
        assert_eq!(a.mul(Amount::new(2)), Err(CurveError::Overflow));
    }

    #[test]
    fn test_div_floor_truncates() {
        let a = Amount::new(7);
        assert_eq!(a.div_floor(Amount::new(2)).unwrap(), Amount::new(3));
    }

    #[test]
    fn test_div_by_zero() {
        let a = Amount::new(7);
        assert_eq!(a.div_floor(Amount::ZERO), Err(CurveError::DivisionByZero));
    }

    #[test]
    fn test_reserve_scale_product_fits() {
        // Two full u64 reserves multiplied must not overflow the widened type.
        let a = Amount::from(u64::MAX);
        let b = Amount::from(u64::MAX);
        assert!(a.mul(b).is_ok());
    }

    #[test]
    fn test_to_u64_narrowing() {
        assert_eq!(Amount::new(42).to_u64().unwrap(), 42);
        assert_eq!(
            Amount::new(u64::MAX as u128 + 1).to_u64(),
            Err(CurveError::Overflow)
        );
    }

    #[test]
    fn test_mul_div() {
        assert_eq!(mul_div(10, 10, 3).unwrap(), 33);
        assert_eq!(mul_div(1, 1, 0), Err(CurveError::DivisionByZero));
        assert_eq!(mul_div(u128::MAX, 2, 1), Err(CurveError::Overflow));
    }
}
