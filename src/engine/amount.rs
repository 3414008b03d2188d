//! Overflow-checked amount arithmetic over `U256`.
//!
//! Every helper multiplies before it divides and reports a range error
//! instead of wrapping; callers drop the affected candidate on error.

use alloy_primitives::U256;
use thiserror::Error;

/// 100% expressed in basis points.
pub const HUNDRED_PERCENT_BPS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("{op} overflowed the 256-bit range")]
    Overflow { op: &'static str },
    #[error("{op} divided by zero")]
    DivisionByZero { op: &'static str },
    #[error("basis points {bps} exceed {HUNDRED_PERCENT_BPS}")]
    BpsOutOfRange { bps: u64 },
}

pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

pub fn hundred_percent() -> U256 {
    U256::from(HUNDRED_PERCENT_BPS)
}

pub fn checked_add(lhs: U256, rhs: U256, op: &'static str) -> ArithmeticResult<U256> {
    lhs.checked_add(rhs).ok_or(ArithmeticError::Overflow { op })
}

pub fn checked_mul(lhs: U256, rhs: U256, op: &'static str) -> ArithmeticResult<U256> {
    lhs.checked_mul(rhs).ok_or(ArithmeticError::Overflow { op })
}

/// `value * numerator / denominator`, floor division.
pub fn mul_div(
    value: U256,
    numerator: U256,
    denominator: U256,
    op: &'static str,
) -> ArithmeticResult<U256> {
    if denominator.is_zero() {
        return Err(ArithmeticError::DivisionByZero { op });
    }
    let product = checked_mul(value, numerator, op)?;
    Ok(product / denominator)
}

/// Scales `value` by `bps / 10000`.
pub fn apply_bps(value: U256, bps: u64, op: &'static str) -> ArithmeticResult<U256> {
    mul_div(value, U256::from(bps), hundred_percent(), op)
}

/// Worst-case amount when the amount may shrink by `slippage_bps`.
pub fn decrease_by_bps(value: U256, slippage_bps: u64) -> ArithmeticResult<U256> {
    if slippage_bps > HUNDRED_PERCENT_BPS {
        return Err(ArithmeticError::BpsOutOfRange { bps: slippage_bps });
    }
    apply_bps(value, HUNDRED_PERCENT_BPS - slippage_bps, "slippage decrease")
}

/// Worst-case amount when the amount may grow by `slippage_bps`.
pub fn increase_by_bps(value: U256, slippage_bps: u64) -> ArithmeticResult<U256> {
    let factor = HUNDRED_PERCENT_BPS
        .checked_add(slippage_bps)
        .ok_or(ArithmeticError::Overflow {
            op: "slippage increase",
        })?;
    apply_bps(value, factor, "slippage increase")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_floors() {
        let value = mul_div(U256::from(10u64), U256::from(3u64), U256::from(4u64), "t").unwrap();
        assert_eq!(value, U256::from(7u64));
    }

    #[test]
    fn mul_div_rejects_overflow_instead_of_wrapping() {
        let err = mul_div(U256::MAX, U256::from(2u64), U256::from(2u64), "t").unwrap_err();
        assert_eq!(err, ArithmeticError::Overflow { op: "t" });
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        let err = mul_div(U256::from(1u64), U256::from(1u64), U256::ZERO, "t").unwrap_err();
        assert_eq!(err, ArithmeticError::DivisionByZero { op: "t" });
    }

    #[test]
    fn decrease_never_exceeds_input() {
        let amount = U256::from(2_000_000u64);
        for bps in 0..=HUNDRED_PERCENT_BPS {
            let end = decrease_by_bps(amount, bps).unwrap();
            assert!(end <= amount);
            assert_eq!(end == amount, bps == 0, "bps {bps}");
        }
    }

    #[test]
    fn increase_never_falls_below_input() {
        let amount = U256::from(1_000_001u64);
        for bps in 0..=HUNDRED_PERCENT_BPS {
            let end = increase_by_bps(amount, bps).unwrap();
            assert!(end >= amount);
            assert_eq!(end == amount, bps == 0, "bps {bps}");
        }
    }

    #[test]
    fn decrease_rejects_more_than_hundred_percent() {
        assert!(matches!(
            decrease_by_bps(U256::from(1u64), 10_001),
            Err(ArithmeticError::BpsOutOfRange { bps: 10_001 })
        ));
    }

    #[test]
    fn increase_reports_overflow_near_max() {
        assert!(increase_by_bps(U256::MAX, 1).is_err());
    }
}
