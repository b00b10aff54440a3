//! Slippage bounds applied to every value-exchanging call

use alloy_primitives::U256;

use crate::{
    constants::{max_bps, MAX_BPS},
    utils::error::{arithmetic_err, StrategyError, StrategyResult},
};

/// Expected output of an exchange and the minimum the strategy accepts for it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExchangeBound {
    pub expected: U256,
    pub minimum: U256,
}

impl ExchangeBound {
    /// Derives the bound for `expected` under `tolerance_bps`
    pub fn new(expected: U256, tolerance_bps: u64) -> StrategyResult<Self> {
        Ok(Self {
            expected,
            minimum: bound(expected, tolerance_bps)?,
        })
    }

    /// A bound that accepts any output
    pub fn unbounded(expected: U256) -> Self {
        Self {
            expected,
            minimum: U256::ZERO,
        }
    }
}

/// Returns `floor(expected * tolerance_bps / MAX_BPS)`.
///
/// Fails with `InvalidTolerance` if `tolerance_bps > MAX_BPS`, and with an arithmetic
/// error if the product does not fit in 256 bits.
pub fn bound(expected: U256, tolerance_bps: u64) -> StrategyResult<U256> {
    if tolerance_bps > MAX_BPS {
        return Err(StrategyError::InvalidTolerance(tolerance_bps));
    }

    expected
        .checked_mul(U256::from(tolerance_bps))
        .ok_or(arithmetic_err("Slippage bound multiplication overflowed."))
        .map(|product| product / max_bps())
}
