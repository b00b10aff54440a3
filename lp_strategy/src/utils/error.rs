use alloy_primitives::U256;
use serde::Serialize;
use thiserror::Error;

/// LP Strategy Result
pub type StrategyResult<T> = Result<T, StrategyError>;

/// LP Strategy Errors
#[derive(Clone, Debug, Error, PartialEq, Serialize)]
pub enum StrategyError {
    /// The slippage tolerance is above `MAX_BPS`
    #[error("invalid slippage tolerance: {0} bps")]
    InvalidTolerance(u64),
    /// Redemption computed zero pool shares to unstake
    #[error("no pool shares available to redeem")]
    ZeroLP,
    /// The staking vault reported a failed reward claim
    #[error("the reward claim was reported as failed")]
    NoRewardsClaimed,
    /// A provision or exchange returned less than its minimum
    #[error("insufficient output: received {received}, minimum {minimum}")]
    InsufficientOutput { minimum: U256, received: U256 },
    /// Unauthorized access
    #[error("caller is not the management address")]
    Unauthorized,
    /// The operation is only allowed once the strategy is wound down
    #[error("the strategy is still active")]
    StrategyActive,
    /// Decoding issue
    #[error("decoding error: {0}")]
    DecodingError(String),
    /// A contract call reverted or reported failure
    #[error("contract call failed: {0}")]
    CallFailed(String),
    /// Arithmetic error
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
    /// Unknown/Custom error
    #[error("{0}")]
    Custom(String),
}

pub fn arithmetic_err<S: AsRef<str>>(s: S) -> StrategyError {
    StrategyError::Arithmetic(format!("{:#?}", s.as_ref()))
}
