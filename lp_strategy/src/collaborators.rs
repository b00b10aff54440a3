//! Capabilities the strategy consumes from external contracts.
//!
//! The engines only ever talk to these traits. Production code wires them to the
//! EVM adapters in [`crate::evm`], tests wire them to mocks or in-memory fakes.

use alloy_primitives::{Address, U256};

#[cfg(test)]
use mockall::automock;

use crate::{
    types::{CoinIndex, PoolAmounts},
    utils::error::StrategyResult,
};

/// Two-coin liquidity pool issuing pool shares
#[cfg_attr(test, automock)]
pub trait LiquidityPool {
    /// Pool shares minted (`is_deposit`) or burned (`!is_deposit`) for the given coin amounts
    fn estimate_provision(&self, amounts: PoolAmounts, is_deposit: bool) -> StrategyResult<U256>;

    /// Provides liquidity and returns the minted pool shares.
    /// Fails with `InsufficientOutput` below `min_share_out`.
    fn provide(&self, amounts: PoolAmounts, min_share_out: U256) -> StrategyResult<U256>;

    /// Burns `shares` for a single coin and returns the amount received.
    /// Fails with `InsufficientOutput` below `min_asset_out`.
    fn withdraw_one_sided(
        &self,
        shares: U256,
        index: CoinIndex,
        min_asset_out: U256,
    ) -> StrategyResult<U256>;

    /// Amount of a single coin received for burning `shares`
    fn estimate_withdraw_one_sided(&self, shares: U256, index: CoinIndex) -> StrategyResult<U256>;
}

/// Staking vault holding the pool shares and emitting rewards
#[cfg_attr(test, automock)]
pub trait StakingVault {
    fn deposit(&self, pool_id: U256, shares: U256, auto_stake: bool) -> StrategyResult<()>;

    fn staked_balance_of(&self, owner: Address) -> StrategyResult<U256>;

    /// Claims all pending rewards. `false` means the vault reported the claim as failed.
    fn claim_rewards(&self) -> StrategyResult<bool>;

    /// Unstakes and unwraps `shares`, returning the pool shares handed back
    fn withdraw_and_unstake(&self, shares: U256, claim_rewards: bool) -> StrategyResult<U256>;
}

/// Venue used to convert reward tokens
#[cfg_attr(test, automock)]
pub trait SwapVenue {
    fn quote(&self, from: CoinIndex, to: CoinIndex, amount_in: U256) -> StrategyResult<U256>;

    fn swap(
        &self,
        from: CoinIndex,
        to: CoinIndex,
        amount_in: U256,
        min_amount_out: U256,
        receiver: Option<Address>,
    ) -> StrategyResult<U256>;
}

/// Token balance queries
#[cfg_attr(test, automock)]
pub trait TokenLedger {
    fn balance_of(&self, token: Address, owner: Address) -> StrategyResult<U256>;
}

/// A venue together with the coin indices of one swap direction
pub struct SwapLeg<S> {
    pub venue: S,
    pub from: CoinIndex,
    pub to: CoinIndex,
}

impl<S: SwapVenue> SwapLeg<S> {
    pub fn new(venue: S, from: CoinIndex, to: CoinIndex) -> Self {
        Self { venue, from, to }
    }

    /// Quoted output of swapping `amount_in` along this leg
    pub fn quote(&self, amount_in: U256) -> StrategyResult<U256> {
        self.venue.quote(self.from, self.to, amount_in)
    }

    /// Swaps `amount_in` along this leg
    pub fn swap(
        &self,
        amount_in: U256,
        min_amount_out: U256,
        receiver: Option<Address>,
    ) -> StrategyResult<U256> {
        self.venue
            .swap(self.from, self.to, amount_in, min_amount_out, receiver)
    }
}

/// Every external contract a strategy talks to
pub struct Collaborators<P, V, S, L> {
    pub pool: P,
    pub vault: V,
    /// Primary reward -> counter-asset, used by harvest
    pub reward_swap: SwapLeg<S>,
    /// Secondary reward -> intermediate asset, first hop of tend
    pub tend_first_hop: SwapLeg<S>,
    /// Intermediate asset -> primary reward, second hop of tend
    pub tend_second_hop: SwapLeg<S>,
    pub ledger: L,
}
