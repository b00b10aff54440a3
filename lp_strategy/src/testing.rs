//! Deterministic in-memory chain for full-cycle strategy tests.
//!
//! Only the strategy address holds balances. The pool mints and burns shares 1:1 against
//! either coin and every swap pays out half of its input.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use alloy_primitives::{Address, U256};

use crate::{
    collaborators::{LiquidityPool, StakingVault, SwapVenue, TokenLedger},
    types::{CoinIndex, PoolAmounts},
    utils::error::{StrategyError, StrategyResult},
};

pub const STRATEGY: Address = Address::new([0x11; 20]);
pub const ASSET: Address = Address::new([0x33; 20]);
pub const COUNTER: Address = Address::new([0x44; 20]);
pub const PRIMARY: Address = Address::new([0x55; 20]);
pub const SECONDARY: Address = Address::new([0x66; 20]);

#[derive(Default)]
pub struct FakeChain {
    balances: RefCell<HashMap<Address, U256>>,
    loose_shares: Cell<U256>,
    staked_shares: Cell<U256>,
    pending_rewards: Cell<U256>,
    failing_claims: Cell<bool>,
}

impl FakeChain {
    pub fn with_idle(idle: u64) -> Rc<Self> {
        let chain = Rc::new(Self::default());
        chain.mint(ASSET, idle);
        chain
    }

    pub fn mint(&self, token: Address, amount: u64) {
        self.credit(token, U256::from(amount));
    }

    pub fn balance(&self, token: Address) -> U256 {
        self.balances
            .borrow()
            .get(&token)
            .copied()
            .unwrap_or_default()
    }

    pub fn staked(&self) -> U256 {
        self.staked_shares.get()
    }

    pub fn accrue_rewards(&self, amount: u64) {
        self.pending_rewards
            .set(self.pending_rewards.get() + U256::from(amount));
    }

    /// Every later claim reports failure
    pub fn fail_claims(&self) {
        self.failing_claims.set(true);
    }

    fn credit(&self, token: Address, amount: U256) {
        *self.balances.borrow_mut().entry(token).or_default() += amount;
    }

    fn debit(&self, token: Address, amount: U256) -> StrategyResult<()> {
        let mut balances = self.balances.borrow_mut();
        let balance = balances.entry(token).or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or(StrategyError::CallFailed(format!(
                "transfer amount exceeds balance of {}",
                token
            )))?;
        Ok(())
    }

    fn coin(index: CoinIndex) -> Address {
        if index == 0 {
            ASSET
        } else {
            COUNTER
        }
    }
}

fn ensure_minimum(received: U256, minimum: U256) -> StrategyResult<U256> {
    if received < minimum {
        return Err(StrategyError::InsufficientOutput { minimum, received });
    }
    Ok(received)
}

pub struct FakePool(Rc<FakeChain>);

impl FakePool {
    pub fn new(chain: Rc<FakeChain>) -> Self {
        Self(chain)
    }
}

impl LiquidityPool for FakePool {
    fn estimate_provision(&self, amounts: PoolAmounts, _is_deposit: bool) -> StrategyResult<U256> {
        Ok(amounts[0] + amounts[1])
    }

    fn provide(&self, amounts: PoolAmounts, min_share_out: U256) -> StrategyResult<U256> {
        let shares = ensure_minimum(amounts[0] + amounts[1], min_share_out)?;
        self.0.debit(ASSET, amounts[0])?;
        self.0.debit(COUNTER, amounts[1])?;
        self.0.loose_shares.set(self.0.loose_shares.get() + shares);
        Ok(shares)
    }

    fn withdraw_one_sided(
        &self,
        shares: U256,
        index: CoinIndex,
        min_asset_out: U256,
    ) -> StrategyResult<U256> {
        let remaining = self
            .0
            .loose_shares
            .get()
            .checked_sub(shares)
            .ok_or(StrategyError::CallFailed("burn amount exceeds balance".to_string()))?;
        let received = ensure_minimum(shares, min_asset_out)?;
        self.0.loose_shares.set(remaining);
        self.0.credit(FakeChain::coin(index), received);
        Ok(received)
    }

    fn estimate_withdraw_one_sided(&self, shares: U256, _index: CoinIndex) -> StrategyResult<U256> {
        Ok(shares)
    }
}

pub struct FakeVault(Rc<FakeChain>);

impl FakeVault {
    pub fn new(chain: Rc<FakeChain>) -> Self {
        Self(chain)
    }
}

impl StakingVault for FakeVault {
    fn deposit(&self, _pool_id: U256, shares: U256, _auto_stake: bool) -> StrategyResult<()> {
        let remaining = self
            .0
            .loose_shares
            .get()
            .checked_sub(shares)
            .ok_or(StrategyError::CallFailed("deposit exceeds balance".to_string()))?;
        self.0.loose_shares.set(remaining);
        self.0.staked_shares.set(self.0.staked_shares.get() + shares);
        Ok(())
    }

    fn staked_balance_of(&self, owner: Address) -> StrategyResult<U256> {
        if owner != STRATEGY {
            return Ok(U256::ZERO);
        }
        Ok(self.0.staked_shares.get())
    }

    fn claim_rewards(&self) -> StrategyResult<bool> {
        if self.0.failing_claims.get() {
            return Ok(false);
        }
        let pending = self.0.pending_rewards.replace(U256::ZERO);
        self.0.credit(PRIMARY, pending);
        Ok(true)
    }

    fn withdraw_and_unstake(&self, shares: U256, _claim_rewards: bool) -> StrategyResult<U256> {
        let remaining = self
            .0
            .staked_shares
            .get()
            .checked_sub(shares)
            .ok_or(StrategyError::CallFailed("withdraw exceeds stake".to_string()))?;
        self.0.staked_shares.set(remaining);
        self.0.loose_shares.set(self.0.loose_shares.get() + shares);
        Ok(shares)
    }
}

/// Swaps `from_token` into `to_token` regardless of the coin indices
pub struct FakeSwap {
    chain: Rc<FakeChain>,
    from_token: Address,
    to_token: Address,
}

impl FakeSwap {
    pub fn new(chain: Rc<FakeChain>, from_token: Address, to_token: Address) -> Self {
        Self {
            chain,
            from_token,
            to_token,
        }
    }
}

impl SwapVenue for FakeSwap {
    fn quote(&self, _from: CoinIndex, _to: CoinIndex, amount_in: U256) -> StrategyResult<U256> {
        Ok(amount_in / U256::from(2u64))
    }

    fn swap(
        &self,
        from: CoinIndex,
        to: CoinIndex,
        amount_in: U256,
        min_amount_out: U256,
        receiver: Option<Address>,
    ) -> StrategyResult<U256> {
        let received = ensure_minimum(self.quote(from, to, amount_in)?, min_amount_out)?;
        self.chain.debit(self.from_token, amount_in)?;
        if receiver.unwrap_or(STRATEGY) == STRATEGY {
            self.chain.credit(self.to_token, received);
        }
        Ok(received)
    }
}

pub struct FakeLedger(Rc<FakeChain>);

impl FakeLedger {
    pub fn new(chain: Rc<FakeChain>) -> Self {
        Self(chain)
    }
}

impl TokenLedger for FakeLedger {
    fn balance_of(&self, token: Address, owner: Address) -> StrategyResult<U256> {
        if owner != STRATEGY {
            return Ok(U256::ZERO);
        }
        Ok(self.0.balance(token))
    }
}
