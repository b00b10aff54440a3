//! EVM implementations of the collaborator capabilities.
//!
//! Each adapter ABI-encodes its call with the bindings in [`crate::types`], hands the calldata
//! to a [`ContractHost`] and decodes the hex encoded return data. Minimum-output checks that
//! the contracts enforce by reverting are mirrored here as `InsufficientOutput`.

use std::rc::Rc;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

use crate::{
    collaborators::{LiquidityPool, StakingVault, SwapVenue, TokenLedger},
    types::{CoinIndex, PoolAmounts, IBooster, ICurvePool, ICurveSwap, IERC20, IRewardPool},
    utils::{
        common::{decode_abi_response, encode_hex_data},
        error::{StrategyError, StrategyResult},
    },
};

/// Host executing contract calls on behalf of the strategy address.
/// Both methods return the hex encoded return data of the call.
pub trait ContractHost {
    /// Read-only call
    fn static_call(&self, to: Address, data: Vec<u8>) -> StrategyResult<String>;

    /// State-changing call
    fn call(&self, to: Address, data: Vec<u8>) -> StrategyResult<String>;
}

impl<T: ContractHost + ?Sized> ContractHost for &T {
    fn static_call(&self, to: Address, data: Vec<u8>) -> StrategyResult<String> {
        (**self).static_call(to, data)
    }

    fn call(&self, to: Address, data: Vec<u8>) -> StrategyResult<String> {
        (**self).call(to, data)
    }
}

impl<T: ContractHost + ?Sized> ContractHost for Rc<T> {
    fn static_call(&self, to: Address, data: Vec<u8>) -> StrategyResult<String> {
        (**self).static_call(to, data)
    }

    fn call(&self, to: Address, data: Vec<u8>) -> StrategyResult<String> {
        (**self).call(to, data)
    }
}

/// Encodes `call`, runs it through the host and decodes its return data
fn execute<H: ContractHost, C: SolCall>(
    host: &H,
    to: Address,
    call: C,
    read_only: bool,
) -> StrategyResult<C::Return> {
    let data = call.abi_encode();
    tracing::debug!(
        to = %to,
        data = %encode_hex_data(&data),
        read_only,
        "Executing contract call."
    );
    let response = if read_only {
        host.static_call(to, data)?
    } else {
        host.call(to, data)?
    };
    decode_abi_response::<C::Return, C>(response)
}

/// Fails with `InsufficientOutput` if `received` is below `minimum`
fn ensure_minimum(received: U256, minimum: U256) -> StrategyResult<U256> {
    if received < minimum {
        return Err(StrategyError::InsufficientOutput { minimum, received });
    }
    Ok(received)
}

/// Two-coin pool
pub struct EvmLiquidityPool<H> {
    host: H,
    pool: Address,
}

impl<H: ContractHost> EvmLiquidityPool<H> {
    pub fn new(host: H, pool: Address) -> Self {
        Self { host, pool }
    }
}

impl<H: ContractHost> LiquidityPool for EvmLiquidityPool<H> {
    fn estimate_provision(&self, amounts: PoolAmounts, is_deposit: bool) -> StrategyResult<U256> {
        let call = ICurvePool::calc_token_amountCall {
            amounts,
            is_deposit,
        };
        execute(&self.host, self.pool, call, true).map(|response| response._0)
    }

    fn provide(&self, amounts: PoolAmounts, min_share_out: U256) -> StrategyResult<U256> {
        let call = ICurvePool::add_liquidityCall {
            amounts,
            min_mint_amount: min_share_out,
        };
        let minted = execute(&self.host, self.pool, call, false)?._0;
        ensure_minimum(minted, min_share_out)
    }

    fn withdraw_one_sided(
        &self,
        shares: U256,
        index: CoinIndex,
        min_asset_out: U256,
    ) -> StrategyResult<U256> {
        let call = ICurvePool::remove_liquidity_one_coinCall {
            token_amount: shares,
            i: index,
            min_amount: min_asset_out,
        };
        let received = execute(&self.host, self.pool, call, false)?._0;
        ensure_minimum(received, min_asset_out)
    }

    fn estimate_withdraw_one_sided(&self, shares: U256, index: CoinIndex) -> StrategyResult<U256> {
        let call = ICurvePool::calc_withdraw_one_coinCall {
            token_amount: shares,
            i: index,
        };
        execute(&self.host, self.pool, call, true).map(|response| response._0)
    }
}

/// Booster entry point plus the reward pool that tracks the staked shares
pub struct EvmStakingVault<H> {
    host: H,
    booster: Address,
    reward_pool: Address,
}

impl<H: ContractHost> EvmStakingVault<H> {
    pub fn new(host: H, booster: Address, reward_pool: Address) -> Self {
        Self {
            host,
            booster,
            reward_pool,
        }
    }
}

impl<H: ContractHost> StakingVault for EvmStakingVault<H> {
    fn deposit(&self, pool_id: U256, shares: U256, auto_stake: bool) -> StrategyResult<()> {
        let call = IBooster::depositCall {
            pid: pool_id,
            amount: shares,
            stake: auto_stake,
        };
        if !execute(&self.host, self.booster, call, false)?._0 {
            return Err(StrategyError::CallFailed(
                "The booster rejected the deposit.".to_string(),
            ));
        }
        Ok(())
    }

    fn staked_balance_of(&self, owner: Address) -> StrategyResult<U256> {
        let call = IRewardPool::balanceOfCall { account: owner };
        execute(&self.host, self.reward_pool, call, true).map(|response| response._0)
    }

    fn claim_rewards(&self) -> StrategyResult<bool> {
        execute(&self.host, self.reward_pool, IRewardPool::getRewardCall {}, false)
            .map(|response| response._0)
    }

    fn withdraw_and_unstake(&self, shares: U256, claim_rewards: bool) -> StrategyResult<U256> {
        let call = IRewardPool::withdrawAndUnwrapCall {
            amount: shares,
            claim: claim_rewards,
        };
        if !execute(&self.host, self.reward_pool, call, false)?._0 {
            return Err(StrategyError::CallFailed(
                "The reward pool rejected the withdrawal.".to_string(),
            ));
        }
        Ok(shares)
    }
}

/// Reward swap pool. Swaps without an explicit receiver pay out to `default_receiver`.
pub struct EvmSwapVenue<H> {
    host: H,
    pool: Address,
    default_receiver: Address,
}

impl<H: ContractHost> EvmSwapVenue<H> {
    pub fn new(host: H, pool: Address, default_receiver: Address) -> Self {
        Self {
            host,
            pool,
            default_receiver,
        }
    }
}

impl<H: ContractHost> SwapVenue for EvmSwapVenue<H> {
    fn quote(&self, from: CoinIndex, to: CoinIndex, amount_in: U256) -> StrategyResult<U256> {
        let call = ICurveSwap::get_dyCall {
            i: from,
            j: to,
            dx: amount_in,
        };
        execute(&self.host, self.pool, call, true).map(|response| response._0)
    }

    fn swap(
        &self,
        from: CoinIndex,
        to: CoinIndex,
        amount_in: U256,
        min_amount_out: U256,
        receiver: Option<Address>,
    ) -> StrategyResult<U256> {
        let call = ICurveSwap::exchangeCall {
            i: from,
            j: to,
            dx: amount_in,
            min_dy: min_amount_out,
            receiver: receiver.unwrap_or(self.default_receiver),
        };
        let received = execute(&self.host, self.pool, call, false)?._0;
        ensure_minimum(received, min_amount_out)
    }
}

/// ERC-20 balances
pub struct EvmTokenLedger<H> {
    host: H,
}

impl<H: ContractHost> EvmTokenLedger<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }
}

impl<H: ContractHost> TokenLedger for EvmTokenLedger<H> {
    fn balance_of(&self, token: Address, owner: Address) -> StrategyResult<U256> {
        let call = IERC20::balanceOfCall { account: owner };
        execute(&self.host, token, call, true).map(|response| response._0)
    }
}
