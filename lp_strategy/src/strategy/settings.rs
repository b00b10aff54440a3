//! Strategy settings and tunable configuration

use alloy_primitives::{Address, U256};
use candid::{CandidType, Nat};

use crate::{
    constants::{
        default_min_idle_to_deploy, default_min_reward_to_harvest, DEFAULT_SLIPPAGE_BPS, MAX_BPS,
        POOL_COINS,
    },
    types::{CoinIndex, InitArgs, PoolAmounts},
    utils::{
        common::{string_to_address, string_to_u256, u256_to_nat},
        error::{StrategyError, StrategyResult},
    },
};

/// Settings of a strategy.
/// The addresses are fixed at construction, the tunables are changed through the
/// management-gated setters of the executable strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategySettings {
    /// Address the strategy holds its positions under
    pub strategy: Address,
    /// Management address
    pub management: Address,
    /// Deposit token
    pub asset: Address,
    /// The pool's other coin
    pub counter_asset: Address,
    /// Reward token swapped into the counter-asset on harvest
    pub primary_reward: Address,
    /// Reward token compounded into the primary reward on tend
    pub secondary_reward: Address,
    /// Staking vault pool id
    pub pool_id: U256,
    /// Index of the deposit token in the pool
    pub asset_index: u8,
    /// Slippage tolerance in basis points
    pub slippage_bps: u64,
    /// Minimum quoted output of the tend compounding swap
    pub min_reward_to_harvest: U256,
    /// Idle balance floor below which tend does not deploy
    pub min_idle_to_deploy: U256,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            strategy: Address::ZERO,
            management: Address::ZERO,
            asset: Address::ZERO,
            counter_asset: Address::ZERO,
            primary_reward: Address::ZERO,
            secondary_reward: Address::ZERO,
            pool_id: U256::ZERO,
            asset_index: 0,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            min_reward_to_harvest: default_min_reward_to_harvest(),
            min_idle_to_deploy: default_min_idle_to_deploy(),
        }
    }
}

impl StrategySettings {
    /// Sets the strategy address.
    pub fn strategy(&mut self, strategy: Address) -> &mut Self {
        self.strategy = strategy;
        self
    }

    /// Sets the management address.
    pub fn management(&mut self, management: Address) -> &mut Self {
        self.management = management;
        self
    }

    /// Sets the deposit token.
    pub fn asset(&mut self, asset: Address) -> &mut Self {
        self.asset = asset;
        self
    }

    /// Sets the pool's counter-asset.
    pub fn counter_asset(&mut self, counter_asset: Address) -> &mut Self {
        self.counter_asset = counter_asset;
        self
    }

    /// Sets the primary reward token.
    pub fn primary_reward(&mut self, primary_reward: Address) -> &mut Self {
        self.primary_reward = primary_reward;
        self
    }

    /// Sets the secondary reward token.
    pub fn secondary_reward(&mut self, secondary_reward: Address) -> &mut Self {
        self.secondary_reward = secondary_reward;
        self
    }

    /// Sets the staking vault pool id.
    pub fn pool_id(&mut self, pool_id: U256) -> &mut Self {
        self.pool_id = pool_id;
        self
    }

    /// Sets the index of the deposit token in the pool. Fails unless it is a pool coin.
    pub fn asset_index(&mut self, asset_index: u8) -> StrategyResult<&mut Self> {
        check_asset_index(asset_index)?;
        self.asset_index = asset_index;
        Ok(self)
    }

    /// Sets the slippage tolerance. Fails with `InvalidTolerance` above `MAX_BPS`.
    pub fn slippage_bps(&mut self, slippage_bps: u64) -> StrategyResult<&mut Self> {
        if slippage_bps > MAX_BPS {
            return Err(StrategyError::InvalidTolerance(slippage_bps));
        }
        self.slippage_bps = slippage_bps;
        Ok(self)
    }

    /// Sets the minimum quoted output of the tend compounding swap.
    pub fn min_reward_to_harvest(&mut self, min_reward_to_harvest: U256) -> &mut Self {
        self.min_reward_to_harvest = min_reward_to_harvest;
        self
    }

    /// Sets the idle balance floor of tend.
    pub fn min_idle_to_deploy(&mut self, min_idle_to_deploy: U256) -> &mut Self {
        self.min_idle_to_deploy = min_idle_to_deploy;
        self
    }

    /// Pool index of the deposit token
    pub fn asset_coin(&self) -> CoinIndex {
        CoinIndex::from(self.asset_index)
    }

    /// Checks the fields the setters validate.
    /// Settings built as a struct literal bypass the setters.
    pub fn validate(&self) -> StrategyResult<()> {
        check_asset_index(self.asset_index)?;
        if self.slippage_bps > MAX_BPS {
            return Err(StrategyError::InvalidTolerance(self.slippage_bps));
        }
        Ok(())
    }

    /// Pool amounts with `amount` on the deposit token leg and zero elsewhere
    pub fn asset_amounts(&self, amount: U256) -> StrategyResult<PoolAmounts> {
        leg_amounts(usize::from(self.asset_index), amount)
            .ok_or(invalid_asset_index(self.asset_index))
    }

    /// Pool amounts with `amount` on the counter-asset leg and zero elsewhere
    pub fn counter_amounts(&self, amount: U256) -> StrategyResult<PoolAmounts> {
        (POOL_COINS - 1)
            .checked_sub(usize::from(self.asset_index))
            .and_then(|leg| leg_amounts(leg, amount))
            .ok_or(invalid_asset_index(self.asset_index))
    }
}

fn invalid_asset_index(asset_index: u8) -> StrategyError {
    StrategyError::Custom(format!(
        "Asset index {} is not a coin of a {}-coin pool.",
        asset_index, POOL_COINS
    ))
}

fn check_asset_index(asset_index: u8) -> StrategyResult<()> {
    if usize::from(asset_index) >= POOL_COINS {
        return Err(invalid_asset_index(asset_index));
    }
    Ok(())
}

/// `None` if `leg` is not a pool coin
fn leg_amounts(leg: usize, amount: U256) -> Option<PoolAmounts> {
    let mut amounts = [U256::ZERO; POOL_COINS];
    *amounts.get_mut(leg)? = amount;
    Some(amounts)
}

impl TryFrom<InitArgs> for StrategySettings {
    type Error = StrategyError;

    fn try_from(value: InitArgs) -> Result<Self, Self::Error> {
        let mut settings = StrategySettings::default();
        settings
            .strategy(string_to_address(value.strategy)?)
            .management(string_to_address(value.management)?)
            .asset(string_to_address(value.asset)?)
            .counter_asset(string_to_address(value.counter_asset)?)
            .primary_reward(string_to_address(value.primary_reward)?)
            .secondary_reward(string_to_address(value.secondary_reward)?)
            .pool_id(string_to_u256(value.pool_id)?)
            .asset_index(value.asset_index)?;

        if let Some(slippage_bps) = value.slippage_bps {
            settings.slippage_bps(slippage_bps)?;
        }
        if let Some(min_reward_to_harvest) = value.min_reward_to_harvest {
            settings.min_reward_to_harvest(string_to_u256(min_reward_to_harvest)?);
        }
        if let Some(min_idle_to_deploy) = value.min_idle_to_deploy {
            settings.min_idle_to_deploy(string_to_u256(min_idle_to_deploy)?);
        }

        Ok(settings)
    }
}

/// Read-only view of the settings
#[derive(Clone, Default, CandidType, Debug, PartialEq)]
pub struct StrategySettingsQuery {
    pub strategy: String,
    pub management: String,
    pub asset: String,
    pub counter_asset: String,
    pub primary_reward: String,
    pub secondary_reward: String,
    pub pool_id: Nat,
    pub asset_index: u8,
    /// Slippage tolerance in basis points
    pub slippage_bps: u64,
    pub min_reward_to_harvest: Nat,
    pub min_idle_to_deploy: Nat,
}

impl TryFrom<&StrategySettings> for StrategySettingsQuery {
    type Error = StrategyError;

    fn try_from(value: &StrategySettings) -> Result<Self, Self::Error> {
        Ok(Self {
            strategy: value.strategy.to_string(),
            management: value.management.to_string(),
            asset: value.asset.to_string(),
            counter_asset: value.counter_asset.to_string(),
            primary_reward: value.primary_reward.to_string(),
            secondary_reward: value.secondary_reward.to_string(),
            pool_id: u256_to_nat(&value.pool_id)?,
            asset_index: value.asset_index,
            slippage_bps: value.slippage_bps,
            min_reward_to_harvest: u256_to_nat(&value.min_reward_to_harvest)?,
            min_idle_to_deploy: u256_to_nat(&value.min_idle_to_deploy)?,
        })
    }
}
