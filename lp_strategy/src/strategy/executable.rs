//! The executable strategy wrapper that runs the strategy.

use alloy_primitives::{Address, U256};

use crate::{
    collaborators::{Collaborators, LiquidityPool, StakingVault, SwapVenue, TokenLedger},
    journal::{JournalCollection, LogType},
    utils::{
        common::{current_timestamp, only_management},
        error::{StrategyError, StrategyResult},
    },
};

use super::{
    data::StrategyData,
    deployment::{self, Deployment},
    harvest::{self, HarvestOutcome},
    redemption::{self, Redemption},
    settings::{StrategySettings, StrategySettingsQuery},
    tend::{self, TendOutcome},
    valuation,
};

/// A strategy together with the collaborators it runs against.
///
/// Every mutating operation takes `&mut self`, so no operation can start while another one
/// is still waiting on a collaborator.
pub struct ExecutableStrategy<P, V, S, L> {
    /// Settings and tunables
    settings: StrategySettings,
    /// Mutable state
    data: StrategyData,
    collaborators: Collaborators<P, V, S, L>,
    journal: JournalCollection,
}

impl<P, V, S, L> ExecutableStrategy<P, V, S, L>
where
    P: LiquidityPool,
    V: StakingVault,
    S: SwapVenue,
    L: TokenLedger,
{
    /// Fails if the settings do not pass [`StrategySettings::validate`].
    pub fn new(
        settings: StrategySettings,
        collaborators: Collaborators<P, V, S, L>,
    ) -> StrategyResult<Self> {
        settings.validate()?;

        let mut journal = JournalCollection::open(Some(settings.strategy));
        journal.append_note(Ok(()), LogType::Info, "Strategy initialized.");

        Ok(Self {
            settings,
            data: StrategyData::default(),
            collaborators,
            journal,
        })
    }

    pub fn settings(&self) -> &StrategySettings {
        &self.settings
    }

    pub fn data(&self) -> &StrategyData {
        &self.data
    }

    pub fn journal(&self) -> &JournalCollection {
        &self.journal
    }

    pub fn settings_query(&self) -> StrategyResult<StrategySettingsQuery> {
        StrategySettingsQuery::try_from(&self.settings)
    }

    /// Appends the outcome of an exposed operation to the journal
    fn record<T>(&mut self, result: &StrategyResult<T>, note: String) {
        let entry = match result {
            Ok(_) => Ok(()),
            Err(err) => Err(err.clone()),
        };
        self.journal.append_note(entry, LogType::ExecutionResult, note);
    }

    /// Current total assets in units of the deposit token
    pub fn total_assets(&self) -> StrategyResult<U256> {
        valuation::total_assets(
            &self.collaborators.pool,
            &self.collaborators.vault,
            &self.collaborators.ledger,
            &self.settings,
        )
    }

    pub fn should_tend(&self) -> StrategyResult<bool> {
        tend::should_tend(&self.collaborators, &self.settings)
    }

    /// Deploys `amount` of idle deposit token into the staked position.
    pub fn deploy(&mut self, amount: U256) -> StrategyResult<Deployment> {
        let result = deployment::deploy(
            &self.collaborators.pool,
            &self.collaborators.vault,
            &self.settings,
            amount,
        );
        let note = match &result {
            Ok(deployment) => format!(
                "Deployed {} for {} pool shares (minimum {}).",
                amount, deployment.shares, deployment.bound.minimum
            ),
            Err(_) => format!("Deployment of {} failed.", amount),
        };
        self.record(&result, note);
        result
    }

    /// Frees up to `amount` of the deposit token and returns the amount actually freed.
    pub fn redeem(&mut self, amount: U256) -> StrategyResult<U256> {
        let result = redemption::redeem(
            &self.collaborators.pool,
            &self.collaborators.vault,
            &self.settings,
            amount,
        );
        let note = match &result {
            Ok(Redemption { shares, freed, .. }) => format!(
                "Redeemed {} pool shares for {} of the requested {}.",
                shares, freed, amount
            ),
            Err(_) => format!("Redemption of {} failed.", amount),
        };
        self.record(&result, note);
        result.map(|redemption| redemption.freed)
    }

    /// Runs the harvest cycle and commits the reported total assets.
    pub fn harvest_and_report(&mut self) -> StrategyResult<HarvestOutcome> {
        let result = harvest::harvest_and_report(
            &self.collaborators,
            &self.settings,
            self.data.is_active,
            self.data.last_reported_assets,
        );
        let note = match &result {
            Ok(outcome) => format!(
                "Harvested {} rewards, staked {} pool shares, reported {} total assets (profit {}, loss {}).",
                outcome.rewards_claimed,
                outcome.shares_staked,
                outcome.total_assets,
                outcome.profit,
                outcome.loss
            ),
            Err(_) => "Harvest failed.".to_string(),
        };
        self.record(&result, note);

        let outcome = result?;
        self.data
            .last_report(current_timestamp())
            .last_reported_assets(outcome.total_assets);
        Ok(outcome)
    }

    pub fn tend(&mut self, idle_amount: U256) -> StrategyResult<TendOutcome> {
        let result = tend::tend(
            &self.collaborators,
            &self.settings,
            self.data.is_active,
            idle_amount,
        );
        let note = match &result {
            Ok(outcome) => format!(
                "Tended: compounded {:?}, deployed {:?} pool shares.",
                outcome.compounded,
                outcome.deployed.map(|deployment| deployment.shares)
            ),
            Err(_) => "Tend failed.".to_string(),
        };
        self.record(&result, note);
        result
    }

    /// Appends a configuration change entry and passes the result through
    fn configuration_change(
        &mut self,
        result: StrategyResult<()>,
        note: String,
    ) -> StrategyResult<()> {
        self.journal
            .append_note(result.clone(), LogType::ConfigurationChange, note);
        result
    }

    /// Sets the slippage tolerance. Management only.
    pub fn set_tolerance(&mut self, caller: Address, slippage_bps: u64) -> StrategyResult<()> {
        let result = only_management(caller, self.settings.management)
            .and_then(|_| self.settings.slippage_bps(slippage_bps).map(|_| ()));
        self.configuration_change(
            result,
            format!("Set slippage tolerance to {} bps.", slippage_bps),
        )
    }

    /// Sets the tend compounding threshold. Management only.
    pub fn set_min_reward_to_harvest(
        &mut self,
        caller: Address,
        min_reward_to_harvest: U256,
    ) -> StrategyResult<()> {
        let result = only_management(caller, self.settings.management).map(|_| {
            self.settings.min_reward_to_harvest(min_reward_to_harvest);
        });
        self.configuration_change(
            result,
            format!("Set minimum reward to harvest to {}.", min_reward_to_harvest),
        )
    }

    /// Sets the idle deployment floor of tend. Management only.
    pub fn set_min_idle_to_deploy(
        &mut self,
        caller: Address,
        min_idle_to_deploy: U256,
    ) -> StrategyResult<()> {
        let result = only_management(caller, self.settings.management).map(|_| {
            self.settings.min_idle_to_deploy(min_idle_to_deploy);
        });
        self.configuration_change(
            result,
            format!("Set minimum idle to deploy to {}.", min_idle_to_deploy),
        )
    }

    /// Winds the strategy down. Management only, cannot be undone.
    pub fn shutdown(&mut self, caller: Address) -> StrategyResult<()> {
        let result = only_management(caller, self.settings.management).map(|_| {
            self.data.is_active(false);
        });
        self.configuration_change(result, "Strategy shut down.".to_string())
    }

    /// Frees up to `amount` from a wound-down strategy, capped at the value of the stake.
    /// Management only.
    pub fn emergency_withdraw(&mut self, caller: Address, amount: U256) -> StrategyResult<U256> {
        only_management(caller, self.settings.management)?;
        if self.data.is_active {
            return Err(StrategyError::StrategyActive);
        }

        let staked = self
            .collaborators
            .vault
            .staked_balance_of(self.settings.strategy)?;
        let staked_value = valuation::staked_value(
            &self.collaborators.pool,
            staked,
            self.settings.asset_coin(),
        )?;
        self.redeem(amount.min(staked_value))
    }
}
