//! Maintenance between harvests: reward compounding and idle deployment

use alloy_primitives::U256;

use crate::{
    collaborators::{Collaborators, LiquidityPool, StakingVault, SwapVenue, TokenLedger},
    utils::error::StrategyResult,
};

use super::{
    deployment::{deploy, Deployment},
    settings::StrategySettings,
};

/// Outcome of one tend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TendOutcome {
    /// Primary reward received from compounding the secondary reward, if the swap ran
    pub compounded: Option<U256>,
    /// Deployment of the idle balance, if it cleared the floor
    pub deployed: Option<Deployment>,
}

/// Secondary reward balance and its quoted output in the primary reward.
/// `None` when there is no secondary reward to compound.
fn quote_compounding<P, V, S, L>(
    collaborators: &Collaborators<P, V, S, L>,
    settings: &StrategySettings,
) -> StrategyResult<Option<(U256, U256)>>
where
    S: SwapVenue,
    L: TokenLedger,
{
    let balance = collaborators
        .ledger
        .balance_of(settings.secondary_reward, settings.strategy)?;
    if balance.is_zero() {
        return Ok(None);
    }

    let intermediate = collaborators.tend_first_hop.quote(balance)?;
    let quoted = collaborators.tend_second_hop.quote(intermediate)?;
    Ok(Some((balance, quoted)))
}

/// Returns `true` if compounding the secondary reward is quoted above `min_reward_to_harvest`.
/// Read-only.
pub fn should_tend<P, V, S, L>(
    collaborators: &Collaborators<P, V, S, L>,
    settings: &StrategySettings,
) -> StrategyResult<bool>
where
    S: SwapVenue,
    L: TokenLedger,
{
    Ok(quote_compounding(collaborators, settings)?
        .is_some_and(|(_, quoted)| quoted > settings.min_reward_to_harvest))
}

/// Compounds the secondary reward through both hops when [`should_tend`] holds, then deploys
/// `idle_amount` if it is above `min_idle_to_deploy`.
///
/// A wound-down strategy (`is_active == false`) never deploys, even above the floor. It still
/// compounds. Both hops accept any output. Total assets are not committed here.
pub fn tend<P, V, S, L>(
    collaborators: &Collaborators<P, V, S, L>,
    settings: &StrategySettings,
    is_active: bool,
    idle_amount: U256,
) -> StrategyResult<TendOutcome>
where
    P: LiquidityPool,
    V: StakingVault,
    S: SwapVenue,
    L: TokenLedger,
{
    let mut outcome = TendOutcome::default();

    if let Some((balance, quoted)) = quote_compounding(collaborators, settings)? {
        if quoted > settings.min_reward_to_harvest {
            let intermediate = collaborators
                .tend_first_hop
                .swap(balance, U256::ZERO, None)?;
            let received = collaborators.tend_second_hop.swap(
                intermediate,
                U256::ZERO,
                Some(settings.strategy),
            )?;
            outcome.compounded = Some(received);
        }
    }

    if is_active && idle_amount > settings.min_idle_to_deploy {
        outcome.deployed = Some(deploy(
            &collaborators.pool,
            &collaborators.vault,
            settings,
            idle_amount,
        )?);
    }

    Ok(outcome)
}
