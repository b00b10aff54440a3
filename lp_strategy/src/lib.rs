pub mod collaborators;
pub mod constants;
pub mod evm;
pub mod journal;
pub mod strategy;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;

pub use strategy::{
    executable::ExecutableStrategy,
    settings::{StrategySettings, StrategySettingsQuery},
};
pub use utils::error::{StrategyError, StrategyResult};
