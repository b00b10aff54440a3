pub mod data;
pub mod deployment;
pub mod executable;
pub mod harvest;
pub mod redemption;
pub mod settings;
pub mod slippage;
pub mod tend;
pub mod valuation;
