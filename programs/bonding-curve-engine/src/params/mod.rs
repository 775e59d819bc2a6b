pub mod config_parameters;
pub mod fee_parameters;
pub mod liquidity_distribution;
pub mod swap;
