use anchor_lang::prelude::*;

use crate::{state::BaseFeeMode, PoolError};

pub mod fee_scheduler;
pub use fee_scheduler::*;

/// Source of the time-dependent part of the trading fee
pub trait BaseFeeHandler {
    fn validate(&self) -> Result<()>;
    fn get_base_fee_numerator(&self, current_point: u64, activation_point: u64) -> Result<u64>;
    fn get_min_base_fee_numerator(&self) -> Result<u64>;
}

pub fn get_base_fee_handler(
    cliff_fee_numerator: u64,
    number_of_period: u16,
    period_frequency: u64,
    reduction_factor: u64,
    base_fee_mode: u8,
) -> Result<Box<dyn BaseFeeHandler>> {
    let base_fee_mode =
        BaseFeeMode::try_from(base_fee_mode).map_err(|_| PoolError::InvalidBaseFeeMode)?;
    match base_fee_mode {
        BaseFeeMode::FeeSchedulerLinear | BaseFeeMode::FeeSchedulerExponential => {
            let fee_scheduler = FeeScheduler {
                cliff_fee_numerator,
                number_of_period,
                period_frequency,
                reduction_factor,
                fee_scheduler_mode: base_fee_mode,
            };
            Ok(Box::new(fee_scheduler))
        }
    }
}
