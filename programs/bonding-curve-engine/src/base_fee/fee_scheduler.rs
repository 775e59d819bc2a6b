use anchor_lang::prelude::*;

use crate::{
    constants::{
        fee::{FEE_DENOMINATOR, MAX_FEE_NUMERATOR},
        BASIS_POINT_MAX,
    },
    fee_math::get_fee_in_period,
    params::fee_parameters::validate_fee_fraction,
    safe_math::{SafeCast, SafeMath},
    state::BaseFeeMode,
    PoolError,
};

use super::BaseFeeHandler;

#[derive(Debug, Clone, Copy)]
pub struct FeeScheduler {
    pub cliff_fee_numerator: u64,
    pub number_of_period: u16,
    pub period_frequency: u64,
    pub reduction_factor: u64,
    pub fee_scheduler_mode: BaseFeeMode,
}

impl FeeScheduler {
    pub fn get_max_base_fee_numerator(&self) -> u64 {
        self.cliff_fee_numerator
    }

    fn get_base_fee_numerator_by_period(&self, period: u64) -> Result<u64> {
        let period = period.min(self.number_of_period.into());

        match self.fee_scheduler_mode {
            BaseFeeMode::FeeSchedulerLinear => {
                let fee_numerator = self
                    .cliff_fee_numerator
                    .safe_sub(self.reduction_factor.safe_mul(period)?)?;
                Ok(fee_numerator)
            }
            BaseFeeMode::FeeSchedulerExponential => {
                let period: u16 = period.safe_cast()?;
                let fee_numerator =
                    get_fee_in_period(self.cliff_fee_numerator, self.reduction_factor, period)?;
                Ok(fee_numerator)
            }
        }
    }
}

impl BaseFeeHandler for FeeScheduler {
    fn validate(&self) -> Result<()> {
        if self.period_frequency != 0 || self.number_of_period != 0 || self.reduction_factor != 0
        {
            require!(
                self.number_of_period != 0
                    && self.period_frequency != 0
                    && self.reduction_factor != 0,
                PoolError::InvalidFeeScheduler
            );
        }

        if self.fee_scheduler_mode == BaseFeeMode::FeeSchedulerExponential {
            require!(
                self.reduction_factor < BASIS_POINT_MAX,
                PoolError::InvalidFeeScheduler
            );
        }

        // linear schedules must not reduce below zero within the configured periods
        if self.fee_scheduler_mode == BaseFeeMode::FeeSchedulerLinear {
            let total_reduction = u128::from(self.reduction_factor)
                .safe_mul(self.number_of_period.into())?;
            require!(
                total_reduction <= self.cliff_fee_numerator.into(),
                PoolError::InvalidFeeScheduler
            );
        }

        let min_fee_numerator = self.get_min_base_fee_numerator()?;
        let max_fee_numerator = self.get_max_base_fee_numerator();
        validate_fee_fraction(min_fee_numerator, FEE_DENOMINATOR)?;
        validate_fee_fraction(max_fee_numerator, FEE_DENOMINATOR)?;
        require!(
            max_fee_numerator <= MAX_FEE_NUMERATOR,
            PoolError::ExceedMaxFeeBps
        );
        Ok(())
    }

    fn get_base_fee_numerator(&self, current_point: u64, activation_point: u64) -> Result<u64> {
        if self.period_frequency == 0 {
            return Ok(self.cliff_fee_numerator);
        }
        // a point before activation is charged the cliff fee
        let period = current_point
            .saturating_sub(activation_point)
            .safe_div(self.period_frequency)?;
        self.get_base_fee_numerator_by_period(period)
    }

    fn get_min_base_fee_numerator(&self) -> Result<u64> {
        self.get_base_fee_numerator_by_period(self.number_of_period.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(cliff: u64, number_of_period: u16, frequency: u64, reduction: u64) -> FeeScheduler {
        FeeScheduler {
            cliff_fee_numerator: cliff,
            number_of_period,
            period_frequency: frequency,
            reduction_factor: reduction,
            fee_scheduler_mode: BaseFeeMode::FeeSchedulerLinear,
        }
    }

    #[test]
    fn test_linear_fee_decays_and_floors() {
        let scheduler = linear(100_000_000, 5, 10, 10_000_000);
        scheduler.validate().unwrap();

        assert_eq!(scheduler.get_base_fee_numerator(0, 0).unwrap(), 100_000_000);
        assert_eq!(scheduler.get_base_fee_numerator(9, 0).unwrap(), 100_000_000);
        assert_eq!(scheduler.get_base_fee_numerator(10, 0).unwrap(), 90_000_000);
        assert_eq!(scheduler.get_base_fee_numerator(35, 0).unwrap(), 70_000_000);
        // capped at number_of_period
        assert_eq!(scheduler.get_base_fee_numerator(10_000, 0).unwrap(), 50_000_000);
        assert_eq!(scheduler.get_min_base_fee_numerator().unwrap(), 50_000_000);
    }

    #[test]
    fn test_linear_fee_cannot_go_negative() {
        let scheduler = linear(10_000_000, 5, 10, 10_000_000);
        assert_eq!(
            scheduler.validate().unwrap_err(),
            PoolError::InvalidFeeScheduler.into()
        );
    }

    #[test]
    fn test_partial_scheduler_is_rejected() {
        let scheduler = linear(10_000_000, 5, 0, 1_000);
        assert_eq!(
            scheduler.validate().unwrap_err(),
            PoolError::InvalidFeeScheduler.into()
        );
    }

    #[test]
    fn test_flat_fee() {
        let scheduler = linear(2_500_000, 0, 0, 0);
        scheduler.validate().unwrap();
        assert_eq!(scheduler.get_base_fee_numerator(1_000, 0).unwrap(), 2_500_000);
    }

    #[test]
    fn test_exponential_fee() {
        let scheduler = FeeScheduler {
            cliff_fee_numerator: 500_000_000,
            number_of_period: 3,
            period_frequency: 60,
            reduction_factor: 5_000,
            fee_scheduler_mode: BaseFeeMode::FeeSchedulerExponential,
        };
        scheduler.validate().unwrap();
        assert_eq!(scheduler.get_base_fee_numerator(100, 100).unwrap(), 500_000_000);
        assert_eq!(scheduler.get_base_fee_numerator(160, 100).unwrap(), 250_000_000);
        assert_eq!(scheduler.get_base_fee_numerator(10_000, 100).unwrap(), 62_500_000);
    }

    #[test]
    fn test_fee_above_max_is_rejected() {
        let scheduler = linear(995_000_000, 0, 0, 0);
        assert_eq!(
            scheduler.validate().unwrap_err(),
            PoolError::ExceedMaxFeeBps.into()
        );
    }
}
