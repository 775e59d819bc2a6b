use anchor_lang::prelude::*;

use crate::{
    activation_handler::ActivationType,
    constants::{BASIS_POINT_MAX, MAX_MIGRATION_FEE_PERCENTAGE},
    params::{
        fee_parameters::PoolFeeParameters,
        liquidity_distribution::{validate_curve, LiquidityDistributionParameters},
    },
    safe_math::SafeMath,
    state::{CollectFeeMode, LockedVestingConfig, MigrationOption},
    PoolError,
};

/// Everything needed to create a config. Amounts that depend on the curve are derived on creation.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Default)]
pub struct ConfigParameters {
    pub pool_fees: PoolFeeParameters,
    pub collect_fee_mode: u8,
    pub migration_option: u8,
    pub activation_type: u8,
    pub partner_lp_percentage: u8,
    pub partner_locked_lp_percentage: u8,
    pub creator_lp_percentage: u8,
    pub creator_locked_lp_percentage: u8,
    pub partner_surplus_percentage: u8,
    pub partner_lp_vesting: LpVestingParams,
    pub creator_lp_vesting: LpVestingParams,
    pub locked_vesting: LockedVestingParams,
    pub migration_fee: MigrationFeeParams,
    pub migration_quote_threshold: u64,
    pub sqrt_start_price: u128,
    pub token_supply: Option<TokenSupplyParams>,
    pub curve: Vec<LiquidityDistributionParameters>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockedVestingParams {
    pub amount_per_period: u64,
    pub cliff_duration_from_migration_time: u64,
    pub frequency: u64,
    pub number_of_period: u64,
    pub cliff_unlock_amount: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LpVestingParams {
    pub cliff_duration_from_migration_time: u32,
    pub bps_per_period: u16,
    pub frequency: u64,
    pub number_of_periods: u16,
}

/// Part of the migration quote kept back from the venue and paid to the partner and creator
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationFeeParams {
    /// percentage of the migration quote threshold
    pub fee_percentage: u8,
    /// creator's cut of the migration fee, the partner takes the rest
    pub creator_fee_percentage: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenSupplyParams {
    /// total token supply minted before migration
    pub pre_migration_token_supply: u64,
    /// total token supply that must remain after migration, the difference is burnable
    pub post_migration_token_supply: u64,
}

impl ConfigParameters {
    pub fn validate(&self) -> Result<()> {
        self.pool_fees.validate()?;

        CollectFeeMode::try_from(self.collect_fee_mode)
            .map_err(|_| PoolError::InvalidCollectFeeMode)?;
        MigrationOption::try_from(self.migration_option)
            .map_err(|_| PoolError::InvalidMigrationOption)?;
        ActivationType::try_from(self.activation_type)
            .map_err(|_| PoolError::InvalidActivationType)?;

        // creator's unlocked share takes the remainder
        let sum_lp_percentage = u16::from(self.partner_lp_percentage)
            .safe_add(self.partner_locked_lp_percentage.into())?
            .safe_add(self.creator_lp_percentage.into())?
            .safe_add(self.creator_locked_lp_percentage.into())?;
        require!(sum_lp_percentage <= 100, PoolError::InvalidFeePercentage);
        require!(
            self.partner_surplus_percentage <= 100,
            PoolError::InvalidFeePercentage
        );

        self.partner_lp_vesting.validate()?;
        self.creator_lp_vesting.validate()?;
        self.locked_vesting.validate()?;
        self.migration_fee.validate()?;

        require!(
            self.migration_quote_threshold > 0,
            PoolError::InvalidQuoteThreshold
        );

        validate_curve(self.sqrt_start_price, &self.curve)?;

        if let Some(token_supply) = self.token_supply {
            token_supply.validate()?;
        }

        Ok(())
    }
}

impl LockedVestingParams {
    pub fn to_locked_vesting_config(&self) -> LockedVestingConfig {
        LockedVestingConfig {
            amount_per_period: self.amount_per_period,
            cliff_duration_from_migration_time: self.cliff_duration_from_migration_time,
            frequency: self.frequency,
            number_of_period: self.number_of_period,
            cliff_unlock_amount: self.cliff_unlock_amount,
            ..Default::default()
        }
    }

    pub fn get_total_amount(&self) -> Result<u64> {
        let total_amount = self
            .cliff_unlock_amount
            .safe_add(self.amount_per_period.safe_mul(self.number_of_period)?)?;
        Ok(total_amount)
    }

    pub fn has_vesting(&self) -> bool {
        *self != LockedVestingParams::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.has_vesting() {
            require!(self.frequency > 0, PoolError::InvalidVestingParameters);
            require!(
                self.get_total_amount()? > 0,
                PoolError::InvalidVestingParameters
            );
            if self.number_of_period == 0 {
                require!(
                    self.amount_per_period == 0,
                    PoolError::InvalidVestingParameters
                );
            }
        }
        Ok(())
    }
}

impl LpVestingParams {
    pub fn validate(&self) -> Result<()> {
        let total_bps_after_cliff =
            u64::from(self.bps_per_period).safe_mul(self.number_of_periods.into())?;
        require!(
            total_bps_after_cliff <= BASIS_POINT_MAX,
            PoolError::InvalidVestingParameters
        );
        if self.number_of_periods > 0 {
            require!(
                self.frequency > 0 && self.bps_per_period > 0,
                PoolError::InvalidVestingParameters
            );
        }
        Ok(())
    }
}

impl MigrationFeeParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.fee_percentage <= MAX_MIGRATION_FEE_PERCENTAGE,
            PoolError::InvalidFeePercentage
        );
        require!(
            self.creator_fee_percentage <= 100,
            PoolError::InvalidFeePercentage
        );
        Ok(())
    }
}

impl TokenSupplyParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.pre_migration_token_supply >= self.post_migration_token_supply,
            PoolError::InvalidTokenSupply
        );
        Ok(())
    }
}
