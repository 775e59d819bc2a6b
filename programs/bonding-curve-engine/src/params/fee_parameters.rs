//! Fees module includes information about fee charges
use anchor_lang::prelude::*;

use crate::{
    constants::{
        dynamic_fee::*,
        fee::{FEE_DENOMINATOR, MAX_PROTOCOL_FEE_PERCENT, MAX_REFERRAL_FEE_PERCENT},
        BASIS_POINT_MAX, ONE_Q64,
    },
    safe_math::SafeMath,
    state::{BaseFeeConfig, DynamicFeeConfig, PoolFeesConfig},
    PoolError,
};

use crate::base_fee::get_base_fee_handler;

/// Information regarding fee charges
#[derive(Copy, Clone, Debug, AnchorSerialize, AnchorDeserialize, InitSpace, Default)]
pub struct PoolFeeParameters {
    /// Base fee
    pub base_fee: BaseFeeParameters,
    /// dynamic fee
    pub dynamic_fee: Option<DynamicFeeParameters>,
    /// percentage of the trading fee taken by protocol
    pub protocol_fee_percent: u8,
    /// percentage of the protocol fee given to a referrer
    pub referral_fee_percent: u8,
}

#[derive(Copy, Clone, Debug, AnchorSerialize, AnchorDeserialize, InitSpace, Default)]
pub struct BaseFeeParameters {
    pub cliff_fee_numerator: u64,
    pub number_of_period: u16,
    pub period_frequency: u64,
    pub reduction_factor: u64,
    pub base_fee_mode: u8,
}

impl BaseFeeParameters {
    fn to_base_fee_config(&self) -> BaseFeeConfig {
        BaseFeeConfig {
            cliff_fee_numerator: self.cliff_fee_numerator,
            number_of_period: self.number_of_period,
            period_frequency: self.period_frequency,
            reduction_factor: self.reduction_factor,
            base_fee_mode: self.base_fee_mode,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        let base_fee_handler = get_base_fee_handler(
            self.cliff_fee_numerator,
            self.number_of_period,
            self.period_frequency,
            self.reduction_factor,
            self.base_fee_mode,
        )?;
        base_fee_handler.validate()
    }
}

impl PoolFeeParameters {
    pub fn to_pool_fees_config(&self) -> PoolFeesConfig {
        let &PoolFeeParameters {
            base_fee,
            dynamic_fee,
            protocol_fee_percent,
            referral_fee_percent,
        } = self;
        PoolFeesConfig {
            base_fee: base_fee.to_base_fee_config(),
            dynamic_fee: dynamic_fee
                .map(|dynamic_fee| dynamic_fee.to_dynamic_fee_config())
                .unwrap_or_default(),
            protocol_fee_percent,
            referral_fee_percent,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.base_fee.validate()?;

        if let Some(dynamic_fee) = self.dynamic_fee {
            dynamic_fee.validate()?;
        }

        require!(
            self.protocol_fee_percent <= MAX_PROTOCOL_FEE_PERCENT,
            PoolError::InvalidFeePercentage
        );
        require!(
            self.referral_fee_percent <= MAX_REFERRAL_FEE_PERCENT,
            PoolError::InvalidFeePercentage
        );

        Ok(())
    }
}

#[derive(Copy, Clone, Debug, AnchorSerialize, AnchorDeserialize, InitSpace, Default, PartialEq, Eq)]
pub struct DynamicFeeParameters {
    pub bin_step: u16,
    pub bin_step_u128: u128,
    pub filter_period: u16,
    pub decay_period: u16,
    pub reduction_factor: u16,
    pub max_volatility_accumulator: u32,
    pub variable_fee_control: u32,
}

impl DynamicFeeParameters {
    fn to_dynamic_fee_config(&self) -> DynamicFeeConfig {
        DynamicFeeConfig {
            initialized: 1,
            bin_step: self.bin_step,
            filter_period: self.filter_period,
            decay_period: self.decay_period,
            reduction_factor: self.reduction_factor,
            bin_step_u128: self.bin_step_u128,
            max_volatility_accumulator: self.max_volatility_accumulator,
            variable_fee_control: self.variable_fee_control,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.bin_step > 0, PoolError::InvalidDynamicFeeParameters);

        // bin_step_u128 must be the Q64 form of bin_step bps
        let expected_bin_step_u128 = u128::from(self.bin_step)
            .safe_mul(ONE_Q64)?
            .safe_div(BASIS_POINT_MAX.into())?;
        require!(
            self.bin_step_u128 == expected_bin_step_u128,
            PoolError::InvalidDynamicFeeParameters
        );

        require!(
            self.filter_period < self.decay_period,
            PoolError::InvalidDynamicFeeParameters
        );

        require!(
            u64::from(self.reduction_factor) <= BASIS_POINT_MAX,
            PoolError::InvalidDynamicFeeParameters
        );

        Ok(())
    }

    /// Dynamic fee whose maximum adds MAX_DYNAMIC_FEE_PERCENT of the base fee on top of it
    pub fn from_base_fee_numerator(base_fee_numerator: u64) -> Result<Self> {
        let max_dynamic_fee_numerator = u128::from(base_fee_numerator)
            .safe_mul(MAX_DYNAMIC_FEE_PERCENT.into())?
            .safe_div(100)?;

        let v_fee = max_dynamic_fee_numerator
            .safe_mul(100_000_000_000)?
            .saturating_sub(99_999_999_999);
        let variable_fee_control = v_fee.safe_div(SQUARE_VFA_BIN)?;

        Ok(DynamicFeeParameters {
            bin_step: BIN_STEP_BPS_DEFAULT,
            bin_step_u128: BIN_STEP_BPS_U128_DEFAULT,
            filter_period: FILTER_PERIOD_DEFAULT,
            decay_period: DECAY_PERIOD_DEFAULT,
            reduction_factor: REDUCTION_FACTOR_DEFAULT,
            max_volatility_accumulator: MAX_VOLATILITY_ACCUMULATOR,
            variable_fee_control: u32::try_from(variable_fee_control)
                .map_err(|_| PoolError::TypeCastFailed)?,
        })
    }
}

pub fn validate_fee_fraction(numerator: u64, denominator: u64) -> Result<()> {
    if denominator == 0 || numerator >= denominator {
        Err(PoolError::InvalidFee.into())
    } else {
        Ok(())
    }
}

/// the largest variable fee a config can reach, in fee numerator units
pub fn get_max_variable_fee_numerator(dynamic_fee: &DynamicFeeParameters) -> Result<u128> {
    let square_vfa_bin = u128::from(dynamic_fee.max_volatility_accumulator)
        .safe_mul(dynamic_fee.bin_step.into())?
        .checked_pow(2)
        .ok_or_else(math_error!())?;
    let v_fee = square_vfa_bin.safe_mul(dynamic_fee.variable_fee_control.into())?;
    Ok(v_fee.safe_add(99_999_999_999)?.safe_div(100_000_000_000)?)
}
