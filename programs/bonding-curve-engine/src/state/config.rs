use anchor_lang::prelude::*;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use ruint::aliases::U256;
use static_assertions::const_assert_eq;

use crate::{
    base_fee::{get_base_fee_handler, BaseFeeHandler},
    constants::{
        fee::{FEE_DENOMINATOR, MAX_FEE_NUMERATOR},
        BASIS_POINT_MAX, MAX_CURVE_POINT_CONFIG, MAX_SQRT_PRICE, SECONDS_PER_DAY,
        SWAP_BUFFER_PERCENTAGE,
    },
    params::{
        config_parameters::{LockedVestingParams, LpVestingParams, MigrationFeeParams},
        fee_parameters::PoolFeeParameters,
        liquidity_distribution::{get_base_token_for_swap, LiquidityDistributionParameters},
    },
    safe_math::{SafeCast, SafeMath},
    u128x128_math::Rounding,
    utils_math::{safe_mul_div_cast_u128, safe_mul_div_cast_u64},
    PoolError,
};

use super::fee::{FeeOnAmountResult, VolatilityTracker};

/// base fee mode
#[repr(u8)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    IntoPrimitive,
    TryFromPrimitive,
    AnchorDeserialize,
    AnchorSerialize,
)]
pub enum BaseFeeMode {
    // fee = cliff_fee_numerator - passed_period * reduction_factor
    FeeSchedulerLinear,
    // fee = cliff_fee_numerator * (1-reduction_factor/10_000)^passed_period
    FeeSchedulerExponential,
}

#[zero_copy]
#[derive(Debug, InitSpace, Default, PartialEq)]
pub struct PoolFeesConfig {
    pub base_fee: BaseFeeConfig,
    pub dynamic_fee: DynamicFeeConfig,
    /// share of the trading fee routed to protocol
    pub protocol_fee_percent: u8,
    /// share of the protocol fee routed to the referrer
    pub referral_fee_percent: u8,
    pub padding: [u8; 14],
}

const_assert_eq!(PoolFeesConfig::INIT_SPACE, 96);

impl PoolFeesConfig {
    /// Base fee from the scheduler plus the volatility driven variable fee, capped at MAX_FEE_NUMERATOR (99%)
    pub fn get_total_fee_numerator(
        &self,
        volatility_tracker: &VolatilityTracker,
        current_point: u64,
        activation_point: u64,
    ) -> Result<u64> {
        let base_fee_handler = self.base_fee.get_base_fee_handler()?;
        let base_fee_numerator =
            base_fee_handler.get_base_fee_numerator(current_point, activation_point)?;

        let total_fee_numerator = self
            .dynamic_fee
            .get_variable_fee_numerator(volatility_tracker)?
            .safe_add(base_fee_numerator.into())?;

        let total_fee_numerator = if total_fee_numerator > MAX_FEE_NUMERATOR.into() {
            MAX_FEE_NUMERATOR
        } else {
            total_fee_numerator.safe_cast()?
        };

        Ok(total_fee_numerator)
    }

    pub fn get_fee_on_amount(
        &self,
        trade_fee_numerator: u64,
        amount: u64,
        has_referral: bool,
    ) -> Result<FeeOnAmountResult> {
        let (amount, fee) = PoolFeesConfig::get_excluded_fee_amount(trade_fee_numerator, amount)?;
        let (trading_fee, protocol_fee, referral_fee) = self.split_fees(fee, has_referral)?;

        Ok(FeeOnAmountResult {
            amount,
            trading_fee,
            protocol_fee,
            referral_fee,
        })
    }

    /// Returns (excluded_fee_amount, fee). The fee rounds up.
    pub fn get_excluded_fee_amount(
        trade_fee_numerator: u64,
        included_fee_amount: u64,
    ) -> Result<(u64, u64)> {
        let trading_fee: u64 = safe_mul_div_cast_u64(
            included_fee_amount,
            trade_fee_numerator,
            FEE_DENOMINATOR,
            Rounding::Up,
        )?;
        let excluded_fee_amount = included_fee_amount.safe_sub(trading_fee)?;
        Ok((excluded_fee_amount, trading_fee))
    }

    /// Returns (included_fee_amount, fee), the smallest gross amount that nets `excluded_fee_amount`
    pub fn get_included_fee_amount(
        trade_fee_numerator: u64,
        excluded_fee_amount: u64,
    ) -> Result<(u64, u64)> {
        let included_fee_amount: u64 = safe_mul_div_cast_u64(
            excluded_fee_amount,
            FEE_DENOMINATOR,
            FEE_DENOMINATOR.safe_sub(trade_fee_numerator)?,
            Rounding::Up,
        )?;
        let fee_amount = included_fee_amount.safe_sub(excluded_fee_amount)?;
        Ok((included_fee_amount, fee_amount))
    }

    /// Returns (trading_fee, protocol_fee, referral_fee). Both carve-outs round down.
    pub fn split_fees(&self, fee_amount: u64, has_referral: bool) -> Result<(u64, u64, u64)> {
        let protocol_fee = safe_mul_div_cast_u64(
            fee_amount,
            self.protocol_fee_percent.into(),
            100,
            Rounding::Down,
        )?;

        // update trading fee
        let trading_fee: u64 = fee_amount.safe_sub(protocol_fee)?;

        let referral_fee = if has_referral {
            safe_mul_div_cast_u64(
                protocol_fee,
                self.referral_fee_percent.into(),
                100,
                Rounding::Down,
            )?
        } else {
            0
        };

        let protocol_fee = protocol_fee.safe_sub(referral_fee)?;

        Ok((trading_fee, protocol_fee, referral_fee))
    }
}

#[zero_copy]
#[derive(Debug, InitSpace, Default, PartialEq)]
pub struct BaseFeeConfig {
    pub cliff_fee_numerator: u64,
    pub period_frequency: u64,
    pub reduction_factor: u64,
    pub number_of_period: u16,
    pub base_fee_mode: u8,
    pub padding_0: [u8; 5],
}

const_assert_eq!(BaseFeeConfig::INIT_SPACE, 32);

impl BaseFeeConfig {
    pub fn get_base_fee_handler(&self) -> Result<Box<dyn BaseFeeHandler>> {
        get_base_fee_handler(
            self.cliff_fee_numerator,
            self.number_of_period,
            self.period_frequency,
            self.reduction_factor,
            self.base_fee_mode,
        )
    }
}

#[zero_copy]
#[derive(Debug, InitSpace, Default, PartialEq)]
pub struct DynamicFeeConfig {
    /// zero when the config has no dynamic fee
    pub initialized: u8,
    pub padding: [u8; 7],
    pub max_volatility_accumulator: u32,
    pub variable_fee_control: u32,
    pub bin_step: u16,
    pub filter_period: u16,
    pub decay_period: u16,
    pub reduction_factor: u16,
    pub padding2: [u8; 8],
    pub bin_step_u128: u128,
}

const_assert_eq!(DynamicFeeConfig::INIT_SPACE, 48);

impl DynamicFeeConfig {
    pub fn is_dynamic_fee_enable(&self) -> bool {
        self.initialized != 0
    }

    pub fn get_variable_fee_numerator(
        &self,
        volatility_tracker: &VolatilityTracker,
    ) -> Result<u128> {
        if !self.is_dynamic_fee_enable() {
            return Ok(0);
        }

        // (volatility_accumulator * bin_step)^2 * variable_fee_control / 1e11, rounded up
        let square_vfa_bin: u128 = volatility_tracker
            .volatility_accumulator
            .safe_mul(self.bin_step.into())?
            .checked_pow(2)
            .ok_or_else(math_error!())?;

        let v_fee = square_vfa_bin.safe_mul(self.variable_fee_control.into())?;

        let scaled_v_fee = v_fee.safe_add(99_999_999_999)?.safe_div(100_000_000_000)?;

        Ok(scaled_v_fee)
    }
}

#[zero_copy]
#[derive(Debug, InitSpace, Default, PartialEq)]
pub struct LockedVestingConfig {
    pub amount_per_period: u64,
    pub cliff_duration_from_migration_time: u64,
    pub frequency: u64,
    pub number_of_period: u64,
    pub cliff_unlock_amount: u64,
    pub _padding: u64,
}

const_assert_eq!(LockedVestingConfig::INIT_SPACE, 48);

impl LockedVestingConfig {
    pub fn to_locked_vesting_params(&self) -> LockedVestingParams {
        LockedVestingParams {
            amount_per_period: self.amount_per_period,
            cliff_duration_from_migration_time: self.cliff_duration_from_migration_time,
            frequency: self.frequency,
            number_of_period: self.number_of_period,
            cliff_unlock_amount: self.cliff_unlock_amount,
        }
    }
}

#[repr(u8)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    IntoPrimitive,
    TryFromPrimitive,
    AnchorDeserialize,
    AnchorSerialize,
)]
pub enum MigrationOption {
    /// constant product venue
    MeteoraDamm,
    /// concentrated liquidity venue over the full price range
    DammV2,
}

/// Schedule used to vest locked LP of one party. Byte arrays keep the struct free of padding.
#[zero_copy]
#[derive(Debug, Default, InitSpace, PartialEq)]
pub struct LpVestingInfo {
    pub cliff_duration_from_migration_time: [u8; 4],
    pub bps_per_period: [u8; 2],
    pub frequency: [u8; 8],
    pub number_of_periods: [u8; 2],
}

const_assert_eq!(LpVestingInfo::INIT_SPACE, 16);

impl LpVestingInfo {
    #[inline(always)]
    pub fn get_cliff_duration_from_migration_time(&self) -> u32 {
        u32::from_le_bytes(self.cliff_duration_from_migration_time)
    }

    #[inline(always)]
    pub fn get_bps_per_period(&self) -> u16 {
        u16::from_le_bytes(self.bps_per_period)
    }

    #[inline(always)]
    pub fn get_frequency(&self) -> u64 {
        u64::from_le_bytes(self.frequency)
    }

    #[inline(always)]
    pub fn get_number_of_periods(&self) -> u16 {
        u16::from_le_bytes(self.number_of_periods)
    }

    pub fn is_none(&self) -> bool {
        self.get_cliff_duration_from_migration_time() == 0
            && self.get_bps_per_period() == 0
            && self.get_frequency() == 0
            && self.get_number_of_periods() == 0
    }

    pub fn calculate_cliff_unlock_bps(&self) -> Result<u16> {
        let total_bps_after_cliff =
            u64::from(self.get_bps_per_period()).safe_mul(self.get_number_of_periods().into())?;

        let cliff_unlock_bps = BASIS_POINT_MAX.safe_sub(total_bps_after_cliff)?;
        Ok(cliff_unlock_bps.safe_cast()?)
    }

    /// Percentage (of `locked_percentage`) that is still locked one day after migration
    pub fn get_locked_percentage_at_day_one(&self, locked_percentage: u8) -> Result<u8> {
        let vest_bps_at_day_one = self.vest_bps_locked_at_day_one()?;
        let locked_bps = u32::from(locked_percentage).safe_mul(100)?;

        let locked_bps_at_day_one = u32::from(vest_bps_at_day_one)
            .safe_mul(locked_bps)?
            .safe_div(BASIS_POINT_MAX as u32)?;

        let locked_percentage_at_day_one = locked_bps_at_day_one.safe_div(100)?;

        Ok(u8::try_from(locked_percentage_at_day_one).map_err(|_| PoolError::TypeCastFailed)?)
    }

    fn vest_bps_locked_at_day_one(&self) -> Result<u16> {
        if self.is_none() {
            return Ok(0);
        }

        // cliff lands after day one
        if u64::from(self.get_cliff_duration_from_migration_time()) > SECONDS_PER_DAY {
            return Ok(10_000);
        }

        let period = if self.get_frequency() == 0 {
            0
        } else {
            SECONDS_PER_DAY
                .safe_sub(self.get_cliff_duration_from_migration_time().into())?
                .safe_div(self.get_frequency())?
        };

        let period = period.min(self.get_number_of_periods().into());

        let cliff_unlock_bps = self.calculate_cliff_unlock_bps()?;

        let bps_unlocked_at_day_one = u64::from(cliff_unlock_bps)
            .safe_add(u64::from(self.get_bps_per_period()).safe_mul(period)?)?;

        let bps_locked_at_day_one = BASIS_POINT_MAX.safe_sub(bps_unlocked_at_day_one)?;

        Ok(bps_locked_at_day_one.safe_cast()?)
    }
}

impl From<&LpVestingParams> for LpVestingInfo {
    fn from(params: &LpVestingParams) -> Self {
        LpVestingInfo {
            cliff_duration_from_migration_time: params
                .cliff_duration_from_migration_time
                .to_le_bytes(),
            bps_per_period: params.bps_per_period.to_le_bytes(),
            frequency: params.frequency.to_le_bytes(),
            number_of_periods: params.number_of_periods.to_le_bytes(),
        }
    }
}

#[zero_copy]
#[derive(InitSpace, Debug, Default, PartialEq)]
pub struct LiquidityDistributionConfig {
    pub sqrt_price: u128,
    pub liquidity: u128,
}

impl LiquidityDistributionConfig {
    pub fn to_liquidity_distribution_parameters(&self) -> LiquidityDistributionParameters {
        LiquidityDistributionParameters {
            sqrt_price: self.sqrt_price,
            liquidity: self.liquidity,
        }
    }
}

/// A single curve segment: `liquidity` is constant between `lower_sqrt_price` and `upper_sqrt_price`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSegment {
    pub lower_sqrt_price: u128,
    pub upper_sqrt_price: u128,
    pub liquidity: u128,
}

#[zero_copy]
#[derive(InitSpace, Debug, Default, PartialEq)]
pub struct PoolConfig {
    pub pool_fees: PoolFeesConfig,
    /// price of the first segment's lower bound
    pub sqrt_start_price: u128,
    /// price at which the quote reserve reaches the migration threshold
    pub migration_sqrt_price: u128,
    /// curve[i] covers (curve[i - 1].sqrt_price, curve[i].sqrt_price], curve[0] starts at sqrt_start_price
    pub curve: [LiquidityDistributionConfig; MAX_CURVE_POINT_CONFIG],
    /// creator's base allocation vested after migration
    pub locked_vesting_config: LockedVestingConfig,
    /// base sold while walking from the start price to the migration price
    pub swap_base_amount: u64,
    /// quote reserve that completes the curve
    pub migration_quote_threshold: u64,
    /// base handed to the venue on migration
    pub migration_base_threshold: u64,
    /// fixed supply only: base minted up front
    pub pre_migration_token_supply: u64,
    /// fixed supply only: base that must survive the post-migration burn
    pub post_migration_token_supply: u64,
    pub partner_lp_vesting_info: LpVestingInfo,
    pub creator_lp_vesting_info: LpVestingInfo,
    pub collect_fee_mode: u8,
    /// MigrationOption, picks the venue
    pub migration_option: u8,
    /// ActivationType: slot or timestamp
    pub activation_type: u8,
    pub version: u8,
    /// 1 for fixed supply, 0 for dynamic supply
    pub fixed_token_supply_flag: u8,
    pub partner_lp_percentage: u8,
    pub partner_locked_lp_percentage: u8,
    pub creator_lp_percentage: u8,
    pub creator_locked_lp_percentage: u8,
    /// partner share of the surplus quote
    pub partner_surplus_percentage: u8,
    /// share of the migration quote threshold kept back as migration fee
    pub migration_fee_percentage: u8,
    /// creator's cut of the migration fee
    pub creator_migration_fee_percentage: u8,
    pub padding: [u8; 12],
}

const_assert_eq!(PoolConfig::INIT_SPACE, 912);

/// Values computed from the curve when a config is created
pub struct DerivedConfigAmounts {
    pub swap_base_amount: u64,
    pub migration_base_threshold: u64,
    pub migration_sqrt_price: u128,
}

impl PoolConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        pool_fees: &PoolFeeParameters,
        collect_fee_mode: u8,
        migration_option: u8,
        activation_type: u8,
        partner_lp_percentage: u8,
        partner_locked_lp_percentage: u8,
        creator_lp_percentage: u8,
        creator_locked_lp_percentage: u8,
        partner_surplus_percentage: u8,
        migration_fee: &MigrationFeeParams,
        partner_lp_vesting_info: LpVestingInfo,
        creator_lp_vesting_info: LpVestingInfo,
        locked_vesting_params: &LockedVestingParams,
        migration_quote_threshold: u64,
        sqrt_start_price: u128,
        derived: &DerivedConfigAmounts,
        fixed_token_supply_flag: u8,
        pre_migration_token_supply: u64,
        post_migration_token_supply: u64,
        curve: &[LiquidityDistributionParameters],
    ) {
        self.version = 0;
        self.pool_fees = pool_fees.to_pool_fees_config();
        self.collect_fee_mode = collect_fee_mode;
        self.migration_option = migration_option;
        self.activation_type = activation_type;

        self.partner_lp_percentage = partner_lp_percentage;
        self.partner_locked_lp_percentage = partner_locked_lp_percentage;
        self.creator_lp_percentage = creator_lp_percentage;
        self.creator_locked_lp_percentage = creator_locked_lp_percentage;
        self.partner_surplus_percentage = partner_surplus_percentage;
        self.migration_fee_percentage = migration_fee.fee_percentage;
        self.creator_migration_fee_percentage = migration_fee.creator_fee_percentage;
        self.partner_lp_vesting_info = partner_lp_vesting_info;
        self.creator_lp_vesting_info = creator_lp_vesting_info;

        self.locked_vesting_config = locked_vesting_params.to_locked_vesting_config();
        self.migration_quote_threshold = migration_quote_threshold;
        self.sqrt_start_price = sqrt_start_price;
        self.swap_base_amount = derived.swap_base_amount;
        self.migration_base_threshold = derived.migration_base_threshold;
        self.migration_sqrt_price = derived.migration_sqrt_price;

        self.fixed_token_supply_flag = fixed_token_supply_flag;
        self.pre_migration_token_supply = pre_migration_token_supply;
        self.post_migration_token_supply = post_migration_token_supply;

        for (slot, point) in self.curve.iter_mut().zip(curve.iter()) {
            *slot = point.to_liquidity_distribution_config();
        }
    }

    /// number of configured curve points
    pub fn curve_len(&self) -> usize {
        self.curve
            .iter()
            .take_while(|point| point.sqrt_price != 0 && point.liquidity != 0)
            .count()
    }

    pub fn get_curve(&self) -> Vec<LiquidityDistributionParameters> {
        self.curve[..self.curve_len()]
            .iter()
            .map(|point| point.to_liquidity_distribution_parameters())
            .collect()
    }

    pub fn get_segment(&self, index: usize) -> Result<CurveSegment> {
        require!(index < self.curve_len(), PoolError::InvalidCurve);
        let lower_sqrt_price = if index == 0 {
            self.sqrt_start_price
        } else {
            self.curve[index - 1].sqrt_price
        };
        Ok(CurveSegment {
            lower_sqrt_price,
            upper_sqrt_price: self.curve[index].sqrt_price,
            liquidity: self.curve[index].liquidity,
        })
    }

    pub fn get_migration_option(&self) -> Result<MigrationOption> {
        Ok(MigrationOption::try_from(self.migration_option)
            .map_err(|_| PoolError::InvalidMigrationOption)?)
    }

    pub fn get_swap_amount_with_buffer(
        swap_base_amount: u64,
        sqrt_start_price: u128,
        curve: &[LiquidityDistributionParameters],
    ) -> Result<u64> {
        let swap_amount_buffer = u128::from(swap_base_amount)
            .safe_mul(SWAP_BUFFER_PERCENTAGE.into())?
            .safe_div(100)?
            .safe_add(swap_base_amount.into())?;
        let max_sqrt_price = curve
            .last()
            .map(|point| point.sqrt_price)
            .unwrap_or(MAX_SQRT_PRICE);
        let max_base_amount_on_curve =
            get_base_token_for_swap(sqrt_start_price, max_sqrt_price, curve)?;

        if U256::from(swap_amount_buffer) < max_base_amount_on_curve {
            Ok(swap_amount_buffer.safe_cast()?)
        } else {
            Ok(max_base_amount_on_curve.safe_cast()?)
        }
    }

    pub fn get_total_token_supply(
        swap_base_amount: u64,
        migration_base_threshold: u64,
        locked_vesting_params: &LockedVestingParams,
    ) -> Result<u64> {
        let total_circulating_amount = swap_base_amount.safe_add(migration_base_threshold)?;
        let total_locked_vesting_amount = locked_vesting_params.get_total_amount()?;
        let total_amount = total_circulating_amount.safe_add(total_locked_vesting_amount)?;
        Ok(total_amount)
    }

    /// base token deposited into the vault when a pool is created
    pub fn get_initial_base_supply(&self) -> Result<u64> {
        if self.is_fixed_token_supply() {
            Ok(self.pre_migration_token_supply)
        } else {
            let swap_amount_with_buffer = PoolConfig::get_swap_amount_with_buffer(
                self.swap_base_amount,
                self.sqrt_start_price,
                &self.get_curve(),
            )?;
            PoolConfig::get_total_token_supply(
                swap_amount_with_buffer,
                self.migration_base_threshold,
                &self.locked_vesting_config.to_locked_vesting_params(),
            )
        }
    }

    /// base token that must stay in the vault for migration and locked vesting
    pub fn get_reserved_base_amount(&self) -> Result<u64> {
        Ok(self.migration_base_threshold.safe_add(
            self.locked_vesting_config
                .to_locked_vesting_params()
                .get_total_amount()?,
        )?)
    }

    fn get_max_burnable_amount_post_migration(&self) -> Result<u64> {
        if self.is_fixed_token_supply() {
            Ok(self
                .pre_migration_token_supply
                .safe_sub(self.post_migration_token_supply)?)
        } else {
            Ok(u64::MAX)
        }
    }

    /// leftover is extra base token in base vault after curve is completed
    pub fn get_burnable_amount_post_migration(&self, leftover: u64) -> Result<u64> {
        let max_burnable_amount = self.get_max_burnable_amount_post_migration()?;
        Ok(max_burnable_amount.min(leftover))
    }

    pub fn is_fixed_token_supply(&self) -> bool {
        self.fixed_token_supply_flag == 1
    }

    /// Returns (partner_surplus, protocol_surplus). Protocol receives the rounding remainder.
    pub fn get_surplus_distribution(&self, total_surplus: u64) -> Result<(u64, u64)> {
        let partner_surplus = safe_mul_div_cast_u64(
            total_surplus,
            self.partner_surplus_percentage.into(),
            100,
            Rounding::Down,
        )?;
        let protocol_surplus = total_surplus.safe_sub(partner_surplus)?;
        Ok((partner_surplus, protocol_surplus))
    }

    pub fn get_migration_quote_amount_for_config(&self) -> Result<MigrationAmount> {
        PoolConfig::get_migration_quote_amount(
            self.migration_quote_threshold,
            self.migration_fee_percentage,
        )
    }

    /// Quote deposited into the venue rounds up, the fee is what remains of the threshold
    pub fn get_migration_quote_amount(
        migration_quote_threshold: u64,
        migration_fee_percentage: u8,
    ) -> Result<MigrationAmount> {
        let quote_amount = safe_mul_div_cast_u64(
            migration_quote_threshold,
            100.safe_sub(migration_fee_percentage.into())?,
            100,
            Rounding::Up,
        )?;
        let fee = migration_quote_threshold.safe_sub(quote_amount)?;
        Ok(MigrationAmount { quote_amount, fee })
    }

    pub fn get_migration_fee_distribution(&self) -> Result<MigrationFeeDistribution> {
        let MigrationAmount { fee, .. } = self.get_migration_quote_amount_for_config()?;

        let creator_migration_fee = safe_mul_div_cast_u64(
            fee,
            self.creator_migration_fee_percentage.into(),
            100,
            Rounding::Down,
        )?;
        let partner_migration_fee = fee.safe_sub(creator_migration_fee)?;
        Ok(MigrationFeeDistribution {
            partner_migration_fee,
            creator_migration_fee,
        })
    }

    pub fn get_liquidity_distribution(&self, liquidity: u128) -> Result<LiquidityDistribution> {
        let partner_locked_lp = safe_mul_div_cast_u128(
            liquidity,
            self.partner_locked_lp_percentage.into(),
            100,
            Rounding::Down,
        )?;
        let partner_lp = safe_mul_div_cast_u128(
            liquidity,
            self.partner_lp_percentage.into(),
            100,
            Rounding::Down,
        )?;
        let creator_locked_lp = safe_mul_div_cast_u128(
            liquidity,
            self.creator_locked_lp_percentage.into(),
            100,
            Rounding::Down,
        )?;

        let creator_lp = liquidity
            .safe_sub(partner_locked_lp)?
            .safe_sub(partner_lp)?
            .safe_sub(creator_locked_lp)?;

        Ok(LiquidityDistribution {
            partner: LiquidityDistributionItem {
                unlocked_liquidity: partner_lp,
                locked_liquidity: partner_locked_lp,
                lp_vesting_info: self.partner_lp_vesting_info,
            },
            creator: LiquidityDistributionItem {
                unlocked_liquidity: creator_lp,
                locked_liquidity: creator_locked_lp,
                lp_vesting_info: self.creator_lp_vesting_info,
            },
        })
    }

    pub fn get_total_locked_lp_percentage_at_day_one(&self) -> Result<u8> {
        let partner_locked_percentage_at_day_one = self
            .partner_lp_vesting_info
            .get_locked_percentage_at_day_one(self.partner_locked_lp_percentage)?;
        let creator_locked_percentage_at_day_one = self
            .creator_lp_vesting_info
            .get_locked_percentage_at_day_one(self.creator_locked_lp_percentage)?;

        Ok(partner_locked_percentage_at_day_one.safe_add(creator_locked_percentage_at_day_one)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityDistribution {
    pub partner: LiquidityDistributionItem,
    pub creator: LiquidityDistributionItem,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityDistributionItem {
    pub unlocked_liquidity: u128,
    pub locked_liquidity: u128,
    pub lp_vesting_info: LpVestingInfo,
}

impl LiquidityDistributionItem {
    pub fn get_total_liquidity(&self) -> Result<u128> {
        Ok(self.unlocked_liquidity.safe_add(self.locked_liquidity)?)
    }

    /// Unlock schedule for `locked_liquidity`. Without a schedule everything unlocks at the cliff.
    pub fn get_lp_vesting_parameters(&self, current_point: u64) -> Result<LpVestingParameters> {
        let info = &self.lp_vesting_info;
        let cliff_point =
            current_point.safe_add(info.get_cliff_duration_from_migration_time().into())?;
        let number_of_period = info.get_number_of_periods();

        let liquidity_per_period = if number_of_period == 0 {
            0
        } else {
            let total_bps_after_cliff =
                u128::from(info.get_bps_per_period()).safe_mul(number_of_period.into())?;
            let vesting_liquidity = safe_mul_div_cast_u128::<u128>(
                self.locked_liquidity,
                total_bps_after_cliff,
                BASIS_POINT_MAX.into(),
                Rounding::Down,
            )?;
            vesting_liquidity.safe_div(number_of_period.into())?
        };

        let cliff_unlock_liquidity = self
            .locked_liquidity
            .safe_sub(liquidity_per_period.safe_mul(number_of_period.into())?)?;

        Ok(LpVestingParameters {
            cliff_point,
            cliff_unlock_liquidity,
            liquidity_per_period,
            period_frequency: info.get_frequency(),
            number_of_period,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LpVestingParameters {
    pub cliff_point: u64,
    pub cliff_unlock_liquidity: u128,
    pub liquidity_per_period: u128,
    pub period_frequency: u64,
    pub number_of_period: u16,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MigrationAmount {
    pub quote_amount: u64,
    pub fee: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MigrationFeeDistribution {
    pub partner_migration_fee: u64,
    pub creator_migration_fee: u64,
}
