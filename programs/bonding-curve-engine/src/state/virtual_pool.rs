use anchor_lang::prelude::*;
use ruint::aliases::U256;
use static_assertions::const_assert_eq;

use crate::{
    curve::{
        get_delta_amount_base_unsigned, get_delta_amount_base_unsigned_256,
        get_delta_amount_quote_unsigned, get_delta_amount_quote_unsigned_256,
        get_next_sqrt_price_from_base_output, get_next_sqrt_price_from_input,
    },
    params::swap::TradeDirection,
    safe_math::{SafeCast, SafeMath},
    state::{fee::VolatilityTracker, PoolConfig, PoolFeesConfig},
    u128x128_math::Rounding,
    PoolError,
};

use super::{
    fee::{FeeMode, FeeOnAmountResult},
    migration::MigrationProgress,
};

pub const PARTNER_SURPLUS_MASK: u8 = 0b000_0001;
pub const PROTOCOL_SURPLUS_MASK: u8 = 0b000_0010;
pub const PARTNER_LP_MASK: u8 = 0b000_0100;
pub const CREATOR_LP_MASK: u8 = 0b000_1000;
pub const LEFTOVER_MASK: u8 = 0b001_0000;
pub const PARTNER_MIGRATION_FEE_MASK: u8 = 0b010_0000;
pub const CREATOR_MIGRATION_FEE_MASK: u8 = 0b100_0000;

#[zero_copy]
#[derive(InitSpace, Debug, Default, PartialEq)]
pub struct VirtualPool {
    /// volatility tracker
    pub volatility_tracker: VolatilityTracker,
    /// current price
    pub sqrt_price: u128,
    /// liquidity credited by the venue at migration
    pub migrated_liquidity: u128,
    /// config the pool was created from
    pub config_id: u64,
    /// base reserve
    pub base_reserve: u64,
    /// quote reserve
    pub quote_reserve: u64,
    /// trading base fee
    pub trading_base_fee: u64,
    /// trading quote fee
    pub trading_quote_fee: u64,
    /// protocol base fee
    pub protocol_base_fee: u64,
    /// protocol quote fee
    pub protocol_quote_fee: u64,
    pub claimed_trading_base_fee: u64,
    pub claimed_trading_quote_fee: u64,
    pub claimed_protocol_base_fee: u64,
    pub claimed_protocol_quote_fee: u64,
    /// activation point, can be slot or timestamp
    pub activation_point: u64,
    /// point the curve completed at
    pub finish_curve_point: u64,
    /// point the migration happened at
    pub migration_point: u64,
    /// opaque handle returned by the venue
    pub position_handle: u64,
    /// base token kept for the leftover receiver after migration
    pub leftover_amount: u64,
    /// migration progress
    pub migration_progress: u8,
    /// bitmask of one-shot claims
    pub claim_status: u8,
    /// curve segment containing sqrt_price
    pub current_segment_index: u8,
    pub padding: [u8; 13],
}

const_assert_eq!(VirtualPool::INIT_SPACE, 240);

/// Outcome of walking the curve with a net input amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurveSwapResult {
    pub output_amount: u64,
    pub next_sqrt_price: u128,
    pub next_segment_index: u8,
    pub crossed_segments: u8,
    /// input the curve could not absorb, refunded to the trader
    pub amount_left: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapResult {
    /// amount taken from the trader, fees included when charged on input
    pub actual_input_amount: u64,
    /// part of `amount_in` that was not used
    pub amount_left: u64,
    /// amount paid to the trader
    pub output_amount: u64,
    /// amount that moved the curve
    pub curve_input_amount: u64,
    /// amount the curve released, before fees on output
    pub curve_output_amount: u64,
    pub next_sqrt_price: u128,
    pub next_segment_index: u8,
    pub crossed_segments: u8,
    pub trading_fee: u64,
    pub protocol_fee: u64,
    pub referral_fee: u64,
}

impl VirtualPool {
    pub fn initialize(
        &mut self,
        config_id: u64,
        sqrt_start_price: u128,
        base_reserve: u64,
        activation_point: u64,
    ) {
        self.config_id = config_id;
        self.sqrt_price = sqrt_start_price;
        self.base_reserve = base_reserve;
        self.activation_point = activation_point;
        self.current_segment_index = 0;
        self.migration_progress = MigrationProgress::NotStarted.into();
    }

    pub fn get_migration_progress(&self) -> Result<MigrationProgress> {
        let migration_progress = MigrationProgress::try_from(self.migration_progress)
            .map_err(|_| PoolError::AccountInvariantViolation)?;
        Ok(migration_progress)
    }

    pub fn set_migration_progress(&mut self, progress: MigrationProgress) {
        self.migration_progress = progress.into();
    }

    pub fn is_curve_complete(&self, migration_threshold: u64) -> bool {
        self.quote_reserve >= migration_threshold
    }

    /// quote collected beyond the threshold
    pub fn get_surplus(&self, migration_threshold: u64) -> u64 {
        self.quote_reserve.saturating_sub(migration_threshold)
    }

    claim_flag!(
        claim_status,
        PARTNER_SURPLUS_MASK,
        is_partner_surplus_claimed,
        set_partner_surplus_claimed
    );
    claim_flag!(
        claim_status,
        PROTOCOL_SURPLUS_MASK,
        is_protocol_surplus_claimed,
        set_protocol_surplus_claimed
    );
    claim_flag!(
        claim_status,
        PARTNER_LP_MASK,
        is_partner_lp_claimed,
        set_partner_lp_claimed
    );
    claim_flag!(
        claim_status,
        CREATOR_LP_MASK,
        is_creator_lp_claimed,
        set_creator_lp_claimed
    );
    claim_flag!(
        claim_status,
        LEFTOVER_MASK,
        is_leftover_withdrawn,
        set_leftover_withdrawn
    );
    claim_flag!(
        claim_status,
        PARTNER_MIGRATION_FEE_MASK,
        is_partner_migration_fee_withdrawn,
        set_partner_migration_fee_withdrawn
    );
    claim_flag!(
        claim_status,
        CREATOR_MIGRATION_FEE_MASK,
        is_creator_migration_fee_withdrawn,
        set_creator_migration_fee_withdrawn
    );

    /// Returns (base, quote) trading fee not yet paid out
    pub fn get_unclaimed_trading_fee(&self) -> Result<(u64, u64)> {
        Ok((
            self.trading_base_fee
                .safe_sub(self.claimed_trading_base_fee)?,
            self.trading_quote_fee
                .safe_sub(self.claimed_trading_quote_fee)?,
        ))
    }

    /// Returns (base, quote) protocol fee not yet paid out
    pub fn get_unclaimed_protocol_fee(&self) -> Result<(u64, u64)> {
        Ok((
            self.protocol_base_fee
                .safe_sub(self.claimed_protocol_base_fee)?,
            self.protocol_quote_fee
                .safe_sub(self.claimed_protocol_quote_fee)?,
        ))
    }

    /// base token that belongs to fee claimers rather than to the curve
    pub fn get_unclaimed_base_fee(&self) -> Result<u64> {
        let (trading_base_fee, _) = self.get_unclaimed_trading_fee()?;
        let (protocol_base_fee, _) = self.get_unclaimed_protocol_fee()?;
        Ok(trading_base_fee.safe_add(protocol_base_fee)?)
    }

    pub fn get_unclaimed_quote_fee(&self) -> Result<u64> {
        let (_, trading_quote_fee) = self.get_unclaimed_trading_fee()?;
        let (_, protocol_quote_fee) = self.get_unclaimed_protocol_fee()?;
        Ok(trading_quote_fee.safe_add(protocol_quote_fee)?)
    }

    pub fn update_pre_swap(&mut self, config: &PoolConfig, current_timestamp: u64) -> Result<()> {
        if config.pool_fees.dynamic_fee.is_dynamic_fee_enable() {
            self.volatility_tracker.update_references(
                &config.pool_fees.dynamic_fee,
                self.sqrt_price,
                current_timestamp,
            )?;
        }
        Ok(())
    }

    pub fn update_post_swap(
        &mut self,
        config: &PoolConfig,
        old_sqrt_price: u128,
        current_timestamp: u64,
    ) -> Result<()> {
        let dynamic_fee = &config.pool_fees.dynamic_fee;
        if dynamic_fee.is_dynamic_fee_enable() {
            self.volatility_tracker
                .update_volatility_accumulator(dynamic_fee, self.sqrt_price)?;

            // only a swap that crosses a bin moves the filter window
            let delta_price = VolatilityTracker::get_delta_bin_id(
                dynamic_fee.bin_step_u128,
                old_sqrt_price,
                self.sqrt_price,
            )?;
            if delta_price > 0 {
                self.volatility_tracker.last_update_timestamp = current_timestamp;
            }
        }
        Ok(())
    }

    pub fn get_swap_result(
        &self,
        config: &PoolConfig,
        amount_in: u64,
        fee_mode: &FeeMode,
        trade_direction: TradeDirection,
        current_point: u64,
    ) -> Result<SwapResult> {
        let trade_fee_numerator = config.pool_fees.get_total_fee_numerator(
            &self.volatility_tracker,
            current_point,
            self.activation_point,
        )?;

        let input_fee = if fee_mode.fees_on_input {
            Some(config.pool_fees.get_fee_on_amount(
                trade_fee_numerator,
                amount_in,
                fee_mode.has_referral,
            )?)
        } else {
            None
        };
        let curve_input_budget = input_fee.map_or(amount_in, |fee| fee.amount);

        let curve_result = self.quote_curve(config, curve_input_budget, trade_direction)?;
        let curve_input_amount = curve_input_budget.safe_sub(curve_result.amount_left)?;
        require!(curve_input_amount > 0, PoolError::NotEnoughLiquidity);

        let (actual_input_amount, output_amount, fee) = match input_fee {
            // everything was absorbed, the fee already matches the input
            Some(fee) if curve_result.amount_left == 0 => {
                (amount_in, curve_result.output_amount, fee)
            }
            // partial fill, charge the fee on the consumed part only
            Some(_) => {
                let (included_fee_amount, _) = PoolFeesConfig::get_included_fee_amount(
                    trade_fee_numerator,
                    curve_input_amount,
                )?;
                let included_fee_amount = included_fee_amount.min(amount_in);
                let fee_amount = included_fee_amount.safe_sub(curve_input_amount)?;
                let (trading_fee, protocol_fee, referral_fee) = config
                    .pool_fees
                    .split_fees(fee_amount, fee_mode.has_referral)?;
                (
                    included_fee_amount,
                    curve_result.output_amount,
                    FeeOnAmountResult {
                        amount: curve_input_amount,
                        trading_fee,
                        protocol_fee,
                        referral_fee,
                    },
                )
            }
            None => {
                let fee = config.pool_fees.get_fee_on_amount(
                    trade_fee_numerator,
                    curve_result.output_amount,
                    fee_mode.has_referral,
                )?;
                (curve_input_amount, fee.amount, fee)
            }
        };

        Ok(SwapResult {
            actual_input_amount,
            amount_left: amount_in.safe_sub(actual_input_amount)?,
            output_amount,
            curve_input_amount,
            curve_output_amount: curve_result.output_amount,
            next_sqrt_price: curve_result.next_sqrt_price,
            next_segment_index: curve_result.next_segment_index,
            crossed_segments: curve_result.crossed_segments,
            trading_fee: fee.trading_fee,
            protocol_fee: fee.protocol_fee,
            referral_fee: fee.referral_fee,
        })
    }

    /// Walk the curve from the current position. Zero input is a no-op.
    pub fn quote_curve(
        &self,
        config: &PoolConfig,
        amount_in: u64,
        trade_direction: TradeDirection,
    ) -> Result<CurveSwapResult> {
        if amount_in == 0 {
            return Ok(CurveSwapResult {
                next_sqrt_price: self.sqrt_price,
                next_segment_index: self.current_segment_index,
                ..Default::default()
            });
        }
        match trade_direction {
            TradeDirection::QuoteToBase => {
                // base kept for migration and locked vesting is never sold
                let max_output_amount = self
                    .base_reserve
                    .saturating_sub(config.get_reserved_base_amount()?);
                self.get_swap_amount_from_quote_to_base(config, amount_in, max_output_amount)
            }
            TradeDirection::BaseToQuote => {
                self.get_swap_amount_from_base_to_quote(config, amount_in)
            }
        }
    }

    fn get_swap_amount_from_quote_to_base(
        &self,
        config: &PoolConfig,
        amount_in: u64,
        max_output_amount: u64,
    ) -> Result<CurveSwapResult> {
        let curve_len = config.curve_len();
        let mut total_output_amount = 0u64;
        let mut sqrt_price = self.sqrt_price;
        let mut amount_left = amount_in;
        let mut index = usize::from(self.current_segment_index);
        let mut crossed_segments = 0u8;

        while amount_left > 0 && index < curve_len {
            let segment = config.get_segment(index)?;
            if sqrt_price < segment.upper_sqrt_price {
                let max_amount_in = get_delta_amount_quote_unsigned_256(
                    sqrt_price,
                    segment.upper_sqrt_price,
                    segment.liquidity,
                    Rounding::Up,
                )?;
                let is_partial_fill = U256::from(amount_left) < max_amount_in;
                let (next_sqrt_price, input_amount) = if is_partial_fill {
                    let next_sqrt_price = get_next_sqrt_price_from_input(
                        sqrt_price,
                        segment.liquidity,
                        amount_left,
                        false,
                    )?;
                    (next_sqrt_price, amount_left)
                } else {
                    (segment.upper_sqrt_price, max_amount_in.safe_cast()?)
                };
                let output_amount = get_delta_amount_base_unsigned(
                    sqrt_price,
                    next_sqrt_price,
                    segment.liquidity,
                    Rounding::Down,
                )?;

                let base_left = max_output_amount.safe_sub(total_output_amount)?;
                if output_amount > base_left {
                    // the pool runs out of sellable base inside this segment
                    let next_sqrt_price = get_next_sqrt_price_from_base_output(
                        sqrt_price,
                        segment.liquidity,
                        base_left,
                    )?;
                    let input_amount = get_delta_amount_quote_unsigned(
                        sqrt_price,
                        next_sqrt_price,
                        segment.liquidity,
                        Rounding::Up,
                    )?;
                    let output_amount = get_delta_amount_base_unsigned(
                        sqrt_price,
                        next_sqrt_price,
                        segment.liquidity,
                        Rounding::Down,
                    )?;
                    total_output_amount = total_output_amount.safe_add(output_amount)?;
                    amount_left = amount_left.safe_sub(input_amount)?;
                    sqrt_price = next_sqrt_price;
                    break;
                }

                total_output_amount = total_output_amount.safe_add(output_amount)?;
                amount_left = amount_left.safe_sub(input_amount)?;
                sqrt_price = next_sqrt_price;
                if is_partial_fill {
                    break;
                }
            }

            // top of the curve, whatever is left goes back to the trader
            if index + 1 == curve_len {
                break;
            }
            index += 1;
            crossed_segments = crossed_segments.safe_add(1)?;
        }

        Ok(CurveSwapResult {
            output_amount: total_output_amount,
            next_sqrt_price: sqrt_price,
            next_segment_index: u8::try_from(index).map_err(|_| PoolError::TypeCastFailed)?,
            crossed_segments,
            amount_left,
        })
    }

    fn get_swap_amount_from_base_to_quote(
        &self,
        config: &PoolConfig,
        amount_in: u64,
    ) -> Result<CurveSwapResult> {
        let mut total_output_amount = 0u64;
        let mut sqrt_price = self.sqrt_price;
        let mut amount_left = amount_in;
        let mut index = usize::from(self.current_segment_index);
        let mut crossed_segments = 0u8;

        while amount_left > 0 {
            let segment = config.get_segment(index)?;
            if sqrt_price > segment.lower_sqrt_price {
                let max_amount_in = get_delta_amount_base_unsigned_256(
                    segment.lower_sqrt_price,
                    sqrt_price,
                    segment.liquidity,
                    Rounding::Up,
                )?;
                if U256::from(amount_left) < max_amount_in {
                    let next_sqrt_price = get_next_sqrt_price_from_input(
                        sqrt_price,
                        segment.liquidity,
                        amount_left,
                        true,
                    )?;
                    let output_amount = get_delta_amount_quote_unsigned(
                        next_sqrt_price,
                        sqrt_price,
                        segment.liquidity,
                        Rounding::Down,
                    )?;
                    total_output_amount = total_output_amount.safe_add(output_amount)?;
                    sqrt_price = next_sqrt_price;
                    amount_left = 0;
                    break;
                }

                let output_amount = get_delta_amount_quote_unsigned(
                    segment.lower_sqrt_price,
                    sqrt_price,
                    segment.liquidity,
                    Rounding::Down,
                )?;
                total_output_amount = total_output_amount.safe_add(output_amount)?;
                amount_left = amount_left.safe_sub(max_amount_in.safe_cast()?)?;
                sqrt_price = segment.lower_sqrt_price;
            }

            // start of the curve
            if index == 0 {
                break;
            }
            index -= 1;
            crossed_segments = crossed_segments.safe_add(1)?;
        }

        Ok(CurveSwapResult {
            output_amount: total_output_amount,
            next_sqrt_price: sqrt_price,
            next_segment_index: u8::try_from(index).map_err(|_| PoolError::TypeCastFailed)?,
            crossed_segments,
            amount_left,
        })
    }

    pub fn apply_swap_result(
        &mut self,
        swap_result: &SwapResult,
        fee_mode: &FeeMode,
        trade_direction: TradeDirection,
    ) -> Result<()> {
        let SwapResult {
            curve_input_amount,
            curve_output_amount,
            next_sqrt_price,
            next_segment_index,
            trading_fee,
            protocol_fee,
            ..
        } = *swap_result;

        self.sqrt_price = next_sqrt_price;
        self.current_segment_index = next_segment_index;

        if fee_mode.fees_on_base_token {
            self.trading_base_fee = self.trading_base_fee.safe_add(trading_fee)?;
            self.protocol_base_fee = self.protocol_base_fee.safe_add(protocol_fee)?;
        } else {
            self.trading_quote_fee = self.trading_quote_fee.safe_add(trading_fee)?;
            self.protocol_quote_fee = self.protocol_quote_fee.safe_add(protocol_fee)?;
        }

        match trade_direction {
            TradeDirection::BaseToQuote => {
                self.base_reserve = self.base_reserve.safe_add(curve_input_amount)?;
                self.quote_reserve = self.quote_reserve.safe_sub(curve_output_amount)?;
            }
            TradeDirection::QuoteToBase => {
                self.quote_reserve = self.quote_reserve.safe_add(curve_input_amount)?;
                self.base_reserve = self.base_reserve.safe_sub(curve_output_amount)?;
            }
        }

        Ok(())
    }
}
