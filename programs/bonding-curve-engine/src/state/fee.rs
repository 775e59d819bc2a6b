use anchor_lang::prelude::*;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use static_assertions::const_assert_eq;

use crate::{
    constants::{BASIS_POINT_MAX, ONE_Q64, RESOLUTION},
    params::swap::TradeDirection,
    safe_math::SafeMath,
    u128x128_math::Rounding,
    utils_math::safe_shl_div_cast,
    PoolError,
};

use super::DynamicFeeConfig;

/// collect fee mode
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
pub enum CollectFeeMode {
    /// fee is always charged in quote token
    QuoteToken,
    /// fee is charged in whichever token the trader pays
    InputToken,
}

/// Where the fee of a single trade is taken
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct FeeMode {
    pub fees_on_input: bool,
    pub fees_on_base_token: bool,
    pub has_referral: bool,
}

impl FeeMode {
    pub fn get_fee_mode(
        collect_fee_mode: u8,
        trade_direction: TradeDirection,
        has_referral: bool,
    ) -> Result<FeeMode> {
        let collect_fee_mode = CollectFeeMode::try_from(collect_fee_mode)
            .map_err(|_| PoolError::InvalidCollectFeeMode)?;

        let (fees_on_input, fees_on_base_token) = match (collect_fee_mode, trade_direction) {
            // quote token in, fee taken before the curve sees it
            (CollectFeeMode::QuoteToken, TradeDirection::QuoteToBase) => (true, false),
            // quote token out, fee taken from the output
            (CollectFeeMode::QuoteToken, TradeDirection::BaseToQuote) => (false, false),
            (CollectFeeMode::InputToken, TradeDirection::QuoteToBase) => (true, false),
            (CollectFeeMode::InputToken, TradeDirection::BaseToQuote) => (true, true),
        };

        Ok(FeeMode {
            fees_on_input,
            fees_on_base_token,
            has_referral,
        })
    }
}

/// Split of a gross amount: `amount + trading_fee + protocol_fee + referral_fee` is the gross amount
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FeeOnAmountResult {
    pub amount: u64,
    pub trading_fee: u64,
    pub protocol_fee: u64,
    pub referral_fee: u64,
}

impl FeeOnAmountResult {
    pub fn total_fee(&self) -> Result<u64> {
        Ok(self
            .trading_fee
            .safe_add(self.protocol_fee)?
            .safe_add(self.referral_fee)?)
    }
}

#[zero_copy]
#[derive(Debug, InitSpace, Default, PartialEq)]
pub struct VolatilityTracker {
    pub last_update_timestamp: u64,
    pub padding: [u8; 8], // Add padding for u128 alignment
    pub sqrt_price_reference: u128, // reference sqrt price
    pub volatility_accumulator: u128,
    pub volatility_reference: u128, // decayed volatility accumulator
}

const_assert_eq!(VolatilityTracker::INIT_SPACE, 64);

impl VolatilityTracker {
    /// Number of bins between two sqrt prices, doubled since a bin step is expressed on price, not sqrt price
    pub fn get_delta_bin_id(
        bin_step_u128: u128,
        sqrt_price_a: u128,
        sqrt_price_b: u128,
    ) -> Result<u128> {
        let (upper_sqrt_price, lower_sqrt_price) = if sqrt_price_a > sqrt_price_b {
            (sqrt_price_a, sqrt_price_b)
        } else {
            (sqrt_price_b, sqrt_price_a)
        };

        let price_ratio: u128 =
            safe_shl_div_cast(upper_sqrt_price, lower_sqrt_price, RESOLUTION, Rounding::Down)?;

        let delta_bin_id = price_ratio.safe_sub(ONE_Q64)?.safe_div(bin_step_u128)?;

        Ok(delta_bin_id.safe_mul(2)?)
    }

    pub fn update_volatility_accumulator(
        &mut self,
        dynamic_fee_config: &DynamicFeeConfig,
        sqrt_price: u128,
    ) -> Result<()> {
        let delta_price = Self::get_delta_bin_id(
            dynamic_fee_config.bin_step_u128,
            sqrt_price,
            self.sqrt_price_reference,
        )?;

        let volatility_accumulator = self
            .volatility_reference
            .safe_add(delta_price.safe_mul(BASIS_POINT_MAX.into())?)?;

        self.volatility_accumulator = std::cmp::min(
            volatility_accumulator,
            dynamic_fee_config.max_volatility_accumulator.into(),
        );
        Ok(())
    }

    pub fn update_references(
        &mut self,
        dynamic_fee_config: &DynamicFeeConfig,
        sqrt_price_current: u128,
        current_timestamp: u64,
    ) -> Result<()> {
        let elapsed = current_timestamp.saturating_sub(self.last_update_timestamp);
        // Not high frequency trade
        if elapsed >= dynamic_fee_config.filter_period as u64 {
            // Update sqrt of last transaction
            self.sqrt_price_reference = sqrt_price_current;
            // filter period < t < decay_period. Decay time window.
            if elapsed < dynamic_fee_config.decay_period as u64 {
                let volatility_reference = self
                    .volatility_accumulator
                    .safe_mul(dynamic_fee_config.reduction_factor.into())?
                    .safe_div(BASIS_POINT_MAX.into())?;

                self.volatility_reference = volatility_reference;
            }
            // Out of decay time window
            else {
                self.volatility_reference = 0;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::dynamic_fee::*;

    fn dynamic_fee_config() -> DynamicFeeConfig {
        DynamicFeeConfig {
            initialized: 1,
            max_volatility_accumulator: MAX_VOLATILITY_ACCUMULATOR,
            variable_fee_control: 1,
            bin_step: BIN_STEP_BPS_DEFAULT,
            filter_period: FILTER_PERIOD_DEFAULT,
            decay_period: DECAY_PERIOD_DEFAULT,
            reduction_factor: REDUCTION_FACTOR_DEFAULT,
            bin_step_u128: BIN_STEP_BPS_U128_DEFAULT,
            ..Default::default()
        }
    }

    #[test]
    fn test_fee_mode() {
        let mode = FeeMode::get_fee_mode(0, TradeDirection::BaseToQuote, false).unwrap();
        assert!(!mode.fees_on_input && !mode.fees_on_base_token);

        let mode = FeeMode::get_fee_mode(1, TradeDirection::BaseToQuote, true).unwrap();
        assert!(mode.fees_on_input && mode.fees_on_base_token && mode.has_referral);

        assert_eq!(
            FeeMode::get_fee_mode(7, TradeDirection::QuoteToBase, false).unwrap_err(),
            PoolError::InvalidCollectFeeMode.into()
        );
    }

    #[test]
    fn test_references_within_filter_period_are_kept() {
        let config = dynamic_fee_config();
        let mut tracker = VolatilityTracker {
            last_update_timestamp: 100,
            sqrt_price_reference: ONE_Q64,
            volatility_accumulator: 10_000,
            volatility_reference: 4_000,
            ..Default::default()
        };
        tracker.update_references(&config, 2 * ONE_Q64, 105).unwrap();
        assert_eq!(tracker.sqrt_price_reference, ONE_Q64);
        assert_eq!(tracker.volatility_reference, 4_000);
    }

    #[test]
    fn test_references_decay() {
        let config = dynamic_fee_config();
        let mut tracker = VolatilityTracker {
            last_update_timestamp: 100,
            sqrt_price_reference: ONE_Q64,
            volatility_accumulator: 10_000,
            ..Default::default()
        };

        tracker.update_references(&config, 2 * ONE_Q64, 150).unwrap();
        assert_eq!(tracker.sqrt_price_reference, 2 * ONE_Q64);
        assert_eq!(tracker.volatility_reference, 5_000);

        tracker.update_references(&config, 2 * ONE_Q64, 100 + 1_000).unwrap();
        assert_eq!(tracker.volatility_reference, 0);
    }

    #[test]
    fn test_volatility_accumulator_is_capped() {
        let config = dynamic_fee_config();
        let mut tracker = VolatilityTracker {
            sqrt_price_reference: ONE_Q64,
            ..Default::default()
        };
        tracker
            .update_volatility_accumulator(&config, ONE_Q64 * 2)
            .unwrap();
        assert_eq!(
            tracker.volatility_accumulator,
            MAX_VOLATILITY_ACCUMULATOR as u128
        );
    }
}
