use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::{
    constants::{MAX_CURVE_POINT_CONFIG, MAX_SQRT_PRICE, MIN_SQRT_PRICE},
    curve::{
        get_delta_amount_base_unsigned_256, get_delta_amount_quote_unsigned_256,
        get_next_sqrt_price_from_input,
    },
    safe_math::{SafeCast, SafeMath},
    state::LiquidityDistributionConfig,
    u128x128_math::Rounding,
    PoolError,
};

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiquidityDistributionParameters {
    pub sqrt_price: u128,
    pub liquidity: u128,
}

impl LiquidityDistributionParameters {
    pub fn to_liquidity_distribution_config(&self) -> LiquidityDistributionConfig {
        LiquidityDistributionConfig {
            sqrt_price: self.sqrt_price,
            liquidity: self.liquidity,
        }
    }
}

fn lower_sqrt_price_of(
    sqrt_start_price: u128,
    curve: &[LiquidityDistributionParameters],
    index: usize,
) -> u128 {
    if index == 0 {
        sqrt_start_price
    } else {
        curve[index - 1].sqrt_price
    }
}

/// Curve points must be strictly increasing, carry liquidity and stay in [MIN_SQRT_PRICE, MAX_SQRT_PRICE]
pub fn validate_curve(
    sqrt_start_price: u128,
    curve: &[LiquidityDistributionParameters],
) -> Result<()> {
    require!(
        !curve.is_empty() && curve.len() <= MAX_CURVE_POINT_CONFIG,
        PoolError::InvalidCurve
    );
    require!(
        sqrt_start_price >= MIN_SQRT_PRICE && sqrt_start_price < MAX_SQRT_PRICE,
        PoolError::InvalidCurve
    );

    let mut lower_sqrt_price = sqrt_start_price;
    for point in curve.iter() {
        require!(
            point.sqrt_price > lower_sqrt_price && point.sqrt_price <= MAX_SQRT_PRICE,
            PoolError::InvalidCurve
        );
        require!(point.liquidity > 0, PoolError::InvalidCurve);
        lower_sqrt_price = point.sqrt_price;
    }
    Ok(())
}

/// Base token sold by the curve between `sqrt_start_price` and `sqrt_end_price`, rounded up
pub fn get_base_token_for_swap(
    sqrt_start_price: u128,
    sqrt_end_price: u128,
    curve: &[LiquidityDistributionParameters],
) -> Result<U256> {
    let mut total_amount = U256::ZERO;
    for (i, point) in curve.iter().enumerate() {
        let lower_sqrt_price = lower_sqrt_price_of(sqrt_start_price, curve, i);
        if lower_sqrt_price >= sqrt_end_price {
            break;
        }
        let upper_sqrt_price = point.sqrt_price.min(sqrt_end_price);
        let delta_amount = get_delta_amount_base_unsigned_256(
            lower_sqrt_price,
            upper_sqrt_price,
            point.liquidity,
            Rounding::Up,
        )?;
        total_amount = total_amount.safe_add(delta_amount)?;
    }
    Ok(total_amount)
}

/// Sqrt price reached once `migration_threshold` quote has been fed into the curve from its start
pub fn get_migration_threshold_price(
    migration_threshold: u64,
    sqrt_start_price: u128,
    curve: &[LiquidityDistributionParameters],
) -> Result<u128> {
    let mut next_sqrt_price = sqrt_start_price;
    let mut amount_left = U256::from(migration_threshold);

    for (i, point) in curve.iter().enumerate() {
        if amount_left.is_zero() {
            break;
        }
        let lower_sqrt_price = lower_sqrt_price_of(sqrt_start_price, curve, i);
        let max_amount = get_delta_amount_quote_unsigned_256(
            lower_sqrt_price,
            point.sqrt_price,
            point.liquidity,
            Rounding::Up,
        )?;
        if max_amount > amount_left {
            next_sqrt_price = get_next_sqrt_price_from_input(
                lower_sqrt_price,
                point.liquidity,
                amount_left.safe_cast()?,
                false,
            )?;
            amount_left = U256::ZERO;
        } else {
            amount_left = amount_left.safe_sub(max_amount)?;
            next_sqrt_price = point.sqrt_price;
        }
    }

    require!(amount_left.is_zero(), PoolError::AmountLeftIsNotZero);
    Ok(next_sqrt_price)
}
