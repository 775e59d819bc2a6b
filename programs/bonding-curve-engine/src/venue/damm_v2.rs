use anchor_lang::prelude::*;
use ruint::aliases::U512;

use crate::{
    constants::{MAX_SQRT_PRICE, MIN_SQRT_PRICE},
    curve::{
        get_delta_amount_base_unsigned, get_initial_liquidity_from_delta_base,
        get_initial_liquidity_from_delta_quote,
    },
    params::fee_parameters::DynamicFeeParameters,
    safe_math::SafeCast,
    state::PoolConfig,
    u128x128_math::Rounding,
};

use super::MigrationDeposit;

/// Position spans the full price range: quote fixes liquidity over [MIN_SQRT_PRICE, sqrt_price],
/// base covers [sqrt_price, MAX_SQRT_PRICE] with that liquidity, rounded up.
pub fn get_migration_base_amount(quote_amount: u64, sqrt_price: u128) -> Result<u64> {
    let liquidity = get_initial_liquidity_from_delta_quote(quote_amount, MIN_SQRT_PRICE, sqrt_price)?;
    get_delta_amount_base_unsigned(sqrt_price, MAX_SQRT_PRICE, liquidity, Rounding::Up)
}

/// Liquidity supported by both amounts at `sqrt_price`
pub fn get_liquidity_for_adding_liquidity(
    base_amount: u64,
    quote_amount: u64,
    sqrt_price: u128,
) -> Result<u128> {
    let liquidity_from_base =
        get_initial_liquidity_from_delta_base(base_amount, MAX_SQRT_PRICE, sqrt_price)?;
    let liquidity_from_quote =
        get_initial_liquidity_from_delta_quote(quote_amount, MIN_SQRT_PRICE, sqrt_price)?;
    if liquidity_from_base > U512::from(liquidity_from_quote) {
        Ok(liquidity_from_quote)
    } else {
        Ok(liquidity_from_base.safe_cast()?)
    }
}

pub fn compute_migration_deposit(config: &PoolConfig) -> Result<MigrationDeposit> {
    let base_amount = config.migration_base_threshold;
    let quote_amount = config.get_migration_quote_amount_for_config()?.quote_amount;
    let sqrt_price = config.migration_sqrt_price;

    let min_base_fee_numerator = config
        .pool_fees
        .base_fee
        .get_base_fee_handler()?
        .get_min_base_fee_numerator()?;

    Ok(MigrationDeposit {
        base_amount,
        quote_amount,
        sqrt_price,
        liquidity: get_liquidity_for_adding_liquidity(base_amount, quote_amount, sqrt_price)?,
        dynamic_fee: Some(DynamicFeeParameters::from_base_fee_numerator(
            min_base_fee_numerator,
        )?),
    })
}
