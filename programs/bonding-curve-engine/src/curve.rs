use anchor_lang::prelude::*;
use ruint::aliases::{U256, U512};

use crate::{
    constants::RESOLUTION,
    safe_math::{SafeCast, SafeMath},
    u128x128_math::{mul_div_u256, mul_shr_u256, Rounding},
    PoolError,
};

/// Δbase = L * (√P_upper - √P_lower) / (√P_upper * √P_lower)
pub fn get_delta_amount_base_unsigned(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round: Rounding,
) -> Result<u64> {
    let result = get_delta_amount_base_unsigned_256(
        lower_sqrt_price,
        upper_sqrt_price,
        liquidity,
        round,
    )?;
    Ok(result.safe_cast()?)
}

pub fn get_delta_amount_base_unsigned_256(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round: Rounding,
) -> Result<U256> {
    require!(
        lower_sqrt_price > 0 && lower_sqrt_price <= upper_sqrt_price,
        PoolError::InvalidInput
    );
    let numerator_1 = U256::from(liquidity);
    let numerator_2 = U256::from(upper_sqrt_price.safe_sub(lower_sqrt_price)?);
    let denominator = U256::from(lower_sqrt_price).safe_mul(U256::from(upper_sqrt_price))?;

    let result = mul_div_u256(numerator_1, numerator_2, denominator, round)
        .ok_or_else(|| PoolError::MathOverflow)?;
    Ok(result)
}

/// Δquote = L * (√P_upper - √P_lower), scaled down by 2^128
pub fn get_delta_amount_quote_unsigned(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round: Rounding,
) -> Result<u64> {
    let result = get_delta_amount_quote_unsigned_256(
        lower_sqrt_price,
        upper_sqrt_price,
        liquidity,
        round,
    )?;
    Ok(result.safe_cast()?)
}

pub fn get_delta_amount_quote_unsigned_256(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round: Rounding,
) -> Result<U256> {
    let delta_sqrt_price = U256::from(upper_sqrt_price.safe_sub(lower_sqrt_price)?);
    let result = mul_shr_u256(
        U256::from(liquidity),
        delta_sqrt_price,
        (RESOLUTION as usize) * 2,
        round,
    )
    .ok_or_else(|| PoolError::MathOverflow)?;
    Ok(result)
}

/// Price reached after feeding `amount_in` into a segment with constant `liquidity`.
/// Base input moves the price down, quote input moves it up.
pub fn get_next_sqrt_price_from_input(
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u64,
    base_for_quote: bool,
) -> Result<u128> {
    require!(sqrt_price > 0 && liquidity > 0, PoolError::InvalidInput);

    // round to make sure that we don't pass the target price
    if base_for_quote {
        get_next_sqrt_price_from_amount_base_rounding_up(sqrt_price, liquidity, amount_in)
    } else {
        get_next_sqrt_price_from_amount_quote_rounding_down(sqrt_price, liquidity, amount_in)
    }
}

/// √P' = √P * L / (L + Δx * √P)
pub fn get_next_sqrt_price_from_amount_base_rounding_up(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    let sqrt_price = U256::from(sqrt_price);
    let liquidity = U256::from(liquidity);

    let product = U256::from(amount).safe_mul(sqrt_price)?;
    let denominator = liquidity.safe_add(product)?;
    let result = mul_div_u256(liquidity, sqrt_price, denominator, Rounding::Up)
        .ok_or_else(|| PoolError::MathOverflow)?;
    Ok(result.safe_cast()?)
}

/// √P' = √P + Δy / L
pub fn get_next_sqrt_price_from_amount_quote_rounding_down(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128> {
    let quotient = U256::from(amount)
        .safe_shl((RESOLUTION * 2) as usize)?
        .safe_div(U256::from(liquidity))?;

    let result = U256::from(sqrt_price).safe_add(quotient)?;
    Ok(result.safe_cast()?)
}

/// √P' = √P * L / (L - Δx * √P), the price at which a buy has taken `amount` base out of the
/// segment. Rounded down so the base released never exceeds `amount`.
pub fn get_next_sqrt_price_from_base_output(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    let sqrt_price = U256::from(sqrt_price);
    let liquidity = U256::from(liquidity);

    let product = U256::from(amount).safe_mul(sqrt_price)?;
    require!(liquidity > product, PoolError::NotEnoughLiquidity);
    let denominator = liquidity.safe_sub(product)?;
    let result = mul_div_u256(liquidity, sqrt_price, denominator, Rounding::Down)
        .ok_or_else(|| PoolError::MathOverflow)?;
    Ok(result.safe_cast()?)
}

/// L = Δquote << 128 / (√P - √P_min)
pub fn get_initial_liquidity_from_delta_quote(
    quote_amount: u64,
    sqrt_min_price: u128,
    sqrt_price: u128,
) -> Result<u128> {
    let price_delta = U512::from(sqrt_price.safe_sub(sqrt_min_price)?);
    let quote_amount = U512::from(quote_amount).safe_shl(128)?;
    let liquidity = quote_amount.safe_div(price_delta)?;
    Ok(liquidity.safe_cast()?)
}

/// L = Δbase * √P * √P_max / (√P_max - √P)
pub fn get_initial_liquidity_from_delta_base(
    base_amount: u64,
    sqrt_max_price: u128,
    sqrt_price: u128,
) -> Result<U512> {
    let price_delta = U512::from(sqrt_max_price.safe_sub(sqrt_price)?);
    let prod = U512::from(base_amount)
        .safe_mul(U512::from(sqrt_price))?
        .safe_mul(U512::from(sqrt_max_price))?;
    let liquidity = prod.safe_div(price_delta)?;
    Ok(liquidity)
}
