use anchor_lang::prelude::*;
use num::integer::Roots;
use num_traits::cast::FromPrimitive;
use ruint::aliases::U256;

use crate::PoolError;

use super::u128x128_math::{mul_div_u256, shl_div_u256, Rounding};

#[inline]
pub fn safe_mul_div_cast_u64<T: FromPrimitive>(
    x: u64,
    y: u64,
    denominator: u64,
    rounding: Rounding,
) -> Result<T> {
    let result = mul_div_u256(
        U256::from(x),
        U256::from(y),
        U256::from(denominator),
        rounding,
    )
    .ok_or_else(|| PoolError::MathOverflow)?;
    cast_u256(result)
}

#[inline]
pub fn safe_mul_div_cast_u128<T: FromPrimitive>(
    x: u128,
    y: u128,
    denominator: u128,
    rounding: Rounding,
) -> Result<T> {
    let result = mul_div_u256(
        U256::from(x),
        U256::from(y),
        U256::from(denominator),
        rounding,
    )
    .ok_or_else(|| PoolError::MathOverflow)?;
    cast_u256(result)
}

/// (x << offset) / y, cast into T
#[inline]
pub fn safe_shl_div_cast<T: FromPrimitive>(
    x: u128,
    y: u128,
    offset: u8,
    rounding: Rounding,
) -> Result<T> {
    let result = shl_div_u256(U256::from(x), U256::from(y), offset.into(), rounding)
        .ok_or_else(|| PoolError::MathOverflow)?;
    cast_u256(result)
}

/// floor(sqrt(x * y)), the geometric mean used as constant-product liquidity
pub fn sqrt_product_u64(x: u64, y: u64) -> Result<u128> {
    let product = u128::from(x)
        .checked_mul(y.into())
        .ok_or_else(|| PoolError::MathOverflow)?;
    Ok(product.sqrt())
}

fn cast_u256<T: FromPrimitive>(value: U256) -> Result<T> {
    let value: u128 = value.try_into().map_err(|_| PoolError::TypeCastFailed)?;
    Ok(T::from_u128(value).ok_or_else(|| PoolError::TypeCastFailed)?)
}
