use anchor_lang::prelude::*;

use crate::{
    constants::{BASIS_POINT_MAX, MAX_EXPONENTIAL, ONE_Q64, RESOLUTION},
    safe_math::{SafeCast, SafeMath},
};

/// cliff_fee_numerator * (1 - reduction_factor / 10_000) ^ passed_period
pub fn get_fee_in_period(
    cliff_fee_numerator: u64,
    reduction_factor: u64,
    passed_period: u16,
) -> Result<u64> {
    if reduction_factor == 0 {
        return Ok(cliff_fee_numerator);
    }

    // Make bps_factor to Q64 format
    let bps = u128::from(reduction_factor)
        .safe_shl(RESOLUTION.into())?
        .safe_div(BASIS_POINT_MAX.into())?;

    let base = ONE_Q64.safe_sub(bps)?;
    let result = pow(base, passed_period.into()).ok_or_else(math_error!())?;

    let fee = result
        .safe_mul(cliff_fee_numerator.into())?
        .safe_shr(RESOLUTION.into())?;

    Ok(fee.safe_cast()?)
}

/// Q64 exponentiation by squaring. Negative exponents invert the result.
pub fn pow(base: u128, exp: i128) -> Option<u128> {
    let mut invert = exp.is_negative();

    if exp == 0 {
        return Some(ONE_Q64);
    }

    let exp: u32 = u32::try_from(exp.unsigned_abs()).ok()?;
    if exp >= MAX_EXPONENTIAL {
        return None;
    }

    let mut squared_base = base;
    let mut result = ONE_Q64;

    // keep the running square below one so every product fits in 128 bits
    if squared_base >= result {
        squared_base = u128::MAX.checked_div(squared_base)?;
        invert = !invert;
    }

    let mut remaining = exp;
    while remaining > 0 {
        if remaining & 0x1 > 0 {
            result = result.checked_mul(squared_base)? >> RESOLUTION;
        }
        remaining >>= 1;
        if remaining > 0 {
            squared_base = squared_base.checked_mul(squared_base)? >> RESOLUTION;
        }
    }

    // stop here as the return value will always be zero
    if result == 0 {
        return None;
    }

    if invert {
        result = u128::MAX.checked_div(result)?;
    }

    Some(result)
}
