use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::{
    safe_math::{SafeCast, SafeMath},
    state::PoolConfig,
    utils_math::sqrt_product_u64,
};

use super::MigrationDeposit;

/// base = ceil(quote << 128 / sqrt_price^2). Rounding up keeps the opening price at or below the curve price.
pub fn get_migration_base_amount(quote_amount: u64, sqrt_price: u128) -> Result<u64> {
    let sqrt_price = U256::from(sqrt_price);
    let price = sqrt_price.safe_mul(sqrt_price)?;
    let quote = U256::from(quote_amount).safe_shl(128)?;
    let (base_amount, rem) = quote.div_rem(price);

    let base_amount = if rem.is_zero() {
        base_amount
    } else {
        base_amount.safe_add(U256::from(1))?
    };
    Ok(base_amount.safe_cast()?)
}

pub fn compute_migration_deposit(config: &PoolConfig) -> Result<MigrationDeposit> {
    let base_amount = config.migration_base_threshold;
    let quote_amount = config.get_migration_quote_amount_for_config()?.quote_amount;
    Ok(MigrationDeposit {
        base_amount,
        quote_amount,
        sqrt_price: config.migration_sqrt_price,
        liquidity: sqrt_product_u64(base_amount, quote_amount)?,
        dynamic_fee: None,
    })
}
