use anchor_lang::prelude::*;

use crate::{
    params::{
        config_parameters::ConfigParameters,
        liquidity_distribution::{get_base_token_for_swap, get_migration_threshold_price},
    },
    safe_math::SafeCast,
    state::{DerivedConfigAmounts, LpVestingInfo, MigrationOption, PoolConfig},
    venue::{MigrationVenue, VenueStrategy},
    EvtCreateConfig, PoolError, RecordId,
};

/// Curve-dependent amounts a config carries besides its parameters
pub fn get_derived_config_amounts(params: &ConfigParameters) -> Result<DerivedConfigAmounts> {
    let migration_sqrt_price = get_migration_threshold_price(
        params.migration_quote_threshold,
        params.sqrt_start_price,
        &params.curve,
    )?;

    let swap_base_amount: u64 =
        get_base_token_for_swap(params.sqrt_start_price, migration_sqrt_price, &params.curve)?
            .safe_cast()?;

    let migration_option = MigrationOption::try_from(params.migration_option)
        .map_err(|_| PoolError::InvalidMigrationOption)?;
    let migration_quote_amount = PoolConfig::get_migration_quote_amount(
        params.migration_quote_threshold,
        params.migration_fee.fee_percentage,
    )?;
    let migration_base_threshold = VenueStrategy::from(migration_option)
        .get_migration_base_amount(migration_quote_amount.quote_amount, migration_sqrt_price)?;

    require!(
        swap_base_amount > 0 && migration_base_threshold > 0,
        PoolError::InsufficientLiquidityForMigration
    );

    Ok(DerivedConfigAmounts {
        swap_base_amount,
        migration_base_threshold,
        migration_sqrt_price,
    })
}

pub fn handle_create_config(
    config_id: RecordId,
    params: &ConfigParameters,
) -> Result<(PoolConfig, EvtCreateConfig)> {
    params.validate()?;

    let derived = get_derived_config_amounts(params)?;

    let (fixed_token_supply_flag, pre_migration_token_supply, post_migration_token_supply) =
        match params.token_supply {
            Some(token_supply) => {
                let swap_amount_with_buffer = PoolConfig::get_swap_amount_with_buffer(
                    derived.swap_base_amount,
                    params.sqrt_start_price,
                    &params.curve,
                )?;
                let total_with_buffer = PoolConfig::get_total_token_supply(
                    swap_amount_with_buffer,
                    derived.migration_base_threshold,
                    &params.locked_vesting,
                )?;
                let total_without_buffer = PoolConfig::get_total_token_supply(
                    derived.swap_base_amount,
                    derived.migration_base_threshold,
                    &params.locked_vesting,
                )?;

                require!(
                    token_supply.pre_migration_token_supply >= total_with_buffer
                        && token_supply.post_migration_token_supply >= total_without_buffer,
                    PoolError::InvalidTokenSupply
                );

                (
                    1,
                    token_supply.pre_migration_token_supply,
                    token_supply.post_migration_token_supply,
                )
            }
            None => (0, 0, 0),
        };

    let mut config = PoolConfig::default();
    config.init(
        &params.pool_fees,
        params.collect_fee_mode,
        params.migration_option,
        params.activation_type,
        params.partner_lp_percentage,
        params.partner_locked_lp_percentage,
        params.creator_lp_percentage,
        params.creator_locked_lp_percentage,
        params.partner_surplus_percentage,
        &params.migration_fee,
        LpVestingInfo::from(&params.partner_lp_vesting),
        LpVestingInfo::from(&params.creator_lp_vesting),
        &params.locked_vesting,
        params.migration_quote_threshold,
        params.sqrt_start_price,
        &derived,
        fixed_token_supply_flag,
        pre_migration_token_supply,
        post_migration_token_supply,
        &params.curve,
    );

    let event = EvtCreateConfig {
        config_id,
        migration_quote_threshold: config.migration_quote_threshold,
        migration_base_threshold: config.migration_base_threshold,
        migration_sqrt_price: config.migration_sqrt_price,
        swap_base_amount: config.swap_base_amount,
        sqrt_start_price: config.sqrt_start_price,
        initial_base_supply: config.get_initial_base_supply()?,
    };

    Ok((config, event))
}
