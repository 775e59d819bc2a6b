use anchor_lang::prelude::*;

use crate::{
    safe_math::SafeMath,
    state::{MigrationProgress, MigrationStatus, PoolConfig, VirtualPool},
    utils::{VestedAsset, VestingSchedule},
    venue::{MigrationDeposit, MigrationVenue, VenueStrategy},
    Party, PoolError, TokenSide,
};

use super::PoolTransition;

pub fn handle_check_migration(pool: &VirtualPool, config: &PoolConfig) -> Result<MigrationStatus> {
    MigrationStatus::new(pool, config)
}

/// Vault balances the engine observed before migrating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultBalances {
    pub base: u64,
    pub quote: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub strategy: VenueStrategy,
    pub deposit: MigrationDeposit,
    pub locked_vesting_amount: u64,
    pub burned_amount: u64,
    pub leftover_amount: u64,
}

/// Every token in the vault is either curve reserve or an unclaimed fee
pub fn validate_vault_balances(pool: &VirtualPool, balances: &VaultBalances) -> Result<()> {
    let expected_base = pool.base_reserve.safe_add(pool.get_unclaimed_base_fee()?)?;
    let expected_quote = pool.quote_reserve.safe_add(pool.get_unclaimed_quote_fee()?)?;
    require!(
        balances.base == expected_base && balances.quote == expected_quote,
        PoolError::AccountInvariantViolation
    );
    Ok(())
}

/// Moves the completed curve into its venue. The engine funds the venue with `output.deposit`
/// and records the handle on the returned pool.
pub fn handle_migrate(
    pool: &VirtualPool,
    config: &PoolConfig,
    balances: &VaultBalances,
    current_point: u64,
) -> Result<PoolTransition<MigrationOutcome>> {
    match pool.get_migration_progress()? {
        MigrationProgress::NotStarted => return Err(PoolError::PoolIsIncompleted.into()),
        MigrationProgress::Migrated => return Err(PoolError::PositionAlreadyCreated.into()),
        MigrationProgress::ThresholdCrossed => {}
    }
    require!(
        pool.is_curve_complete(config.migration_quote_threshold),
        PoolError::PoolIsIncompleted
    );
    validate_vault_balances(pool, balances)?;

    let strategy = VenueStrategy::from_config(config)?;
    let deposit = strategy.compute_migration_deposit(config)?;

    let locked_vesting = config.locked_vesting_config.to_locked_vesting_params();
    let locked_vesting_amount = locked_vesting.get_total_amount()?;

    let reserved_base_amount = deposit.base_amount.safe_add(locked_vesting_amount)?;
    require!(
        pool.base_reserve >= reserved_base_amount,
        PoolError::InsufficientLiquidityForMigration
    );
    let left_base_amount = pool.base_reserve.safe_sub(reserved_base_amount)?;
    let burned_amount = config.get_burnable_amount_post_migration(left_base_amount)?;
    let leftover_amount = left_base_amount.safe_sub(burned_amount)?;

    let mut new_pool = *pool;
    new_pool.set_migration_progress(MigrationProgress::Migrated);
    new_pool.migration_point = current_point;
    new_pool.migrated_liquidity = deposit.liquidity;
    new_pool.leftover_amount = leftover_amount;

    let mut transition = PoolTransition::new(
        new_pool,
        MigrationOutcome {
            strategy,
            deposit,
            locked_vesting_amount,
            burned_amount,
            leftover_amount,
        },
    );

    transition.withdraw(TokenSide::Base, deposit.base_amount);
    transition.withdraw(TokenSide::Quote, deposit.quote_amount);
    transition.withdraw(TokenSide::Base, burned_amount);

    if locked_vesting.has_vesting() {
        transition.withdraw(TokenSide::Base, locked_vesting_amount);
        transition.vesting_schedules.push(VestingSchedule {
            beneficiary: Party::Creator,
            asset: VestedAsset::BaseToken,
            amount_per_period: locked_vesting.amount_per_period.into(),
            frequency: locked_vesting.frequency,
            number_of_period: locked_vesting.number_of_period,
            cliff_unlock_amount: locked_vesting.cliff_unlock_amount.into(),
            cliff_duration_from_migration_time: locked_vesting.cliff_duration_from_migration_time,
            start_point: current_point,
        });
    }

    msg!(
        "migrate: base {} quote {} burned {} leftover {}",
        deposit.base_amount,
        deposit.quote_amount,
        burned_amount,
        leftover_amount
    );

    Ok(transition)
}
