use anchor_lang::prelude::*;

use crate::{
    constants::ONE_Q64,
    params::{
        config_parameters::{
            ConfigParameters, LockedVestingParams, MigrationFeeParams, TokenSupplyParams,
        },
        swap::{SwapParameters, TradeDirection},
    },
    state::MigrationProgress,
    utils::{
        MemoryStore, MemoryVault, PoolStore, RecordingVenue, ReserveVault, VestedAsset,
        VestingSchedule, VestingService,
    },
    Engine, EngineEvent, ErrorKind, EvtWithdrawMigrationFee, Party, PoolError, RecordId,
    TokenSide,
};

use super::fixture::*;

#[test]
fn test_migrate_before_threshold_is_rejected() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &zero_fee_params());
    buy(&mut engine, pool_id, 1_000_000).unwrap();

    let err = engine.migrate(pool_id, &clock_at(100)).unwrap_err();
    assert_eq!(err, PoolError::PoolIsIncompleted.into());
    assert!(engine.venue().positions.is_empty());
}

#[test]
fn test_migrate_with_surplus_and_dynamic_supply() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &one_percent_fee_params());

    let result = buy(&mut engine, pool_id, 4_000_000).unwrap();
    assert_eq!(result.trading_fee, 32_000);
    assert_eq!(result.protocol_fee, 8_000);

    let status = engine.check_migration(pool_id).unwrap();
    assert!(status.is_migratable);
    assert_eq!(status.quote_reserve, 3_960_000);
    assert_eq!(status.surplus, 960_000);

    let base_reserve = load_pool(&engine, pool_id).base_reserve;
    engine.take_events();

    let position_handle = engine.migrate(pool_id, &clock_at(100)).unwrap();
    assert_eq!(position_handle, 1);

    let (venue_pool_id, deposit) = engine.venue().positions[0];
    assert_eq!(venue_pool_id, pool_id);
    assert_eq!(deposit.base_amount, MIGRATION_BASE_AMOUNT);
    assert_eq!(deposit.quote_amount, MIGRATION_QUOTE_THRESHOLD);
    assert_eq!(deposit.sqrt_price, 3 * ONE_Q64);
    // floor(sqrt(333_334 * 3_000_000))
    assert_eq!(deposit.liquidity, 1_000_000);
    assert_eq!(deposit.dynamic_fee, None);

    let pool = load_pool(&engine, pool_id);
    assert_eq!(pool.get_migration_progress().unwrap(), MigrationProgress::Migrated);
    assert_eq!(pool.migration_point, 100);
    assert_eq!(pool.migrated_liquidity, 1_000_000);
    assert_eq!(pool.position_handle, 1);
    assert_eq!(pool.leftover_amount, 0);
    // reserves are frozen at their completion values
    assert_eq!(pool.quote_reserve, 3_960_000);
    assert_eq!(pool.base_reserve, base_reserve);

    // dynamic supply burns everything beyond the migrated base
    let events = engine.take_events();
    match &events[0] {
        EngineEvent::Migrate(event) => {
            assert_eq!(event.burned_amount, base_reserve - MIGRATION_BASE_AMOUNT);
            assert_eq!(event.leftover_amount, 0);
        }
        event => panic!("unexpected event {:?}", event),
    }
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Base), 0);
    // surplus and fees stay behind
    assert_eq!(
        engine.vault().balance(pool_id, TokenSide::Quote),
        960_000 + 40_000
    );
    assert!(!engine.check_migration(pool_id).unwrap().is_migratable);

    let err = engine.migrate(pool_id, &clock_at(101)).unwrap_err();
    assert_eq!(err, PoolError::PositionAlreadyCreated.into());
    assert_eq!(ErrorKind::of(&err), Some(ErrorKind::AlreadyClaimed));
    assert_eq!(engine.venue().positions.len(), 1);

    let err = buy(&mut engine, pool_id, 1_000).unwrap_err();
    assert_eq!(err, PoolError::PoolIsCompleted.into());
}

#[test]
fn test_fixed_supply_burns_up_to_cap_then_leftover() {
    let mut engine = new_engine();
    let params = ConfigParameters {
        token_supply: Some(TokenSupplyParams {
            pre_migration_token_supply: 2_000_000,
            post_migration_token_supply: 1_500_000,
        }),
        ..zero_fee_params()
    };
    let pool_id = create_pool(&mut engine, &params);
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Base), 2_000_000);

    let result = buy(&mut engine, pool_id, MIGRATION_QUOTE_THRESHOLD).unwrap();
    assert_eq!(result.output_amount, 833_333);

    // leftover before migration is not withdrawable
    let err = engine.withdraw_leftover(pool_id).unwrap_err();
    assert_eq!(err, PoolError::NotPermitToDoThisAction.into());

    engine.migrate(pool_id, &clock_at(100)).unwrap();

    let pool = load_pool(&engine, pool_id);
    // 1_166_667 base left, 333_334 migrated, 500_000 burned
    assert_eq!(pool.leftover_amount, 333_333);
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Base), 333_333);

    assert_eq!(engine.withdraw_leftover(pool_id).unwrap(), 333_333);
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Base), 0);

    let err = engine.withdraw_leftover(pool_id).unwrap_err();
    assert_eq!(err, PoolError::LeftoverHasBeenWithdraw.into());
}

#[test]
fn test_fixed_supply_too_small_for_curve_is_rejected() {
    let mut engine = new_engine();
    let params = ConfigParameters {
        token_supply: Some(TokenSupplyParams {
            pre_migration_token_supply: 1_000_000,
            post_migration_token_supply: 1_000_000,
        }),
        ..zero_fee_params()
    };
    let err = engine.create_config(&params).unwrap_err();
    assert_eq!(err, PoolError::InvalidTokenSupply.into());
    assert_eq!(ErrorKind::of(&err), Some(ErrorKind::ConfigError));
}

#[test]
fn test_locked_vesting_goes_to_the_creator() {
    let mut engine = new_engine();
    let params = ConfigParameters {
        locked_vesting: LockedVestingParams {
            amount_per_period: 10_000,
            cliff_duration_from_migration_time: 50,
            frequency: 10,
            number_of_period: 5,
            cliff_unlock_amount: 50_000,
        },
        ..zero_fee_params()
    };
    let pool_id = create_pool(&mut engine, &params);
    assert_eq!(
        engine.vault().balance(pool_id, TokenSide::Base),
        DYNAMIC_INITIAL_BASE_SUPPLY + 100_000
    );

    buy(&mut engine, pool_id, MIGRATION_QUOTE_THRESHOLD).unwrap();
    engine.migrate(pool_id, &clock_at(100)).unwrap();

    let schedules: Vec<_> = engine.vesting().schedules_of(pool_id).collect();
    assert_eq!(schedules.len(), 1);
    let schedule = schedules[0];
    assert_eq!(schedule.beneficiary, Party::Creator);
    assert_eq!(schedule.asset, VestedAsset::BaseToken);
    assert_eq!(schedule.get_total_amount().unwrap(), 100_000);
    assert_eq!(schedule.start_point, 100);
    assert_eq!(schedule.cliff_duration_from_migration_time, 50);

    assert_eq!(engine.vault().balance(pool_id, TokenSide::Base), 0);
}

#[test]
fn test_migrate_to_damm_v2_carries_dynamic_fee() {
    let mut engine = new_engine();
    let params = ConfigParameters {
        migration_option: 1,
        ..one_percent_fee_params()
    };
    let pool_id = create_pool(&mut engine, &params);

    buy(&mut engine, pool_id, 4_000_000).unwrap();
    engine.migrate(pool_id, &clock_at(100)).unwrap();

    let (_, deposit) = engine.venue().positions[0];
    assert_eq!(deposit.quote_amount, MIGRATION_QUOTE_THRESHOLD);
    assert_eq!(deposit.sqrt_price, 3 * ONE_Q64);
    assert!(deposit.base_amount > 0);
    assert!(deposit.liquidity > 0);
    let dynamic_fee = deposit.dynamic_fee.unwrap();
    dynamic_fee.validate().unwrap();

    assert_eq!(engine.vault().balance(pool_id, TokenSide::Base), 0);
}

fn migration_fee_params() -> ConfigParameters {
    ConfigParameters {
        migration_fee: MigrationFeeParams {
            fee_percentage: 10,
            creator_fee_percentage: 40,
        },
        ..zero_fee_params()
    }
}

#[test]
fn test_migration_fee_is_kept_back_from_the_venue() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &migration_fee_params());
    let config = engine
        .store()
        .load_config(load_pool(&engine, pool_id).config_id)
        .unwrap();
    // ceil(2_700_000 / 9)
    assert_eq!(config.migration_base_threshold, 300_000);
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Base), 1_300_000);

    let err = engine
        .withdraw_migration_fee(pool_id, Party::Partner)
        .unwrap_err();
    assert_eq!(err, PoolError::NotPermitToDoThisAction.into());

    let result = buy(&mut engine, pool_id, MIGRATION_QUOTE_THRESHOLD).unwrap();
    assert_eq!(result.output_amount, 833_333);
    engine.migrate(pool_id, &clock_at(100)).unwrap();

    let (_, deposit) = engine.venue().positions[0];
    assert_eq!(deposit.quote_amount, 2_700_000);
    assert_eq!(deposit.base_amount, 300_000);
    assert_eq!(deposit.sqrt_price, 3 * ONE_Q64);
    // floor(sqrt(300_000 * 2_700_000))
    assert_eq!(deposit.liquidity, 900_000);
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Quote), 300_000);
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Base), 0);

    engine.take_events();
    assert_eq!(
        engine.withdraw_migration_fee(pool_id, Party::Partner).unwrap(),
        180_000
    );
    assert_eq!(
        engine.take_events(),
        vec![EngineEvent::WithdrawMigrationFee(EvtWithdrawMigrationFee {
            pool_id,
            party: Party::Partner,
            fee: 180_000,
        })]
    );

    let err = engine
        .withdraw_migration_fee(pool_id, Party::Partner)
        .unwrap_err();
    assert_eq!(err, PoolError::MigrationFeeHasBeenWithdraw.into());
    assert_eq!(ErrorKind::of(&err), Some(ErrorKind::AlreadyClaimed));

    let err = engine
        .withdraw_migration_fee(pool_id, Party::Protocol)
        .unwrap_err();
    assert_eq!(err, PoolError::NotPermitToDoThisAction.into());

    assert_eq!(
        engine.withdraw_migration_fee(pool_id, Party::Creator).unwrap(),
        120_000
    );
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Quote), 0);
    // rejected withdrawals emit nothing
    assert_eq!(engine.events().len(), 1);

    let pool = load_pool(&engine, pool_id);
    assert!(pool.is_partner_migration_fee_withdrawn());
    assert!(pool.is_creator_migration_fee_withdrawn());
    assert!(!pool.is_partner_surplus_claimed());
}

#[test]
fn test_migration_fee_above_cap_is_rejected() {
    let mut engine = new_engine();
    let params = ConfigParameters {
        migration_fee: MigrationFeeParams {
            fee_percentage: 51,
            creator_fee_percentage: 0,
        },
        ..zero_fee_params()
    };
    let err = engine.create_config(&params).unwrap_err();
    assert_eq!(err, PoolError::InvalidFeePercentage.into());
}

struct RejectingVesting;

impl VestingService for RejectingVesting {
    fn create_schedule(&mut self, _pool_id: RecordId, _schedule: VestingSchedule) -> Result<()> {
        Err(PoolError::InvalidVestingParameters.into())
    }
}

#[test]
fn test_rejected_vesting_leaves_no_venue_position() {
    let mut engine = Engine::new(
        MemoryStore::new(),
        MemoryVault::new(),
        RecordingVenue::new(),
        RejectingVesting,
    );
    let params = ConfigParameters {
        locked_vesting: LockedVestingParams {
            amount_per_period: 10_000,
            cliff_duration_from_migration_time: 50,
            frequency: 10,
            number_of_period: 5,
            cliff_unlock_amount: 50_000,
        },
        ..zero_fee_params()
    };
    let config_id = engine.create_config(&params).unwrap();
    let pool_id = engine.create_pool(config_id, &clock_at(0)).unwrap();
    engine
        .swap(
            pool_id,
            SwapParameters {
                amount_in: MIGRATION_QUOTE_THRESHOLD,
                minimum_amount_out: 0,
            },
            TradeDirection::QuoteToBase,
            false,
            &clock_at(10),
        )
        .unwrap();

    let pool = engine.store().load_pool(pool_id).unwrap();
    let base_balance = engine.vault().balance(pool_id, TokenSide::Base);
    let quote_balance = engine.vault().balance(pool_id, TokenSide::Quote);

    let err = engine.migrate(pool_id, &clock_at(100)).unwrap_err();
    assert_eq!(err, PoolError::InvalidVestingParameters.into());

    assert!(engine.venue().positions.is_empty());
    assert_eq!(engine.store().load_pool(pool_id).unwrap(), pool);
    assert_eq!(
        pool.get_migration_progress().unwrap(),
        MigrationProgress::ThresholdCrossed
    );
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Base), base_balance);
    assert_eq!(engine.vault().balance(pool_id, TokenSide::Quote), quote_balance);
}

#[test]
fn test_take_events_drains_the_log() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &zero_fee_params());
    buy(&mut engine, pool_id, 1_000).unwrap();
    assert!(!engine.events().is_empty());

    let drained = engine.take_events();
    assert!(!drained.is_empty());
    assert!(engine.events().is_empty());

    sell(&mut engine, pool_id, 100).unwrap();
    assert_eq!(engine.events().len(), 1);
}
