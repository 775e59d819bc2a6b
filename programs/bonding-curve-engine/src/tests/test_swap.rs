use crate::{
    constants::{dynamic_fee::MAX_VOLATILITY_ACCUMULATOR, ONE_Q64},
    params::{
        config_parameters::ConfigParameters,
        fee_parameters::{BaseFeeParameters, DynamicFeeParameters, PoolFeeParameters},
        swap::{SwapParameters, TradeDirection},
    },
    state::MigrationProgress,
    utils::ReserveVault,
    EngineEvent, ErrorKind, PoolError, TokenSide,
};

use super::fixture::*;

#[test]
fn test_create_pool_derives_config_amounts() {
    let mut engine = new_engine();
    let config_id = engine.create_config(&zero_fee_params()).unwrap();
    let config = crate::utils::PoolStore::load_config(engine.store(), config_id).unwrap();

    assert_eq!(config.migration_sqrt_price, 3 * ONE_Q64);
    assert_eq!(config.swap_base_amount, SWAP_BASE_AMOUNT);
    assert_eq!(config.migration_base_threshold, MIGRATION_BASE_AMOUNT);

    let pool_id = engine.create_pool(config_id, &clock_at(0)).unwrap();
    let pool = load_pool(&engine, pool_id);
    assert_eq!(pool.sqrt_price, ONE_Q64);
    assert_eq!(pool.base_reserve, DYNAMIC_INITIAL_BASE_SUPPLY);
    assert_eq!(pool.quote_reserve, 0);
    assert_eq!(
        engine.vault().balance(pool_id, TokenSide::Base),
        DYNAMIC_INITIAL_BASE_SUPPLY
    );
    assert_vault_reconciled(&engine, pool_id);
}

#[test]
fn test_buy_exactly_crossing_a_segment() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &zero_fee_params());

    let result = buy(&mut engine, pool_id, 1_000_000).unwrap();
    assert_eq!(result.output_amount, 500_000);
    assert_eq!(result.actual_input_amount, 1_000_000);
    assert_eq!(result.amount_left, 0);
    assert_eq!(result.next_sqrt_price, 2 * ONE_Q64);
    assert_eq!(result.next_segment_index, 1);
    assert_eq!(result.crossed_segments, 1);

    let pool = load_pool(&engine, pool_id);
    assert_eq!(pool.sqrt_price, 2 * ONE_Q64);
    assert_eq!(pool.quote_reserve, 1_000_000);
    assert_eq!(pool.base_reserve, DYNAMIC_INITIAL_BASE_SUPPLY - 500_000);
    assert_vault_reconciled(&engine, pool_id);
}

#[test]
fn test_sell_walks_back_to_start_price() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &zero_fee_params());

    buy(&mut engine, pool_id, 1_000_000).unwrap();
    let result = sell(&mut engine, pool_id, 500_000).unwrap();

    assert_eq!(result.output_amount, 1_000_000);
    assert_eq!(result.next_sqrt_price, ONE_Q64);
    assert_eq!(result.next_segment_index, 0);

    let pool = load_pool(&engine, pool_id);
    assert_eq!(pool.quote_reserve, 0);
    assert_eq!(pool.base_reserve, DYNAMIC_INITIAL_BASE_SUPPLY);
    assert_vault_reconciled(&engine, pool_id);
}

#[test]
fn test_sell_after_buy_stopping_mid_segment() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &zero_fee_params());

    let bought = buy(&mut engine, pool_id, 1_234_567).unwrap();
    assert_eq!(bought.next_segment_index, 1);
    assert!(bought.next_sqrt_price > 2 * ONE_Q64 && bought.next_sqrt_price < 3 * ONE_Q64);

    let first = sell(&mut engine, pool_id, 1_000).unwrap();
    assert!(first.output_amount > 4_000 && first.output_amount < 5_000);
    assert!(first.next_sqrt_price < bought.next_sqrt_price);
    assert_eq!(first.next_segment_index, 1);
    assert_vault_reconciled(&engine, pool_id);

    // selling the rest crosses back into the first segment
    let second = sell(&mut engine, pool_id, bought.output_amount - 1_000).unwrap();
    assert_eq!(second.next_segment_index, 0);
    assert_eq!(second.crossed_segments, 1);
    assert!(second.next_sqrt_price >= ONE_Q64);

    let pool = load_pool(&engine, pool_id);
    assert!(first.output_amount + second.output_amount <= 1_234_567);
    assert_eq!(
        pool.quote_reserve + first.output_amount + second.output_amount,
        1_234_567
    );
    assert_vault_reconciled(&engine, pool_id);
}

#[test]
fn test_buy_is_capped_by_sellable_base() {
    let mut engine = new_engine();
    // threshold at the first segment boundary: 500_000 base to sell, 625_000 with the buffer,
    // 250_000 kept for migration
    let params = ConfigParameters {
        migration_quote_threshold: 1_000_000,
        ..zero_fee_params()
    };
    let pool_id = create_pool(&mut engine, &params);
    assert_eq!(load_pool(&engine, pool_id).base_reserve, 875_000);

    let result = buy(&mut engine, pool_id, 5_000_000).unwrap();
    assert!(result.output_amount <= 625_000 && result.output_amount >= 624_990);
    assert_eq!(result.next_segment_index, 1);
    assert!(result.next_sqrt_price > 2 * ONE_Q64 && result.next_sqrt_price < 4 * ONE_Q64);
    assert!(result.amount_left > 3_000_000);
    assert_eq!(result.actual_input_amount + result.amount_left, 5_000_000);

    let pool = load_pool(&engine, pool_id);
    assert!(pool.base_reserve >= 250_000);
    assert_eq!(
        pool.get_migration_progress().unwrap(),
        MigrationProgress::ThresholdCrossed
    );
    assert_eq!(
        engine.vault().balance(pool_id, TokenSide::Quote),
        result.actual_input_amount
    );
    assert_vault_reconciled(&engine, pool_id);

    engine.migrate(pool_id, &clock_at(20)).unwrap();
}

#[test]
fn test_threshold_reached_exactly_closes_trading() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &zero_fee_params());

    buy(&mut engine, pool_id, 1_000_000).unwrap();
    let result = buy(&mut engine, pool_id, 1_500_000).unwrap();
    assert_eq!(result.next_sqrt_price, 2 * ONE_Q64 + ONE_Q64 * 3 / 4);
    assert!(!engine.check_migration(pool_id).unwrap().is_migratable);

    engine.take_events();
    let result = buy(&mut engine, pool_id, 500_000).unwrap();
    assert_eq!(result.next_sqrt_price, 3 * ONE_Q64);

    let pool = load_pool(&engine, pool_id);
    assert_eq!(
        pool.get_migration_progress().unwrap(),
        MigrationProgress::ThresholdCrossed
    );
    assert_eq!(pool.quote_reserve, MIGRATION_QUOTE_THRESHOLD);
    assert_eq!(pool.finish_curve_point, 10);

    let status = engine.check_migration(pool_id).unwrap();
    assert!(status.is_migratable);
    assert_eq!(status.surplus, 0);

    let events = engine.take_events();
    assert!(matches!(events[0], EngineEvent::Swap(_)));
    assert!(matches!(events[1], EngineEvent::CurveComplete(ref e) if e.quote_reserve == MIGRATION_QUOTE_THRESHOLD));

    let err = buy(&mut engine, pool_id, 1).unwrap_err();
    assert_eq!(err, PoolError::PoolIsCompleted.into());
    assert_eq!(ErrorKind::of(&err), Some(ErrorKind::PoolClosed));

    let err = sell(&mut engine, pool_id, 1).unwrap_err();
    assert_eq!(err, PoolError::PoolIsCompleted.into());
}

#[test]
fn test_buy_past_curve_top_refunds_the_rest() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &zero_fee_params());

    let result = buy(&mut engine, pool_id, 6_000_000).unwrap();
    assert_eq!(result.actual_input_amount, 5_000_000);
    assert_eq!(result.amount_left, 1_000_000);
    assert_eq!(result.output_amount, 1_000_000);
    assert_eq!(result.next_sqrt_price, 4 * ONE_Q64);

    assert_eq!(engine.vault().balance(pool_id, TokenSide::Quote), 5_000_000);
    // only the base kept for migration remains
    assert_eq!(load_pool(&engine, pool_id).base_reserve, MIGRATION_BASE_AMOUNT);
    assert_vault_reconciled(&engine, pool_id);
}

#[test]
fn test_rejected_swap_leaves_state_untouched() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &zero_fee_params());
    buy(&mut engine, pool_id, 250_000).unwrap();

    let before = snapshot(&engine, pool_id);
    let event_count = engine.events().len();

    let err = engine
        .swap(
            pool_id,
            SwapParameters {
                amount_in: 1_000_000,
                minimum_amount_out: u64::MAX,
            },
            TradeDirection::QuoteToBase,
            false,
            &clock_at(10),
        )
        .unwrap_err();
    assert_eq!(err, PoolError::ExceededSlippage.into());
    assert_eq!(ErrorKind::of(&err), Some(ErrorKind::SlippageExceeded));

    let err = buy(&mut engine, pool_id, 0).unwrap_err();
    assert_eq!(err, PoolError::AmountIsZero.into());

    assert_eq!(snapshot(&engine, pool_id), before);
    assert_eq!(engine.events().len(), event_count);
}

#[test]
fn test_sell_into_empty_curve_is_rejected() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &zero_fee_params());

    // nothing bought yet, the price already sits at the bottom
    let err = sell(&mut engine, pool_id, 1_000).unwrap_err();
    assert_eq!(err, PoolError::NotEnoughLiquidity.into());
}

#[test]
fn test_fee_taken_on_quote_input() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &one_percent_fee_params());

    let result = buy(&mut engine, pool_id, 1_000_000).unwrap();
    assert_eq!(result.actual_input_amount, 1_000_000);
    assert_eq!(result.curve_input_amount, 990_000);
    assert_eq!(result.trading_fee, 8_000);
    assert_eq!(result.protocol_fee, 2_000);
    assert_eq!(result.referral_fee, 0);

    let pool = load_pool(&engine, pool_id);
    assert_eq!(pool.quote_reserve, 990_000);
    assert_eq!(pool.trading_quote_fee, 8_000);
    assert_eq!(pool.protocol_quote_fee, 2_000);
    assert_eq!(pool.trading_base_fee, 0);
    assert_vault_reconciled(&engine, pool_id);
}

#[test]
fn test_referral_fee_leaves_the_vault() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &one_percent_fee_params());

    let result = engine
        .swap(
            pool_id,
            SwapParameters {
                amount_in: 1_000_000,
                minimum_amount_out: 0,
            },
            TradeDirection::QuoteToBase,
            true,
            &clock_at(10),
        )
        .unwrap();
    assert_eq!(result.trading_fee, 8_000);
    assert_eq!(result.protocol_fee, 1_600);
    assert_eq!(result.referral_fee, 400);

    assert_eq!(engine.vault().balance(pool_id, TokenSide::Quote), 999_600);
    assert_vault_reconciled(&engine, pool_id);
}

#[test]
fn test_fee_taken_on_quote_output_when_selling() {
    let mut engine = new_engine();
    let pool_id = create_pool(&mut engine, &one_percent_fee_params());

    let bought = buy(&mut engine, pool_id, 2_000_000).unwrap();
    let result = sell(&mut engine, pool_id, bought.output_amount / 2).unwrap();

    assert_eq!(
        result.output_amount + result.trading_fee + result.protocol_fee + result.referral_fee,
        result.curve_output_amount
    );
    assert!(result.trading_fee > 0);

    let pool = load_pool(&engine, pool_id);
    assert_eq!(pool.trading_base_fee, 0);
    assert_eq!(pool.trading_quote_fee, bought.trading_fee + result.trading_fee);
    assert_vault_reconciled(&engine, pool_id);
}

#[test]
fn test_input_token_fee_mode_charges_base_on_sells() {
    let mut engine = new_engine();
    let params = ConfigParameters {
        collect_fee_mode: 1,
        ..one_percent_fee_params()
    };
    let pool_id = create_pool(&mut engine, &params);

    let bought = buy(&mut engine, pool_id, 2_000_000).unwrap();
    let result = sell(&mut engine, pool_id, 100_000).unwrap();
    assert_eq!(result.curve_input_amount, 99_000);
    assert_eq!(result.trading_fee, 800);
    assert_eq!(result.protocol_fee, 200);

    let pool = load_pool(&engine, pool_id);
    assert_eq!(pool.trading_base_fee, 800);
    assert_eq!(pool.protocol_base_fee, 200);
    assert_eq!(pool.trading_quote_fee, bought.trading_fee);
    assert_vault_reconciled(&engine, pool_id);
}

#[test]
fn test_fee_scheduler_decays_with_slots() {
    let mut engine = new_engine();
    let params = ConfigParameters {
        pool_fees: PoolFeeParameters {
            base_fee: BaseFeeParameters {
                cliff_fee_numerator: 100_000_000,
                number_of_period: 5,
                period_frequency: 10,
                reduction_factor: 10_000_000,
                base_fee_mode: 0,
            },
            ..Default::default()
        },
        ..zero_fee_params()
    };
    let pool_id = create_pool(&mut engine, &params);

    let result = engine
        .swap(
            pool_id,
            SwapParameters {
                amount_in: 100_000,
                minimum_amount_out: 0,
            },
            TradeDirection::QuoteToBase,
            false,
            &clock_at(25),
        )
        .unwrap();
    // two periods passed, 8%
    assert_eq!(result.trading_fee, 8_000);
}

#[test]
fn test_volatility_raises_the_next_fee() {
    let mut engine = new_engine();
    let mut params = one_percent_fee_params();
    params.pool_fees.protocol_fee_percent = 0;
    params.pool_fees.dynamic_fee = Some(DynamicFeeParameters::from_base_fee_numerator(10_000_000).unwrap());
    let pool_id = create_pool(&mut engine, &params);

    let first = buy(&mut engine, pool_id, 1_000_000).unwrap();
    assert_eq!(first.trading_fee, 10_000);

    let pool = load_pool(&engine, pool_id);
    assert_eq!(
        pool.volatility_tracker.volatility_accumulator,
        u128::from(MAX_VOLATILITY_ACCUMULATOR)
    );

    // same timestamp, the accumulator from the first trade is still in force
    let second = buy(&mut engine, pool_id, 100_000).unwrap();
    assert!(second.trading_fee > 1_000);
    assert!(second.trading_fee <= 1_200);
    assert_vault_reconciled(&engine, pool_id);
}
