use anchor_lang::prelude::*;

use crate::{
    params::swap::{SwapParameters, TradeDirection},
    state::{FeeMode, MigrationProgress, PoolConfig, SwapResult, VirtualPool},
    EngineEvent, EvtCurveComplete, EvtSwap, PoolError, RecordId, TokenSide,
};

use super::PoolTransition;

pub struct SwapContext {
    pub pool_id: RecordId,
    pub has_referral: bool,
    /// slot or timestamp, per the config's activation type
    pub current_point: u64,
    pub current_timestamp: u64,
}

pub fn handle_swap(
    ctx: &SwapContext,
    pool: &VirtualPool,
    config: &PoolConfig,
    params: SwapParameters,
    trade_direction: TradeDirection,
) -> Result<PoolTransition<SwapResult>> {
    let SwapParameters {
        amount_in,
        minimum_amount_out,
    } = params;

    require!(amount_in > 0, PoolError::AmountIsZero);
    require!(
        pool.get_migration_progress()? == MigrationProgress::NotStarted,
        PoolError::PoolIsCompleted
    );

    let fee_mode = FeeMode::get_fee_mode(config.collect_fee_mode, trade_direction, ctx.has_referral)?;

    let mut pool = *pool;
    let old_sqrt_price = pool.sqrt_price;

    pool.update_pre_swap(config, ctx.current_timestamp)?;

    let swap_result = pool.get_swap_result(
        config,
        amount_in,
        &fee_mode,
        trade_direction,
        ctx.current_point,
    )?;

    require!(
        swap_result.output_amount >= minimum_amount_out,
        PoolError::ExceededSlippage
    );

    pool.apply_swap_result(&swap_result, &fee_mode, trade_direction)?;
    pool.update_post_swap(config, old_sqrt_price, ctx.current_timestamp)?;

    if trade_direction == TradeDirection::QuoteToBase {
        // buys may not dip into the base kept for migration and locked vesting
        require!(
            pool.base_reserve >= config.get_reserved_base_amount()?,
            PoolError::InsufficientLiquidity
        );
    }

    let (input_side, output_side) = match trade_direction {
        TradeDirection::BaseToQuote => (TokenSide::Base, TokenSide::Quote),
        TradeDirection::QuoteToBase => (TokenSide::Quote, TokenSide::Base),
    };
    let fee_side = if fee_mode.fees_on_base_token {
        TokenSide::Base
    } else {
        TokenSide::Quote
    };

    let mut transition = PoolTransition::new(pool, swap_result);
    transition.deposit(input_side, swap_result.actual_input_amount);
    transition.withdraw(output_side, swap_result.output_amount);
    transition.withdraw(fee_side, swap_result.referral_fee);

    transition.events.push(EngineEvent::Swap(EvtSwap {
        pool_id: ctx.pool_id,
        config_id: pool.config_id,
        trade_direction,
        has_referral: ctx.has_referral,
        params,
        swap_result,
        current_point: ctx.current_point,
    }));

    if transition
        .pool
        .is_curve_complete(config.migration_quote_threshold)
    {
        let pool = &mut transition.pool;
        pool.set_migration_progress(MigrationProgress::ThresholdCrossed);
        pool.finish_curve_point = ctx.current_point;
        msg!(
            "curve complete: quote reserve {} threshold {}",
            pool.quote_reserve,
            config.migration_quote_threshold
        );

        let event = EvtCurveComplete {
            pool_id: ctx.pool_id,
            config_id: pool.config_id,
            base_reserve: pool.base_reserve,
            quote_reserve: pool.quote_reserve,
            finish_curve_point: pool.finish_curve_point,
        };
        transition.events.push(EngineEvent::CurveComplete(event));
    }

    Ok(transition)
}
