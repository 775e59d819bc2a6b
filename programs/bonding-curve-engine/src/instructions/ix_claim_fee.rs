use anchor_lang::prelude::*;

use crate::{
    safe_math::SafeMath,
    state::VirtualPool,
    EngineEvent, EvtClaimProtocolFee, EvtClaimTradingFee, RecordId, TokenSide,
};

use super::PoolTransition;

/// Pays out trading fee, at most `max_base_amount` / `max_quote_amount`. Returns (base, quote).
pub fn handle_claim_trading_fee(
    pool_id: RecordId,
    pool: &VirtualPool,
    max_base_amount: u64,
    max_quote_amount: u64,
) -> Result<PoolTransition<(u64, u64)>> {
    let (unclaimed_base_fee, unclaimed_quote_fee) = pool.get_unclaimed_trading_fee()?;
    let token_base_amount = unclaimed_base_fee.min(max_base_amount);
    let token_quote_amount = unclaimed_quote_fee.min(max_quote_amount);

    let mut new_pool = *pool;
    new_pool.claimed_trading_base_fee = pool
        .claimed_trading_base_fee
        .safe_add(token_base_amount)?;
    new_pool.claimed_trading_quote_fee = pool
        .claimed_trading_quote_fee
        .safe_add(token_quote_amount)?;

    msg!(
        "claim trading fee: base {} quote {}",
        token_base_amount,
        token_quote_amount
    );

    let mut transition = PoolTransition::new(new_pool, (token_base_amount, token_quote_amount));
    transition.withdraw(TokenSide::Base, token_base_amount);
    transition.withdraw(TokenSide::Quote, token_quote_amount);
    transition
        .events
        .push(EngineEvent::ClaimTradingFee(EvtClaimTradingFee {
            pool_id,
            token_base_amount,
            token_quote_amount,
        }));
    Ok(transition)
}

/// Pays out all protocol fee accrued so far. Returns (base, quote).
pub fn handle_claim_protocol_fee(
    pool_id: RecordId,
    pool: &VirtualPool,
) -> Result<PoolTransition<(u64, u64)>> {
    let (token_base_amount, token_quote_amount) = pool.get_unclaimed_protocol_fee()?;

    let mut new_pool = *pool;
    new_pool.claimed_protocol_base_fee = pool
        .claimed_protocol_base_fee
        .safe_add(token_base_amount)?;
    new_pool.claimed_protocol_quote_fee = pool
        .claimed_protocol_quote_fee
        .safe_add(token_quote_amount)?;

    msg!(
        "claim protocol fee: base {} quote {}",
        token_base_amount,
        token_quote_amount
    );

    let mut transition = PoolTransition::new(new_pool, (token_base_amount, token_quote_amount));
    transition.withdraw(TokenSide::Base, token_base_amount);
    transition.withdraw(TokenSide::Quote, token_quote_amount);
    transition
        .events
        .push(EngineEvent::ClaimProtocolFee(EvtClaimProtocolFee {
            pool_id,
            token_base_amount,
            token_quote_amount,
        }));
    Ok(transition)
}
