use anchor_lang::prelude::*;

use crate::{
    state::{MigrationProgress, VirtualPool},
    EngineEvent, EvtWithdrawLeftover, PoolError, RecordId, TokenSide,
};

use super::PoolTransition;

/// Sends base tokens neither migrated, vested nor burned to the leftover receiver, once
pub fn handle_withdraw_leftover(
    pool_id: RecordId,
    pool: &VirtualPool,
) -> Result<PoolTransition<u64>> {
    require!(
        pool.get_migration_progress()? == MigrationProgress::Migrated,
        PoolError::NotPermitToDoThisAction
    );
    require!(
        !pool.is_leftover_withdrawn(),
        PoolError::LeftoverHasBeenWithdraw
    );

    let amount = pool.leftover_amount;
    let mut new_pool = *pool;
    new_pool.set_leftover_withdrawn();

    msg!("withdraw leftover: {}", amount);

    let mut transition = PoolTransition::new(new_pool, amount);
    transition.withdraw(TokenSide::Base, amount);
    transition
        .events
        .push(EngineEvent::WithdrawLeftover(EvtWithdrawLeftover { pool_id, amount }));
    Ok(transition)
}
