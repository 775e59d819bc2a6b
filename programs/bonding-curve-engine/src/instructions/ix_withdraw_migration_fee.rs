use anchor_lang::prelude::*;

use crate::{
    state::{MigrationProgress, PoolConfig, VirtualPool},
    EngineEvent, EvtWithdrawMigrationFee, Party, PoolError, RecordId, TokenSide,
};

use super::PoolTransition;

/// Pays `party` its share of the quote kept back from the venue on migration, once
pub fn handle_withdraw_migration_fee(
    pool_id: RecordId,
    pool: &VirtualPool,
    config: &PoolConfig,
    party: Party,
) -> Result<PoolTransition<u64>> {
    require!(
        pool.get_migration_progress()? == MigrationProgress::Migrated,
        PoolError::NotPermitToDoThisAction
    );

    let distribution = config.get_migration_fee_distribution()?;

    let mut new_pool = *pool;
    let fee = match party {
        Party::Partner => {
            require!(
                !pool.is_partner_migration_fee_withdrawn(),
                PoolError::MigrationFeeHasBeenWithdraw
            );
            new_pool.set_partner_migration_fee_withdrawn();
            distribution.partner_migration_fee
        }
        Party::Creator => {
            require!(
                !pool.is_creator_migration_fee_withdrawn(),
                PoolError::MigrationFeeHasBeenWithdraw
            );
            new_pool.set_creator_migration_fee_withdrawn();
            distribution.creator_migration_fee
        }
        Party::Protocol | Party::LeftoverReceiver => {
            return Err(PoolError::NotPermitToDoThisAction.into())
        }
    };

    msg!("withdraw migration fee: {:?} {}", party, fee);

    let mut transition = PoolTransition::new(new_pool, fee);
    transition.withdraw(TokenSide::Quote, fee);
    transition
        .events
        .push(EngineEvent::WithdrawMigrationFee(EvtWithdrawMigrationFee {
            pool_id,
            party,
            fee,
        }));
    Ok(transition)
}
