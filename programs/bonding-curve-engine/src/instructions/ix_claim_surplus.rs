use anchor_lang::prelude::*;

use crate::{
    state::{MigrationProgress, PoolConfig, VirtualPool},
    EngineEvent, EvtClaimSurplus, Party, PoolError, RecordId, TokenSide,
};

use super::PoolTransition;

/// Pays `party` its share of the quote collected beyond the threshold, once
pub fn handle_claim_surplus(
    pool_id: RecordId,
    pool: &VirtualPool,
    config: &PoolConfig,
    party: Party,
) -> Result<PoolTransition<u64>> {
    require!(
        pool.get_migration_progress()? == MigrationProgress::Migrated,
        PoolError::NotPermitToDoThisAction
    );

    let total_surplus = pool.get_surplus(config.migration_quote_threshold);
    let (partner_surplus, protocol_surplus) = config.get_surplus_distribution(total_surplus)?;

    let mut new_pool = *pool;
    let amount = match party {
        Party::Partner => {
            require!(
                !pool.is_partner_surplus_claimed(),
                PoolError::SurplusHasBeenWithdraw
            );
            new_pool.set_partner_surplus_claimed();
            partner_surplus
        }
        Party::Protocol => {
            require!(
                !pool.is_protocol_surplus_claimed(),
                PoolError::SurplusHasBeenWithdraw
            );
            new_pool.set_protocol_surplus_claimed();
            protocol_surplus
        }
        Party::Creator | Party::LeftoverReceiver => {
            return Err(PoolError::NotPermitToDoThisAction.into())
        }
    };

    msg!("claim surplus: {:?} {}", party, amount);

    let mut transition = PoolTransition::new(new_pool, amount);
    transition.withdraw(TokenSide::Quote, amount);
    transition
        .events
        .push(EngineEvent::ClaimSurplus(EvtClaimSurplus {
            pool_id,
            party,
            amount,
        }));
    Ok(transition)
}
