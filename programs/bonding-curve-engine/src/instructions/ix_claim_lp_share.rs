use anchor_lang::prelude::*;

use crate::{
    state::{MigrationProgress, PoolConfig, VirtualPool},
    utils::{VestedAsset, VestingSchedule},
    EngineEvent, EvtClaimLpShare, Party, PoolError, RecordId,
};

use super::PoolTransition;

/// Returns the unlocked liquidity of `party`. The locked part goes to the vesting service.
pub fn handle_claim_lp_share(
    pool_id: RecordId,
    pool: &VirtualPool,
    config: &PoolConfig,
    party: Party,
) -> Result<PoolTransition<u128>> {
    require!(
        pool.get_migration_progress()? == MigrationProgress::Migrated,
        PoolError::NotPermitToDoThisAction
    );

    let distribution = config.get_liquidity_distribution(pool.migrated_liquidity)?;

    let mut new_pool = *pool;
    let item = match party {
        Party::Partner => {
            require!(!pool.is_partner_lp_claimed(), PoolError::LpShareHasBeenClaimed);
            new_pool.set_partner_lp_claimed();
            distribution.partner
        }
        Party::Creator => {
            require!(!pool.is_creator_lp_claimed(), PoolError::LpShareHasBeenClaimed);
            new_pool.set_creator_lp_claimed();
            distribution.creator
        }
        Party::Protocol | Party::LeftoverReceiver => {
            return Err(PoolError::NotPermitToDoThisAction.into())
        }
    };

    msg!(
        "claim lp: {:?} unlocked {} locked {}",
        party,
        item.unlocked_liquidity,
        item.locked_liquidity
    );

    let mut transition = PoolTransition::new(new_pool, item.unlocked_liquidity);

    if item.locked_liquidity > 0 {
        let vesting = item.get_lp_vesting_parameters(pool.migration_point)?;
        transition.vesting_schedules.push(VestingSchedule {
            beneficiary: party,
            asset: VestedAsset::Liquidity,
            amount_per_period: vesting.liquidity_per_period,
            frequency: vesting.period_frequency,
            number_of_period: vesting.number_of_period.into(),
            cliff_unlock_amount: vesting.cliff_unlock_liquidity,
            cliff_duration_from_migration_time: item
                .lp_vesting_info
                .get_cliff_duration_from_migration_time()
                .into(),
            start_point: pool.migration_point,
        });
    }

    transition
        .events
        .push(EngineEvent::ClaimLpShare(EvtClaimLpShare {
            pool_id,
            party,
            unlocked_liquidity: item.unlocked_liquidity,
            locked_liquidity: item.locked_liquidity,
        }));
    Ok(transition)
}
