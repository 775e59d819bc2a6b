use anchor_lang::prelude::*;

use crate::{
    state::{PoolConfig, VirtualPool},
    EngineEvent, EvtInitializePool, RecordId, TokenSide,
};

use super::PoolTransition;

/// Fresh pool at the start of the curve. The whole initial base supply goes into the vault.
pub fn handle_initialize_pool(
    pool_id: RecordId,
    config_id: RecordId,
    config: &PoolConfig,
    activation_point: u64,
) -> Result<PoolTransition<()>> {
    let initial_base_supply = config.get_initial_base_supply()?;

    let mut pool = VirtualPool::default();
    pool.initialize(
        config_id,
        config.sqrt_start_price,
        initial_base_supply,
        activation_point,
    );

    let mut transition = PoolTransition::new(pool, ());
    transition.deposit(TokenSide::Base, initial_base_supply);
    transition
        .events
        .push(EngineEvent::InitializePool(EvtInitializePool {
            pool_id,
            config_id,
            activation_point,
            base_reserve: initial_base_supply,
        }));
    Ok(transition)
}
