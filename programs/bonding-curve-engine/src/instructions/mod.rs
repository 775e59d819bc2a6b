//! Pure state transitions. Each handler reads the pre-state and returns the complete post-state
//! together with the vault movements and events the engine has to commit.
use crate::{
    state::VirtualPool,
    utils::VestingSchedule,
    EngineEvent, TokenSide,
};

pub mod ix_claim_fee;
pub use ix_claim_fee::*;
pub mod ix_claim_lp_share;
pub use ix_claim_lp_share::*;
pub mod ix_claim_surplus;
pub use ix_claim_surplus::*;
pub mod ix_create_config;
pub use ix_create_config::*;
pub mod ix_initialize_pool;
pub use ix_initialize_pool::*;
pub mod ix_migrate;
pub use ix_migrate::*;
pub mod ix_swap;
pub use ix_swap::*;
pub mod ix_withdraw_leftover;
pub use ix_withdraw_leftover::*;
pub mod ix_withdraw_migration_fee;
pub use ix_withdraw_migration_fee::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultAction {
    Deposit(TokenSide, u64),
    Withdraw(TokenSide, u64),
}

/// New pool state plus the side effects needed to commit it
#[derive(Debug, Clone)]
pub struct PoolTransition<T> {
    pub pool: VirtualPool,
    pub output: T,
    pub vault_actions: Vec<VaultAction>,
    pub vesting_schedules: Vec<VestingSchedule>,
    pub events: Vec<EngineEvent>,
}

impl<T> PoolTransition<T> {
    pub fn new(pool: VirtualPool, output: T) -> Self {
        PoolTransition {
            pool,
            output,
            vault_actions: vec![],
            vesting_schedules: vec![],
            events: vec![],
        }
    }

    pub fn deposit(&mut self, side: TokenSide, amount: u64) {
        if amount > 0 {
            self.vault_actions.push(VaultAction::Deposit(side, amount));
        }
    }

    pub fn withdraw(&mut self, side: TokenSide, amount: u64) {
        if amount > 0 {
            self.vault_actions.push(VaultAction::Withdraw(side, amount));
        }
    }
}
