use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::{
    activation_handler::{get_current_point, get_current_timestamp},
    instructions::*,
    params::{
        config_parameters::ConfigParameters,
        swap::{SwapParameters, TradeDirection},
    },
    safe_math::SafeMath,
    state::{MigrationStatus, SwapResult},
    utils::{PoolStore, ReserveVault, VenueAdapter, VestingSchedule, VestingService},
    venue::MigrationVenue,
    EngineEvent, EvtMigrate, Party, PoolError, RecordId, TokenSide,
};

/// Runs operations against stored pools. Every operation loads the pre-state, computes the
/// post-state without touching collaborators, then commits. A failed operation stores nothing.
pub struct Engine<S, V, A, L> {
    store: S,
    vault: V,
    venue: A,
    vesting: L,
    /// grows with every committed operation until the caller drains it with `take_events`
    events: Vec<EngineEvent>,
}

impl<S, V, A, L> Engine<S, V, A, L>
where
    S: PoolStore,
    V: ReserveVault,
    A: VenueAdapter,
    L: VestingService,
{
    pub fn new(store: S, vault: V, venue: A, vesting: L) -> Self {
        Engine {
            store,
            vault,
            venue,
            vesting,
            events: vec![],
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn venue(&self) -> &A {
        &self.venue
    }

    pub fn vesting(&self) -> &L {
        &self.vesting
    }

    /// Events not yet drained, oldest first
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Hands over the pending events and leaves the log empty. Long-running callers should
    /// drain after each operation, the engine keeps everything otherwise.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn create_config(&mut self, params: &ConfigParameters) -> Result<RecordId> {
        let config_id = self.store.next_id();
        let (config, event) = handle_create_config(config_id, params)?;
        self.store.store_config(config_id, &config)?;
        self.events.push(EngineEvent::CreateConfig(event));
        Ok(config_id)
    }

    pub fn create_pool(&mut self, config_id: RecordId, clock: &Clock) -> Result<RecordId> {
        let config = self.store.load_config(config_id)?;
        let activation_point = get_current_point(config.activation_type, clock)?;
        let pool_id = self.store.next_id();
        let transition = handle_initialize_pool(pool_id, config_id, &config, activation_point)?;
        self.commit(pool_id, transition)?;
        Ok(pool_id)
    }

    pub fn swap(
        &mut self,
        pool_id: RecordId,
        params: SwapParameters,
        trade_direction: TradeDirection,
        has_referral: bool,
        clock: &Clock,
    ) -> Result<SwapResult> {
        let pool = self.store.load_pool(pool_id)?;
        let config = self.store.load_config(pool.config_id)?;
        let ctx = SwapContext {
            pool_id,
            has_referral,
            current_point: get_current_point(config.activation_type, clock)?,
            current_timestamp: get_current_timestamp(clock)?,
        };
        let transition = handle_swap(&ctx, &pool, &config, params, trade_direction)?;
        self.commit(pool_id, transition)
    }

    pub fn check_migration(&self, pool_id: RecordId) -> Result<MigrationStatus> {
        let pool = self.store.load_pool(pool_id)?;
        let config = self.store.load_config(pool.config_id)?;
        handle_check_migration(&pool, &config)
    }

    /// Funds the venue and returns its position handle. Vesting schedules are created before
    /// the venue is funded, so a rejected schedule leaves no position behind.
    pub fn migrate(&mut self, pool_id: RecordId, clock: &Clock) -> Result<u64> {
        let pool = self.store.load_pool(pool_id)?;
        let config = self.store.load_config(pool.config_id)?;
        let balances = VaultBalances {
            base: self.vault.balance(pool_id, TokenSide::Base),
            quote: self.vault.balance(pool_id, TokenSide::Quote),
        };
        let current_point = get_current_point(config.activation_type, clock)?;

        let mut transition = handle_migrate(&pool, &config, &balances, current_point)?;
        self.check_vault_actions(pool_id, &transition.vault_actions)?;
        let vesting_schedules = std::mem::take(&mut transition.vesting_schedules);
        self.create_vesting_schedules(pool_id, vesting_schedules)?;

        let outcome = transition.output;
        let position_handle = outcome
            .strategy
            .fund(pool_id, &outcome.deposit, &mut self.venue)?;
        transition.pool.position_handle = position_handle;

        transition.events.push(EngineEvent::Migrate(EvtMigrate {
            pool_id,
            position_handle,
            base_amount: outcome.deposit.base_amount,
            quote_amount: outcome.deposit.quote_amount,
            sqrt_price: outcome.deposit.sqrt_price,
            liquidity: outcome.deposit.liquidity,
            locked_vesting_amount: outcome.locked_vesting_amount,
            burned_amount: outcome.burned_amount,
            leftover_amount: outcome.leftover_amount,
        }));

        self.commit(pool_id, transition)?;
        Ok(position_handle)
    }

    pub fn claim_surplus(&mut self, pool_id: RecordId, party: Party) -> Result<u64> {
        let pool = self.store.load_pool(pool_id)?;
        let config = self.store.load_config(pool.config_id)?;
        let transition = handle_claim_surplus(pool_id, &pool, &config, party)?;
        self.commit(pool_id, transition)
    }

    pub fn claim_lp_share(&mut self, pool_id: RecordId, party: Party) -> Result<u128> {
        let pool = self.store.load_pool(pool_id)?;
        let config = self.store.load_config(pool.config_id)?;
        let transition = handle_claim_lp_share(pool_id, &pool, &config, party)?;
        self.commit(pool_id, transition)
    }

    pub fn claim_trading_fee(
        &mut self,
        pool_id: RecordId,
        max_base_amount: u64,
        max_quote_amount: u64,
    ) -> Result<(u64, u64)> {
        let pool = self.store.load_pool(pool_id)?;
        let transition =
            handle_claim_trading_fee(pool_id, &pool, max_base_amount, max_quote_amount)?;
        self.commit(pool_id, transition)
    }

    pub fn claim_protocol_fee(&mut self, pool_id: RecordId) -> Result<(u64, u64)> {
        let pool = self.store.load_pool(pool_id)?;
        let transition = handle_claim_protocol_fee(pool_id, &pool)?;
        self.commit(pool_id, transition)
    }

    pub fn withdraw_leftover(&mut self, pool_id: RecordId) -> Result<u64> {
        let pool = self.store.load_pool(pool_id)?;
        let transition = handle_withdraw_leftover(pool_id, &pool)?;
        self.commit(pool_id, transition)
    }

    pub fn withdraw_migration_fee(&mut self, pool_id: RecordId, party: Party) -> Result<u64> {
        let pool = self.store.load_pool(pool_id)?;
        let config = self.store.load_config(pool.config_id)?;
        let transition = handle_withdraw_migration_fee(pool_id, &pool, &config, party)?;
        self.commit(pool_id, transition)
    }

    /// Replays the vault actions against current balances without applying them
    fn check_vault_actions(&self, pool_id: RecordId, actions: &[VaultAction]) -> Result<()> {
        let mut balances: HashMap<TokenSide, u64> = HashMap::new();
        for action in actions {
            match *action {
                VaultAction::Deposit(side, amount) => {
                    let balance = balances
                        .entry(side)
                        .or_insert_with(|| self.vault.balance(pool_id, side));
                    *balance = balance.safe_add(amount)?;
                }
                VaultAction::Withdraw(side, amount) => {
                    let balance = balances
                        .entry(side)
                        .or_insert_with(|| self.vault.balance(pool_id, side));
                    require!(*balance >= amount, PoolError::InsufficientReserve);
                    *balance = balance.safe_sub(amount)?;
                }
            }
        }
        Ok(())
    }

    fn create_vesting_schedules(
        &mut self,
        pool_id: RecordId,
        schedules: Vec<VestingSchedule>,
    ) -> Result<()> {
        for schedule in schedules {
            self.vesting.create_schedule(pool_id, schedule)?;
        }
        Ok(())
    }

    fn commit<T>(&mut self, pool_id: RecordId, transition: PoolTransition<T>) -> Result<T> {
        let PoolTransition {
            pool,
            output,
            vault_actions,
            vesting_schedules,
            events,
        } = transition;

        self.check_vault_actions(pool_id, &vault_actions)?;
        self.create_vesting_schedules(pool_id, vesting_schedules)?;

        for action in vault_actions {
            match action {
                VaultAction::Deposit(side, amount) => self.vault.deposit(pool_id, side, amount)?,
                VaultAction::Withdraw(side, amount) => {
                    self.vault.withdraw(pool_id, side, amount)?
                }
            }
        }
        self.store.store_pool(pool_id, &pool)?;
        self.events.extend(events);

        Ok(output)
    }
}
