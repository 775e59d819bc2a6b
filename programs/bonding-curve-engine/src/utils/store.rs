use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::{
    state::{PoolConfig, VirtualPool},
    PoolError, RecordId,
};

/// Load/store of config and pool records keyed by id
pub trait PoolStore {
    fn next_id(&mut self) -> RecordId;

    fn load_config(&self, config_id: RecordId) -> Result<PoolConfig>;

    fn store_config(&mut self, config_id: RecordId, config: &PoolConfig) -> Result<()>;

    fn load_pool(&self, pool_id: RecordId) -> Result<VirtualPool>;

    fn store_pool(&mut self, pool_id: RecordId, pool: &VirtualPool) -> Result<()>;
}

/// Keeps records as their raw bytes, the way they would sit in an account
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    last_id: RecordId,
    configs: HashMap<RecordId, Vec<u8>>,
    pools: HashMap<RecordId, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read_record<T: bytemuck::Pod>(bytes: &[u8]) -> Result<T> {
    let record = bytemuck::try_pod_read_unaligned::<T>(bytes)
        .map_err(|_| PoolError::AccountInvariantViolation)?;
    Ok(record)
}

impl PoolStore for MemoryStore {
    fn next_id(&mut self) -> RecordId {
        self.last_id += 1;
        self.last_id
    }

    fn load_config(&self, config_id: RecordId) -> Result<PoolConfig> {
        let bytes = self
            .configs
            .get(&config_id)
            .ok_or(PoolError::InvalidConfigAccount)?;
        read_record(bytes)
    }

    fn store_config(&mut self, config_id: RecordId, config: &PoolConfig) -> Result<()> {
        self.configs
            .insert(config_id, bytemuck::bytes_of(config).to_vec());
        Ok(())
    }

    fn load_pool(&self, pool_id: RecordId) -> Result<VirtualPool> {
        let bytes = self
            .pools
            .get(&pool_id)
            .ok_or(PoolError::InvalidPoolAccount)?;
        read_record(bytes)
    }

    fn store_pool(&mut self, pool_id: RecordId, pool: &VirtualPool) -> Result<()> {
        self.pools.insert(pool_id, bytemuck::bytes_of(pool).to_vec());
        Ok(())
    }
}
