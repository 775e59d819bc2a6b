use anchor_lang::prelude::*;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::state::{PoolConfig, VirtualPool};

#[repr(u8)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    IntoPrimitive,
    TryFromPrimitive,
    AnchorDeserialize,
    AnchorSerialize,
)]
pub enum MigrationProgress {
    /// curve is tradable
    NotStarted,
    /// quote reserve reached the threshold, trading is closed
    ThresholdCrossed,
    /// liquidity has been moved to the venue
    Migrated,
}

/// Snapshot answered by `check_migration`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    pub progress: MigrationProgress,
    pub quote_reserve: u64,
    pub migration_quote_threshold: u64,
    /// quote collected beyond the threshold, zero before it is reached
    pub surplus: u64,
    /// pool may be migrated now
    pub is_migratable: bool,
}

impl MigrationStatus {
    pub fn new(pool: &VirtualPool, config: &PoolConfig) -> Result<Self> {
        let progress = pool.get_migration_progress()?;
        let threshold = config.migration_quote_threshold;
        Ok(MigrationStatus {
            progress,
            quote_reserve: pool.quote_reserve,
            migration_quote_threshold: threshold,
            surplus: pool.get_surplus(threshold),
            is_migratable: progress == MigrationProgress::ThresholdCrossed
                && pool.is_curve_complete(threshold),
        })
    }
}
