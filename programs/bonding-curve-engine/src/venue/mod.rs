//! Targets a completed curve can migrate into
use anchor_lang::prelude::*;

use crate::{
    params::fee_parameters::DynamicFeeParameters,
    state::{MigrationOption, PoolConfig},
    utils::VenueAdapter,
    RecordId,
};

pub mod damm_v2;
pub mod meteora_damm;

/// Amounts handed to the venue when a pool migrates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationDeposit {
    pub base_amount: u64,
    pub quote_amount: u64,
    pub sqrt_price: u128,
    pub liquidity: u128,
    /// fee configuration the venue pool starts with, if it supports one
    pub dynamic_fee: Option<DynamicFeeParameters>,
}

pub trait MigrationVenue {
    /// Base token needed next to `quote_amount` so that the venue opens at `sqrt_price`
    fn get_migration_base_amount(&self, quote_amount: u64, sqrt_price: u128) -> Result<u64>;

    fn compute_migration_deposit(&self, config: &PoolConfig) -> Result<MigrationDeposit>;

    /// Funds the venue once, returning the position handle
    fn fund(
        &self,
        pool_id: RecordId,
        deposit: &MigrationDeposit,
        adapter: &mut dyn VenueAdapter,
    ) -> Result<u64> {
        msg!(
            "fund venue: base {} quote {} liquidity {}",
            deposit.base_amount,
            deposit.quote_amount,
            deposit.liquidity
        );
        adapter.create_position(pool_id, deposit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueStrategy {
    MeteoraDamm,
    DammV2,
}

impl From<MigrationOption> for VenueStrategy {
    fn from(option: MigrationOption) -> Self {
        match option {
            MigrationOption::MeteoraDamm => VenueStrategy::MeteoraDamm,
            MigrationOption::DammV2 => VenueStrategy::DammV2,
        }
    }
}

impl VenueStrategy {
    pub fn from_config(config: &PoolConfig) -> Result<Self> {
        Ok(config.get_migration_option()?.into())
    }
}

impl MigrationVenue for VenueStrategy {
    fn get_migration_base_amount(&self, quote_amount: u64, sqrt_price: u128) -> Result<u64> {
        match self {
            VenueStrategy::MeteoraDamm => {
                meteora_damm::get_migration_base_amount(quote_amount, sqrt_price)
            }
            VenueStrategy::DammV2 => damm_v2::get_migration_base_amount(quote_amount, sqrt_price),
        }
    }

    fn compute_migration_deposit(&self, config: &PoolConfig) -> Result<MigrationDeposit> {
        match self {
            VenueStrategy::MeteoraDamm => meteora_damm::compute_migration_deposit(config),
            VenueStrategy::DammV2 => damm_v2::compute_migration_deposit(config),
        }
    }
}
