use anchor_lang::prelude::*;

use crate::{venue::MigrationDeposit, PoolError, RecordId};

/// External venue that receives the migrated liquidity
pub trait VenueAdapter {
    /// Creates and funds a position, returning its opaque handle
    fn create_position(&mut self, pool_id: RecordId, deposit: &MigrationDeposit) -> Result<u64>;
}

#[derive(Debug, Default, Clone)]
pub struct RecordingVenue {
    pub positions: Vec<(RecordId, MigrationDeposit)>,
}

impl RecordingVenue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VenueAdapter for RecordingVenue {
    fn create_position(&mut self, pool_id: RecordId, deposit: &MigrationDeposit) -> Result<u64> {
        require!(
            !self.positions.iter().any(|(id, _)| *id == pool_id),
            PoolError::PositionAlreadyCreated
        );
        self.positions.push((pool_id, *deposit));
        Ok(u64::try_from(self.positions.len()).map_err(|_| PoolError::TypeCastFailed)?)
    }
}
