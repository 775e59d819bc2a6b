use anchor_lang::prelude::*;

use crate::{safe_math::SafeMath, Party, RecordId};

/// What a schedule releases
#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum VestedAsset {
    BaseToken,
    Liquidity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct VestingSchedule {
    pub beneficiary: Party,
    pub asset: VestedAsset,
    pub amount_per_period: u128,
    pub frequency: u64,
    pub number_of_period: u64,
    pub cliff_unlock_amount: u128,
    pub cliff_duration_from_migration_time: u64,
    /// point the cliff is counted from
    pub start_point: u64,
}

impl VestingSchedule {
    pub fn get_total_amount(&self) -> Result<u128> {
        let total_amount = self.cliff_unlock_amount.safe_add(
            self.amount_per_period
                .safe_mul(self.number_of_period.into())?,
        )?;
        Ok(total_amount)
    }
}

/// Takes custody of locked amounts and releases them over time
pub trait VestingService {
    fn create_schedule(&mut self, pool_id: RecordId, schedule: VestingSchedule) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct RecordingVesting {
    pub schedules: Vec<(RecordId, VestingSchedule)>,
}

impl RecordingVesting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedules_of(&self, pool_id: RecordId) -> impl Iterator<Item = &VestingSchedule> {
        self.schedules
            .iter()
            .filter(move |(id, _)| *id == pool_id)
            .map(|(_, schedule)| schedule)
    }
}

impl VestingService for RecordingVesting {
    fn create_schedule(&mut self, pool_id: RecordId, schedule: VestingSchedule) -> Result<()> {
        self.schedules.push((pool_id, schedule));
        Ok(())
    }
}
