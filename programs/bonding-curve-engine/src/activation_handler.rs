use anchor_lang::prelude::*;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::PoolError;

/// Type of the activation
#[repr(u8)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    IntoPrimitive,
    TryFromPrimitive,
    AnchorDeserialize,
    AnchorSerialize,
)]
pub enum ActivationType {
    Slot,
    Timestamp,
}

/// Point on the config's time axis: a slot or a unix timestamp
pub fn get_current_point(activation_type: u8, clock: &Clock) -> Result<u64> {
    let activation_type = ActivationType::try_from(activation_type)
        .map_err(|_| PoolError::InvalidActivationType)?;

    let current_point = match activation_type {
        ActivationType::Slot => clock.slot,
        ActivationType::Timestamp => get_current_timestamp(clock)?,
    };
    Ok(current_point)
}

/// Volatility tracking always runs on wall-clock seconds
pub fn get_current_timestamp(clock: &Clock) -> Result<u64> {
    Ok(u64::try_from(clock.unix_timestamp).map_err(|_| PoolError::TypeCastFailed)?)
}
