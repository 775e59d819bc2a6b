#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

#[macro_use]
pub mod macros;

pub mod activation_handler;
pub use activation_handler::*;
pub mod base_fee;
pub mod constants;
pub mod curve;
pub mod engine;
pub use engine::*;
pub mod error;
pub use error::*;
pub mod event;
pub use event::*;
pub mod instructions;
pub use instructions::*;
pub mod math;
pub use math::*;
pub mod params;
pub mod state;
pub mod utils;
pub use utils::*;
pub mod venue;

#[cfg(test)]
mod tests;

/// Opaque identifier of a config or pool record.
pub type RecordId = u64;

/// Identifies one side of the pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AnchorSerialize, AnchorDeserialize)]
pub enum TokenSide {
    Base,
    Quote,
}

/// Recipient of a migration-time payout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AnchorSerialize, AnchorDeserialize)]
pub enum Party {
    Partner,
    Creator,
    Protocol,
    LeftoverReceiver,
}
