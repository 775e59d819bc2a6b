//! Event module includes information about events of the program
use anchor_lang::prelude::*;

use crate::{
    params::swap::{SwapParameters, TradeDirection},
    state::SwapResult,
    Party, RecordId,
};

/// Create config
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtCreateConfig {
    pub config_id: RecordId,
    pub migration_quote_threshold: u64,
    pub migration_base_threshold: u64,
    pub migration_sqrt_price: u128,
    pub swap_base_amount: u64,
    pub sqrt_start_price: u128,
    pub initial_base_supply: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtInitializePool {
    pub pool_id: RecordId,
    pub config_id: RecordId,
    pub activation_point: u64,
    pub base_reserve: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtSwap {
    pub pool_id: RecordId,
    pub config_id: RecordId,
    pub trade_direction: TradeDirection,
    pub has_referral: bool,
    pub params: SwapParameters,
    pub swap_result: SwapResult,
    pub current_point: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtCurveComplete {
    pub pool_id: RecordId,
    pub config_id: RecordId,
    pub base_reserve: u64,
    pub quote_reserve: u64,
    pub finish_curve_point: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtMigrate {
    pub pool_id: RecordId,
    pub position_handle: u64,
    pub base_amount: u64,
    pub quote_amount: u64,
    pub sqrt_price: u128,
    pub liquidity: u128,
    pub locked_vesting_amount: u64,
    pub burned_amount: u64,
    pub leftover_amount: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtClaimSurplus {
    pub pool_id: RecordId,
    pub party: Party,
    pub amount: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtClaimLpShare {
    pub pool_id: RecordId,
    pub party: Party,
    pub unlocked_liquidity: u128,
    pub locked_liquidity: u128,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtClaimTradingFee {
    pub pool_id: RecordId,
    pub token_base_amount: u64,
    pub token_quote_amount: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtClaimProtocolFee {
    pub pool_id: RecordId,
    pub token_base_amount: u64,
    pub token_quote_amount: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtWithdrawLeftover {
    pub pool_id: RecordId,
    pub amount: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EvtWithdrawMigrationFee {
    pub pool_id: RecordId,
    pub party: Party,
    pub fee: u64,
}

/// Events collected by the engine, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    CreateConfig(EvtCreateConfig),
    InitializePool(EvtInitializePool),
    Swap(EvtSwap),
    CurveComplete(EvtCurveComplete),
    Migrate(EvtMigrate),
    ClaimSurplus(EvtClaimSurplus),
    ClaimLpShare(EvtClaimLpShare),
    ClaimTradingFee(EvtClaimTradingFee),
    ClaimProtocolFee(EvtClaimProtocolFee),
    WithdrawLeftover(EvtWithdrawLeftover),
    WithdrawMigrationFee(EvtWithdrawMigrationFee),
}
