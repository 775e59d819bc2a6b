//! Error module includes error messages and codes of the program
use anchor_lang::prelude::*;

/// Error messages and codes of the program
#[error_code]
#[derive(PartialEq)]
pub enum PoolError {
    #[msg("Math operation overflow")]
    MathOverflow,

    #[msg("Invalid fee setup")]
    InvalidFee,

    #[msg("Exceeded slippage tolerance")]
    ExceededSlippage,

    #[msg("Exceeded max fee bps")]
    ExceedMaxFeeBps,

    #[msg("Amount is zero")]
    AmountIsZero,

    #[msg("Type cast error")]
    TypeCastFailed,

    #[msg("Invalid activation type")]
    InvalidActivationType,

    #[msg("Invalid collect fee mode")]
    InvalidCollectFeeMode,

    #[msg("Invalid input")]
    InvalidInput,

    #[msg("Not enough liquidity")]
    NotEnoughLiquidity,

    #[msg("Pool is completed")]
    PoolIsCompleted,

    #[msg("Pool is incompleted")]
    PoolIsIncompleted,

    #[msg("Invalid migration option")]
    InvalidMigrationOption,

    #[msg("Invalid fee percentage")]
    InvalidFeePercentage,

    #[msg("Invalid quote threshold")]
    InvalidQuoteThreshold,

    #[msg("Invalid token supply")]
    InvalidTokenSupply,

    #[msg("Invalid curve")]
    InvalidCurve,

    #[msg("Not permit to do this action")]
    NotPermitToDoThisAction,

    #[msg("Invalid config account")]
    InvalidConfigAccount,

    #[msg("Invalid pool account")]
    InvalidPoolAccount,

    #[msg("Surplus has been withdraw")]
    SurplusHasBeenWithdraw,

    #[msg("Leftover has been withdraw")]
    LeftoverHasBeenWithdraw,

    #[msg("Lp share has been claimed")]
    LpShareHasBeenClaimed,

    #[msg("Insufficient liquidity for migration")]
    InsufficientLiquidityForMigration,

    #[msg("Invalid vesting parameters")]
    InvalidVestingParameters,

    #[msg("Liquidity in bonding curve is insufficient")]
    InsufficientLiquidity,

    #[msg("Invalid fee scheduler")]
    InvalidFeeScheduler,

    #[msg("Invalid dynamic fee parameters")]
    InvalidDynamicFeeParameters,

    #[msg("Invalid base fee mode")]
    InvalidBaseFeeMode,

    #[msg("Amount left is not zero")]
    AmountLeftIsNotZero,

    #[msg("Account invariant violation")]
    AccountInvariantViolation,

    #[msg("Reserve vault has insufficient balance")]
    InsufficientReserve,

    #[msg("Liquidity position has already been created")]
    PositionAlreadyCreated,

    #[msg("Migration fee has been withdraw")]
    MigrationFeeHasBeenWithdraw,
}

/// Coarse classification of [`PoolError`] used by callers deciding whether to retry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// malformed config, rejected before any pool exists
    ConfigError,
    /// no state mutated, caller may retry with different bounds
    SlippageExceeded,
    /// trading attempted after the curve completed
    PoolClosed,
    ArithmeticOverflow,
    /// re-claim by the same party
    AlreadyClaimed,
    /// a vault debit could not be satisfied
    InsufficientReserve,
    /// operation is not valid for the current pool state
    InvalidOperation,
}

const ALL_POOL_ERRORS: [PoolError; 34] = [
    PoolError::MathOverflow,
    PoolError::InvalidFee,
    PoolError::ExceededSlippage,
    PoolError::ExceedMaxFeeBps,
    PoolError::AmountIsZero,
    PoolError::TypeCastFailed,
    PoolError::InvalidActivationType,
    PoolError::InvalidCollectFeeMode,
    PoolError::InvalidInput,
    PoolError::NotEnoughLiquidity,
    PoolError::PoolIsCompleted,
    PoolError::PoolIsIncompleted,
    PoolError::InvalidMigrationOption,
    PoolError::InvalidFeePercentage,
    PoolError::InvalidQuoteThreshold,
    PoolError::InvalidTokenSupply,
    PoolError::InvalidCurve,
    PoolError::NotPermitToDoThisAction,
    PoolError::InvalidConfigAccount,
    PoolError::InvalidPoolAccount,
    PoolError::SurplusHasBeenWithdraw,
    PoolError::LeftoverHasBeenWithdraw,
    PoolError::LpShareHasBeenClaimed,
    PoolError::InsufficientLiquidityForMigration,
    PoolError::InvalidVestingParameters,
    PoolError::InsufficientLiquidity,
    PoolError::InvalidFeeScheduler,
    PoolError::InvalidDynamicFeeParameters,
    PoolError::InvalidBaseFeeMode,
    PoolError::AmountLeftIsNotZero,
    PoolError::AccountInvariantViolation,
    PoolError::InsufficientReserve,
    PoolError::PositionAlreadyCreated,
    PoolError::MigrationFeeHasBeenWithdraw,
];

impl PoolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PoolError::MathOverflow | PoolError::TypeCastFailed => ErrorKind::ArithmeticOverflow,
            PoolError::ExceededSlippage => ErrorKind::SlippageExceeded,
            PoolError::PoolIsCompleted => ErrorKind::PoolClosed,
            PoolError::SurplusHasBeenWithdraw
            | PoolError::LeftoverHasBeenWithdraw
            | PoolError::LpShareHasBeenClaimed
            | PoolError::PositionAlreadyCreated
            | PoolError::MigrationFeeHasBeenWithdraw => ErrorKind::AlreadyClaimed,
            PoolError::InsufficientReserve => ErrorKind::InsufficientReserve,
            PoolError::InvalidFee
            | PoolError::ExceedMaxFeeBps
            | PoolError::InvalidActivationType
            | PoolError::InvalidCollectFeeMode
            | PoolError::InvalidMigrationOption
            | PoolError::InvalidFeePercentage
            | PoolError::InvalidQuoteThreshold
            | PoolError::InvalidTokenSupply
            | PoolError::InvalidCurve
            | PoolError::InvalidVestingParameters
            | PoolError::InvalidFeeScheduler
            | PoolError::InvalidDynamicFeeParameters
            | PoolError::InvalidBaseFeeMode
            | PoolError::AmountLeftIsNotZero => ErrorKind::ConfigError,
            PoolError::AmountIsZero
            | PoolError::InvalidInput
            | PoolError::NotEnoughLiquidity
            | PoolError::PoolIsIncompleted
            | PoolError::NotPermitToDoThisAction
            | PoolError::InvalidConfigAccount
            | PoolError::InvalidPoolAccount
            | PoolError::InsufficientLiquidityForMigration
            | PoolError::InsufficientLiquidity
            | PoolError::AccountInvariantViolation => ErrorKind::InvalidOperation,
        }
    }
}

impl ErrorKind {
    /// Classify an error surfaced by the engine. Errors not raised by this crate return `None`.
    pub fn of(err: &Error) -> Option<ErrorKind> {
        ALL_POOL_ERRORS
            .iter()
            .find(|pool_error| *err == Error::from(**pool_error))
            .map(|pool_error| pool_error.kind())
    }
}
