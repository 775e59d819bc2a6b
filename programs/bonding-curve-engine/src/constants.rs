use static_assertions::const_assert;

pub const MIN_SQRT_PRICE: u128 = 4295048016;
pub const MAX_SQRT_PRICE: u128 = 79226673521066979257578248091;

pub const RESOLUTION: u8 = 64;
pub const ONE_Q64: u128 = 1u128 << RESOLUTION;

pub const BASIS_POINT_MAX: u64 = 10_000;

pub const MAX_CURVE_POINT_CONFIG: usize = 20;

/// base vault is funded with the curve amount plus this buffer, so the last swap can overshoot the threshold
pub const SWAP_BUFFER_PERCENTAGE: u8 = 25;

/// share of the migration quote a config may keep back as migration fee
pub const MAX_MIGRATION_FEE_PERCENTAGE: u8 = 50;

pub const MAX_EXPONENTIAL: u32 = 0x80000; // 1048576

pub const SECONDS_PER_DAY: u64 = 86_400;

pub mod fee {
    /// Default fee denominator. DO NOT simply update it as it will break logic that depends on it as default value.
    pub const FEE_DENOMINATOR: u64 = 1_000_000_000;

    /// Max fee BPS
    pub const MAX_FEE_BPS: u64 = 9900; // 99%
    pub const MAX_FEE_NUMERATOR: u64 = 990_000_000; // 99%

    /// Max basis point. 100% in pct
    pub const MAX_BASIS_POINT: u64 = 10000;

    pub const MAX_PROTOCOL_FEE_PERCENT: u8 = 50;
    pub const MAX_REFERRAL_FEE_PERCENT: u8 = 50;
}

pub mod dynamic_fee {
    pub const BIN_STEP_BPS_DEFAULT: u16 = 1;
    //  bin_step << 64 / BASIS_POINT_MAX
    pub const BIN_STEP_BPS_U128_DEFAULT: u128 = 1844674407370955;
    pub const FILTER_PERIOD_DEFAULT: u16 = 10;
    pub const DECAY_PERIOD_DEFAULT: u16 = 120;
    pub const REDUCTION_FACTOR_DEFAULT: u16 = 5000;
    pub const MAX_VOLATILITY_ACCUMULATOR: u32 = 14460000;
    pub const SQUARE_VFA_BIN: u128 = 209091600000000; // (MAX_VOLATILITY_ACCUMULATOR * BIN_STEP)^2
    pub const MAX_DYNAMIC_FEE_PERCENT: u8 = 20;
}

const_assert!(fee::MAX_FEE_BPS * 100_000 == fee::MAX_FEE_NUMERATOR);
const_assert!(fee::MAX_FEE_NUMERATOR < fee::FEE_DENOMINATOR);
const_assert!(MIN_SQRT_PRICE < MAX_SQRT_PRICE);
const_assert!(dynamic_fee::BIN_STEP_BPS_U128_DEFAULT == ONE_Q64 / BASIS_POINT_MAX as u128);
