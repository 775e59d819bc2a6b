use crate::constants::{
    dynamic_fee::{
        BIN_STEP_BPS_DEFAULT, BIN_STEP_BPS_U128_DEFAULT, MAX_VOLATILITY_ACCUMULATOR,
        SQUARE_VFA_BIN,
    },
    fee::{FEE_DENOMINATOR, MAX_FEE_NUMERATOR},
    BASIS_POINT_MAX, MAX_SQRT_PRICE, MIN_SQRT_PRICE, ONE_Q64,
};

#[test]
fn constants_assertion() {
    // assert square vfa bin
    let max_volatility_accumulator = u128::from(MAX_VOLATILITY_ACCUMULATOR);
    let bin_step = u128::from(BIN_STEP_BPS_DEFAULT);
    let base = max_volatility_accumulator * bin_step;

    let square_vfa_bin = base * base;

    assert_eq!(square_vfa_bin, SQUARE_VFA_BIN);

    let bin_step_u128 = (u128::from(BIN_STEP_BPS_DEFAULT) << 64) / u128::from(BASIS_POINT_MAX);
    assert_eq!(bin_step_u128, BIN_STEP_BPS_U128_DEFAULT);
}

#[test]
fn price_bounds_assertion() {
    // prices of roughly 2^-64 and 2^64
    assert!(MIN_SQRT_PRICE < ONE_Q64 && ONE_Q64 < MAX_SQRT_PRICE);
    assert_eq!(MIN_SQRT_PRICE >> 32, 1);
    assert_eq!(MAX_SQRT_PRICE >> 95, 1);
    assert!(MAX_SQRT_PRICE < 1u128 << 96);
    assert!(MAX_FEE_NUMERATOR < FEE_DENOMINATOR);
}
