use ruint::aliases::U256;

/// Round up, down
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Rounding up
    Up,
    /// Rounding down
    Down,
}

/// (x * y) / denominator, with the product held in 256 bits
pub fn mul_div_u256(x: U256, y: U256, denominator: U256, rounding: Rounding) -> Option<U256> {
    if denominator.is_zero() {
        return None;
    }

    let prod = x.checked_mul(y)?;

    match rounding {
        Rounding::Up => Some(prod.div_ceil(denominator)),
        Rounding::Down => {
            let (quotient, _) = prod.div_rem(denominator);
            Some(quotient)
        }
    }
}

/// (x << offset) / y
pub fn shl_div_u256(x: U256, y: U256, offset: usize, rounding: Rounding) -> Option<U256> {
    if y.is_zero() {
        return None;
    }
    let scale = U256::from(1u8).checked_shl(offset)?;
    mul_div_u256(x, scale, y, rounding)
}

/// (x * y) >> offset
pub fn mul_shr_u256(x: U256, y: U256, offset: usize, rounding: Rounding) -> Option<U256> {
    let denominator = U256::from(1u8).checked_shl(offset)?;
    mul_div_u256(x, y, denominator, rounding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_rounding() {
        let x = U256::from(10u64);
        let y = U256::from(3u64);
        let d = U256::from(4u64);
        assert_eq!(mul_div_u256(x, y, d, Rounding::Down), Some(U256::from(7u64)));
        assert_eq!(mul_div_u256(x, y, d, Rounding::Up), Some(U256::from(8u64)));
        // exact division rounds the same both ways
        assert_eq!(
            mul_div_u256(x, y, U256::from(5u64), Rounding::Up),
            mul_div_u256(x, y, U256::from(5u64), Rounding::Down)
        );
        assert_eq!(mul_div_u256(x, y, U256::ZERO, Rounding::Down), None);
    }

    #[test]
    fn test_mul_div_overflow() {
        assert_eq!(mul_div_u256(U256::MAX, U256::from(2u64), U256::from(2u64), Rounding::Down), None);
    }

    #[test]
    fn test_shift_helpers() {
        let one_q64 = U256::from(1u128 << 64);
        assert_eq!(
            shl_div_u256(U256::from(3u64), U256::from(2u64), 64, Rounding::Down),
            Some(U256::from(3u128 << 63))
        );
        assert_eq!(mul_shr_u256(one_q64, one_q64, 64, Rounding::Down), Some(one_q64));
        assert_eq!(mul_shr_u256(U256::from(1u64), U256::from(1u64), 64, Rounding::Up), Some(U256::from(1u64)));
        assert_eq!(mul_shr_u256(U256::from(1u64), U256::from(1u64), 64, Rounding::Down), Some(U256::ZERO));
    }
}
