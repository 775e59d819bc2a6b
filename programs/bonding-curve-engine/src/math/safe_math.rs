use anchor_lang::solana_program::msg;
use ruint::aliases::{U256, U512};
use std::panic::Location;

use crate::PoolError;

/// Checked arithmetic that reports where an overflow happened instead of wrapping
pub trait SafeMath<T>: Sized {
    fn safe_add(self, rhs: Self) -> Result<Self, PoolError>;
    fn safe_mul(self, rhs: Self) -> Result<Self, PoolError>;
    fn safe_div(self, rhs: Self) -> Result<Self, PoolError>;
    fn safe_rem(self, rhs: Self) -> Result<Self, PoolError>;
    fn safe_sub(self, rhs: Self) -> Result<Self, PoolError>;
    fn safe_shl(self, offset: T) -> Result<Self, PoolError>;
    fn safe_shr(self, offset: T) -> Result<Self, PoolError>;
}

fn overflow_at(caller: &Location<'static>) -> PoolError {
    msg!("Math error thrown at {}:{}", caller.file(), caller.line());
    PoolError::MathOverflow
}

macro_rules! checked_impl {
    ($t:ty, $offset:ty) => {
        checked_impl!($t, $offset, |value: $t, offset: $offset| value.checked_shr(offset));
    };
    ($t:ty, $offset:ty, $shr:expr) => {
        impl SafeMath<$offset> for $t {
            #[track_caller]
            fn safe_add(self, v: $t) -> Result<$t, PoolError> {
                let caller = Location::caller();
                self.checked_add(v).ok_or_else(|| overflow_at(caller))
            }

            #[track_caller]
            fn safe_sub(self, v: $t) -> Result<$t, PoolError> {
                let caller = Location::caller();
                self.checked_sub(v).ok_or_else(|| overflow_at(caller))
            }

            #[track_caller]
            fn safe_mul(self, v: $t) -> Result<$t, PoolError> {
                let caller = Location::caller();
                self.checked_mul(v).ok_or_else(|| overflow_at(caller))
            }

            #[track_caller]
            fn safe_div(self, v: $t) -> Result<$t, PoolError> {
                let caller = Location::caller();
                self.checked_div(v).ok_or_else(|| overflow_at(caller))
            }

            #[track_caller]
            fn safe_rem(self, v: $t) -> Result<$t, PoolError> {
                let caller = Location::caller();
                self.checked_rem(v).ok_or_else(|| overflow_at(caller))
            }

            #[track_caller]
            fn safe_shl(self, v: $offset) -> Result<$t, PoolError> {
                let caller = Location::caller();
                self.checked_shl(v).ok_or_else(|| overflow_at(caller))
            }

            #[track_caller]
            fn safe_shr(self, v: $offset) -> Result<$t, PoolError> {
                let caller = Location::caller();
                ($shr)(self, v).ok_or_else(|| overflow_at(caller))
            }
        }
    };
}

checked_impl!(u8, u32);
checked_impl!(u16, u32);
checked_impl!(u32, u32);
checked_impl!(u64, u32);
checked_impl!(i64, u32);
checked_impl!(u128, u32);
checked_impl!(usize, u32);
// ruint's checked_shr rejects any lossy shift, only an out of range offset is an error here
checked_impl!(U256, usize, |value: U256, offset: usize| {
    (offset < U256::BITS).then(|| value >> offset)
});
checked_impl!(U512, usize, |value: U512, offset: usize| {
    (offset < U512::BITS).then(|| value >> offset)
});

pub trait SafeCast<T>: Sized {
    fn safe_cast(self) -> Result<T, PoolError>;
}

macro_rules! try_into_impl {
    ($t:ty, $v:ty) => {
        impl SafeCast<$v> for $t {
            #[track_caller]
            fn safe_cast(self) -> Result<$v, PoolError> {
                match self.try_into() {
                    Ok(result) => Ok(result),
                    Err(_) => {
                        let caller = Location::caller();
                        msg!("TypeCast is failed at {}:{}", caller.file(), caller.line());
                        Err(PoolError::TypeCastFailed)
                    }
                }
            }
        }
    };
}

try_into_impl!(u128, u64);
try_into_impl!(u64, u16);
try_into_impl!(u128, u32);
try_into_impl!(U256, u64);
try_into_impl!(U256, u128);
try_into_impl!(U512, u128);
