//! Macro functions

/// Closure yielding `PoolError::MathOverflow`, for `Option` chains: `.ok_or_else(math_error!())`
#[macro_export]
macro_rules! math_error {
    () => {{
        || {
            let error_code = $crate::error::PoolError::MathOverflow;
            anchor_lang::prelude::msg!(
                "Error \"{}\" thrown at {}:{}",
                error_code,
                file!(),
                line!()
            );
            error_code
        }
    }};
}

/// Generates `is_*` / `set_*` accessors over a `u8` bitmask field
macro_rules! claim_flag {
    ($field:ident, $mask:expr, $is:ident, $set:ident) => {
        pub fn $is(&self) -> bool {
            self.$field & $mask != 0
        }

        pub fn $set(&mut self) {
            self.$field |= $mask;
        }
    };
}
