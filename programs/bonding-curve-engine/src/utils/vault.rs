use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::{safe_math::SafeMath, PoolError, RecordId, TokenSide};

/// Token balances held on behalf of each pool
pub trait ReserveVault {
    fn balance(&self, pool_id: RecordId, side: TokenSide) -> u64;

    fn deposit(&mut self, pool_id: RecordId, side: TokenSide, amount: u64) -> Result<()>;

    /// Fails with `InsufficientReserve` if `amount` exceeds the balance
    fn withdraw(&mut self, pool_id: RecordId, side: TokenSide, amount: u64) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryVault {
    balances: HashMap<(RecordId, TokenSide), u64>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReserveVault for MemoryVault {
    fn balance(&self, pool_id: RecordId, side: TokenSide) -> u64 {
        self.balances.get(&(pool_id, side)).copied().unwrap_or(0)
    }

    fn deposit(&mut self, pool_id: RecordId, side: TokenSide, amount: u64) -> Result<()> {
        let balance = self.balances.entry((pool_id, side)).or_insert(0);
        *balance = balance.safe_add(amount)?;
        Ok(())
    }

    fn withdraw(&mut self, pool_id: RecordId, side: TokenSide, amount: u64) -> Result<()> {
        let balance = self.balances.entry((pool_id, side)).or_insert(0);
        require!(*balance >= amount, PoolError::InsufficientReserve);
        *balance = balance.safe_sub(amount)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdraw_more_than_balance() {
        let mut vault = MemoryVault::new();
        vault.deposit(1, TokenSide::Quote, 100).unwrap();
        assert_eq!(
            vault.withdraw(1, TokenSide::Quote, 101).unwrap_err(),
            PoolError::InsufficientReserve.into()
        );
        assert_eq!(vault.balance(1, TokenSide::Quote), 100);

        vault.withdraw(1, TokenSide::Quote, 100).unwrap();
        assert_eq!(vault.balance(1, TokenSide::Quote), 0);
        assert_eq!(vault.balance(1, TokenSide::Base), 0);
    }
}
