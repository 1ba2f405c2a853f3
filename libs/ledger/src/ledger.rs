//! Reserve and share bookkeeping
//!
//! Pure state containers beneath the pool engine. Nothing here applies
//! business rules; the engine validates preconditions and this layer
//! guarantees arithmetic consistency: no negative balances, no supply drift,
//! no partially applied updates.

use std::collections::HashMap;

use crate::error::{PoolError, Result};
use crate::identifiers::AccountId;

/// Paired token reserves held by the pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReserveLedger {
    reserve_a: u64,
    reserve_b: u64,
}

impl ReserveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve_a(&self) -> u64 {
        self.reserve_a
    }

    pub fn reserve_b(&self) -> u64 {
        self.reserve_b
    }

    /// Both reserves as an `(a, b)` snapshot.
    pub fn both(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    /// Replace both reserves in a single step.
    ///
    /// The engine computes the full post-operation reserve pair first and
    /// commits it atomically, so the ledger never holds a half-applied swap.
    pub fn set_reserves(&mut self, reserve_a: u64, reserve_b: u64) {
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
    }

    /// The reserve product `a · b` in wide arithmetic.
    ///
    /// u64 · u64 always fits in u128, so this cannot overflow.
    pub fn product(&self) -> u128 {
        self.reserve_a as u128 * self.reserve_b as u128
    }
}

/// Liquidity-share balances keyed by owner, with a running total supply.
///
/// `sum(balances) == total` at all times: mint and burn update one balance
/// and the total together or not at all. A zero balance and an absent entry
/// are indistinguishable to callers.
#[derive(Debug, Clone, Default)]
pub struct BalanceStore {
    balances: HashMap<AccountId, u64>,
    total: u64,
}

impl BalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares held by `owner`; zero for owners never seen.
    pub fn balance_of(&self, owner: AccountId) -> u64 {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    /// Total share supply across all owners.
    pub fn total_shares(&self) -> u64 {
        self.total
    }

    /// Credit `amount` shares to `owner`, growing the total supply.
    pub fn mint(&mut self, owner: AccountId, amount: u64) -> Result<()> {
        let new_total = self
            .total
            .checked_add(amount)
            .ok_or(PoolError::ArithmeticOverflow)?;
        let new_balance = self
            .balance_of(owner)
            .checked_add(amount)
            .ok_or(PoolError::ArithmeticOverflow)?;

        self.balances.insert(owner, new_balance);
        self.total = new_total;
        debug_assert!(self.is_conserved());
        Ok(())
    }

    /// Remove `amount` shares from `owner`, shrinking the total supply.
    ///
    /// Refuses to burn past the recorded balance.
    pub fn burn(&mut self, owner: AccountId, amount: u64) -> Result<()> {
        let balance = self.balance_of(owner);
        let new_balance = balance
            .checked_sub(amount)
            .ok_or(PoolError::InsufficientInputAmount {
                requested: amount,
                available: balance,
            })?;
        // total >= balance >= amount by the conservation invariant
        let new_total = self
            .total
            .checked_sub(amount)
            .ok_or(PoolError::ArithmeticOverflow)?;

        self.balances.insert(owner, new_balance);
        self.total = new_total;
        debug_assert!(self.is_conserved());
        Ok(())
    }

    /// Recompute the conservation invariant from scratch.
    pub fn is_conserved(&self) -> bool {
        let sum: u128 = self.balances.values().map(|&v| v as u128).sum();
        sum == self.total as u128
    }

    /// Owners currently holding a nonzero balance.
    pub fn holders(&self) -> impl Iterator<Item = (AccountId, u64)> + '_ {
        self.balances
            .iter()
            .filter(|(_, &balance)| balance > 0)
            .map(|(&owner, &balance)| (owner, balance))
    }
}
