//! Testing utilities for the token-movement seam
//!
//! [`MockTransfer`] is a deliberately simple in-memory collaborator: it
//! records every call, optionally enforces per-owner token balances, and can
//! be scripted to refuse a specific call so tests can prove operations are
//! all-or-nothing.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::identifiers::{AccountId, TokenId};
use crate::transfer::{TokenTransfer, TransferError};

/// One recorded invocation of the transfer seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferCall {
    Debit {
        owner: AccountId,
        token: TokenId,
        amount: u64,
    },
    Credit {
        owner: AccountId,
        token: TokenId,
        amount: u64,
    },
}

/// Mock token-movement collaborator for testing.
///
/// Lenient by default: every debit succeeds regardless of funds. Strict mode
/// tracks per-owner balances and refuses debits that exceed them, which
/// makes external token conservation checkable in tests.
pub struct MockTransfer {
    calls: Mutex<Vec<TransferCall>>,
    balances: Mutex<HashMap<(AccountId, TokenId), u64>>,
    fail_at: Mutex<Option<usize>>,
    strict: bool,
}

impl MockTransfer {
    /// Lenient mock: unlimited funds, every call succeeds unless scripted.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            balances: Mutex::new(HashMap::new()),
            fail_at: Mutex::new(None),
            strict: false,
        }
    }

    /// Strict mock: debits must be covered by funded balances.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::new()
        }
    }

    /// Seed `owner` with `amount` of `token`.
    pub fn fund(&self, owner: AccountId, token: TokenId, amount: u64) {
        *self.balances.lock().entry((owner, token)).or_insert(0) += amount;
    }

    /// Current holding of `owner` in `token` as seen by this mock.
    pub fn balance_of(&self, owner: AccountId, token: TokenId) -> u64 {
        self.balances
            .lock()
            .get(&(owner, token))
            .copied()
            .unwrap_or(0)
    }

    /// Script the `index`-th call (0-based, debits and credits counted
    /// together) to be refused.
    pub fn fail_call(&self, index: usize) {
        *self.fail_at.lock() = Some(index);
    }

    /// Every call seen so far, in order.
    pub fn calls(&self) -> Vec<TransferCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: TransferCall) -> Result<(), TransferError> {
        let mut calls = self.calls.lock();
        let index = calls.len();
        calls.push(call);

        if self.fail_at.lock().map_or(false, |at| at == index) {
            return Err(TransferError::Rejected {
                reason: format!("scripted failure at call {index}"),
            });
        }
        Ok(())
    }
}

impl Default for MockTransfer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenTransfer for MockTransfer {
    fn debit(&self, owner: AccountId, token: TokenId, amount: u64) -> Result<(), TransferError> {
        self.record(TransferCall::Debit {
            owner,
            token,
            amount,
        })?;

        let mut balances = self.balances.lock();
        let available = balances.get(&(owner, token)).copied().unwrap_or(0);
        if self.strict && available < amount {
            return Err(TransferError::InsufficientFunds {
                owner,
                token,
                requested: amount,
                available,
            });
        }
        balances.insert((owner, token), available.saturating_sub(amount));
        Ok(())
    }

    fn credit(&self, owner: AccountId, token: TokenId, amount: u64) -> Result<(), TransferError> {
        self.record(TransferCall::Credit {
            owner,
            token,
            amount,
        })?;

        let mut balances = self.balances.lock();
        let balance = balances.entry((owner, token)).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(())
    }
}
