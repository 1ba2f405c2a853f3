//! Audit records for committed pool mutations
//!
//! Every successful deposit, swap, and redemption appends one
//! sequence-numbered record carrying the actor, the amounts moved, and the
//! post-operation pool totals. The log is append-only and gap-free, so an
//! auditor can replay it and reconstruct every intermediate state.

use serde::{Deserialize, Serialize};

use crate::identifiers::{AccountId, TokenId};

/// One committed pool mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolRecord {
    Deposit {
        sequence: u64,
        actor: AccountId,
        amount_a: u64,
        amount_b: u64,
        shares_minted: u64,
        /// Nonzero only on the pool's first deposit.
        shares_locked: u64,
        reserve_a: u64,
        reserve_b: u64,
        total_shares: u64,
    },
    Swap {
        sequence: u64,
        actor: AccountId,
        token_in: TokenId,
        amount_in: u64,
        amount_out: u64,
        reserve_a: u64,
        reserve_b: u64,
    },
    Redeem {
        sequence: u64,
        actor: AccountId,
        shares: u64,
        amount_a: u64,
        amount_b: u64,
        reserve_a: u64,
        reserve_b: u64,
        total_shares: u64,
    },
}

impl PoolRecord {
    /// Monotonic position of this record in the pool's history.
    pub fn sequence(&self) -> u64 {
        match self {
            PoolRecord::Deposit { sequence, .. }
            | PoolRecord::Swap { sequence, .. }
            | PoolRecord::Redeem { sequence, .. } => *sequence,
        }
    }

    /// The account that performed the operation.
    pub fn actor(&self) -> AccountId {
        match self {
            PoolRecord::Deposit { actor, .. }
            | PoolRecord::Swap { actor, .. }
            | PoolRecord::Redeem { actor, .. } => *actor,
        }
    }
}

/// Append-only, sequence-numbered history of committed operations.
///
/// Sequence numbers start at 1 and increment by exactly one per committed
/// operation; a failed operation consumes no sequence number. Records are
/// only appended after every fallible step of an operation has succeeded.
#[derive(Debug, Clone)]
pub struct AuditLog {
    records: Vec<PoolRecord>,
    next_sequence: u64,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_sequence: 1,
        }
    }

    /// The sequence number the next committed operation will carry.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Append a record stamped with [`AuditLog::next_sequence`].
    pub(crate) fn push(&mut self, record: PoolRecord) {
        debug_assert_eq!(record.sequence(), self.next_sequence);
        self.records.push(record);
        self.next_sequence += 1;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recently committed record, if any.
    pub fn last(&self) -> Option<&PoolRecord> {
        self.records.last()
    }

    /// Owned copy of the full history, oldest first.
    pub fn snapshot(&self) -> Vec<PoolRecord> {
        self.records.clone()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
