//! Token movement collaborator seam
//!
//! The pool accounts for reserves but never holds the traded tokens itself;
//! an external collaborator moves them. Debits and credits are invoked after
//! an operation's state delta has been fully computed and before any of it
//! commits, so a refusal aborts the whole operation with zero mutation.

use thiserror::Error;

use crate::identifiers::{AccountId, TokenId};

/// Failures reported by the token-movement collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The owner does not hold enough of the token to cover the debit.
    #[error("{owner} holds {available} of {token}, cannot move {requested}")]
    InsufficientFunds {
        owner: AccountId,
        token: TokenId,
        requested: u64,
        available: u64,
    },

    /// The collaborator rejected the movement for reasons of its own.
    #[error("transfer rejected: {reason}")]
    Rejected { reason: String },
}

/// Moves underlying tokens between pool custody and an owner.
///
/// Implementations must be all-or-nothing per call and must not call back
/// into the pool: pool operations are serialized under a non-reentrant lock,
/// so a reentrant call from inside a transfer would deadlock.
pub trait TokenTransfer: Send + Sync {
    /// Take `amount` of `token` from `owner` into pool custody.
    fn debit(&self, owner: AccountId, token: TokenId, amount: u64) -> Result<(), TransferError>;

    /// Return `amount` of `token` from pool custody to `owner`.
    fn credit(&self, owner: AccountId, token: TokenId, amount: u64) -> Result<(), TransferError>;
}
