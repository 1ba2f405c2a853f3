//! Error types for pool operations
//!
//! Every variant reports a precondition or post-condition violation caught
//! before the operation's state delta commits. None are transient and none
//! poison the pool: the caller can correct the parameters and resubmit.

use thiserror::Error;

use crate::identifiers::TokenId;
use crate::transfer::TransferError;
use rockpool_amm::MathError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A deposit, swap, or redemption was invoked with a zero amount.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// The named token is not a side of this pool.
    #[error("{0} is not a side of this pool")]
    InvalidToken(TokenId),

    /// Slippage protection: the computed output fell below the caller's floor.
    #[error("swap output {actual} is below the required minimum {minimum}")]
    InsufficientOutputAmount { actual: u64, minimum: u64 },

    /// The caller tried to redeem more shares than they can spend.
    #[error("requested {requested} shares but only {available} are redeemable")]
    InsufficientInputAmount { requested: u64, available: u64 },

    /// The operation would mint or return nothing of value.
    #[error("insufficient liquidity for this operation")]
    InsufficientLiquidity,

    /// A requested output meets or exceeds the available reserve.
    #[error("requested output {amount_out} must be below the reserve {reserve_out}")]
    InvalidRange { amount_out: u64, reserve_out: u64 },

    /// Wide-integer arithmetic exceeded its width; never silently wrapped.
    #[error("arithmetic overflow while computing the state delta")]
    ArithmeticOverflow,

    /// The token-movement collaborator refused a debit or credit.
    #[error("token transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// Internal post-condition failure: the reserve product would shrink.
    #[error("constant-product invariant violated: k {k_before} -> {k_after}")]
    InvariantViolation { k_before: u128, k_after: u128 },
}

impl From<MathError> for PoolError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::OutputExceedsReserve {
                amount_out,
                reserve_out,
            } => PoolError::InvalidRange {
                amount_out,
                reserve_out,
            },
            MathError::Overflow => PoolError::ArithmeticOverflow,
        }
    }
}

pub type Result<T> = std::result::Result<T, PoolError>;
