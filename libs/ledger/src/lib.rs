//! # Rockpool Ledger - Constant-Product Pool Accounting Engine
//!
//! ## Purpose
//!
//! Complete accounting engine for a two-sided constant-product liquidity
//! pool: reserve bookkeeping, proportional ownership shares, fee-bearing
//! swaps, and an append-only audit history. The engine owns correctness
//! (validation, atomicity, invariants) and delegates token custody to an
//! external [`TokenTransfer`] collaborator.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Caller operation requests, [`PoolConfig`] from JSON
//!   files or environment variables
//! - **Output Destinations**: [`TokenTransfer`] implementations for token
//!   movement, [`PoolRecord`] audit snapshots for external bookkeeping
//! - **Math Layer**: All quote and issuance arithmetic comes from
//!   `rockpool-amm`; this crate adds state, locking, and atomicity
//!
//! ## Core Invariants
//!
//! - The reserve product never decreases across a successful swap
//! - `sum(balances) == total_shares` at all times
//! - Reserves and balances are unsigned; an operation that would drive one
//!   negative fails cleanly instead
//! - Every failure aborts before any state commits: there are no partial
//!   deposits, swaps, or redemptions
//! - A pool, once activated by its first deposit, can never return to
//!   empty; the sentinel's locked shares are not redeemable

pub mod config;
pub mod error;
pub mod events;
pub mod identifiers;
pub mod ledger;
pub mod liquidity;
pub mod pool;
pub mod testing;
pub mod transfer;

pub use config::PoolConfig;
pub use error::{PoolError, Result};
pub use events::{AuditLog, PoolRecord};
pub use identifiers::{AccountId, TokenId};
pub use ledger::{BalanceStore, ReserveLedger};
pub use liquidity::{DepositPlan, LiquidityMath, RedeemQuote};
pub use pool::Pool;
pub use transfer::{TokenTransfer, TransferError};

/// Re-exported quote math for read-only price discovery.
pub use rockpool_amm::{ConstantProduct, MathError, SwapFee};
