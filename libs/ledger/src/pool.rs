//! # Pool Engine - Serialized Constant-Product Accounting
//!
//! ## Purpose
//!
//! The mutation surface of a single liquidity pool: deposits that mint
//! proportional ownership shares, fee-bearing swaps between the two sides,
//! and redemptions that return proportional reserve amounts. Every mutating
//! operation is validated, planned, and settled before any state commits,
//! so a failure at any step leaves the pool exactly as it was.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Caller operation requests, validated [`PoolConfig`]
//! - **Output Destinations**: [`TokenTransfer`] collaborator for token
//!   custody, [`AuditLog`] records for external bookkeeping and replay
//! - **Quote Path**: Read-only quotes snapshot the reserves and compute on
//!   the stateless math layer; they never hold the operation lock for the
//!   computation itself
//!
//! ## Architecture Role
//!
//! ```text
//! Callers (deposit/swap/redeem) → [Pool: lock, validate, plan] → TokenTransfer
//!        ↓                              ↓                            ↓
//! Quote requests            ReserveLedger + BalanceStore       Debit / Credit
//! (lock-free compute)       committed in one step              all-or-nothing
//!                                    ↓
//!                            AuditLog (sequence-numbered)
//! ```
//!
//! ## Concurrency Model
//!
//! Operations on one pool are serialized under a single mutex held for the
//! full operation, including the collaborator calls. The guard is released
//! on every exit path, so a failed operation never wedges the pool. The
//! transfer collaborator must not call back into the pool; the lock is not
//! reentrant and a callback would deadlock.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::PoolConfig;
use crate::error::{PoolError, Result};
use crate::events::{AuditLog, PoolRecord};
use crate::identifiers::{AccountId, TokenId};
use crate::ledger::{BalanceStore, ReserveLedger};
use crate::liquidity::LiquidityMath;
use crate::transfer::TokenTransfer;
use rockpool_amm::ConstantProduct;

/// Which way a swap moves through the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapDirection {
    AToB,
    BToA,
}

/// Mutable pool state guarded by the operation lock.
#[derive(Debug, Default)]
struct PoolState {
    reserves: ReserveLedger,
    shares: BalanceStore,
    audit: AuditLog,
}

/// A single constant-product pool instance.
///
/// The pool starts empty and becomes active on its first successful
/// deposit, which permanently locks `minimum_shares` to the sentinel
/// account. There is no way back to empty: the locked shares can never be
/// redeemed, so proportional math never divides by zero once active.
pub struct Pool {
    config: PoolConfig,
    transfers: Arc<dyn TokenTransfer>,
    state: Mutex<PoolState>,
}

impl Pool {
    /// Create an empty pool from a validated configuration.
    pub fn new(config: PoolConfig, transfers: Arc<dyn TokenTransfer>) -> anyhow::Result<Self> {
        config.validate()?;
        info!(
            "Creating pool: pair=({}, {}) fee={}/{} minimum_shares={}",
            config.token_a, config.token_b, config.fee.numerator, config.fee.denominator,
            config.minimum_shares
        );
        Ok(Self {
            config,
            transfers,
            state: Mutex::new(PoolState::default()),
        })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Current reserves as `(reserve_a, reserve_b)`.
    pub fn reserves(&self) -> (u64, u64) {
        self.state.lock().reserves.both()
    }

    /// Total share supply including the locked sentinel balance.
    pub fn total_shares(&self) -> u64 {
        self.state.lock().shares.total_shares()
    }

    /// Shares held by `owner`.
    pub fn balance_of(&self, owner: AccountId) -> u64 {
        self.state.lock().shares.balance_of(owner)
    }

    /// Owned snapshot of the committed operation history, oldest first.
    pub fn audit_log(&self) -> Vec<PoolRecord> {
        self.state.lock().audit.snapshot()
    }

    /// Quote the token-B output for a token-A input.
    ///
    /// Read-only: computed on a reserve snapshot, so the result can go stale
    /// against concurrent mutations. An unfunded pool quotes zero.
    pub fn quote_amount_out(&self, amount_in: u64) -> Result<u64> {
        let (reserve_a, reserve_b) = self.reserves();
        let out = ConstantProduct::amount_out(amount_in, reserve_a, reserve_b, self.config.fee)?;
        Ok(out)
    }

    /// Quote the token-B input required to buy a desired token-A output.
    ///
    /// Read-only, with the same staleness window as
    /// [`Pool::quote_amount_out`]. The quote is rounded up, so paying it is
    /// always sufficient at the snapshot reserves.
    pub fn quote_amount_in(&self, amount_out: u64) -> Result<u64> {
        let (reserve_a, reserve_b) = self.reserves();
        let required =
            ConstantProduct::amount_in(amount_out, reserve_b, reserve_a, self.config.fee)?;
        Ok(required)
    }

    /// Deposit `amount_a` and `amount_b`, minting shares to `owner`.
    ///
    /// The first successful deposit activates the pool: it mints the
    /// geometric mean of the amounts, locks `minimum_shares` of that to the
    /// sentinel, and credits the rest to the depositor. Later deposits mint
    /// the smaller proportional entitlement. Returns the shares credited to
    /// `owner`.
    pub fn deposit(&self, owner: AccountId, amount_a: u64, amount_b: u64) -> Result<u64> {
        let mut state = self.state.lock();

        let (reserve_a, reserve_b) = state.reserves.both();
        let total = state.shares.total_shares();
        let plan = LiquidityMath::deposit_shares(
            amount_a,
            amount_b,
            reserve_a,
            reserve_b,
            total,
            self.config.minimum_shares,
        )?;

        let new_reserve_a = reserve_a
            .checked_add(amount_a)
            .ok_or(PoolError::ArithmeticOverflow)?;
        let new_reserve_b = reserve_b
            .checked_add(amount_b)
            .ok_or(PoolError::ArithmeticOverflow)?;
        // The supply must absorb both the depositor's mint and the one-time
        // sentinel lock before anything is allowed to move.
        let minted = plan
            .shares_to_mint
            .checked_add(plan.shares_locked)
            .ok_or(PoolError::ArithmeticOverflow)?;
        let new_total = total
            .checked_add(minted)
            .ok_or(PoolError::ArithmeticOverflow)?;

        // Both legs must clear before any state commits.
        self.transfers.debit(owner, self.config.token_a, amount_a)?;
        self.transfers.debit(owner, self.config.token_b, amount_b)?;

        if plan.shares_locked > 0 {
            state.shares.mint(self.config.sentinel, plan.shares_locked)?;
        }
        state.shares.mint(owner, plan.shares_to_mint)?;
        state.reserves.set_reserves(new_reserve_a, new_reserve_b);
        debug_assert_eq!(state.shares.total_shares(), new_total);

        let record = PoolRecord::Deposit {
            sequence: state.audit.next_sequence(),
            actor: owner,
            amount_a,
            amount_b,
            shares_minted: plan.shares_to_mint,
            shares_locked: plan.shares_locked,
            reserve_a: new_reserve_a,
            reserve_b: new_reserve_b,
            total_shares: new_total,
        };
        info!(
            "Deposit committed: actor={} amounts=({}, {}) shares={} locked={} reserves=({}, {})",
            owner, amount_a, amount_b, plan.shares_to_mint, plan.shares_locked,
            new_reserve_a, new_reserve_b
        );
        state.audit.push(record);

        Ok(plan.shares_to_mint)
    }

    /// Swap `amount_in` of `token_in` for the opposite side's token.
    ///
    /// `min_amount_out` is the caller's slippage floor, checked before any
    /// state mutation or token movement. Returns the output amount credited
    /// to `owner`.
    pub fn swap(
        &self,
        owner: AccountId,
        token_in: TokenId,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<u64> {
        let mut state = self.state.lock();

        if amount_in == 0 {
            return Err(PoolError::ZeroAmount);
        }
        let direction = self.resolve_direction(token_in)?;
        if state.shares.total_shares() == 0 {
            // Swapping against an empty pool would strand tokens in a pool
            // that only a first deposit may activate.
            return Err(PoolError::InsufficientLiquidity);
        }

        let (reserve_a, reserve_b) = state.reserves.both();
        let (reserve_in, reserve_out) = match direction {
            SwapDirection::AToB => (reserve_a, reserve_b),
            SwapDirection::BToA => (reserve_b, reserve_a),
        };

        let amount_out =
            ConstantProduct::amount_out(amount_in, reserve_in, reserve_out, self.config.fee)?;
        if amount_out < min_amount_out {
            debug!(
                "Swap rejected by slippage floor: computed={} minimum={}",
                amount_out, min_amount_out
            );
            return Err(PoolError::InsufficientOutputAmount {
                actual: amount_out,
                minimum: min_amount_out,
            });
        }

        let new_reserve_in = reserve_in
            .checked_add(amount_in)
            .ok_or(PoolError::ArithmeticOverflow)?;
        // amount_out < reserve_out is guaranteed by the quote, so the
        // subtraction cannot underflow; checked arithmetic keeps that an
        // error rather than a trusted assumption.
        let new_reserve_out = reserve_out
            .checked_sub(amount_out)
            .ok_or(PoolError::ArithmeticOverflow)?;
        let (new_reserve_a, new_reserve_b) = match direction {
            SwapDirection::AToB => (new_reserve_in, new_reserve_out),
            SwapDirection::BToA => (new_reserve_out, new_reserve_in),
        };

        // Post-condition: the fee skim can only grow the reserve product.
        let k_before = state.reserves.product();
        let k_after = new_reserve_a as u128 * new_reserve_b as u128;
        if k_after < k_before {
            warn!(
                "Swap aborted, reserve product would shrink: {} -> {}",
                k_before, k_after
            );
            return Err(PoolError::InvariantViolation { k_before, k_after });
        }

        let token_out = match direction {
            SwapDirection::AToB => self.config.token_b,
            SwapDirection::BToA => self.config.token_a,
        };
        self.transfers.debit(owner, token_in, amount_in)?;
        self.transfers.credit(owner, token_out, amount_out)?;

        state.reserves.set_reserves(new_reserve_a, new_reserve_b);

        let record = PoolRecord::Swap {
            sequence: state.audit.next_sequence(),
            actor: owner,
            token_in,
            amount_in,
            amount_out,
            reserve_a: new_reserve_a,
            reserve_b: new_reserve_b,
        };
        info!(
            "Swap committed: actor={} {} in={} out={} reserves=({}, {})",
            owner, token_in, amount_in, amount_out, new_reserve_a, new_reserve_b
        );
        state.audit.push(record);

        Ok(amount_out)
    }

    /// Redeem `shares` for proportional amounts of both tokens.
    ///
    /// Returns `(amount_a, amount_b)` credited to `owner`. The sentinel's
    /// locked balance is excluded by access control: the sentinel account
    /// can never redeem, which is what keeps the pool permanently active.
    pub fn redeem(&self, owner: AccountId, shares: u64) -> Result<(u64, u64)> {
        let mut state = self.state.lock();

        if shares == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if owner == self.config.sentinel {
            // Locked shares exist in the store but are never redeemable.
            return Err(PoolError::InsufficientInputAmount {
                requested: shares,
                available: 0,
            });
        }
        let available = state.shares.balance_of(owner);
        if shares > available {
            return Err(PoolError::InsufficientInputAmount {
                requested: shares,
                available,
            });
        }

        let (reserve_a, reserve_b) = state.reserves.both();
        let total = state.shares.total_shares();
        let quote = LiquidityMath::redeem_amounts(shares, reserve_a, reserve_b, total)?;

        let new_reserve_a = reserve_a
            .checked_sub(quote.amount_a)
            .ok_or(PoolError::ArithmeticOverflow)?;
        let new_reserve_b = reserve_b
            .checked_sub(quote.amount_b)
            .ok_or(PoolError::ArithmeticOverflow)?;

        self.transfers
            .credit(owner, self.config.token_a, quote.amount_a)?;
        self.transfers
            .credit(owner, self.config.token_b, quote.amount_b)?;

        state.shares.burn(owner, shares)?;
        state
            .reserves
            .set_reserves(new_reserve_a, new_reserve_b);

        let record = PoolRecord::Redeem {
            sequence: state.audit.next_sequence(),
            actor: owner,
            shares,
            amount_a: quote.amount_a,
            amount_b: quote.amount_b,
            reserve_a: new_reserve_a,
            reserve_b: new_reserve_b,
            total_shares: state.shares.total_shares(),
        };
        info!(
            "Redeem committed: actor={} shares={} returned=({}, {}) reserves=({}, {})",
            owner, shares, quote.amount_a, quote.amount_b, new_reserve_a, new_reserve_b
        );
        state.audit.push(record);

        Ok((quote.amount_a, quote.amount_b))
    }

    fn resolve_direction(&self, token_in: TokenId) -> Result<SwapDirection> {
        if token_in == self.config.token_a {
            Ok(SwapDirection::AToB)
        } else if token_in == self.config.token_b {
            Ok(SwapDirection::BToA)
        } else {
            Err(PoolError::InvalidToken(token_in))
        }
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (reserve_a, reserve_b) = self.reserves();
        f.debug_struct("Pool")
            .field("token_a", &self.config.token_a)
            .field("token_b", &self.config.token_b)
            .field("reserve_a", &reserve_a)
            .field("reserve_b", &reserve_b)
            .field("total_shares", &self.total_shares())
            .finish()
    }
}
