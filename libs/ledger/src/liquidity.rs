//! Liquidity share issuance and redemption math
//!
//! Stateless planning for the two liquidity paths: how many shares a deposit
//! mints (geometric mean on the first deposit, proportional minimum after)
//! and what a redemption returns (floor-proportional on both sides). The
//! engine applies these plans; nothing here touches state.

use rockpool_amm::integer_sqrt;

use crate::error::{PoolError, Result};

/// Outcome of planning a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositPlan {
    /// Shares credited to the depositor.
    pub shares_to_mint: u64,
    /// Shares locked to the sentinel account; nonzero only on the pool's
    /// first deposit.
    pub shares_locked: u64,
}

/// Amounts returned by a redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedeemQuote {
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Share issuance and redemption arithmetic.
pub struct LiquidityMath;

impl LiquidityMath {
    /// Plan the shares minted for depositing `amount_a` / `amount_b`.
    ///
    /// The first deposit mints `isqrt(a · b)` shares total, locking
    /// `minimum_shares` of them permanently; it fails with
    /// [`PoolError::InsufficientLiquidity`] when the geometric mean cannot
    /// cover the lock. Later deposits mint the smaller of the two
    /// proportional entitlements, so an unbalanced deposit donates its
    /// excess side to the pool instead of moving the price.
    pub fn deposit_shares(
        amount_a: u64,
        amount_b: u64,
        reserve_a: u64,
        reserve_b: u64,
        total_shares: u64,
        minimum_shares: u64,
    ) -> Result<DepositPlan> {
        if amount_a == 0 || amount_b == 0 {
            return Err(PoolError::ZeroAmount);
        }

        if total_shares == 0 {
            // u64 · u64 always fits in u128, and the root of a u128 product
            // always fits back in u64.
            let root = integer_sqrt(amount_a as u128 * amount_b as u128) as u64;
            if root <= minimum_shares {
                return Err(PoolError::InsufficientLiquidity);
            }
            return Ok(DepositPlan {
                shares_to_mint: root - minimum_shares,
                shares_locked: minimum_shares,
            });
        }

        let entitlement_a = mul_div_floor(amount_a, total_shares, reserve_a)?;
        let entitlement_b = mul_div_floor(amount_b, total_shares, reserve_b)?;
        let shares_to_mint = entitlement_a.min(entitlement_b);
        if shares_to_mint == 0 {
            return Err(PoolError::InsufficientLiquidity);
        }

        Ok(DepositPlan {
            shares_to_mint,
            shares_locked: 0,
        })
    }

    /// Quote the amounts a redemption of `shares` returns.
    ///
    /// Both sides are floored; a redemption so small that either side rounds
    /// to zero is refused, because shares must never be burned for nothing.
    pub fn redeem_amounts(
        shares: u64,
        reserve_a: u64,
        reserve_b: u64,
        total_shares: u64,
    ) -> Result<RedeemQuote> {
        if shares == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if total_shares == 0 {
            return Err(PoolError::InsufficientLiquidity);
        }

        let amount_a = mul_div_floor(shares, reserve_a, total_shares)?;
        let amount_b = mul_div_floor(shares, reserve_b, total_shares)?;
        if amount_a == 0 || amount_b == 0 {
            return Err(PoolError::InsufficientLiquidity);
        }

        Ok(RedeemQuote { amount_a, amount_b })
    }
}

/// `floor(value · multiplier / divisor)` in wide arithmetic.
///
/// A zero divisor reflects an unfunded side and is reported as missing
/// liquidity rather than a division panic; the engine's state invariants
/// keep reserves positive whenever shares exist, so it never hits this.
fn mul_div_floor(value: u64, multiplier: u64, divisor: u64) -> Result<u64> {
    if divisor == 0 {
        return Err(PoolError::InsufficientLiquidity);
    }
    // u64 · u64 always fits in u128
    let scaled = value as u128 * multiplier as u128;
    u64::try_from(scaled / divisor as u128).map_err(|_| PoolError::ArithmeticOverflow)
}
