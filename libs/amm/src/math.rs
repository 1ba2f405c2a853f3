//! Constant-product swap math with exact integer calculations
//!
//! Quotes are computed in unsigned integers with u128 intermediates so the
//! rounding direction is always explicit: outputs truncate down, required
//! inputs round up. The pool keeps every rounding remainder.

use thiserror::Error;

use crate::fee::SwapFee;

/// Errors surfaced by quote computations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// The requested output meets or exceeds the available reserve.
    #[error("requested output {amount_out} must be below the available reserve {reserve_out}")]
    OutputExceedsReserve { amount_out: u64, reserve_out: u64 },

    /// An intermediate product or sum exceeded the wide arithmetic width.
    #[error("arithmetic overflow during quote computation")]
    Overflow,
}

/// Constant-product (`x · y = k`) quote functions over unsigned integers.
pub struct ConstantProduct;

impl ConstantProduct {
    /// Calculate the exact output amount for a fee-bearing swap.
    ///
    /// # Arguments
    /// * `amount_in` - Input token amount offered to the pool
    /// * `reserve_in` - Reserve on the input side
    /// * `reserve_out` - Reserve on the output side
    /// * `fee` - Input-side fee schedule
    ///
    /// # Returns
    /// `floor(net · reserve_out / (reserve_in · den + net))` where
    /// `net = amount_in · (den - num)`. A zero input or an unfunded pool
    /// quotes zero rather than failing; truncation keeps the remainder in
    /// the pool, which is what makes the reserve product non-decreasing.
    pub fn amount_out(
        amount_in: u64,
        reserve_in: u64,
        reserve_out: u64,
        fee: SwapFee,
    ) -> Result<u64, MathError> {
        if amount_in == 0 || reserve_in == 0 || reserve_out == 0 {
            return Ok(0);
        }

        let net = (amount_in as u128)
            .checked_mul(fee.net_numerator() as u128)
            .ok_or(MathError::Overflow)?;
        if net == 0 {
            // A degenerate schedule skims the entire input.
            return Ok(0);
        }
        let numerator = net
            .checked_mul(reserve_out as u128)
            .ok_or(MathError::Overflow)?;
        let denominator = (reserve_in as u128)
            .checked_mul(fee.denominator as u128)
            .ok_or(MathError::Overflow)?
            .checked_add(net)
            .ok_or(MathError::Overflow)?;

        // denominator >= net >= 1 here
        let out = numerator / denominator;

        // out < reserve_out for any valid fee, so this cannot truncate; the
        // checked conversion turns a broken assumption into a hard error.
        u64::try_from(out).map_err(|_| MathError::Overflow)
    }

    /// Calculate the required input amount for a desired output (reverse quote).
    ///
    /// Returns `floor(reserve_in · out · den / ((reserve_out - out) · (den - num))) + 1`;
    /// the final increment rounds the division up so truncation can never let
    /// the payer under-pay. A zero request or an unfunded pool quotes zero; a
    /// request meeting or exceeding the output reserve fails, because a swap
    /// can never drain a side completely.
    pub fn amount_in(
        amount_out: u64,
        reserve_in: u64,
        reserve_out: u64,
        fee: SwapFee,
    ) -> Result<u64, MathError> {
        if amount_out == 0 || reserve_in == 0 || reserve_out == 0 {
            return Ok(0);
        }
        if amount_out >= reserve_out {
            return Err(MathError::OutputExceedsReserve {
                amount_out,
                reserve_out,
            });
        }

        let numerator = (reserve_in as u128)
            .checked_mul(amount_out as u128)
            .ok_or(MathError::Overflow)?
            .checked_mul(fee.denominator as u128)
            .ok_or(MathError::Overflow)?;
        let denominator = ((reserve_out - amount_out) as u128)
            .checked_mul(fee.net_numerator() as u128)
            .ok_or(MathError::Overflow)?;
        if denominator == 0 {
            // Only reachable with an unvalidated 100% fee schedule.
            return Err(MathError::Overflow);
        }

        let amount = (numerator / denominator)
            .checked_add(1)
            .ok_or(MathError::Overflow)?;
        u64::try_from(amount).map_err(|_| MathError::Overflow)
    }
}

/// Floor integer square root via Newton's method.
///
/// Used for geometric-mean share issuance on a pool's first deposit. The
/// descent starts above the root and decreases monotonically, so it
/// terminates for every input including `u128::MAX`.
pub fn integer_sqrt(value: u128) -> u128 {
    if value < 4 {
        return u128::from(value > 0);
    }
    let mut x = value;
    let mut y = value / 2 + 1;
    while y < x {
        x = y;
        y = (y + value / y) / 2;
    }
    x
}
