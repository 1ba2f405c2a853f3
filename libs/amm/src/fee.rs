//! Swap fee schedule
//!
//! Fees are an exact rational skim on the input side of a swap, expressed as
//! `numerator / denominator` (30 / 10_000 is the common 0.30% tier). The fee
//! never leaves the pool: the skimmed input stays in the reserves, which is
//! what makes the reserve product grow across swaps.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected fee parameterizations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FeeError {
    /// The denominator of the fee rational was zero.
    #[error("fee denominator must be non-zero")]
    ZeroDenominator,

    /// The fee rational was one or more, which would consume the entire input.
    #[error("fee numerator {numerator} must be below denominator {denominator}")]
    NumeratorTooLarge { numerator: u64, denominator: u64 },
}

/// Input-side swap fee as an exact rational.
///
/// Fields are public for configuration deserialization; [`SwapFee::validate`]
/// must pass before the schedule is used for quoting. Pool construction
/// enforces this, so quotes inside the engine always see a valid schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapFee {
    /// Fee numerator (e.g. 30 for a 0.30% fee over a 10_000 denominator).
    pub numerator: u64,
    /// Fee denominator (e.g. 10_000).
    pub denominator: u64,
}

impl SwapFee {
    /// Fee from an explicit rational.
    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Fee from basis points over the standard 10_000 denominator.
    pub const fn from_bps(bps: u64) -> Self {
        Self {
            numerator: bps,
            denominator: 10_000,
        }
    }

    /// Check the schedule is a proper fraction below one.
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.denominator == 0 {
            return Err(FeeError::ZeroDenominator);
        }
        if self.numerator >= self.denominator {
            return Err(FeeError::NumeratorTooLarge {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        Ok(())
    }

    /// The portion of the denominator kept by the trader: `denominator - numerator`.
    ///
    /// Saturates at zero for a degenerate schedule; engine paths never
    /// observe that because pool construction validates the fee first.
    pub fn net_numerator(&self) -> u64 {
        self.denominator.saturating_sub(self.numerator)
    }
}

impl Default for SwapFee {
    fn default() -> Self {
        Self::from_bps(30) // 0.30%, the common pool tier
    }
}
