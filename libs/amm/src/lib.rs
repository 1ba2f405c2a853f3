//! # Rockpool AMM Library - Exact Constant-Product Mathematics
//!
//! ## Purpose
//!
//! Integer mathematics for constant-product (`x · y = k`) pool accounting:
//! fee-bearing swap quotes in both directions, the geometric-mean share issue
//! for a pool's first deposit, and the floor/ceiling rounding rules that keep
//! every rounding error on the pool's side. All arithmetic is unsigned, exact,
//! and checked; there is no floating point anywhere in the quote path.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Reserve snapshots and trade parameters from the pool
//!   engine, fee schedules from pool configuration
//! - **Output Destinations**: The `rockpool-ledger` engine for state deltas,
//!   read-only callers doing price discovery
//! - **Rounding Policy**: Output quotes round down, input quotes round up;
//!   truncation always favors the pool so the reserve product cannot shrink
//! - **Overflow Policy**: Intermediates are widened to `u128` and checked;
//!   any excursion past the wide width is a hard [`MathError::Overflow`],
//!   never a silent wraparound
//!
//! ## Architecture Role
//!
//! This crate is the stateless foundation under the ledger: it owns the
//! formulas and their rounding semantics, while reserve bookkeeping, share
//! accounting, and operation atomicity live above it. Keeping the math free
//! of state makes the quote functions trivially reusable for read-only
//! estimation against any reserve snapshot.
//!
//! ## Performance Profile
//!
//! - **Quote Cost**: A handful of u128 multiplications and one division per
//!   quote; no allocation, no locking
//! - **Square Root**: Newton's method, converging in well under 200
//!   iterations for any `u128` input
//! - **Determinism**: Identical inputs produce identical quotes on every
//!   platform; results are independent of build profile

pub mod fee;
pub mod math;

pub use fee::{FeeError, SwapFee};
pub use math::{integer_sqrt, ConstantProduct, MathError};
