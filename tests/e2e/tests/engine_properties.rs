//! Engine Property Tests
//!
//! Random operation sequences against a live pool, checking the properties
//! that must hold no matter how the history unfolds: the reserve product
//! never shrinks across swaps, share supply is always fully attributable,
//! and failed operations leave no trace.

use proptest::prelude::*;
use rockpool_e2e_tests::{pool_with_minimum, ALICE, BOB, CAROL, SENTINEL, TOKEN_A, TOKEN_B};
use rockpool_ledger::{AccountId, Pool};

const ACTORS: [AccountId; 3] = [ALICE, BOB, CAROL];

#[derive(Debug, Clone)]
enum Op {
    Deposit {
        actor: usize,
        amount_a: u64,
        amount_b: u64,
    },
    Swap {
        actor: usize,
        a_to_b: bool,
        amount_in: u64,
    },
    Redeem {
        actor: usize,
        shares: u64,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ACTORS.len(), 1u64..5_000, 1u64..5_000).prop_map(|(actor, amount_a, amount_b)| {
            Op::Deposit {
                actor,
                amount_a,
                amount_b,
            }
        }),
        (0..ACTORS.len(), any::<bool>(), 1u64..5_000).prop_map(|(actor, a_to_b, amount_in)| {
            Op::Swap {
                actor,
                a_to_b,
                amount_in,
            }
        }),
        (0..ACTORS.len(), 1u64..2_000).prop_map(|(actor, shares)| Op::Redeem { actor, shares }),
    ]
}

fn accounted_shares(pool: &Pool) -> u64 {
    let mut accounted = pool.balance_of(SENTINEL);
    for actor in ACTORS {
        accounted += pool.balance_of(actor);
    }
    accounted
}

proptest! {
    /// Property: any operation sequence leaves the pool fully consistent
    #[test]
    fn random_histories_preserve_engine_invariants(
        ops in prop::collection::vec(op_strategy(), 1..50)
    ) {
        let (pool, _) = pool_with_minimum(10);
        pool.deposit(ALICE, 100_000, 100_000).unwrap();
        let mut committed = 1u64;

        for op in ops {
            let reserves_before = pool.reserves();
            let total_before = pool.total_shares();
            let k_before = reserves_before.0 as u128 * reserves_before.1 as u128;

            let outcome = match op {
                Op::Deposit { actor, amount_a, amount_b } => {
                    pool.deposit(ACTORS[actor], amount_a, amount_b).map(|_| ())
                }
                Op::Swap { actor, a_to_b, amount_in } => {
                    let token_in = if a_to_b { TOKEN_A } else { TOKEN_B };
                    match pool.swap(ACTORS[actor], token_in, amount_in, 0) {
                        Ok(_) => {
                            let (a, b) = pool.reserves();
                            let k_after = a as u128 * b as u128;
                            prop_assert!(k_after >= k_before,
                                        "swap shrank the product: {} -> {}", k_before, k_after);
                            Ok(())
                        }
                        Err(err) => Err(err),
                    }
                }
                Op::Redeem { actor, shares } => {
                    pool.redeem(ACTORS[actor], shares).map(|_| ())
                }
            };

            match outcome {
                Ok(()) => committed += 1,
                Err(_) => {
                    // A rejected operation must leave no trace.
                    prop_assert_eq!(pool.reserves(), reserves_before);
                    prop_assert_eq!(pool.total_shares(), total_before);
                }
            }

            // Shares are always fully attributable to known owners.
            prop_assert_eq!(accounted_shares(&pool), pool.total_shares());
            // Reserves and supply are zero together or positive together.
            let (a, b) = pool.reserves();
            prop_assert!((pool.total_shares() == 0) == (a == 0 && b == 0));
        }

        // The audit log saw exactly the committed operations.
        prop_assert_eq!(pool.audit_log().len() as u64, committed);
    }

    /// Property: executing at the reverse quote always satisfies the request
    #[test]
    fn executing_at_the_reverse_quote_never_underfills(
        requested in 1u64..40_000,
    ) {
        let (pool, _) = pool_with_minimum(10);
        pool.deposit(ALICE, 100_000, 100_000).unwrap();

        let required = pool.quote_amount_in(requested).unwrap();
        let bought = pool.swap(BOB, TOKEN_B, required, requested).unwrap();
        prop_assert!(bought >= requested,
                    "paid the quoted {} but received {} of {}", required, bought, requested);
    }
}
