//! 0/1 knapsack problem model.
//!
//! [`KnapsackProblem`] is the single shared, read-only description of a
//! problem instance. Every engine in this crate depends on it for:
//!
//! - **Evaluation**: [`KnapsackProblem::evaluate`] scores a candidate and
//!   zeroes the value of over-capacity selections.
//! - **Feasibility**: [`KnapsackProblem::is_valid`] is the pure capacity
//!   predicate.
//! - **Repair**: [`KnapsackProblem::repair`] restores feasibility by
//!   greedily dropping the worst value/weight item.
//! - **Optimum oracle**: [`KnapsackProblem::best_possible_value`] computes
//!   the exact optimum by dynamic programming (integer-capacity variant).
//!
//! # References
//!
//! - Kellerer, Pferschy & Pisinger (2004), *Knapsack Problems*
//! - Martello & Toth (1990), *Knapsack Problems: Algorithms and Computer
//!   Implementations*

mod model;

pub use model::{KnapsackProblem, ProblemError, Score, Solution};
