//! Problem instance, evaluation, repair, and the exact optimum oracle.

use thiserror::Error;

/// A candidate selection of items.
///
/// Fixed-length binary vector over item indices: `solution[i] == true`
/// means item `i` is packed. The length always equals
/// [`KnapsackProblem::n_items`].
pub type Solution = Vec<bool>;

/// The scored evaluation of a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    /// Total value of the selected items, forced to 0 when the selection
    /// exceeds capacity.
    pub value: f64,
    /// Total weight of the selected items (never clamped).
    pub weight: f64,
}

/// Errors raised when constructing a [`KnapsackProblem`].
#[derive(Debug, Error)]
pub enum ProblemError {
    /// `weights` and `values` must be parallel arrays.
    #[error("weights and values must have equal length: {weights} vs {values}")]
    LengthMismatch { weights: usize, values: usize },

    /// Every item weight must be strictly positive.
    #[error("item {index} has non-positive weight {weight}")]
    NonPositiveWeight { index: usize, weight: f64 },

    /// Every item value must be strictly positive.
    #[error("item {index} has non-positive value {value}")]
    NonPositiveValue { index: usize, value: f64 },

    /// Capacity must be non-negative.
    #[error("capacity must be non-negative, got {0}")]
    NegativeCapacity(f64),
}

/// An immutable 0/1 knapsack instance.
///
/// Holds the parallel weight/value arrays, the capacity, and the derived
/// value/weight ratios used by the repair heuristic and the ant colony
/// desirability function. Instances are created once per experiment and
/// are read-only afterwards; engines share one via `Arc`.
///
/// # Examples
///
/// ```
/// use knapsack_metaheur::problem::KnapsackProblem;
///
/// let problem = KnapsackProblem::new(
///     vec![2.0, 3.0, 4.0, 5.0],
///     vec![3.0, 4.0, 5.0, 6.0],
///     5.0,
/// ).unwrap();
///
/// let score = problem.evaluate(&vec![true, true, false, false]);
/// assert_eq!(score.value, 7.0);
/// assert_eq!(score.weight, 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct KnapsackProblem {
    weights: Vec<f64>,
    values: Vec<f64>,
    capacity: f64,
    ratios: Vec<f64>,
}

impl KnapsackProblem {
    /// Builds an instance from parallel weight/value arrays and a capacity.
    ///
    /// Fails if the arrays differ in length, any weight or value is not
    /// strictly positive, or the capacity is negative. No partial instance
    /// is ever produced. A zero capacity is accepted and yields a
    /// degenerate instance whose only feasible selection is empty.
    pub fn new(weights: Vec<f64>, values: Vec<f64>, capacity: f64) -> Result<Self, ProblemError> {
        if weights.len() != values.len() {
            return Err(ProblemError::LengthMismatch {
                weights: weights.len(),
                values: values.len(),
            });
        }
        for (index, &weight) in weights.iter().enumerate() {
            if !(weight > 0.0) {
                return Err(ProblemError::NonPositiveWeight { index, weight });
            }
        }
        for (index, &value) in values.iter().enumerate() {
            if !(value > 0.0) {
                return Err(ProblemError::NonPositiveValue { index, value });
            }
        }
        if !(capacity >= 0.0) {
            return Err(ProblemError::NegativeCapacity(capacity));
        }

        let ratios = values
            .iter()
            .zip(weights.iter())
            .map(|(v, w)| v / w)
            .collect();

        Ok(Self {
            weights,
            values,
            capacity,
            ratios,
        })
    }

    /// Number of items in the instance.
    pub fn n_items(&self) -> usize {
        self.weights.len()
    }

    /// The knapsack capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Per-item weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Per-item values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Per-item value/weight ratios, the static desirability measure used
    /// by repair and by the ant colony heuristic.
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    /// Scores a solution.
    ///
    /// Returns the summed value and weight of the selected items. The
    /// value is forced to 0 when the weight exceeds capacity; this
    /// evaluation-time penalty is independent of [`repair`](Self::repair).
    pub fn evaluate(&self, solution: &Solution) -> Score {
        debug_assert_eq!(solution.len(), self.n_items());

        let mut value = 0.0;
        let mut weight = 0.0;
        for (i, &selected) in solution.iter().enumerate() {
            if selected {
                value += self.values[i];
                weight += self.weights[i];
            }
        }
        if weight > self.capacity {
            value = 0.0;
        }
        Score { value, weight }
    }

    /// Whether a solution respects the capacity constraint.
    pub fn is_valid(&self, solution: &Solution) -> bool {
        let mut weight = 0.0;
        for (i, &selected) in solution.iter().enumerate() {
            if selected {
                weight += self.weights[i];
            }
        }
        weight <= self.capacity
    }

    /// Restores feasibility by greedy removal.
    ///
    /// While the solution exceeds capacity, the selected item with the
    /// minimum static value/weight ratio is deselected. A valid solution
    /// is left untouched, so repairing is idempotent.
    ///
    /// The ratio is the one computed at construction, never recomputed
    /// against remaining capacity. This fixed policy can discard an item
    /// a smarter rule would keep; it is the reproducible behavior every
    /// engine relies on.
    pub fn repair(&self, solution: &mut Solution) {
        while !self.is_valid(solution) {
            let mut worst: Option<usize> = None;
            for (i, &selected) in solution.iter().enumerate() {
                if selected && worst.is_none_or(|j| self.ratios[i] < self.ratios[j]) {
                    worst = Some(i);
                }
            }
            match worst {
                Some(i) => solution[i] = false,
                None => break,
            }
        }
    }

    /// Exact optimum via dynamic programming over an integer capacity grid.
    ///
    /// Fills a 2-D table indexed by (items processed, truncated capacity)
    /// with the classic recurrence: take item `i` when it fits, otherwise
    /// carry the previous row forward. Capacity and weights are truncated
    /// to integers for table indexing, so for non-integral inputs the
    /// result is an approximation of the true continuous-weight optimum,
    /// not an exact bound. Runs in O(n · capacity) time and memory; only
    /// practical for bounded integer-like capacities.
    pub fn best_possible_value(&self) -> f64 {
        let n = self.n_items();
        let cap = self.capacity as usize;
        let mut dp = vec![vec![0.0_f64; cap + 1]; n + 1];

        for i in 1..=n {
            let item_weight = self.weights[i - 1];
            let item_value = self.values[i - 1];
            let truncated = item_weight as usize;
            for w in 0..=cap {
                dp[i][w] = if item_weight <= w as f64 {
                    // Fit test uses the untruncated weight; the lookup
                    // index uses the truncated one.
                    dp[i - 1][w].max(dp[i - 1][w - truncated] + item_value)
                } else {
                    dp[i - 1][w]
                };
            }
        }

        dp[n][cap]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn simple_problem() -> KnapsackProblem {
        KnapsackProblem::new(
            vec![2.0, 3.0, 4.0, 5.0],
            vec![3.0, 4.0, 5.0, 6.0],
            5.0,
        )
        .unwrap()
    }

    /// Optimum by enumerating all 2^n selections. Test-only reference.
    fn brute_force_optimum(problem: &KnapsackProblem) -> f64 {
        let n = problem.n_items();
        assert!(n <= 20, "brute force only viable for small n");
        let mut best = 0.0_f64;
        for mask in 0u32..(1 << n) {
            let solution: Solution = (0..n).map(|i| mask & (1 << i) != 0).collect();
            if problem.is_valid(&solution) {
                best = best.max(problem.evaluate(&solution).value);
            }
        }
        best
    }

    #[test]
    fn test_construction_length_mismatch() {
        let result = KnapsackProblem::new(vec![1.0, 2.0], vec![1.0], 10.0);
        assert!(matches!(
            result,
            Err(ProblemError::LengthMismatch { weights: 2, values: 1 })
        ));
    }

    #[test]
    fn test_construction_non_positive_weight() {
        let result = KnapsackProblem::new(vec![1.0, 0.0], vec![1.0, 2.0], 10.0);
        assert!(matches!(
            result,
            Err(ProblemError::NonPositiveWeight { index: 1, .. })
        ));
    }

    #[test]
    fn test_construction_non_positive_value() {
        let result = KnapsackProblem::new(vec![1.0, 2.0], vec![1.0, -3.0], 10.0);
        assert!(matches!(
            result,
            Err(ProblemError::NonPositiveValue { index: 1, .. })
        ));
    }

    #[test]
    fn test_construction_negative_capacity() {
        let result = KnapsackProblem::new(vec![1.0], vec![1.0], -1.0);
        assert!(matches!(result, Err(ProblemError::NegativeCapacity(_))));
    }

    #[test]
    fn test_construction_rejects_nan() {
        assert!(KnapsackProblem::new(vec![f64::NAN], vec![1.0], 10.0).is_err());
        assert!(KnapsackProblem::new(vec![1.0], vec![1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_evaluate_empty_solution() {
        let problem = simple_problem();
        let score = problem.evaluate(&vec![false; 4]);
        assert_eq!(score.value, 0.0);
        assert_eq!(score.weight, 0.0);
        assert!(problem.is_valid(&vec![false; 4]));
    }

    #[test]
    fn test_evaluate_penalizes_overweight() {
        let problem = simple_problem();
        // All four items: weight 14 > capacity 5.
        let score = problem.evaluate(&vec![true; 4]);
        assert_eq!(score.value, 0.0);
        assert_eq!(score.weight, 14.0);
        assert!(!problem.is_valid(&vec![true; 4]));
    }

    #[test]
    fn test_evaluate_within_capacity() {
        let problem = simple_problem();
        let score = problem.evaluate(&vec![true, true, false, false]);
        assert_eq!(score.value, 7.0);
        assert_eq!(score.weight, 5.0);
    }

    #[test]
    fn test_repair_noop_on_valid() {
        let problem = simple_problem();
        let mut solution = vec![true, true, false, false];
        let before = solution.clone();
        problem.repair(&mut solution);
        assert_eq!(solution, before);
    }

    #[test]
    fn test_repair_removes_worst_ratio_first() {
        let problem = simple_problem();
        // Ratios: 1.5, 1.33, 1.25, 1.2, so repair drops items from the back.
        let mut solution = vec![true, true, true, true];
        problem.repair(&mut solution);
        assert!(problem.is_valid(&solution));
        assert_eq!(solution, vec![true, true, false, false]);
    }

    #[test]
    fn test_repair_can_empty_the_knapsack() {
        let problem = KnapsackProblem::new(vec![5.0, 7.0], vec![1.0, 1.0], 0.0).unwrap();
        let mut solution = vec![true, true];
        problem.repair(&mut solution);
        assert_eq!(solution, vec![false, false]);
        assert!(problem.is_valid(&solution));
    }

    #[test]
    fn test_best_possible_value_simple() {
        // Optimal subset: items 0 and 1 (weight 5, value 7).
        assert_eq!(simple_problem().best_possible_value(), 7.0);
    }

    #[test]
    fn test_best_possible_value_medium() {
        let problem = KnapsackProblem::new(
            (1..=10).map(|i| (i * 10) as f64).collect(),
            (1..=10).map(|i| (i * 10 + 10) as f64).collect(),
            200.0,
        )
        .unwrap();
        assert_eq!(problem.best_possible_value(), brute_force_optimum(&problem));
    }

    #[test]
    fn test_best_possible_value_matches_brute_force() {
        let problem = KnapsackProblem::new(
            vec![12.0, 7.0, 11.0, 8.0, 9.0, 3.0, 5.0, 14.0, 6.0, 4.0],
            vec![24.0, 13.0, 23.0, 15.0, 16.0, 7.0, 11.0, 30.0, 12.0, 8.0],
            26.0,
        )
        .unwrap();
        assert_eq!(problem.best_possible_value(), brute_force_optimum(&problem));
    }

    #[test]
    fn test_best_possible_value_zero_capacity() {
        let problem = KnapsackProblem::new(vec![1.0, 2.0], vec![3.0, 4.0], 0.0).unwrap();
        assert_eq!(problem.best_possible_value(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_repair_always_yields_valid(
            items in prop::collection::vec((0.5_f64..50.0, 0.5_f64..50.0), 1..12),
            capacity in 0.0_f64..80.0,
            mask in prop::collection::vec(any::<bool>(), 12),
        ) {
            let (weights, values): (Vec<f64>, Vec<f64>) = items.into_iter().unzip();
            let n = weights.len();
            let problem = KnapsackProblem::new(weights, values, capacity).unwrap();
            let mut solution: Solution = mask[..n].to_vec();

            problem.repair(&mut solution);
            prop_assert!(problem.is_valid(&solution));

            // Idempotence: a second repair changes nothing.
            let repaired = solution.clone();
            problem.repair(&mut solution);
            prop_assert_eq!(solution, repaired);
        }

        #[test]
        fn prop_penalty_tracks_feasibility(
            items in prop::collection::vec((0.5_f64..50.0, 0.5_f64..50.0), 1..12),
            capacity in 0.0_f64..80.0,
            mask in prop::collection::vec(any::<bool>(), 12),
        ) {
            let (weights, values): (Vec<f64>, Vec<f64>) = items.into_iter().unzip();
            let n = weights.len();
            let problem = KnapsackProblem::new(weights, values, capacity).unwrap();
            let solution: Solution = mask[..n].to_vec();

            let score = problem.evaluate(&solution);
            if problem.is_valid(&solution) {
                prop_assert!(score.weight <= capacity);
            } else {
                prop_assert_eq!(score.value, 0.0);
            }
        }
    }
}
