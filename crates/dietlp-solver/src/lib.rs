mod pivot;
mod problem;
mod sensitivity;
mod simplex;
mod solution;
mod tableau;

pub use pivot::PivotSelector;
pub use problem::{DietProblem, Item};
pub use sensitivity::{ItemSensitivity, SweepPoint, sensitivity};
pub use simplex::{EngineState, IterationSnapshot, SimplexEngine, SolveError, Solver};
pub use solution::Solution;
pub use tableau::Tableau;

/// Tolerance for floating point comparisons in pivoting, basis detection,
/// and the sensitivity filter.
pub const EPSILON: f64 = 1e-6;

/// Pivot cap; past this a solve returns a best-effort result.
pub const MAX_ITERATIONS: usize = 100;

/// Solve a diet problem with default settings.
pub fn solve(items: &[Item], requirements: &[f64]) -> Result<Solution, SolveError> {
    let problem = DietProblem::new(items.to_vec(), requirements.to_vec());
    Solver::new().solve(&problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_entry_point() {
        let items = vec![
            Item::new("Cheap", 1.0, vec![1.0]),
            Item::new("Costly", 3.0, vec![1.0]),
        ];
        let solution = solve(&items, &[5.0]).unwrap();

        assert_eq!(solution.amounts, vec![5.0, 0.0]);
        assert_eq!(solution.total_cost, 5.0);
        assert!(solution.feasible);
    }

    #[test]
    fn test_solve_entry_point_validates() {
        assert_eq!(solve(&[], &[1.0]), Err(SolveError::NoItems));
    }
}
