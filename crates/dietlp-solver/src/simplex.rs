use log::{debug, trace};
use thiserror::Error;

use crate::pivot::PivotSelector;
use crate::problem::DietProblem;
use crate::solution::Solution;
use crate::tableau::Tableau;
use crate::{EPSILON, MAX_ITERATIONS};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("no items to choose from")]
    NoItems,
    #[error("item {item:?} has {found} nutrient values, expected {expected}")]
    NutrientLengthMismatch {
        item: String,
        expected: usize,
        found: usize,
    },
    #[error("item {item:?} has a negative unit cost ({cost})")]
    NegativeCost { item: String, cost: f64 },
    #[error("item {item:?} has a negative value for nutrient {nutrient} ({value})")]
    NegativeNutrient {
        item: String,
        nutrient: usize,
        value: f64,
    },
    #[error("requirement {index} is negative ({value})")]
    NegativeRequirement { index: usize, value: f64 },
    #[error("{context} is not finite")]
    NonFinite { context: String },
    #[error("requirement {requirement} cannot be met by any combination of items")]
    Unbounded { requirement: usize },
    #[error("no optimum within {limit} iterations; the attached solution is best-effort only")]
    IterationLimit { limit: usize, solution: Box<Solution> },
}

/// Engine states; all but `Running` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Optimal,
    Unbounded { requirement: usize },
    IterationLimitReached,
}

/// Deep copy of the tableau taken after one pivot, kept for inspection and
/// playback. Never mutated once recorded.
#[derive(Debug, Clone)]
pub struct IterationSnapshot {
    pub iteration: usize,
    pub pivot_row: usize,
    pub pivot_col: usize,
    pub matrix: Vec<Vec<f64>>,
}

/// Drives the tableau to a terminal state one pivot at a time.
///
/// Each engine owns its tableau and snapshot history for the lifetime of one
/// solve; nothing is shared or pooled across calls.
pub struct SimplexEngine {
    tableau: Tableau,
    selector: PivotSelector,
    state: EngineState,
    snapshots: Vec<IterationSnapshot>,
    iterations: usize,
    max_iterations: usize,
}

impl SimplexEngine {
    pub fn new(problem: &DietProblem) -> Result<Self, SolveError> {
        Self::with_limits(problem, EPSILON, MAX_ITERATIONS)
    }

    pub fn with_limits(
        problem: &DietProblem,
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<Self, SolveError> {
        problem.validate()?;
        Ok(Self {
            tableau: Tableau::with_tolerance(problem, tolerance),
            selector: PivotSelector::new(tolerance),
            state: EngineState::Running,
            snapshots: Vec::new(),
            iterations: 0,
            max_iterations,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn snapshots(&self) -> &[IterationSnapshot] {
        &self.snapshots
    }

    /// Perform one pivot. Returns the state afterwards; calling `step` on a
    /// terminal state is a no-op.
    pub fn step(&mut self) -> EngineState {
        if self.state != EngineState::Running {
            return self.state;
        }

        let Some(row) = self.selector.leaving_row(&self.tableau) else {
            debug!("optimal after {} iterations", self.iterations);
            self.state = EngineState::Optimal;
            return self.state;
        };

        if self.iterations >= self.max_iterations {
            debug!("iteration limit of {} reached", self.max_iterations);
            self.state = EngineState::IterationLimitReached;
            return self.state;
        }

        let Some(col) = self.selector.entering_column(&self.tableau, row) else {
            debug!("requirement {row} cannot be met; stopping");
            self.state = EngineState::Unbounded { requirement: row };
            return self.state;
        };

        trace!(
            "pivot element {} at ({row}, {col})",
            self.tableau.get(row, col)
        );
        self.tableau.pivot(row, col);
        self.iterations += 1;
        debug!("iteration {}: pivot at row {row}, column {col}", self.iterations);
        self.snapshots.push(IterationSnapshot {
            iteration: self.iterations,
            pivot_row: row,
            pivot_col: col,
            matrix: self.tableau.snapshot(),
        });

        self.state
    }

    /// Run to a terminal state.
    pub fn run(&mut self) -> EngineState {
        while self.state == EngineState::Running {
            self.step();
        }
        self.state
    }
}

/// Simplex solver for the least-cost diet problem.
pub struct Solver {
    max_iterations: usize,
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            tolerance: EPSILON,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Validate, build a fresh tableau, iterate to a terminal state, and
    /// extract the solution.
    pub fn solve(&self, problem: &DietProblem) -> Result<Solution, SolveError> {
        let mut engine = SimplexEngine::with_limits(problem, self.tolerance, self.max_iterations)?;

        match engine.run() {
            EngineState::Optimal => Ok(Solution::extract(engine.tableau(), problem, self.tolerance)),
            EngineState::Unbounded { requirement } => Err(SolveError::Unbounded { requirement }),
            EngineState::IterationLimitReached => Err(SolveError::IterationLimit {
                limit: self.max_iterations,
                solution: Box::new(Solution::extract(engine.tableau(), problem, self.tolerance)),
            }),
            EngineState::Running => unreachable!("run() returned a non-terminal state"),
        }
    }
}
