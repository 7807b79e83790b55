use crate::EPSILON;
use crate::problem::DietProblem;

/// Dense simplex tableau: one row per nutrient requirement, one objective
/// row, and the basis index for each requirement row.
///
/// Layout for n items and m nutrients: columns `0..n` hold the (negated)
/// nutrient coefficients, columns `n..n+m` the surplus variables, and the
/// last column the right-hand side. Each ">=" requirement is written as
/// `-sum(a*x) + s = -b`, so a negative RHS entry marks a requirement the
/// current basis does not yet meet.
#[derive(Debug, Clone)]
pub struct Tableau {
    data: Vec<Vec<f64>>,
    basis: Vec<usize>,
    n_items: usize,
    n_nutrients: usize,
    tolerance: f64,
}

impl Tableau {
    pub fn new(problem: &DietProblem) -> Self {
        Self::with_tolerance(problem, EPSILON)
    }

    /// Build with the same tolerance the pivot selector will use, so the
    /// pivot precondition and the selector agree on what counts as zero.
    pub fn with_tolerance(problem: &DietProblem, tolerance: f64) -> Self {
        let n = problem.num_items();
        let m = problem.num_nutrients();
        let cols = n + m + 1;

        let mut data = vec![vec![0.0; cols]; m + 1];
        for i in 0..m {
            for (j, item) in problem.items.iter().enumerate() {
                data[i][j] = -item.nutrients[i];
            }
            data[i][n + i] = 1.0;
            data[i][cols - 1] = -problem.requirements[i];
        }
        for (j, item) in problem.items.iter().enumerate() {
            data[m][j] = item.unit_cost;
        }

        Self {
            data,
            basis: (n..n + m).collect(),
            n_items: n,
            n_nutrients: m,
            tolerance,
        }
    }

    pub fn n_items(&self) -> usize {
        self.n_items
    }

    pub fn n_nutrients(&self) -> usize {
        self.n_nutrients
    }

    /// Index of the right-hand-side column.
    pub fn rhs_col(&self) -> usize {
        self.n_items + self.n_nutrients
    }

    /// Index of the objective row.
    pub fn objective_row(&self) -> usize {
        self.n_nutrients
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    /// Column currently basic in each requirement row.
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Deep copy of the matrix, for iteration playback.
    pub fn snapshot(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }

    /// Row-reduce so that `col` becomes a unit vector with its 1 in `row`,
    /// and record `col` as the basic column of `row`.
    ///
    /// The pivot element must not be within tolerance of zero; that would
    /// mean the pivot selector broke its contract.
    pub fn pivot(&mut self, row: usize, col: usize) {
        let pivot_val = self.data[row][col];
        assert!(
            pivot_val.abs() > self.tolerance,
            "pivot element at ({row}, {col}) is {pivot_val}"
        );

        for value in &mut self.data[row] {
            *value /= pivot_val;
        }

        let pivot_row = self.data[row].clone();
        for (i, other) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = other[col];
            if factor != 0.0 {
                for (value, &pivot_value) in other.iter_mut().zip(&pivot_row) {
                    *value -= factor * pivot_value;
                }
            }
        }

        self.basis[row] = col;
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }
}
