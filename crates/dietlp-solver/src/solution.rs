use crate::problem::DietProblem;
use crate::tableau::Tableau;

/// The result of a solve: an amount per item, the recomputed total cost, and
/// the shadow price of each nutrient requirement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Units to buy of each item, index-aligned with the input items.
    pub amounts: Vec<f64>,
    /// Recomputed as `sum(amounts[j] * unit_cost[j])`, never read from the
    /// objective row, to avoid compounded floating error.
    pub total_cost: f64,
    /// Marginal cost per unit increase of each requirement; a first-order
    /// value, valid only at the final basis.
    pub shadow_prices: Vec<f64>,
    /// Whether every nutrient total meets its requirement within tolerance.
    pub feasible: bool,
}

impl Solution {
    /// Read the final tableau back into item amounts, cost, and duals.
    ///
    /// An item column counts as basic only when the basis says so and the
    /// column is a unit vector within tolerance; the basis check keeps a
    /// column that merely drifted into unit shape (possible when several
    /// columns coincide) from being double-counted.
    pub fn extract(tableau: &Tableau, problem: &DietProblem, tolerance: f64) -> Self {
        let n = tableau.n_items();
        let m = tableau.n_nutrients();
        let rhs_col = tableau.rhs_col();
        let objective_row = tableau.objective_row();

        let mut amounts = vec![0.0; n];
        for (row, &col) in tableau.basis().iter().enumerate() {
            if col < n && is_unit_column(tableau, col, row, tolerance) {
                amounts[col] = tableau.get(row, rhs_col).max(0.0);
            }
        }

        let total_cost = amounts
            .iter()
            .zip(&problem.items)
            .map(|(amount, item)| amount * item.unit_cost)
            .sum();

        let shadow_prices = (0..m)
            .map(|i| tableau.get(objective_row, n + i).abs())
            .collect();

        let feasible = (0..m).all(|i| {
            let total: f64 = problem
                .items
                .iter()
                .zip(&amounts)
                .map(|(item, amount)| item.nutrients[i] * amount)
                .sum();
            total >= problem.requirements[i] - tolerance
        });

        Self {
            amounts,
            total_cost,
            shadow_prices,
            feasible,
        }
    }
}

fn is_unit_column(tableau: &Tableau, col: usize, row: usize, tolerance: f64) -> bool {
    if (tableau.get(row, col) - 1.0).abs() >= tolerance {
        return false;
    }
    (0..tableau.n_nutrients()).all(|k| k == row || tableau.get(k, col).abs() < tolerance)
}
