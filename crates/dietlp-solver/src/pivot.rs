use crate::EPSILON;
use crate::tableau::Tableau;

/// Chooses the pivot position for each iteration.
///
/// The ">=" requirements are encoded through negative RHS entries, so the
/// search is driven by the rows still short of their requirement: the most
/// negative RHS picks the leaving row, then a ratio test against the
/// objective row picks the entering column so that reduced costs stay
/// nonnegative. Feasibility is restored by the pivot sequence itself rather
/// than a separate phase; this relies on the nonnegative costs and nutrient
/// values that input validation enforces.
#[derive(Debug, Clone, Copy)]
pub struct PivotSelector {
    tolerance: f64,
}

impl Default for PivotSelector {
    fn default() -> Self {
        Self { tolerance: EPSILON }
    }
}

impl PivotSelector {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// The requirement row furthest from satisfied: most negative RHS, ties
    /// resolved by lowest row index. `None` means every RHS is nonnegative
    /// within tolerance and the tableau is optimal.
    pub fn leaving_row(&self, tableau: &Tableau) -> Option<usize> {
        let rhs_col = tableau.rhs_col();
        let mut leaving = None;
        let mut most_negative = -self.tolerance;

        for row in 0..tableau.n_nutrients() {
            let rhs = tableau.get(row, rhs_col);
            if rhs < most_negative {
                most_negative = rhs;
                leaving = Some(row);
            }
        }

        leaving
    }

    /// The column entering the basis for the given leaving row: among columns
    /// with a negative coefficient in that row, the one minimizing the
    /// objective-row ratio, ties resolved by lowest column index. `None`
    /// means no column can move the row toward its requirement.
    pub fn entering_column(&self, tableau: &Tableau, row: usize) -> Option<usize> {
        let objective_row = tableau.objective_row();
        let mut entering = None;
        let mut best_ratio = f64::INFINITY;

        for col in 0..tableau.rhs_col() {
            let coefficient = tableau.get(row, col);
            if coefficient < -self.tolerance {
                let ratio = tableau.get(objective_row, col) / -coefficient;
                if ratio < best_ratio {
                    best_ratio = ratio;
                    entering = Some(col);
                }
            }
        }

        entering
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{DietProblem, Item};

    #[test]
    fn test_leaving_row_picks_most_negative_rhs() {
        let problem = DietProblem::new(
            vec![Item::new("A", 1.0, vec![1.0, 1.0, 1.0])],
            vec![3.0, 8.0, 5.0],
        );
        let tableau = Tableau::new(&problem);
        let selector = PivotSelector::default();

        // RHS entries are [-3, -8, -5].
        assert_eq!(selector.leaving_row(&tableau), Some(1));
    }

    #[test]
    fn test_leaving_row_tie_takes_lowest_index() {
        let problem = DietProblem::new(
            vec![Item::new("A", 1.0, vec![1.0, 1.0])],
            vec![4.0, 4.0],
        );
        let tableau = Tableau::new(&problem);
        let selector = PivotSelector::default();

        assert_eq!(selector.leaving_row(&tableau), Some(0));
    }

    #[test]
    fn test_leaving_row_none_when_requirements_met() {
        let problem = DietProblem::new(
            vec![Item::new("A", 1.0, vec![1.0])],
            vec![0.0],
        );
        let tableau = Tableau::new(&problem);
        let selector = PivotSelector::default();

        // A zero requirement gives RHS -0.0, already satisfied.
        assert_eq!(selector.leaving_row(&tableau), None);
    }

    #[test]
    fn test_entering_column_minimizes_cost_ratio() {
        // Per unit of the single nutrient, A costs 1/2 and B costs 3/4.
        let problem = DietProblem::new(
            vec![
                Item::new("A", 1.0, vec![2.0]),
                Item::new("B", 3.0, vec![4.0]),
            ],
            vec![10.0],
        );
        let tableau = Tableau::new(&problem);
        let selector = PivotSelector::default();

        assert_eq!(selector.entering_column(&tableau, 0), Some(0));
    }

    #[test]
    fn test_entering_column_tie_takes_lowest_index() {
        let problem = DietProblem::new(
            vec![
                Item::new("A", 1.0, vec![2.0]),
                Item::new("B", 2.0, vec![4.0]),
            ],
            vec![10.0],
        );
        let tableau = Tableau::new(&problem);
        let selector = PivotSelector::default();

        assert_eq!(selector.entering_column(&tableau, 0), Some(0));
    }

    #[test]
    fn test_entering_column_ignores_surplus_columns() {
        // The surplus column of the row carries +1 and must not be chosen.
        let problem = DietProblem::new(
            vec![Item::new("A", 1.0, vec![5.0])],
            vec![10.0],
        );
        let tableau = Tableau::new(&problem);
        let selector = PivotSelector::default();

        assert_eq!(selector.entering_column(&tableau, 0), Some(0));
    }

    #[test]
    fn test_entering_column_none_when_no_item_helps() {
        let problem = DietProblem::new(
            vec![Item::new("Filler", 0.0, vec![0.0])],
            vec![10.0],
        );
        let tableau = Tableau::new(&problem);
        let selector = PivotSelector::default();

        assert_eq!(selector.leaving_row(&tableau), Some(0));
        assert_eq!(selector.entering_column(&tableau, 0), None);
    }
}
