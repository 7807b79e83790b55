use crate::EPSILON;
use crate::problem::Item;
use crate::solution::Solution;

/// Cost-impact sweep for one item that appears in the solution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSensitivity {
    pub item: String,
    pub current_cost: f64,
    pub quantity: f64,
    pub sweep: Vec<SweepPoint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub pct_change: i32,
    pub new_cost: f64,
    pub cost_impact: f64,
}

/// Sweep each used item's unit cost from -50% to +50% in 10% steps and
/// report the linear cost impact at the solved quantities.
///
/// The quantities are held fixed, so the numbers only hold while the
/// perturbation leaves the optimal basis unchanged. This is a first-order
/// approximation, not parametric ranging; there is no re-solve.
pub fn sensitivity(solution: &Solution, items: &[Item]) -> Vec<ItemSensitivity> {
    items
        .iter()
        .zip(&solution.amounts)
        .filter(|&(_, &quantity)| quantity > EPSILON)
        .map(|(item, &quantity)| {
            let sweep = (-50..=50)
                .step_by(10)
                .map(|pct| {
                    let new_cost = item.unit_cost * (1.0 + f64::from(pct) / 100.0);
                    SweepPoint {
                        pct_change: pct,
                        new_cost,
                        cost_impact: quantity * (new_cost - item.unit_cost),
                    }
                })
                .collect();
            ItemSensitivity {
                item: item.name.clone(),
                current_cost: item.unit_cost,
                quantity,
                sweep,
            }
        })
        .collect()
}
