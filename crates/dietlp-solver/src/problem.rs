use crate::simplex::SolveError;

/// A purchasable item: a unit cost plus the nutrients one unit provides.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub unit_cost: f64,
    /// Nutrient content per unit, index-aligned with the requirement vector.
    pub nutrients: Vec<f64>,
}

impl Item {
    pub fn new(name: impl Into<String>, unit_cost: f64, nutrients: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            unit_cost,
            nutrients,
        }
    }
}

/// The least-cost diet problem: choose nonnegative amounts of each item so
/// that every nutrient total meets its minimum requirement at minimum cost.
#[derive(Debug, Clone)]
pub struct DietProblem {
    pub items: Vec<Item>,
    /// Minimum required total per nutrient; its length fixes the nutrient count.
    pub requirements: Vec<f64>,
}

impl DietProblem {
    pub fn new(items: Vec<Item>, requirements: Vec<f64>) -> Self {
        Self {
            items,
            requirements,
        }
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn num_nutrients(&self) -> usize {
        self.requirements.len()
    }

    /// Reject malformed input before any tableau is constructed.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.items.is_empty() {
            return Err(SolveError::NoItems);
        }

        let expected = self.requirements.len();
        for item in &self.items {
            if !item.unit_cost.is_finite() {
                return Err(SolveError::NonFinite {
                    context: format!("unit cost of item {:?}", item.name),
                });
            }
            if item.unit_cost < 0.0 {
                return Err(SolveError::NegativeCost {
                    item: item.name.clone(),
                    cost: item.unit_cost,
                });
            }
            if item.nutrients.len() != expected {
                return Err(SolveError::NutrientLengthMismatch {
                    item: item.name.clone(),
                    expected,
                    found: item.nutrients.len(),
                });
            }
            for (nutrient, &value) in item.nutrients.iter().enumerate() {
                if !value.is_finite() {
                    return Err(SolveError::NonFinite {
                        context: format!("nutrient {} of item {:?}", nutrient, item.name),
                    });
                }
                if value < 0.0 {
                    return Err(SolveError::NegativeNutrient {
                        item: item.name.clone(),
                        nutrient,
                        value,
                    });
                }
            }
        }

        for (index, &value) in self.requirements.iter().enumerate() {
            if !value.is_finite() {
                return Err(SolveError::NonFinite {
                    context: format!("requirement {index}"),
                });
            }
            if value < 0.0 {
                return Err(SolveError::NegativeRequirement { index, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oatmeal() -> Item {
        Item::new("Oatmeal", 0.5, vec![5.0, 27.0])
    }

    #[test]
    fn test_valid_problem() {
        let problem = DietProblem::new(vec![oatmeal()], vec![10.0, 20.0]);
        assert!(problem.validate().is_ok());
        assert_eq!(problem.num_items(), 1);
        assert_eq!(problem.num_nutrients(), 2);
    }

    #[test]
    fn test_no_items() {
        let problem = DietProblem::new(vec![], vec![10.0]);
        assert_eq!(problem.validate(), Err(SolveError::NoItems));
    }

    #[test]
    fn test_nutrient_length_mismatch() {
        let problem = DietProblem::new(vec![oatmeal()], vec![10.0, 20.0, 30.0]);
        assert_eq!(
            problem.validate(),
            Err(SolveError::NutrientLengthMismatch {
                item: "Oatmeal".to_string(),
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_negative_cost() {
        let item = Item::new("Bad", -1.0, vec![1.0]);
        let problem = DietProblem::new(vec![item], vec![10.0]);
        assert!(matches!(
            problem.validate(),
            Err(SolveError::NegativeCost { .. })
        ));
    }

    #[test]
    fn test_negative_nutrient() {
        let item = Item::new("Bad", 1.0, vec![1.0, -0.5]);
        let problem = DietProblem::new(vec![item], vec![10.0, 20.0]);
        assert_eq!(
            problem.validate(),
            Err(SolveError::NegativeNutrient {
                item: "Bad".to_string(),
                nutrient: 1,
                value: -0.5,
            })
        );
    }

    #[test]
    fn test_negative_requirement() {
        let problem = DietProblem::new(vec![oatmeal()], vec![10.0, -1.0]);
        assert_eq!(
            problem.validate(),
            Err(SolveError::NegativeRequirement {
                index: 1,
                value: -1.0,
            })
        );
    }

    #[test]
    fn test_non_finite_values() {
        let item = Item::new("Bad", f64::NAN, vec![1.0]);
        let problem = DietProblem::new(vec![item], vec![10.0]);
        assert!(matches!(
            problem.validate(),
            Err(SolveError::NonFinite { .. })
        ));

        let item = Item::new("Bad", 1.0, vec![f64::INFINITY]);
        let problem = DietProblem::new(vec![item], vec![10.0]);
        assert!(matches!(
            problem.validate(),
            Err(SolveError::NonFinite { .. })
        ));

        let problem = DietProblem::new(vec![oatmeal()], vec![10.0, f64::NAN]);
        assert!(matches!(
            problem.validate(),
            Err(SolveError::NonFinite { .. })
        ));
    }
}
