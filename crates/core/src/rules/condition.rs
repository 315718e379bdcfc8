//! Boolean condition trees evaluated against an invoice approval request.
//!
//! Evaluation is total: every tree yields `true` or `false`. Operator/operand pairs with no
//! meaning (ordering a department, for example) evaluate to `false`. Catalog loaders can call
//! [`Condition::check`] to reject such trees before they reach the engine.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::department::Department;
use crate::domain::invoice::InvoiceApprovalRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEquals,
    LessThan,
    LessThanOrEquals,
}

impl ComparisonOperator {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Equals => ordering == Ordering::Equal,
            Self::NotEquals => ordering != Ordering::Equal,
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::GreaterThanOrEquals => ordering != Ordering::Less,
            Self::LessThan => ordering == Ordering::Less,
            Self::LessThanOrEquals => ordering != Ordering::Greater,
        }
    }

    pub fn is_equality(self) -> bool {
        matches!(self, Self::Equals | Self::NotEquals)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Amount { operator: ComparisonOperator, threshold: Decimal },
    Department { operator: ComparisonOperator, department: Department },
    ManagerApproval { required: bool },
    And { conditions: Vec<Condition> },
    Or { conditions: Vec<Condition> },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("department conditions only support equals/not_equals, found `{operator:?}`")]
    UnsupportedDepartmentOperator { operator: ComparisonOperator },
}

impl Condition {
    pub fn amount(operator: ComparisonOperator, threshold: Decimal) -> Self {
        Self::Amount { operator, threshold }
    }

    pub fn department(operator: ComparisonOperator, department: Department) -> Self {
        Self::Department { operator, department }
    }

    pub fn manager_approval(required: bool) -> Self {
        Self::ManagerApproval { required }
    }

    pub fn and(conditions: Vec<Condition>) -> Self {
        Self::And { conditions }
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Self::Or { conditions }
    }

    pub fn evaluate(&self, request: &InvoiceApprovalRequest) -> bool {
        match self {
            // Decimal ordering is exact and scale-insensitive, so 1000 == 1000.00.
            Self::Amount { operator, threshold } => {
                operator.holds(request.amount().cmp(threshold))
            }
            Self::Department { operator, department } => match operator {
                ComparisonOperator::Equals => request.department() == *department,
                ComparisonOperator::NotEquals => request.department() != *department,
                _ => false,
            },
            Self::ManagerApproval { required } => request.requires_manager_approval() == *required,
            Self::And { conditions } => conditions.iter().all(|child| child.evaluate(request)),
            Self::Or { conditions } => conditions.iter().any(|child| child.evaluate(request)),
        }
    }

    /// Walks the tree and reports the first leaf that can never be satisfied as written.
    pub fn check(&self) -> Result<(), ConditionError> {
        match self {
            Self::Department { operator, .. } if !operator.is_equality() => {
                Err(ConditionError::UnsupportedDepartmentOperator { operator: *operator })
            }
            Self::And { conditions } | Self::Or { conditions } => {
                conditions.iter().try_for_each(Condition::check)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{ComparisonOperator, Condition, ConditionError};
    use crate::domain::department::Department;
    use crate::domain::invoice::InvoiceApprovalRequest;

    fn request(amount: &str, department: Department, manager: bool) -> InvoiceApprovalRequest {
        let amount = amount.parse::<Decimal>().expect("valid decimal literal");
        InvoiceApprovalRequest::new(amount, department, manager).expect("valid request")
    }

    fn threshold() -> Decimal {
        Decimal::new(1000, 0)
    }

    #[test]
    fn amount_greater_than_excludes_the_threshold() {
        let condition = Condition::amount(ComparisonOperator::GreaterThan, threshold());

        assert!(condition.evaluate(&request("1500", Department::Sales, false)));
        assert!(condition.evaluate(&request("1000.01", Department::Sales, false)));
        assert!(!condition.evaluate(&request("1000", Department::Sales, false)));
        assert!(!condition.evaluate(&request("500", Department::Sales, false)));
    }

    #[test]
    fn amount_less_than_or_equals_includes_the_threshold() {
        let condition = Condition::amount(ComparisonOperator::LessThanOrEquals, threshold());

        assert!(!condition.evaluate(&request("1500", Department::Sales, false)));
        assert!(condition.evaluate(&request("500", Department::Sales, false)));
        assert!(condition.evaluate(&request("1000", Department::Sales, false)));
        assert!(condition.evaluate(&request("1000.00", Department::Sales, false)));
    }

    #[test]
    fn amount_equality_ignores_scale() {
        let equals = Condition::amount(ComparisonOperator::Equals, threshold());
        let not_equals = Condition::amount(ComparisonOperator::NotEquals, threshold());

        assert!(equals.evaluate(&request("1000.000", Department::Sales, false)));
        assert!(!equals.evaluate(&request("999", Department::Sales, false)));
        assert!(!not_equals.evaluate(&request("1000", Department::Sales, false)));
        assert!(not_equals.evaluate(&request("999.99", Department::Sales, false)));
    }

    #[test]
    fn amount_remaining_orderings() {
        let gte = Condition::amount(ComparisonOperator::GreaterThanOrEquals, threshold());
        let lt = Condition::amount(ComparisonOperator::LessThan, threshold());

        assert!(gte.evaluate(&request("1500", Department::Sales, false)));
        assert!(gte.evaluate(&request("1000", Department::Sales, false)));
        assert!(!gte.evaluate(&request("500", Department::Sales, false)));
        assert!(lt.evaluate(&request("500", Department::Sales, false)));
        assert!(!lt.evaluate(&request("1000", Department::Sales, false)));
    }

    #[test]
    fn department_equality_operators() {
        let equals = Condition::department(ComparisonOperator::Equals, Department::Sales);
        let not_equals = Condition::department(ComparisonOperator::NotEquals, Department::Sales);

        assert!(equals.evaluate(&request("500", Department::Sales, false)));
        assert!(!equals.evaluate(&request("500", Department::Marketing, false)));
        assert!(!not_equals.evaluate(&request("500", Department::Sales, false)));
        assert!(not_equals.evaluate(&request("500", Department::Marketing, false)));
    }

    #[test]
    fn department_ordering_operators_evaluate_to_false() {
        for operator in [
            ComparisonOperator::GreaterThan,
            ComparisonOperator::GreaterThanOrEquals,
            ComparisonOperator::LessThan,
            ComparisonOperator::LessThanOrEquals,
        ] {
            let condition = Condition::department(operator, Department::Sales);
            for department in Department::ALL {
                assert!(!condition.evaluate(&request("500", department, false)));
            }
        }
    }

    #[test]
    fn manager_approval_matches_the_flag() {
        let required = Condition::manager_approval(true);
        let not_required = Condition::manager_approval(false);

        assert!(required.evaluate(&request("500", Department::Sales, true)));
        assert!(!required.evaluate(&request("500", Department::Sales, false)));
        assert!(!not_required.evaluate(&request("500", Department::Sales, true)));
        assert!(not_required.evaluate(&request("500", Department::Sales, false)));
    }

    #[test]
    fn and_requires_every_child() {
        let condition = Condition::and(vec![
            Condition::amount(ComparisonOperator::GreaterThan, threshold()),
            Condition::manager_approval(true),
        ]);

        assert!(condition.evaluate(&request("1500", Department::Sales, true)));
        assert!(!condition.evaluate(&request("1500", Department::Sales, false)));
    }

    #[test]
    fn or_requires_any_child() {
        let condition = Condition::or(vec![
            Condition::amount(ComparisonOperator::GreaterThan, threshold()),
            Condition::manager_approval(true),
        ]);

        assert!(condition.evaluate(&request("500", Department::Sales, true)));
        assert!(!condition.evaluate(&request("500", Department::Sales, false)));
    }

    #[test]
    fn empty_and_is_true_and_empty_or_is_false_for_any_request() {
        let and = Condition::and(Vec::new());
        let or = Condition::or(Vec::new());

        for department in Department::ALL {
            for manager in [true, false] {
                for amount in ["0", "1000", "25000.50"] {
                    let request = request(amount, department, manager);
                    assert!(and.evaluate(&request));
                    assert!(!or.evaluate(&request));
                }
            }
        }
    }

    #[test]
    fn nested_trees_evaluate_recursively() {
        let condition = Condition::or(vec![
            Condition::and(vec![
                Condition::department(ComparisonOperator::Equals, Department::Engineering),
                Condition::amount(ComparisonOperator::GreaterThanOrEquals, Decimal::new(250, 0)),
            ]),
            Condition::and(vec![Condition::or(Vec::new())]),
        ]);

        assert!(condition.evaluate(&request("250", Department::Engineering, false)));
        assert!(!condition.evaluate(&request("249.99", Department::Engineering, false)));
        assert!(!condition.evaluate(&request("5000", Department::Finance, true)));
    }

    #[test]
    fn check_reports_nested_department_ordering() {
        let condition = Condition::and(vec![
            Condition::manager_approval(true),
            Condition::or(vec![Condition::department(
                ComparisonOperator::LessThan,
                Department::Hr,
            )]),
        ]);

        assert_eq!(
            condition.check(),
            Err(ConditionError::UnsupportedDepartmentOperator {
                operator: ComparisonOperator::LessThan
            })
        );
        assert_eq!(
            Condition::department(ComparisonOperator::NotEquals, Department::Hr).check(),
            Ok(())
        );
    }

    #[test]
    fn conditions_deserialize_from_tagged_toml() {
        let condition: Condition = toml::from_str(
            r#"
type = "and"
conditions = [
  { type = "amount", operator = "greater_than", threshold = "1000" },
  { type = "manager_approval", required = true },
]
"#,
        )
        .expect("condition should parse");

        assert_eq!(
            condition,
            Condition::and(vec![
                Condition::amount(ComparisonOperator::GreaterThan, Decimal::new(1000, 0)),
                Condition::manager_approval(true),
            ])
        );
    }
}
