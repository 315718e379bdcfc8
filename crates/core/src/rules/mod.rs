pub mod condition;
pub mod matcher;

pub use condition::{ComparisonOperator, Condition, ConditionError};
pub use matcher::match_rules;
