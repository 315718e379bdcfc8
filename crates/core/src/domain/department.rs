use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Sales,
    Marketing,
    Engineering,
    Finance,
    Hr,
    Operations,
}

impl Department {
    /// Every department in declaration order.
    pub const ALL: [Department; 6] = [
        Department::Sales,
        Department::Marketing,
        Department::Engineering,
        Department::Finance,
        Department::Hr,
        Department::Operations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "SALES",
            Self::Marketing => "MARKETING",
            Self::Engineering => "ENGINEERING",
            Self::Finance => "FINANCE",
            Self::Hr => "HR",
            Self::Operations => "OPERATIONS",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|department| department.as_str()).collect()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|department| department.as_str() == upper)
            .ok_or_else(|| ValidationError::UnknownDepartment { value: value.to_string() })
    }
}
