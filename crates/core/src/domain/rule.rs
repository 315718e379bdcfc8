use serde::{Deserialize, Serialize};

use crate::rules::condition::Condition;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

impl RuleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How the candidate approvers of a matched rule are narrowed for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingKind {
    /// Managers of the request's department, else the first manager on the rule.
    ManagerInDepartment,
    /// Non-managers of the request's department, else the first non-manager on the rule.
    NonManagerInDepartment,
    /// Every resolvable approver on the rule.
    Unfiltered,
}

impl RoutingKind {
    /// Derives the routing kind from a rule's display name. Catalog entries that omit an
    /// explicit `routing` key fall back to this.
    pub fn infer_from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("department manager") || name.contains("low amount with manager") {
            Self::ManagerInDepartment
        } else if name.contains("employee") || name.contains("low amount without manager") {
            Self::NonManagerInDepartment
        } else {
            Self::Unfiltered
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManagerInDepartment => "manager_in_department",
            Self::NonManagerInDepartment => "non_manager_in_department",
            Self::Unfiltered => "unfiltered",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRule {
    pub id: RuleId,
    pub name: String,
    pub description: String,
    pub condition: Condition,
    pub approver_ids: Vec<String>,
    /// Lower values take precedence.
    pub priority: i32,
    pub routing: RoutingKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfiguration {
    pub id: String,
    pub name: String,
    pub rules: Vec<WorkflowRule>,
}
