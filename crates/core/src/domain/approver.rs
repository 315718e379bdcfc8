use serde::{Deserialize, Serialize};

use crate::domain::department::Department;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApproverId(pub String);

impl ApproverId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A person who can sign off an invoice. `department` is `None` for org-wide roles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approver {
    pub id: ApproverId,
    pub name: String,
    pub email: String,
    pub department: Option<Department>,
    #[serde(default)]
    pub is_manager: bool,
}

impl Approver {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        department: Option<Department>,
        is_manager: bool,
    ) -> Self {
        Self {
            id: ApproverId::new(id),
            name: name.into(),
            email: email.into(),
            department,
            is_manager,
        }
    }

    pub fn belongs_to(&self, department: Department) -> bool {
        self.department == Some(department)
    }
}
