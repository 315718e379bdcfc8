//! Read-only reference data consumed by the workflow engine.
//!
//! Implementations are built once at startup and shared behind `Arc`; nothing in the core
//! mutates them.

use crate::domain::approver::{Approver, ApproverId};
use crate::domain::department::Department;
use crate::domain::rule::{RuleId, WorkflowConfiguration, WorkflowRule};
use crate::errors::CatalogError;

pub trait ApproverDirectory: Send + Sync {
    fn find_by_id(&self, id: &ApproverId) -> Result<Option<Approver>, CatalogError>;

    /// Resolves `ids` in order, silently omitting unknown ids.
    fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Approver>, CatalogError>;

    fn find_all(&self) -> Result<Vec<Approver>, CatalogError>;

    fn find_by_department(&self, department: Department) -> Result<Vec<Approver>, CatalogError> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|approver| approver.belongs_to(department))
            .collect())
    }

    fn find_managers(&self) -> Result<Vec<Approver>, CatalogError> {
        Ok(self.find_all()?.into_iter().filter(|approver| approver.is_manager).collect())
    }
}

pub trait RuleStore: Send + Sync {
    fn active_configuration(&self) -> Result<WorkflowConfiguration, CatalogError>;

    fn find_all(&self) -> Result<Vec<WorkflowRule>, CatalogError> {
        Ok(self.active_configuration()?.rules)
    }

    fn find_by_id(&self, id: &RuleId) -> Result<Option<WorkflowRule>, CatalogError> {
        Ok(self.find_all()?.into_iter().find(|rule| &rule.id == id))
    }
}
