use std::collections::HashMap;

use invoiceflow_core::catalog::{ApproverDirectory, RuleStore};
use invoiceflow_core::domain::approver::{Approver, ApproverId};
use invoiceflow_core::domain::rule::WorkflowConfiguration;
use invoiceflow_core::errors::CatalogError;

/// Approver lookup table. Insertion order is kept for `find_all`.
#[derive(Clone, Debug, Default)]
pub struct InMemoryApproverDirectory {
    approvers: Vec<Approver>,
    index: HashMap<String, usize>,
}

impl InMemoryApproverDirectory {
    /// Later entries with a duplicate id replace earlier ones in place.
    pub fn new(approvers: Vec<Approver>) -> Self {
        let mut directory = Self::default();
        for approver in approvers {
            match directory.index.get(approver.id.as_str()) {
                Some(&position) => directory.approvers[position] = approver,
                None => {
                    directory.index.insert(approver.id.0.clone(), directory.approvers.len());
                    directory.approvers.push(approver);
                }
            }
        }
        directory
    }

    pub fn len(&self) -> usize {
        self.approvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approvers.is_empty()
    }

    fn get(&self, id: &str) -> Option<&Approver> {
        self.index.get(id).map(|&position| &self.approvers[position])
    }
}

impl ApproverDirectory for InMemoryApproverDirectory {
    fn find_by_id(&self, id: &ApproverId) -> Result<Option<Approver>, CatalogError> {
        Ok(self.get(id.as_str()).cloned())
    }

    fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Approver>, CatalogError> {
        Ok(ids.iter().filter_map(|id| self.get(id)).cloned().collect())
    }

    fn find_all(&self) -> Result<Vec<Approver>, CatalogError> {
        Ok(self.approvers.clone())
    }
}

#[derive(Clone, Debug)]
pub struct InMemoryRuleStore {
    configuration: WorkflowConfiguration,
}

impl InMemoryRuleStore {
    pub fn new(configuration: WorkflowConfiguration) -> Self {
        Self { configuration }
    }

    pub fn rule_count(&self) -> usize {
        self.configuration.rules.len()
    }
}

impl RuleStore for InMemoryRuleStore {
    fn active_configuration(&self) -> Result<WorkflowConfiguration, CatalogError> {
        Ok(self.configuration.clone())
    }
}
