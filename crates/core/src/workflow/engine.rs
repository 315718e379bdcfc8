use std::sync::Arc;

use tracing::info;

use crate::approvals::select_approvers;
use crate::catalog::{ApproverDirectory, RuleStore};
use crate::domain::invoice::InvoiceApprovalRequest;
use crate::domain::rule::WorkflowRule;
use crate::errors::{ApplicationError, CatalogError};
use crate::notify::Notifier;
use crate::rules::match_rules;
use crate::workflow::WorkflowResult;

/// Runs match → select → notify for one request at a time.
///
/// The engine holds only shared read-only reference data, so a single instance can serve
/// concurrent callers without locking.
#[derive(Clone)]
pub struct WorkflowEngine {
    rules: Arc<dyn RuleStore>,
    directory: Arc<dyn ApproverDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl WorkflowEngine {
    pub fn new(
        rules: Arc<dyn RuleStore>,
        directory: Arc<dyn ApproverDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { rules, directory, notifier }
    }

    pub fn execute(
        &self,
        request: InvoiceApprovalRequest,
    ) -> Result<WorkflowResult, ApplicationError> {
        info!(
            event_name = "workflow.execute.start",
            amount = %request.amount(),
            department = %request.department(),
            requires_manager_approval = request.requires_manager_approval(),
            "executing approval workflow"
        );

        let configuration = self.rules.active_configuration()?;
        let matched = match_rules(&request, &configuration.rules);
        info!(
            event_name = "workflow.rules.matched",
            configuration_id = %configuration.id,
            matched = matched.len(),
            "matched workflow rules"
        );

        let selected_approvers = select_approvers(&request, &matched, self.directory.as_ref())?;
        let selected_names: Vec<&str> =
            selected_approvers.iter().map(|approver| approver.name.as_str()).collect();
        info!(
            event_name = "workflow.approvers.selected",
            selected = selected_approvers.len(),
            approvers = ?selected_names,
            "selected approvers"
        );

        let notifications_sent = self.notifier.notify_all(&selected_approvers, &request);
        let rules_applied = matched.iter().map(|rule| rule.name.clone()).collect();

        Ok(WorkflowResult { request, selected_approvers, notifications_sent, rules_applied })
    }

    pub fn rules(&self) -> Result<Vec<WorkflowRule>, CatalogError> {
        self.rules.find_all()
    }

    pub fn directory(&self) -> &dyn ApproverDirectory {
        self.directory.as_ref()
    }
}
