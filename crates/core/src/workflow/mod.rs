pub mod dto;
pub mod engine;

use serde::Serialize;

use crate::domain::approver::Approver;
use crate::domain::invoice::InvoiceApprovalRequest;

pub use engine::WorkflowEngine;

/// Everything one workflow run produced. Returned to the caller and never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkflowResult {
    pub request: InvoiceApprovalRequest,
    pub selected_approvers: Vec<Approver>,
    pub notifications_sent: Vec<String>,
    /// Names of every matched rule, in match order, including rules not used for selection.
    pub rules_applied: Vec<String>,
}
