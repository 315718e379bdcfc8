//! Request and response shapes shared by the HTTP API and the CLI's JSON output.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::approver::Approver;
use crate::domain::department::Department;
use crate::domain::invoice::InvoiceApprovalRequest;
use crate::domain::rule::WorkflowRule;
use crate::errors::{InterfaceError, ValidationError};
use crate::workflow::WorkflowResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteWorkflowRequest {
    /// Accepts a JSON string (`"1000.01"`) or number (`1000.01`).
    pub amount: Decimal,
    pub department: String,
    pub requires_manager_approval: bool,
}

impl ExecuteWorkflowRequest {
    pub fn into_domain(self) -> Result<InvoiceApprovalRequest, ValidationError> {
        let department = Department::from_str(&self.department)?;
        InvoiceApprovalRequest::new(self.amount, department, self.requires_manager_approval)
    }
}

/// Parses a user-typed amount (form field, CLI flag) as an exact decimal.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    Decimal::from_str_exact(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::MalformedAmount { value: raw.to_string() })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproverView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub is_manager: bool,
}

impl From<&Approver> for ApproverView {
    fn from(approver: &Approver) -> Self {
        Self {
            id: approver.id.0.clone(),
            name: approver.name.clone(),
            email: approver.email.clone(),
            department: approver.department.map(|department| department.as_str().to_string()),
            is_manager: approver.is_manager,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteWorkflowResponse {
    pub success: bool,
    /// Written as an exact JSON number with every digit of the request.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub department: String,
    pub requires_manager_approval: bool,
    pub selected_approvers: Vec<ApproverView>,
    pub notifications_sent: Vec<String>,
    pub rules_applied: Vec<String>,
    pub message: String,
}

impl From<&WorkflowResult> for ExecuteWorkflowResponse {
    fn from(result: &WorkflowResult) -> Self {
        Self {
            success: true,
            amount: result.request.amount(),
            department: result.request.department().as_str().to_string(),
            requires_manager_approval: result.request.requires_manager_approval(),
            selected_approvers: result.selected_approvers.iter().map(ApproverView::from).collect(),
            notifications_sent: result.notifications_sent.clone(),
            rules_applied: result.rules_applied.clone(),
            message: format!(
                "Workflow executed successfully. {} approver(s) notified.",
                result.selected_approvers.len()
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl From<&InterfaceError> for ErrorResponse {
    fn from(error: &InterfaceError) -> Self {
        Self {
            success: false,
            error: error.code().to_string(),
            message: error.user_message().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentsResponse {
    pub departments: Vec<String>,
}

impl DepartmentsResponse {
    pub fn all() -> Self {
        Self { departments: Department::names().into_iter().map(str::to_string).collect() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub priority: i32,
    pub approver_ids: Vec<String>,
    pub routing: String,
}

impl From<&WorkflowRule> for RuleView {
    fn from(rule: &WorkflowRule) -> Self {
        Self {
            id: rule.id.0.clone(),
            name: rule.name.clone(),
            description: rule.description.clone(),
            priority: rule.priority,
            approver_ids: rule.approver_ids.clone(),
            routing: rule.routing.as_str().to_string(),
        }
    }
}
