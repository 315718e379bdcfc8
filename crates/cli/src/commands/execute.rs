use std::str::FromStr;
use std::sync::Arc;

use invoiceflow_core::domain::department::Department;
use invoiceflow_core::domain::invoice::InvoiceApprovalRequest;
use invoiceflow_core::errors::{ApplicationError, ValidationError};
use invoiceflow_core::notify::{OutboxEntry, OutboxNotifier};
use invoiceflow_core::workflow::dto::{parse_amount, ExecuteWorkflowResponse};
use invoiceflow_core::workflow::WorkflowResult;

use crate::commands::{load_reference, CommandResult, EXIT_CATALOG, EXIT_VALIDATION};

#[derive(Debug, Clone)]
pub struct ExecuteArgs {
    pub amount: String,
    pub department: String,
    pub requires_manager_approval: bool,
    pub json: bool,
}

pub fn run(args: ExecuteArgs) -> CommandResult {
    let (config, reference) = match load_reference("execute") {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let request = match build_request(&args) {
        Ok(request) => request,
        Err(error) => return failure(ApplicationError::from(error)),
    };

    let outbox = OutboxNotifier::default();
    let engine = reference.into_engine(Arc::new(outbox.clone()));

    let result = match engine.execute(request) {
        Ok(result) => result,
        Err(error) => return failure(error),
    };

    if args.json {
        let response = ExecuteWorkflowResponse::from(&result);
        return match serde_json::to_string_pretty(&response) {
            Ok(output) => CommandResult::plain(output),
            Err(error) => CommandResult::failure("execute", "serialization", error.to_string(), 1),
        };
    }

    CommandResult::plain(render_human(&result, &config.notifications.channel, &outbox.sent()))
}

fn build_request(args: &ExecuteArgs) -> Result<InvoiceApprovalRequest, ValidationError> {
    let amount = parse_amount(&args.amount)?;
    let department = Department::from_str(&args.department)?;
    InvoiceApprovalRequest::new(amount, department, args.requires_manager_approval)
}

fn failure(error: ApplicationError) -> CommandResult {
    match error {
        ApplicationError::Validation(error) => {
            CommandResult::failure("execute", "validation", error.to_string(), EXIT_VALIDATION)
        }
        ApplicationError::Catalog(error) => {
            CommandResult::failure("execute", "catalog", error.to_string(), EXIT_CATALOG)
        }
        ApplicationError::Internal(message) => {
            CommandResult::failure("execute", "internal", message, 1)
        }
    }
}

fn render_human(result: &WorkflowResult, channel: &str, outbox: &[OutboxEntry]) -> String {
    let response = ExecuteWorkflowResponse::from(result);
    let mut lines = vec![
        response.message,
        format!(
            "invoice: amount={} department={} requires_manager_approval={}",
            response.amount, response.department, response.requires_manager_approval
        ),
    ];

    if result.rules_applied.is_empty() {
        lines.push("rules applied: none".to_string());
    } else {
        lines.push(format!("rules applied: {}", result.rules_applied.join(", ")));
    }

    lines.push("approvers:".to_string());
    for approver in &result.selected_approvers {
        let role = if approver.is_manager { "manager" } else { "employee" };
        let department =
            approver.department.map(|department| department.as_str()).unwrap_or("ORG-WIDE");
        lines.push(format!("- {} <{}> ({department}, {role})", approver.name, approver.email));
    }

    lines.push(format!("outbox ({channel}):"));
    for entry in outbox {
        lines.push(format!("- to {}: {}", entry.recipient, entry.message));
    }

    lines.join("\n")
}
