use std::str::FromStr;
use std::sync::Arc;

use invoiceflow_core::domain::department::Department;
use invoiceflow_core::domain::invoice::InvoiceApprovalRequest;
use invoiceflow_core::notify::OutboxNotifier;
use invoiceflow_core::workflow::{WorkflowEngine, WorkflowResult};
use invoiceflow_db::ReferenceData;
use rust_decimal::Decimal;

type SeedRoutingTestResult<T = ()> = Result<T, String>;

macro_rules! require {
    ($cond:expr) => {
        if !$cond {
            return Err(format!("assertion failed: `{}`", stringify!($cond)));
        }
    };
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err(format!($($arg)*));
        }
    };
}

macro_rules! require_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return Err(format!(
                "assertion failed: `left == right` (`{:?}` != `{:?}`)",
                $left,
                $right
            ));
        }
    };
}

fn engine() -> (WorkflowEngine, OutboxNotifier) {
    let outbox = OutboxNotifier::default();
    let engine = ReferenceData::seed().into_engine(Arc::new(outbox.clone()));
    (engine, outbox)
}

fn run(amount: &str, department: &str, manager: bool) -> SeedRoutingTestResult<WorkflowResult> {
    let (engine, _) = engine();
    execute(&engine, amount, department, manager)
}

fn execute(
    engine: &WorkflowEngine,
    amount: &str,
    department: &str,
    manager: bool,
) -> SeedRoutingTestResult<WorkflowResult> {
    let amount = Decimal::from_str(amount).map_err(|error| error.to_string())?;
    let department = Department::from_str(department).map_err(|error| error.to_string())?;
    let request = InvoiceApprovalRequest::new(amount, department, manager)
        .map_err(|error| error.to_string())?;
    engine.execute(request).map_err(|error| error.to_string())
}

fn approver_names(result: &WorkflowResult) -> Vec<&str> {
    result.selected_approvers.iter().map(|approver| approver.name.as_str()).collect()
}

#[test]
fn high_amount_with_manager_approval_goes_to_the_cfo() -> SeedRoutingTestResult {
    let result = run("1500", "SALES", true)?;

    require_eq!(result.rules_applied.first().map(String::as_str), Some("High Amount with Manager Approval"));
    require_eq!(approver_names(&result), vec!["CFO"]);
    require_eq!(result.notifications_sent, vec!["notification sent to CFO".to_string()]);
    Ok(())
}

#[test]
fn threshold_amount_stays_with_the_department_manager() -> SeedRoutingTestResult {
    let at_threshold = run("1000", "SALES", true)?;
    require_eq!(at_threshold.rules_applied, vec!["Low Amount with Manager Approval".to_string()]);
    require_eq!(approver_names(&at_threshold), vec!["Sales Manager"]);

    for amount in ["1000.01", "1001"] {
        let above = run(amount, "SALES", true)?;
        require!(
            approver_names(&above) == vec!["CFO"],
            "{amount} should route to the CFO, got {:?}",
            approver_names(&above)
        );
    }
    Ok(())
}

#[test]
fn low_amount_with_manager_approval_picks_the_department_manager() -> SeedRoutingTestResult {
    let result = run("500", "MARKETING", true)?;

    require_eq!(approver_names(&result), vec!["Marketing Manager"]);
    require!(result.selected_approvers.iter().all(|approver| approver.is_manager));
    Ok(())
}

#[test]
fn low_amount_without_manager_approval_picks_one_department_employee() -> SeedRoutingTestResult {
    let result = run("500", "sales", false)?;

    require_eq!(result.selected_approvers.len(), 1);
    let approver = &result.selected_approvers[0];
    require_eq!(approver.name.as_str(), "John Smith");
    require_eq!(approver.department, Some(Department::Sales));
    require!(!approver.is_manager);
    Ok(())
}

#[test]
fn high_amount_without_manager_approval_goes_to_the_vp_of_finance() -> SeedRoutingTestResult {
    let result = run("1500", "ENGINEERING", false)?;

    require_eq!(result.rules_applied, vec!["High Amount without Manager Approval".to_string()]);
    require_eq!(approver_names(&result), vec!["VP of Finance"]);
    Ok(())
}

#[test]
fn departments_without_a_match_fall_back_to_a_single_approver() -> SeedRoutingTestResult {
    let manager = run("200", "HR", true)?;
    require_eq!(approver_names(&manager), vec!["Sales Manager"]);

    let employee = run("200", "OPERATIONS", false)?;
    require_eq!(approver_names(&employee), vec!["John Smith"]);
    Ok(())
}

#[test]
fn zero_amount_is_routed_like_any_low_amount() -> SeedRoutingTestResult {
    let result = run("0", "ENGINEERING", false)?;

    require_eq!(approver_names(&result), vec!["Bob Wilson"]);
    Ok(())
}

#[test]
fn repeated_runs_produce_identical_selections() -> SeedRoutingTestResult {
    let (engine, outbox) = engine();

    let first = execute(&engine, "750", "FINANCE", true)?;
    let second = execute(&engine, "750", "FINANCE", true)?;

    require_eq!(first.selected_approvers, second.selected_approvers);
    require_eq!(first.rules_applied, second.rules_applied);
    require_eq!(outbox.sent().len(), first.selected_approvers.len() * 2);
    Ok(())
}

#[test]
fn outbox_records_the_rendered_message() -> SeedRoutingTestResult {
    let (engine, outbox) = engine();

    execute(&engine, "1500", "FINANCE", true)?;

    let sent = outbox.sent();
    require_eq!(sent.len(), 1);
    require_eq!(sent[0].recipient.as_str(), "cfo@company.com");
    require!(
        sent[0].message.contains("Amount=$1500") && sent[0].message.contains("Department=FINANCE"),
        "unexpected message: {}",
        sent[0].message
    );
    Ok(())
}

#[test]
fn unknown_department_never_reaches_the_engine() -> SeedRoutingTestResult {
    let error = match Department::from_str("INVALID_DEPT") {
        Ok(department) => return Err(format!("unexpected department {department:?}")),
        Err(error) => error.to_string(),
    };

    require!(error.contains("INVALID_DEPT"));
    require!(error.contains("SALES, MARKETING, ENGINEERING, FINANCE, HR, OPERATIONS"));
    Ok(())
}
