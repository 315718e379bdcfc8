//! Turns the best-matching rule into the concrete list of approvers to notify.

use tracing::{debug, warn};

use crate::catalog::ApproverDirectory;
use crate::domain::approver::Approver;
use crate::domain::invoice::InvoiceApprovalRequest;
use crate::domain::rule::{RoutingKind, WorkflowRule};
use crate::errors::CatalogError;

/// Selects approvers for `request` from the first (highest precedence) rule in `matched`.
///
/// No matched rule, or no resolvable approver, is a normal outcome and yields an empty list.
pub fn select_approvers(
    request: &InvoiceApprovalRequest,
    matched: &[&WorkflowRule],
    directory: &dyn ApproverDirectory,
) -> Result<Vec<Approver>, CatalogError> {
    let Some(primary) = matched.first() else {
        warn!(
            event_name = "workflow.rules.none_matched",
            amount = %request.amount(),
            department = %request.department(),
            requires_manager_approval = request.requires_manager_approval(),
            "no workflow rule matched request"
        );
        return Ok(Vec::new());
    };

    let candidates = directory.find_by_ids(&primary.approver_ids)?;
    if candidates.len() < primary.approver_ids.len() {
        debug!(
            event_name = "workflow.approvers.unresolved",
            rule_id = primary.id.as_str(),
            requested = primary.approver_ids.len(),
            resolved = candidates.len(),
            "some approver ids on rule are not in the directory"
        );
    }

    Ok(route(request, primary.routing, candidates))
}

/// Applies the routing refinement for `kind` to already-resolved candidates.
pub fn route(
    request: &InvoiceApprovalRequest,
    kind: RoutingKind,
    candidates: Vec<Approver>,
) -> Vec<Approver> {
    match kind {
        RoutingKind::ManagerInDepartment => narrow(request, candidates, true),
        RoutingKind::NonManagerInDepartment => narrow(request, candidates, false),
        RoutingKind::Unfiltered => candidates,
    }
}

fn narrow(
    request: &InvoiceApprovalRequest,
    candidates: Vec<Approver>,
    managers: bool,
) -> Vec<Approver> {
    let in_department: Vec<Approver> = candidates
        .iter()
        .filter(|approver| {
            approver.is_manager == managers && approver.belongs_to(request.department())
        })
        .cloned()
        .collect();

    if !in_department.is_empty() {
        return in_department;
    }

    candidates.into_iter().find(|approver| approver.is_manager == managers).into_iter().collect()
}
