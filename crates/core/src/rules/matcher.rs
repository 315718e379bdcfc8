use crate::domain::invoice::InvoiceApprovalRequest;
use crate::domain::rule::WorkflowRule;

/// Returns the rules whose condition holds for `request`, ordered by ascending priority.
///
/// The sort is stable: rules sharing a priority keep their declaration order.
pub fn match_rules<'a>(
    request: &InvoiceApprovalRequest,
    rules: &'a [WorkflowRule],
) -> Vec<&'a WorkflowRule> {
    let mut matched: Vec<&WorkflowRule> =
        rules.iter().filter(|rule| rule.condition.evaluate(request)).collect();
    matched.sort_by_key(|rule| rule.priority);
    matched
}
