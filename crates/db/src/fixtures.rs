//! Built-in reference data: the default approver directory and invoice approval rules.

use invoiceflow_core::domain::approver::Approver;
use invoiceflow_core::domain::department::Department;
use invoiceflow_core::domain::rule::{RoutingKind, RuleId, WorkflowConfiguration, WorkflowRule};
use invoiceflow_core::rules::condition::{ComparisonOperator, Condition};
use rust_decimal::Decimal;

pub const SEED_CONFIGURATION_ID: &str = "invoice-approval-workflow";
pub const SEED_CONFIGURATION_NAME: &str = "Invoice Approval Workflow";

/// Invoices strictly above this amount take the high-amount path.
const HIGH_AMOUNT_THRESHOLD: i64 = 1000;

struct SeedApprover {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    department: Option<Department>,
    is_manager: bool,
}

const SEED_APPROVERS: &[SeedApprover] = &[
    SeedApprover {
        id: "emp-1",
        name: "John Smith",
        email: "john.smith@company.com",
        department: Some(Department::Sales),
        is_manager: false,
    },
    SeedApprover {
        id: "emp-2",
        name: "Jane Doe",
        email: "jane.doe@company.com",
        department: Some(Department::Marketing),
        is_manager: false,
    },
    SeedApprover {
        id: "emp-3",
        name: "Bob Wilson",
        email: "bob.wilson@company.com",
        department: Some(Department::Engineering),
        is_manager: false,
    },
    SeedApprover {
        id: "mgr-sales",
        name: "Sales Manager",
        email: "sales.manager@company.com",
        department: Some(Department::Sales),
        is_manager: true,
    },
    SeedApprover {
        id: "mgr-marketing",
        name: "Marketing Manager",
        email: "marketing.manager@company.com",
        department: Some(Department::Marketing),
        is_manager: true,
    },
    SeedApprover {
        id: "mgr-engineering",
        name: "Engineering Manager",
        email: "engineering.manager@company.com",
        department: Some(Department::Engineering),
        is_manager: true,
    },
    SeedApprover {
        id: "mgr-finance",
        name: "Finance Manager",
        email: "finance.manager@company.com",
        department: Some(Department::Finance),
        is_manager: true,
    },
    SeedApprover {
        id: "vp-finance",
        name: "VP of Finance",
        email: "vp.finance@company.com",
        department: Some(Department::Finance),
        is_manager: true,
    },
    SeedApprover {
        id: "cfo",
        name: "CFO",
        email: "cfo@company.com",
        department: Some(Department::Finance),
        is_manager: true,
    },
    SeedApprover {
        id: "ceo",
        name: "CEO",
        email: "ceo@company.com",
        department: None,
        is_manager: true,
    },
];

pub fn seed_approvers() -> Vec<Approver> {
    SEED_APPROVERS
        .iter()
        .map(|seed| Approver::new(seed.id, seed.name, seed.email, seed.department, seed.is_manager))
        .collect()
}

pub fn seed_rules() -> Vec<WorkflowRule> {
    let threshold = Decimal::new(HIGH_AMOUNT_THRESHOLD, 0);
    let high = || Condition::amount(ComparisonOperator::GreaterThan, threshold);
    let low = || Condition::amount(ComparisonOperator::LessThanOrEquals, threshold);

    vec![
        seed_rule(
            "rule-1",
            "High Amount with Manager Approval",
            "Invoices over $1000 requiring manager approval go to CFO",
            Condition::and(vec![high(), Condition::manager_approval(true)]),
            &["cfo"],
            1,
            RoutingKind::Unfiltered,
        ),
        seed_rule(
            "rule-2",
            "High Amount without Manager Approval",
            "Invoices over $1000 not requiring manager approval go to VP of Finance",
            Condition::and(vec![high(), Condition::manager_approval(false)]),
            &["vp-finance"],
            2,
            RoutingKind::Unfiltered,
        ),
        seed_rule(
            "rule-3",
            "Low Amount with Manager Approval",
            "Invoices $1000 or less requiring manager approval go to department manager",
            Condition::and(vec![low(), Condition::manager_approval(true)]),
            &["mgr-sales", "mgr-marketing", "mgr-engineering", "mgr-finance"],
            3,
            RoutingKind::ManagerInDepartment,
        ),
        seed_rule(
            "rule-4",
            "Low Amount without Manager Approval",
            "Invoices $1000 or less not requiring manager approval go to employee",
            Condition::and(vec![low(), Condition::manager_approval(false)]),
            &["emp-1", "emp-2", "emp-3"],
            4,
            RoutingKind::NonManagerInDepartment,
        ),
    ]
}

pub fn seed_configuration() -> WorkflowConfiguration {
    WorkflowConfiguration {
        id: SEED_CONFIGURATION_ID.to_string(),
        name: SEED_CONFIGURATION_NAME.to_string(),
        rules: seed_rules(),
    }
}

fn seed_rule(
    id: &str,
    name: &str,
    description: &str,
    condition: Condition,
    approver_ids: &[&str],
    priority: i32,
    routing: RoutingKind,
) -> WorkflowRule {
    WorkflowRule {
        id: RuleId(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        condition,
        approver_ids: approver_ids.iter().map(|id| id.to_string()).collect(),
        priority,
        routing,
    }
}
