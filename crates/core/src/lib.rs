pub mod approvals;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod notify;
pub mod rules;
pub mod workflow;

pub use approvals::select_approvers;
pub use catalog::{ApproverDirectory, RuleStore};
pub use domain::approver::{Approver, ApproverId};
pub use domain::department::Department;
pub use domain::invoice::InvoiceApprovalRequest;
pub use domain::rule::{RoutingKind, RuleId, WorkflowConfiguration, WorkflowRule};
pub use errors::{ApplicationError, CatalogError, InterfaceError, ValidationError};
pub use notify::{LoggingNotifier, Notifier, OutboxNotifier};
pub use rules::{match_rules, ComparisonOperator, Condition};
pub use workflow::{WorkflowEngine, WorkflowResult};
