//! Loads approvers and rules from a TOML catalog file, falling back to the built-in seed for
//! any section the file leaves out.
//!
//! ```toml
//! id = "invoice-approval-workflow"
//! name = "Invoice Approval Workflow"
//!
//! [[approvers]]
//! id = "cfo"
//! name = "CFO"
//! email = "cfo@company.com"
//! department = "FINANCE"
//! is_manager = true
//!
//! [[rules]]
//! id = "rule-1"
//! name = "High Amount with Manager Approval"
//! priority = 1
//! approver_ids = ["cfo"]
//! routing = "unfiltered"
//! condition = { type = "and", conditions = [
//!   { type = "amount", operator = "greater_than", threshold = "1000" },
//!   { type = "manager_approval", required = true },
//! ] }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use invoiceflow_core::config::CatalogConfig;
use invoiceflow_core::domain::approver::Approver;
use invoiceflow_core::domain::department::Department;
use invoiceflow_core::domain::rule::{RoutingKind, RuleId, WorkflowConfiguration, WorkflowRule};
use invoiceflow_core::errors::CatalogError;
use invoiceflow_core::notify::Notifier;
use invoiceflow_core::rules::condition::Condition;
use invoiceflow_core::workflow::WorkflowEngine;
use serde::Deserialize;
use tracing::{info, warn};

use crate::fixtures;
use crate::repositories::{InMemoryApproverDirectory, InMemoryRuleStore};

/// Immutable reference data the engine is built from.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub directory: InMemoryApproverDirectory,
    pub rules: InMemoryRuleStore,
}

impl ReferenceData {
    pub fn seed() -> Self {
        Self {
            directory: InMemoryApproverDirectory::new(fixtures::seed_approvers()),
            rules: InMemoryRuleStore::new(fixtures::seed_configuration()),
        }
    }

    pub fn into_engine(self, notifier: Arc<dyn Notifier>) -> WorkflowEngine {
        WorkflowEngine::new(Arc::new(self.rules), Arc::new(self.directory), notifier)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    pub configuration: WorkflowConfiguration,
    pub approvers: Vec<Approver>,
}

pub fn load_reference_data(config: &CatalogConfig) -> Result<ReferenceData, CatalogError> {
    let Some(path) = &config.path else {
        info!(
            event_name = "system.catalog.seed_loaded",
            correlation_id = "bootstrap",
            "using built-in approver and rule catalog"
        );
        return Ok(ReferenceData::seed());
    };

    let catalog = load_catalog_file(path, config.strict)?;
    info!(
        event_name = "system.catalog.file_loaded",
        correlation_id = "bootstrap",
        path = %path.display(),
        approvers = catalog.approvers.len(),
        rules = catalog.configuration.rules.len(),
        "loaded approver and rule catalog"
    );

    Ok(ReferenceData {
        directory: InMemoryApproverDirectory::new(catalog.approvers),
        rules: InMemoryRuleStore::new(catalog.configuration),
    })
}

pub fn load_catalog_file(path: &Path, strict: bool) -> Result<Catalog, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|error| CatalogError::Read {
        path: path.display().to_string(),
        message: error.to_string(),
    })?;

    parse_catalog(&raw, &path.display().to_string(), strict)
}

pub fn parse_catalog(raw: &str, origin: &str, strict: bool) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = toml::from_str(raw).map_err(|error| CatalogError::Parse {
        path: origin.to_string(),
        message: error.to_string(),
    })?;

    let approvers = match file.approvers {
        Some(entries) => entries.into_iter().map(ApproverEntry::into_approver).collect(),
        None => fixtures::seed_approvers(),
    };
    let rules = match file.rules {
        Some(entries) => entries.into_iter().map(RuleEntry::into_rule).collect(),
        None => fixtures::seed_rules(),
    };
    let configuration = WorkflowConfiguration {
        id: file.id.unwrap_or_else(|| fixtures::SEED_CONFIGURATION_ID.to_string()),
        name: file.name.unwrap_or_else(|| fixtures::SEED_CONFIGURATION_NAME.to_string()),
        rules,
    };

    validate(&configuration, &approvers, strict)?;
    Ok(Catalog { configuration, approvers })
}

fn validate(
    configuration: &WorkflowConfiguration,
    approvers: &[Approver],
    strict: bool,
) -> Result<(), CatalogError> {
    let mut approver_ids = HashSet::new();
    for approver in approvers {
        if approver.id.as_str().trim().is_empty() {
            return Err(CatalogError::Invalid("approver ids must not be empty".to_string()));
        }
        if !approver_ids.insert(approver.id.as_str()) {
            return Err(CatalogError::Invalid(format!(
                "duplicate approver id `{}`",
                approver.id.as_str()
            )));
        }
    }

    let mut rule_ids = HashSet::new();
    for rule in &configuration.rules {
        if !rule_ids.insert(rule.id.as_str()) {
            return Err(CatalogError::Invalid(format!("duplicate rule id `{}`", rule.id.as_str())));
        }
        if rule.name.trim().is_empty() {
            return Err(CatalogError::Invalid(format!(
                "rule `{}` must have a non-empty name",
                rule.id.as_str()
            )));
        }

        if let Err(error) = rule.condition.check() {
            if strict {
                return Err(CatalogError::Invalid(format!("rule `{}`: {error}", rule.id.as_str())));
            }
            warn!(
                event_name = "system.catalog.unsatisfiable_condition",
                correlation_id = "bootstrap",
                rule_id = rule.id.as_str(),
                error = %error,
                "rule condition contains a comparison that always evaluates to false"
            );
        }

        for id in rule.approver_ids.iter().filter(|id| !approver_ids.contains(id.as_str())) {
            warn!(
                event_name = "system.catalog.unknown_approver",
                correlation_id = "bootstrap",
                rule_id = rule.id.as_str(),
                approver_id = %id,
                "rule references an approver missing from the directory"
            );
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    id: Option<String>,
    name: Option<String>,
    approvers: Option<Vec<ApproverEntry>>,
    rules: Option<Vec<RuleEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApproverEntry {
    id: String,
    name: String,
    email: String,
    department: Option<Department>,
    #[serde(default)]
    is_manager: bool,
}

impl ApproverEntry {
    fn into_approver(self) -> Approver {
        Approver::new(self.id, self.name, self.email, self.department, self.is_manager)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    condition: Condition,
    #[serde(default)]
    approver_ids: Vec<String>,
    #[serde(default)]
    priority: i32,
    routing: Option<RoutingKind>,
}

impl RuleEntry {
    fn into_rule(self) -> WorkflowRule {
        let routing = self.routing.unwrap_or_else(|| RoutingKind::infer_from_name(&self.name));
        WorkflowRule {
            id: RuleId(self.id),
            name: self.name,
            description: self.description,
            condition: self.condition,
            approver_ids: self.approver_ids,
            priority: self.priority,
            routing,
        }
    }
}
