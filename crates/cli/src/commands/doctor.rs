use std::sync::Arc;

use invoiceflow_core::config::{AppConfig, LoadOptions};
use invoiceflow_core::domain::department::Department;
use invoiceflow_core::domain::invoice::InvoiceApprovalRequest;
use invoiceflow_core::notify::OutboxNotifier;
use invoiceflow_db::{load_reference_data, ReferenceData};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });

            match load_reference_data(&config.catalog) {
                Ok(reference) => {
                    checks.push(catalog_check(&config, &reference));
                    checks.push(routing_check(reference));
                }
                Err(error) => {
                    checks.push(DoctorCheck {
                        name: "catalog_load",
                        status: CheckStatus::Fail,
                        details: error.to_string(),
                    });
                    checks.push(skipped("sample_routing", "catalog did not load"));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("catalog_load", "configuration did not load"));
            checks.push(skipped("sample_routing", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: format!("skipped because {reason}"),
    }
}

fn catalog_check(config: &AppConfig, reference: &ReferenceData) -> DoctorCheck {
    let source = config
        .catalog
        .path
        .as_ref()
        .map(|path| format!("`{}`", path.display()))
        .unwrap_or_else(|| "built-in seed".to_string());
    let approvers = reference.directory.len();
    let rules = reference.rules.rule_count();

    if approvers == 0 || rules == 0 {
        return DoctorCheck {
            name: "catalog_load",
            status: CheckStatus::Fail,
            details: format!(
                "{source} loaded but is empty ({approvers} approver(s), {rules} rule(s))"
            ),
        };
    }

    DoctorCheck {
        name: "catalog_load",
        status: CheckStatus::Pass,
        details: format!("{source}: {approvers} approver(s), {rules} rule(s)"),
    }
}

/// Routes a small invoice through the loaded catalog to prove the engine runs end to end.
fn routing_check(reference: ReferenceData) -> DoctorCheck {
    let engine = reference.into_engine(Arc::new(OutboxNotifier::default()));
    let outcome = InvoiceApprovalRequest::new(Decimal::new(100, 0), Department::Sales, false)
        .map_err(|error| error.to_string())
        .and_then(|request| engine.execute(request).map_err(|error| error.to_string()));

    match outcome {
        Ok(result) => DoctorCheck {
            name: "sample_routing",
            status: CheckStatus::Pass,
            details: format!(
                "100 / SALES / no manager approval matched {} rule(s) and selected {} approver(s)",
                result.rules_applied.len(),
                result.selected_approvers.len()
            ),
        },
        Err(error) => {
            DoctorCheck { name: "sample_routing", status: CheckStatus::Fail, details: error }
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
