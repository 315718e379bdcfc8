use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use invoiceflow_core::workflow::WorkflowEngine;
use serde::Serialize;
use tracing::warn;

#[derive(Clone)]
pub struct HealthState {
    engine: WorkflowEngine,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub rules: HealthCheck,
    pub approvers: HealthCheck,
    pub checked_at: String,
}

pub fn router(engine: WorkflowEngine) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { engine })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let rules = counted("rules", state.engine.rules().map(|rules| rules.len()));
    let approvers =
        counted("approvers", state.engine.directory().find_all().map(|approvers| approvers.len()));
    let ready = rules.status == "ready" && approvers.status == "ready";

    if !ready {
        warn!(
            event_name = "system.health.degraded",
            correlation_id = "health",
            rules = %rules.detail,
            approvers = %approvers.detail,
            "reference data is not ready"
        );
    }

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        rules,
        approvers,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn counted<E: std::fmt::Display>(label: &str, count: Result<usize, E>) -> HealthCheck {
    match count {
        Ok(0) => HealthCheck { status: "degraded", detail: format!("no {label} loaded") },
        Ok(count) => HealthCheck { status: "ready", detail: format!("{count} {label} loaded") },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("{label} unavailable: {error}") }
        }
    }
}
