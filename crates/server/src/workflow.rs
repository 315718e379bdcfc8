//! JSON API for running the approval workflow.
//!
//! - `POST /workflow/execute`      run the workflow for one invoice
//! - `GET  /workflow/departments`  department names in declaration order
//! - `GET  /workflow/rules`        active rules in declaration order

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use invoiceflow_core::errors::{ApplicationError, InterfaceError, ValidationError};
use invoiceflow_core::workflow::dto::{
    DepartmentsResponse, ErrorResponse, ExecuteWorkflowRequest, ExecuteWorkflowResponse,
    RuleView,
};
use invoiceflow_core::workflow::{WorkflowEngine, WorkflowResult};
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct WorkflowState {
    engine: WorkflowEngine,
}

pub fn router(engine: WorkflowEngine) -> Router {
    Router::new()
        .route("/workflow/execute", post(execute_workflow))
        .route("/workflow/departments", get(list_departments))
        .route("/workflow/rules", get(list_rules))
        .with_state(WorkflowState { engine })
}

async fn execute_workflow(
    State(state): State<WorkflowState>,
    payload: Result<Json<ExecuteWorkflowRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = ApplicationError::from(ValidationError::MalformedRequest(
                rejection.body_text(),
            ));
            return error_response(error.into_interface(correlation_id));
        }
    };

    match run(&state.engine, request, &correlation_id) {
        Ok(result) => (StatusCode::OK, Json(ExecuteWorkflowResponse::from(&result))).into_response(),
        Err(error) => error_response(error.into_interface(correlation_id)),
    }
}

/// Validates the payload and runs the engine inside a span carrying the correlation id.
pub(crate) fn run(
    engine: &WorkflowEngine,
    request: ExecuteWorkflowRequest,
    correlation_id: &str,
) -> Result<WorkflowResult, ApplicationError> {
    let span = info_span!("workflow_request", correlation_id = %correlation_id);
    span.in_scope(|| -> Result<WorkflowResult, ApplicationError> {
        let request = request.into_domain()?;
        let result = engine.execute(request)?;
        info!(
            event_name = "http.workflow.completed",
            correlation_id = %correlation_id,
            approvers = result.selected_approvers.len(),
            "workflow request completed"
        );
        Ok(result)
    })
}

fn error_response(error: InterfaceError) -> Response {
    let status = match &error {
        InterfaceError::BadRequest { message, correlation_id } => {
            warn!(
                event_name = "http.workflow.rejected",
                correlation_id = %correlation_id,
                reason = %message,
                "workflow request rejected"
            );
            StatusCode::BAD_REQUEST
        }
        InterfaceError::Internal { message, correlation_id } => {
            error!(
                event_name = "http.workflow.failed",
                correlation_id = %correlation_id,
                error = %message,
                "workflow request failed"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::from(&error))).into_response()
}

async fn list_departments() -> Json<DepartmentsResponse> {
    Json(DepartmentsResponse::all())
}

async fn list_rules(State(state): State<WorkflowState>) -> Response {
    match state.engine.rules() {
        Ok(rules) => Json(rules.iter().map(RuleView::from).collect::<Vec<_>>()).into_response(),
        Err(error) => {
            error_response(ApplicationError::from(error).into_interface(Uuid::new_v4().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use invoiceflow_core::catalog::RuleStore;
    use invoiceflow_core::domain::rule::WorkflowConfiguration;
    use invoiceflow_core::errors::CatalogError;
    use invoiceflow_core::notify::OutboxNotifier;
    use invoiceflow_core::workflow::WorkflowEngine;
    use invoiceflow_db::{InMemoryApproverDirectory, ReferenceData};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::router;

    struct BrokenRules;

    impl RuleStore for BrokenRules {
        fn active_configuration(&self) -> Result<WorkflowConfiguration, CatalogError> {
            Err(CatalogError::Unavailable("rule store offline".to_string()))
        }
    }

    fn seeded() -> Router {
        router(ReferenceData::seed().into_engine(Arc::new(OutboxNotifier::default())))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/workflow/execute")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn execute_returns_the_selected_approvers() {
        let (status, body) = send(
            seeded(),
            post_json(json!({
                "amount": 1500,
                "department": "SALES",
                "requiresManagerApproval": true
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["department"], json!("SALES"));
        assert_eq!(body["selectedApprovers"][0]["name"], json!("CFO"));
        assert_eq!(body["selectedApprovers"][0]["isManager"], json!(true));
        assert_eq!(body["notificationsSent"], json!(["notification sent to CFO"]));
        assert_eq!(body["rulesApplied"], json!(["High Amount with Manager Approval"]));
        assert_eq!(body["message"], json!("Workflow executed successfully. 1 approver(s) notified."));
    }

    #[tokio::test]
    async fn execute_accepts_string_amounts_and_lowercase_departments() {
        let (status, body) = send(
            seeded(),
            post_json(json!({
                "amount": "500",
                "department": "marketing",
                "requiresManagerApproval": true
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selectedApprovers"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["selectedApprovers"][0]["name"], json!("Marketing Manager"));
    }

    #[tokio::test]
    async fn number_amounts_keep_full_precision_at_the_threshold() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/workflow/execute")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"amount":1000.00000000000001,"department":"SALES","requiresManagerApproval":true}"#,
            ))
            .expect("request");
        let (status, body) = send(seeded(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selectedApprovers"][0]["name"], json!("CFO"));
        assert_eq!(body["rulesApplied"], json!(["High Amount with Manager Approval"]));
        assert!(body["amount"].is_number());
        assert_eq!(body["amount"].to_string(), "1000.00000000000001");
    }

    #[tokio::test]
    async fn unknown_department_is_rejected_with_invalid_request() {
        let (status, body) = send(
            seeded(),
            post_json(json!({
                "amount": 100,
                "department": "INVALID_DEPT",
                "requiresManagerApproval": false
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("INVALID_REQUEST"));
        let message = body["message"].as_str().expect("message");
        assert!(message.contains("INVALID_DEPT"));
        assert!(message.contains("OPERATIONS"));
        assert!(body.get("selectedApprovers").is_none());
    }

    #[tokio::test]
    async fn negative_amount_and_malformed_body_are_invalid_requests() {
        let (negative_status, negative) = send(
            seeded(),
            post_json(json!({
                "amount": -5,
                "department": "HR",
                "requiresManagerApproval": false
            })),
        )
        .await;
        assert_eq!(negative_status, StatusCode::BAD_REQUEST);
        assert_eq!(negative["error"], json!("INVALID_REQUEST"));

        let malformed = Request::builder()
            .method(Method::POST)
            .uri("/workflow/execute")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"amount\":"))
            .expect("request");
        let (malformed_status, body) = send(seeded(), malformed).await;
        assert_eq!(malformed_status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("INVALID_REQUEST"));
    }

    #[tokio::test]
    async fn unavailable_rules_map_to_internal_error() {
        let engine = WorkflowEngine::new(
            Arc::new(BrokenRules),
            Arc::new(InMemoryApproverDirectory::new(Vec::new())),
            Arc::new(OutboxNotifier::default()),
        );

        let (status, body) = send(
            router(engine),
            post_json(json!({
                "amount": 10,
                "department": "SALES",
                "requiresManagerApproval": false
            })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], json!("INTERNAL_ERROR"));
        assert_eq!(body["message"], json!("An error occurred while processing the workflow"));
    }

    #[tokio::test]
    async fn departments_are_listed_in_declaration_order() {
        let (status, body) = send(seeded(), get("/workflow/departments")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "departments": ["SALES", "MARKETING", "ENGINEERING", "FINANCE", "HR", "OPERATIONS"]
            })
        );
    }

    #[tokio::test]
    async fn rules_are_listed_with_routing_kind() {
        let (status, body) = send(seeded(), get("/workflow/rules")).await;

        assert_eq!(status, StatusCode::OK);
        let rules = body.as_array().expect("rule list");
        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0]["id"], json!("rule-1"));
        assert_eq!(rules[2]["routing"], json!("manager_in_department"));
        assert_eq!(rules[3]["approverIds"], json!(["emp-1", "emp-2", "emp-3"]));
    }
}
