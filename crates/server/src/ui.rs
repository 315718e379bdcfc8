//! Server-rendered form for trying the workflow from a browser.
//!
//! - `GET  /`            empty form
//! - `POST /ui/execute`  form submission, re-renders the page with the result or the error

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use invoiceflow_core::domain::department::Department;
use invoiceflow_core::errors::{ApplicationError, InterfaceError};
use invoiceflow_core::workflow::dto::{parse_amount, ExecuteWorkflowRequest, ExecuteWorkflowResponse};
use invoiceflow_core::workflow::WorkflowEngine;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use tracing::{error, warn};
use uuid::Uuid;

use crate::workflow;

const INDEX_TEMPLATE: &str = "ui/index.html";

#[derive(Clone)]
pub struct UiState {
    engine: WorkflowEngine,
    templates: Arc<Tera>,
}

/// Browsers omit unchecked checkboxes and send `on` for checked ones.
#[derive(Debug, Deserialize)]
pub struct ExecuteForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub department: String,
    pub requires_manager_approval: Option<String>,
}

#[derive(Debug, Serialize)]
struct FormValues {
    amount: String,
    department: String,
    requires_manager_approval: bool,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            amount: String::new(),
            department: Department::Sales.as_str().to_string(),
            requires_manager_approval: false,
        }
    }
}

impl From<&ExecuteForm> for FormValues {
    fn from(form: &ExecuteForm) -> Self {
        Self {
            amount: form.amount.clone(),
            department: form.department.trim().to_ascii_uppercase(),
            requires_manager_approval: form
                .requires_manager_approval
                .as_deref()
                .is_some_and(|value| !matches!(value, "" | "false" | "off")),
        }
    }
}

pub fn templates() -> Result<Arc<Tera>, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE, include_str!("../../../templates/ui/index.html"))?;
    Ok(Arc::new(tera))
}

pub fn router(engine: WorkflowEngine, templates: Arc<Tera>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/ui/execute", post(submit_form))
        .with_state(UiState { engine, templates })
}

async fn index_page(State(state): State<UiState>) -> (StatusCode, Html<String>) {
    render(&state.templates, StatusCode::OK, &FormValues::default(), None, None)
}

async fn submit_form(
    State(state): State<UiState>,
    Form(form): Form<ExecuteForm>,
) -> (StatusCode, Html<String>) {
    let correlation_id = Uuid::new_v4().to_string();
    let values = FormValues::from(&form);

    let outcome = parse_amount(&form.amount).map_err(ApplicationError::from).and_then(|amount| {
        let request = ExecuteWorkflowRequest {
            amount,
            department: form.department.clone(),
            requires_manager_approval: values.requires_manager_approval,
        };
        workflow::run(&state.engine, request, &correlation_id)
    });

    match outcome {
        Ok(result) => {
            let response = ExecuteWorkflowResponse::from(&result);
            render(&state.templates, StatusCode::OK, &values, Some(&response), None)
        }
        Err(failure) => {
            let failure = failure.into_interface(correlation_id);
            let status = match &failure {
                InterfaceError::BadRequest { message, correlation_id } => {
                    warn!(
                        event_name = "http.ui.rejected",
                        correlation_id = %correlation_id,
                        reason = %message,
                        "form submission rejected"
                    );
                    StatusCode::BAD_REQUEST
                }
                InterfaceError::Internal { message, correlation_id } => {
                    error!(
                        event_name = "http.ui.failed",
                        correlation_id = %correlation_id,
                        error = %message,
                        "form submission failed"
                    );
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            render(&state.templates, status, &values, None, Some(failure.user_message()))
        }
    }
}

fn render(
    templates: &Tera,
    status: StatusCode,
    form: &FormValues,
    result: Option<&ExecuteWorkflowResponse>,
    error_message: Option<&str>,
) -> (StatusCode, Html<String>) {
    let mut context = Context::new();
    context.insert("departments", &Department::names());
    context.insert("form", form);
    context.insert("result", &result);
    context.insert("amount", &result.map(|response| response.amount.to_string()));
    context.insert("error", &error_message);

    match templates.render(INDEX_TEMPLATE, &context) {
        Ok(html) => (status, Html(html)),
        Err(render_error) => {
            error!(
                event_name = "http.ui.template_error",
                correlation_id = "ui",
                error = ?render_error,
                "could not render workflow form"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Template Error</h1><p>The page could not be rendered.</p>".to_string()),
            )
        }
    }
}
