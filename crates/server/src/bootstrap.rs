use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Router};
use invoiceflow_core::config::{AppConfig, ConfigError};
use invoiceflow_core::errors::CatalogError;
use invoiceflow_core::notify::LoggingNotifier;
use invoiceflow_core::workflow::WorkflowEngine;
use invoiceflow_db::load_reference_data;
use tera::Tera;
use thiserror::Error;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::{health, ui, workflow};

pub struct Application {
    pub config: AppConfig,
    pub engine: WorkflowEngine,
    pub templates: Arc<Tera>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("reference data could not be loaded: {0}")]
    Catalog(#[from] CatalogError),
    #[error("ui templates could not be parsed: {0}")]
    Templates(#[from] tera::Error),
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let reference = load_reference_data(&config.catalog)?;
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        approvers = reference.directory.len(),
        rules = reference.rules.rule_count(),
        strict = config.catalog.strict,
        "approver directory and rule store ready"
    );

    let notifier = Arc::new(LoggingNotifier::new(config.notifications.channel.clone()));
    let engine = reference.into_engine(notifier);
    let templates = ui::templates()?;

    Ok(Application { config, engine, templates })
}

impl Application {
    pub fn router(&self) -> Router {
        let timeout = Duration::from_secs(self.config.server.request_timeout_secs);

        let routes = Router::new()
            .merge(workflow::router(self.engine.clone()))
            .merge(health::router(self.engine.clone()))
            .merge(ui::router(self.engine.clone(), Arc::clone(&self.templates)));
        with_layers(routes, timeout)
    }
}

fn with_layers(routes: Router, timeout: Duration) -> Router {
    routes
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(TraceLayer::new_for_http())
}
