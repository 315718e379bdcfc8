use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use invoiceflow_core::config::{AppConfig, LoadOptions, LogFormat};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in seed>".to_string());
    let fields: [(&str, String, &[&str]); 8] = [
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            &["INVOICEFLOW_SERVER_BIND_ADDRESS"],
        ),
        ("server.port", config.server.port.to_string(), &["INVOICEFLOW_SERVER_PORT"]),
        (
            "server.request_timeout_secs",
            config.server.request_timeout_secs.to_string(),
            &["INVOICEFLOW_SERVER_REQUEST_TIMEOUT_SECS"],
        ),
        ("catalog.path", catalog_path, &["INVOICEFLOW_CATALOG_PATH"]),
        ("catalog.strict", config.catalog.strict.to_string(), &["INVOICEFLOW_CATALOG_STRICT"]),
        (
            "notifications.channel",
            config.notifications.channel.clone(),
            &["INVOICEFLOW_NOTIFICATIONS_CHANNEL"],
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            &["INVOICEFLOW_LOGGING_LEVEL", "INVOICEFLOW_LOG_LEVEL"],
        ),
        (
            "logging.format",
            log_format_name(config.logging.format).to_string(),
            &["INVOICEFLOW_LOGGING_FORMAT", "INVOICEFLOW_LOG_FORMAT"],
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, value, env_keys) in &fields {
        let source =
            field_source(key, env_keys, config_file_doc.as_ref(), config_file_path.as_deref());
        lines.push(render_line(key, value, source));
    }

    lines.join("\n")
}

fn log_format_name(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    }
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("invoiceflow.toml"), PathBuf::from("config/invoiceflow.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    let from_env = env_keys
        .iter()
        .find(|env_key| env::var(env_key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = from_env {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
