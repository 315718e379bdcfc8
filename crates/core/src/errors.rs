use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::department::Department;

/// Wire code returned for rejected input.
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
/// Wire code returned for every failure that is not the caller's fault.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid department: {value}. Valid values: {}", Department::names().join(", "))]
    UnknownDepartment { value: String },
    #[error("Invalid amount: {amount}. Amount must not be negative")]
    NegativeAmount { amount: Decimal },
    #[error("Invalid amount: `{value}` is not a decimal number")]
    MalformedAmount { value: String },
    #[error("Invalid request: {0}")]
    MalformedRequest(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("reference data unavailable: {0}")]
    Unavailable(String),
    #[error("could not read catalog `{path}`: {message}")]
    Read { path: String, message: String },
    #[error("could not parse catalog `{path}`: {message}")]
    Parse { path: String, message: String },
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("internal failure: {0}")]
    Internal(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => INVALID_REQUEST,
            Self::Internal { .. } => INTERNAL_ERROR,
        }
    }

    /// Message safe to hand back to the caller. Validation failures keep their specific
    /// explanation; internal failures never expose detail.
    pub fn user_message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } => message,
            Self::Internal { .. } => "An error occurred while processing the workflow",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. } | Self::Internal { correlation_id, .. } => {
                correlation_id
            }
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ValidationError> for InterfaceError {
    fn from(value: ValidationError) -> Self {
        ApplicationError::from(value).into()
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Validation(error) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Catalog(error) => Self::Internal {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Internal(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}
