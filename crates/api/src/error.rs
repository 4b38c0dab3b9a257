// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use ticket_desk::CoreError;
use ticket_desk_domain::{DomainError, TicketId};

use crate::backend::BackendError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No usable identity was supplied.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The acting user may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The ticket backend failed.
    Upstream {
        /// The remote operation that failed.
        operation: String,
        /// The backend's HTTP status, when it answered.
        status: Option<u16>,
        /// A human-readable description of the failure.
        message: String,
    },
    /// Another submission for the same dialog is still running.
    SubmissionInFlight {
        /// The ticket being submitted.
        ticket: TicketId,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Upstream {
                operation, message, ..
            } => {
                write!(f, "Backend call '{operation}' failed: {message}")
            }
            Self::SubmissionInFlight { ticket } => {
                write!(f, "An assignment for ticket {ticket} is already being submitted")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidRole(msg) => ApiError::InvalidInput {
            field: String::from("role"),
            message: msg,
        },
        DomainError::MissingReopenArea => ApiError::InvalidInput {
            field: String::from("area"),
            message: err.to_string(),
        },
        DomainError::MissingReopenReason => ApiError::InvalidInput {
            field: String::from("reason"),
            message: err.to_string(),
        },
        DomainError::InvalidCrewName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::MissingCrewArea => ApiError::InvalidInput {
            field: String::from("area"),
            message: err.to_string(),
        },
        DomainError::MissingSupervisor => ApiError::InvalidInput {
            field: String::from("supervisor"),
            message: err.to_string(),
        },
        DomainError::IneligibleSupervisor { .. } => ApiError::DomainRuleViolation {
            rule: String::from("eligible_supervisor"),
            message: err.to_string(),
        },
        DomainError::UnavailableMember { .. } => ApiError::DomainRuleViolation {
            rule: String::from("available_member"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidTransition { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a backend error for `operation` into an API error.
///
/// An unusable path identifier becomes `InvalidInput` and a 404 from the
/// backend becomes `ResourceNotFound`; everything else is reported as an
/// upstream failure.
#[must_use]
pub fn translate_backend_error(operation: &str, err: &BackendError) -> ApiError {
    if let BackendError::InvalidPathSegment(id) = err {
        return ApiError::InvalidInput {
            field: String::from("id"),
            message: format!("'{id}' is not a valid identifier"),
        };
    }
    if err.is_not_found() {
        return ApiError::ResourceNotFound {
            resource_type: String::from(resource_for(operation)),
            message: err.to_string(),
        };
    }
    ApiError::Upstream {
        operation: operation.to_string(),
        status: err.status(),
        message: err.to_string(),
    }
}

fn resource_for(operation: &str) -> &'static str {
    match operation {
        "get_cuadrillas" | "update_crew" => "Crew",
        "search_light" => "User",
        _ => "Ticket",
    }
}
