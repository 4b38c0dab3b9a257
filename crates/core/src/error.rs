// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ticket_desk_domain::DomainError;

use crate::state::OrchestratorState;

/// Errors that can occur while planning or sequencing an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A submission attempted an illegal state transition.
    InvalidTransition {
        /// The state the submission was in.
        from: OrchestratorState,
        /// The state it tried to enter.
        to: OrchestratorState,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidTransition { from, to } => {
                write!(f, "Invalid assignment transition from {from:?} to {to:?}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
