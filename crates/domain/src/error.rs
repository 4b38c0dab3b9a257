// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::UserId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A role string is empty or malformed.
    InvalidRole(String),
    /// A reopen request did not name a target area.
    MissingReopenArea,
    /// A reopen request carried an empty or blank reason.
    MissingReopenReason,
    /// A crew name is empty or invalid.
    InvalidCrewName(String),
    /// A crew form has no area selected.
    MissingCrewArea,
    /// A crew form has no supervisor selected.
    MissingSupervisor,
    /// The selected supervisor is not eligible for this area.
    IneligibleSupervisor {
        /// The rejected supervisor.
        user: UserId,
    },
    /// A selected member is busy on another crew or outside the area.
    UnavailableMember {
        /// The rejected member.
        user: UserId,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::MissingReopenArea => write!(f, "Reopening a ticket requires a target area"),
            Self::MissingReopenReason => {
                write!(f, "Reopening a ticket requires a non-empty reason")
            }
            Self::InvalidCrewName(msg) => write!(f, "Invalid crew name: {msg}"),
            Self::MissingCrewArea => write!(f, "A crew must belong to an area"),
            Self::MissingSupervisor => write!(f, "A crew must have a supervisor"),
            Self::IneligibleSupervisor { user } => {
                write!(f, "User '{user}' is not an eligible supervisor for this area")
            }
            Self::UnavailableMember { user } => {
                write!(f, "User '{user}' is not available as a crew member")
            }
        }
    }
}

impl std::error::Error for DomainError {}
