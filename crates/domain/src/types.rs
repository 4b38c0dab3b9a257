// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Declares an opaque string identifier issued by the ticket backend.
///
/// Identifiers compare as plain strings. The backend owns their format.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its backend string form.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a citizen-reported ticket.
    TicketId
);
opaque_id!(
    /// Identifier of an area (department).
    AreaId
);
opaque_id!(
    /// Identifier of a crew ("cuadrilla").
    CrewId
);
opaque_id!(
    /// Identifier of a user account.
    UserId
);
opaque_id!(
    /// Identifier of a work shift ("turno").
    ShiftId
);

/// Role carried by a user account.
///
/// Roles arrive as lowercase strings from the identity provider and the
/// ticket backend. Unrecognised roles are kept verbatim in `Other` so an
/// unfamiliar session never fails to parse; such users hold no assignment
/// capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full back-office authority.
    Admin,
    /// Dispatch desk ("atención"). Routes tickets to areas.
    Atencion,
    /// Field staff of an area. Assigns crews within their own area.
    Funcionario,
    /// Crew supervisor.
    Supervisor,
    /// Crew member.
    Cuadrilla,
    /// Reporting citizen.
    Ciudadano,
    /// Any role string this service does not know about.
    Other(String),
}

impl Role {
    /// Returns the wire representation of this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Atencion => "atencion",
            Self::Funcionario => "funcionario",
            Self::Supervisor => "supervisor",
            Self::Cuadrilla => "cuadrilla",
            Self::Ciudadano => "ciudadano",
            Self::Other(raw) => raw,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRole(String::from(
                "Role cannot be empty",
            )));
        }
        Ok(Self::from(trimmed.to_string()))
    }
}

impl From<String> for Role {
    /// Matches known roles case-insensitively; anything else is kept as
    /// sent.
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "admin" => Self::Admin,
            "atencion" => Self::Atencion,
            "funcionario" => Self::Funcionario,
            "supervisor" => Self::Supervisor,
            "cuadrilla" => Self::Cuadrilla,
            "ciudadano" => Self::Ciudadano,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field crew ("cuadrilla") scoped to exactly one area.
///
/// `members` as stored by the backend always includes the supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crew {
    /// The backend identifier.
    pub id: CrewId,
    /// Display name of the crew.
    pub name: String,
    /// The owning area.
    pub area: AreaId,
    /// The crew supervisor.
    pub supervisor: UserId,
    /// Member user ids.
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Whether the crew currently accepts assignments.
    #[serde(default = "default_true")]
    pub available: bool,
    /// Optional shift reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<ShiftId>,
}

impl Crew {
    /// Returns every user bound to this crew: the supervisor and its members.
    pub fn roster_ids(&self) -> impl Iterator<Item = &UserId> {
        std::iter::once(&self.supervisor).chain(self.members.iter())
    }
}

const fn default_true() -> bool {
    true
}

/// A user account as returned by the backend's light user search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The backend identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// The user's role.
    pub role: Role,
    /// The user's home area, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaId>,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub active: bool,
}

/// The user acting through a dialog, as reported by the session provider.
///
/// Identity is never derived by this service; it is handed in from the
/// cookie-backed session layer in front of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser {
    /// The acting user's id.
    pub id: UserId,
    /// The acting user's role.
    pub role: Role,
    /// The acting user's home area, if any.
    pub home_area: Option<AreaId>,
}

impl ActingUser {
    /// Creates a new `ActingUser`.
    ///
    /// # Arguments
    ///
    /// * `id` - The acting user's id
    /// * `role` - The acting user's role
    /// * `home_area` - The acting user's home area, if any
    #[must_use]
    pub const fn new(id: UserId, role: Role, home_area: Option<AreaId>) -> Self {
        Self {
            id,
            role,
            home_area,
        }
    }
}
