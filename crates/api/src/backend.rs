// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The boundary to the authoritative ticket backend.
//!
//! Every remote call the assignment workflow makes goes through
//! [`TicketBackend`]. The HTTP implementation lives in the client crate;
//! tests use in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ticket_desk_audit::Ticket;
use ticket_desk_domain::{AreaId, Crew, CrewId, Role, ShiftId, TicketId, User, UserId};

/// Page size used when loading user pools for crew eligibility.
pub const POOL_PAGE_SIZE: u32 = 500;

/// Errors returned by a [`TicketBackend`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The backend answered with a non-2xx status.
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("Backend request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Backend response could not be decoded: {0}")]
    Decode(String),

    /// An identifier cannot be placed in a request path.
    #[error("Identifier '{0}' is not a valid path segment")]
    InvalidPathSegment(String),
}

impl BackendError {
    /// Returns the HTTP status, if the backend produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) | Self::InvalidPathSegment(_) => None,
        }
    }

    /// Whether the backend reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Body of a reopen call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReopenTicketRequest {
    /// The ticket to reopen.
    pub ticket_id: TicketId,
    /// The area the ticket is routed to.
    pub area_id: AreaId,
    /// The operator's reason, already trimmed.
    pub reason: String,
}

/// Filters for the light user search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchFilters {
    /// Restrict to users of this area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaId>,
    /// Restrict to users with this role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Restrict by active flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UserSearchFilters {
    /// Active users of `area`, optionally restricted to `role`.
    #[must_use]
    pub fn active_in_area(area: &AreaId, role: Option<Role>) -> Self {
        Self {
            area: Some(area.clone()),
            role,
            active: Some(true),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Sort order for searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort by.
    pub field: String,
    /// Direction.
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: String::from("name"),
            direction: SortDirection::Asc,
        }
    }
}

/// One page of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// 1-based page number.
    pub page: u32,
    /// Entries per page.
    pub page_size: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: POOL_PAGE_SIZE,
        }
    }
}

/// Payload for creating a crew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCrew {
    /// Display name.
    pub name: String,
    /// Owning area.
    pub area: AreaId,
    /// Supervisor.
    pub supervisor: UserId,
    /// Members, always including the supervisor.
    pub members: Vec<UserId>,
    /// Whether the crew accepts assignments.
    pub available: bool,
    /// Optional shift reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<ShiftId>,
}

/// Partial update of a crew. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewPatch {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New owning area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaId>,
    /// New supervisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<UserId>,
    /// New member list, always including the supervisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<UserId>>,
    /// New availability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    /// New shift reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<ShiftId>,
}

impl CrewPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.area.is_none()
            && self.supervisor.is_none()
            && self.members.is_none()
            && self.available.is_none()
            && self.shift.is_none()
    }
}

/// Remote operations of the ticket backend.
///
/// Implementations must be safe to share across tasks.
#[async_trait]
pub trait TicketBackend: Send + Sync {
    /// Routes a ticket to an area.
    async fn assign_area(&self, ticket: &TicketId, area: &AreaId) -> Result<(), BackendError>;

    /// Assigns a crew to a ticket.
    async fn assign_cuadrilla(&self, ticket: &TicketId, crew: &CrewId)
    -> Result<(), BackendError>;

    /// Reopens a ticket into an area.
    async fn reopen_ticket(&self, request: &ReopenTicketRequest) -> Result<(), BackendError>;

    /// Loads a ticket with its assignment history.
    async fn get_ticket(&self, ticket: &TicketId) -> Result<Ticket, BackendError>;

    /// Lists the crews of an area.
    async fn get_cuadrillas(&self, area: &AreaId) -> Result<Vec<Crew>, BackendError>;

    /// Lists users already bound to some crew of an area.
    async fn list_busy_user_ids(&self, area: &AreaId) -> Result<Vec<UserId>, BackendError>;

    /// Searches users with a lightweight projection.
    async fn search_light(
        &self,
        filters: &UserSearchFilters,
        sort: &SortSpec,
        paging: &Paging,
    ) -> Result<Vec<User>, BackendError>;

    /// Creates a crew.
    async fn create_crew(&self, crew: &NewCrew) -> Result<Crew, BackendError>;

    /// Applies a partial update to a crew.
    async fn update_crew(&self, id: &CrewId, patch: &CrewPatch) -> Result<Crew, BackendError>;
}
