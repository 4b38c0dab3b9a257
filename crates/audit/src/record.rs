// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ticket_desk_domain::{AreaId, CrewId, UserId};

/// Common view over area and crew assignment records.
pub trait AssignmentRecord {
    /// When the assignment was written, if the backend recorded it.
    fn assigned_at(&self) -> Option<OffsetDateTime>;

    /// Who wrote the assignment, if the backend recorded it.
    fn assigned_by(&self) -> Option<&UserId>;

    /// Whether the assignee rejected this assignment.
    fn is_rejected(&self) -> bool;
}

/// One entry of a ticket's area log.
///
/// Immutable once written. A rejection is recorded on the same entry by the
/// backend (`accepted = false`, `rejected_by`, `rejection_reason`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaAssignment {
    /// The area the ticket was routed to.
    pub area: AreaId,
    /// `None` while the area has not responded.
    #[serde(default)]
    pub accepted: Option<bool>,
    /// Reason given when the area rejected the ticket.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// When the area accepted or rejected.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub responded_at: Option<OffsetDateTime>,
    /// When the assignment was written.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub assigned_at: Option<OffsetDateTime>,
    /// The user who routed the ticket.
    #[serde(default)]
    pub assigned_by: Option<UserId>,
    /// The user who rejected the ticket on behalf of the area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<UserId>,
}

impl AreaAssignment {
    /// Creates a fresh, unanswered area assignment.
    ///
    /// # Arguments
    ///
    /// * `area` - The target area
    /// * `assigned_at` - When the assignment was made
    /// * `assigned_by` - Who made it
    #[must_use]
    pub const fn new(area: AreaId, assigned_at: OffsetDateTime, assigned_by: UserId) -> Self {
        Self {
            area,
            accepted: None,
            rejection_reason: None,
            responded_at: None,
            assigned_at: Some(assigned_at),
            assigned_by: Some(assigned_by),
            rejected_by: None,
        }
    }
}

impl AssignmentRecord for AreaAssignment {
    fn assigned_at(&self) -> Option<OffsetDateTime> {
        self.assigned_at
    }

    fn assigned_by(&self) -> Option<&UserId> {
        self.assigned_by.as_ref()
    }

    fn is_rejected(&self) -> bool {
        self.accepted == Some(false)
    }
}

/// One entry of a ticket's crew log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewAssignment {
    /// The crew the ticket was handed to.
    pub cuadrilla: CrewId,
    /// `None` while the crew has not responded.
    #[serde(default)]
    pub accepted: Option<bool>,
    /// Reason given when the crew rejected the ticket.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// When the crew accepted or rejected.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub responded_at: Option<OffsetDateTime>,
    /// When the assignment was written.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub assigned_at: Option<OffsetDateTime>,
    /// The user who handed the ticket to the crew.
    #[serde(default)]
    pub assigned_by: Option<UserId>,
    /// Externally-set flag. `Some(false)` retires this entry as the active
    /// crew; absent means the entry was never invalidated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl CrewAssignment {
    /// Creates a fresh, unanswered crew assignment.
    #[must_use]
    pub const fn new(cuadrilla: CrewId, assigned_at: OffsetDateTime, assigned_by: UserId) -> Self {
        Self {
            cuadrilla,
            accepted: None,
            rejection_reason: None,
            responded_at: None,
            assigned_at: Some(assigned_at),
            assigned_by: Some(assigned_by),
            valid: None,
        }
    }

    /// Returns `true` unless the entry was explicitly marked `valid: false`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid != Some(false)
    }
}

impl AssignmentRecord for CrewAssignment {
    fn assigned_at(&self) -> Option<OffsetDateTime> {
        self.assigned_at
    }

    fn assigned_by(&self) -> Option<&UserId> {
        self.assigned_by.as_ref()
    }

    fn is_rejected(&self) -> bool {
        self.accepted == Some(false)
    }
}
