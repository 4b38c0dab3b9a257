// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.

use serde::{Deserialize, Serialize};
use ticket_desk::{AssignmentStep, OrchestratorState};
use ticket_desk_domain::{AreaId, Crew, CrewId, ShiftId, TicketId, User, UserId};

/// Body of an assign-mode submission.
///
/// Both fields are optional: a disabled or untouched dialog field is simply
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignTicketRequest {
    /// The area picked in the dialog.
    #[serde(default)]
    pub area: Option<AreaId>,
    /// The crew picked in the dialog.
    #[serde(default)]
    pub crew: Option<CrewId>,
}

/// Body of a reopen submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReopenRequest {
    /// The target area.
    #[serde(default)]
    pub area: Option<AreaId>,
    /// Why the ticket is being reopened.
    #[serde(default)]
    pub reason: String,
}

/// Body of a crew-only retry after a partial failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryCrewRequest {
    /// The crew to assign.
    pub crew: CrewId,
}

/// How a submission ended, as reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Every planned call succeeded.
    Committed,
    /// Nothing needed to be persisted.
    Unchanged,
    /// A planned call failed.
    Failed,
}

/// Response for any assignment submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    /// The ticket that was submitted.
    pub ticket_id: TicketId,
    /// How the submission ended.
    pub outcome: SubmissionStatus,
    /// The step that failed, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<AssignmentStep>,
    /// Error message of the failed step, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// On failure, whether the area call had already been stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_committed: Option<bool>,
    /// States the submission went through.
    pub transitions: Vec<OrchestratorState>,
}

// ========================================================================
// Capability Model
// ========================================================================

/// Represents whether a specific action is permitted.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false for API compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// What the acting user may do in the assignment dialog for one ticket.
///
/// Mirrors which dialog fields are enabled. Advisory only; submissions are
/// re-checked when planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCapabilities {
    /// Whether the area field is enabled.
    pub can_assign_area: Capability,
    /// Whether the crew field is enabled.
    pub can_assign_crew: Capability,
    /// Whether the reopen action is offered.
    pub can_reopen: Capability,
}

// ========================================================================
// Crews
// ========================================================================

/// Candidates for a crew of one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewEligibility {
    /// The area the candidates belong to.
    pub area: AreaId,
    /// Active users of the area not bound to another crew.
    pub available_members: Vec<User>,
    /// Active supervisors of the area not bound to another crew.
    pub eligible_supervisors: Vec<User>,
    /// The busy-user lookup failed and everyone was treated as free.
    pub busy_lookup_degraded: bool,
}

impl CrewEligibility {
    /// Ids of `available_members`.
    #[must_use]
    pub fn member_ids(&self) -> Vec<UserId> {
        self.available_members.iter().map(|u| u.id.clone()).collect()
    }

    /// Ids of `eligible_supervisors`.
    #[must_use]
    pub fn supervisor_ids(&self) -> Vec<UserId> {
        self.eligible_supervisors
            .iter()
            .map(|u| u.id.clone())
            .collect()
    }
}

/// Crew create/edit dialog contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCrewRequest {
    /// Display name.
    pub name: String,
    /// Owning area.
    #[serde(default)]
    pub area: Option<AreaId>,
    /// Supervisor.
    #[serde(default)]
    pub supervisor: Option<UserId>,
    /// Selected members, with or without the supervisor.
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Whether the crew accepts assignments.
    #[serde(default = "default_available")]
    pub available: bool,
    /// Optional shift reference.
    #[serde(default)]
    pub shift: Option<ShiftId>,
    /// On update, the area the crew belongs to before this edit. Defaults
    /// to `area`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_area: Option<AreaId>,
}

const fn default_available() -> bool {
    true
}

/// How a crew save ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewSaveStatus {
    /// A new crew was created.
    Created,
    /// An existing crew was updated.
    Updated,
    /// The edit matched the stored crew; nothing was sent.
    Unchanged,
}

/// Response for a crew save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveCrewResponse {
    /// How the save ended.
    pub outcome: CrewSaveStatus,
    /// The crew as stored.
    pub crew: Crew,
}
