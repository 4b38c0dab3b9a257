// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use ticket_desk_domain::{AreaId, CrewId};

/// A single remote call performed while executing a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStep {
    /// `assignArea`
    Area,
    /// `assignCuadrilla`
    Crew,
    /// `reopenTicket`
    Reopen,
}

impl AssignmentStep {
    /// Returns the wire representation of this step.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Crew => "crew",
            Self::Reopen => "reopen",
        }
    }
}

impl std::fmt::Display for AssignmentStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The remote calls a submission needs, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentPlan {
    /// Nothing to persist.
    Unchanged,
    /// Route to a new area only.
    AreaOnly(AreaId),
    /// Assign a crew only; the area is already correct.
    CrewOnly(CrewId),
    /// Route to a new area, then assign a crew once the area is stored.
    AreaThenCrew {
        /// The new area.
        area: AreaId,
        /// The crew to assign after the area call succeeds.
        crew: CrewId,
    },
    /// Reopen the ticket into an area, in a single call.
    Reopen {
        /// The target area.
        area: AreaId,
        /// The validated, trimmed reason.
        reason: String,
    },
}

impl AssignmentPlan {
    /// Returns the steps of this plan in the order they must run.
    #[must_use]
    pub fn steps(&self) -> Vec<AssignmentStep> {
        match self {
            Self::Unchanged => Vec::new(),
            Self::AreaOnly(_) => vec![AssignmentStep::Area],
            Self::CrewOnly(_) => vec![AssignmentStep::Crew],
            Self::AreaThenCrew { .. } => vec![AssignmentStep::Area, AssignmentStep::Crew],
            Self::Reopen { .. } => vec![AssignmentStep::Reopen],
        }
    }

    /// Whether the plan performs no remote calls.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// States an assignment submission passes through.
///
/// Valid transitions are:
/// - `Idle` → `SubmittingArea` | `SubmittingCrew` | `SubmittingReopen` | `Done`
/// - `SubmittingArea` → `SubmittingCrew` | `Done`
/// - `SubmittingCrew` → `Done`
/// - `SubmittingReopen` → `Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrchestratorState {
    /// Nothing has been sent yet.
    #[default]
    Idle,
    /// The `assignArea` call is in flight.
    SubmittingArea,
    /// The `assignCuadrilla` call is in flight.
    SubmittingCrew,
    /// The `reopenTicket` call is in flight.
    SubmittingReopen,
    /// The submission finished, successfully or not.
    Done,
}

impl OrchestratorState {
    /// Checks if a transition from this state to `target` is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Idle,
                Self::SubmittingArea | Self::SubmittingCrew | Self::SubmittingReopen | Self::Done
            ) | (Self::SubmittingArea, Self::SubmittingCrew | Self::Done)
                | (Self::SubmittingCrew | Self::SubmittingReopen, Self::Done)
        )
    }

    /// Returns the in-flight state for a step.
    #[must_use]
    pub const fn submitting(step: AssignmentStep) -> Self {
        match step {
            AssignmentStep::Area => Self::SubmittingArea,
            AssignmentStep::Crew => Self::SubmittingCrew,
            AssignmentStep::Reopen => Self::SubmittingReopen,
        }
    }

    /// Whether this state is terminal.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}
