// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ticket_desk_audit::{
    AssignmentRecord, Ticket, current_area, last_valid_crew_assignment, latest_area_assignment,
};
use ticket_desk_domain::{ActingUser, AreaId, CrewId, validate_reopen_area, validate_reopen_reason};
use tracing::debug;

use crate::command::{AssignmentMode, AssignmentRequest};
use crate::error::CoreError;
use crate::policy::AssignmentPolicy;
use crate::state::AssignmentPlan;

/// The result of comparing a submitted assignment with a ticket's history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentDecision {
    /// The submitted area differs from the current one and the actor may
    /// route tickets.
    pub area_changed: bool,
    /// The newest area record is strictly newer than the newest valid crew
    /// record.
    pub area_newer_than_crew: bool,
    /// A crew call is required.
    pub need_new_crew: bool,
    /// The area to send, when `area_changed`.
    pub target_area: Option<AreaId>,
    /// The crew to send, when `need_new_crew`.
    pub target_crew: Option<CrewId>,
}

impl AssignmentDecision {
    /// Converts the decision into the ordered plan of remote calls.
    #[must_use]
    pub fn into_plan(self) -> AssignmentPlan {
        match (self.target_area, self.target_crew) {
            (Some(area), Some(crew)) => AssignmentPlan::AreaThenCrew { area, crew },
            (Some(area), None) => AssignmentPlan::AreaOnly(area),
            (None, Some(crew)) => AssignmentPlan::CrewOnly(crew),
            (None, None) => AssignmentPlan::Unchanged,
        }
    }
}

/// Decides which parts of an assign-mode submission must be persisted.
///
/// Fields the actor is not permitted to change are dropped silently.
///
/// # Arguments
///
/// * `policy` - The role table
/// * `actor` - The user submitting the dialog
/// * `ticket` - The ticket as last read from the backend
/// * `area` - The submitted area, if any
/// * `crew` - The submitted crew, if any
#[must_use]
pub fn detect_changes(
    policy: &AssignmentPolicy,
    actor: &ActingUser,
    ticket: &Ticket,
    area: Option<&AreaId>,
    crew: Option<&CrewId>,
) -> AssignmentDecision {
    let previous_area: Option<&AreaId> = current_area(ticket);
    let area_changed: bool = policy.can_assign_area(actor)
        && area.is_some_and(|submitted| Some(submitted) != previous_area);

    let previous_crew = last_valid_crew_assignment(ticket);
    let area_newer_than_crew: bool = match (
        latest_area_assignment(ticket).and_then(AssignmentRecord::assigned_at),
        previous_crew.and_then(AssignmentRecord::assigned_at),
    ) {
        (Some(area_at), Some(crew_at)) => area_at > crew_at,
        _ => false,
    };

    let crew_differs: bool = match (crew, previous_crew) {
        (Some(submitted), Some(previous)) => {
            !previous.is_valid() || *submitted != previous.cuadrilla
        }
        _ => true,
    };
    let need_new_crew: bool = policy.can_assign_crew(actor, ticket, AssignmentMode::Assign)
        && crew.is_some()
        && (area_changed || area_newer_than_crew || crew_differs);

    debug!(
        ticket = %ticket.id,
        area_changed,
        area_newer_than_crew,
        need_new_crew,
        "Detected assignment changes"
    );

    AssignmentDecision {
        area_changed,
        area_newer_than_crew,
        need_new_crew,
        target_area: area.filter(|_| area_changed).cloned(),
        target_crew: crew.filter(|_| need_new_crew).cloned(),
    }
}

/// Builds the plan of remote calls for a dialog submission.
///
/// Reopen requests ignore any crew and always produce a single reopen call.
///
/// # Errors
///
/// Returns an error if a reopen request has no area or a blank reason.
pub fn plan_assignment(
    policy: &AssignmentPolicy,
    actor: &ActingUser,
    ticket: &Ticket,
    request: &AssignmentRequest,
) -> Result<AssignmentPlan, CoreError> {
    match request {
        AssignmentRequest::Assign { area, crew } => {
            Ok(detect_changes(policy, actor, ticket, area.as_ref(), crew.as_ref()).into_plan())
        }
        AssignmentRequest::Reopen { area, reason } => plan_reopen(area.as_ref(), reason),
    }
}

/// Builds the single-call plan for reopening a ticket.
///
/// The ticket's history plays no part in a reopen, so no ticket is needed.
///
/// # Errors
///
/// Returns an error if `area` is missing or `reason` is blank after trimming.
pub fn plan_reopen(area: Option<&AreaId>, reason: &str) -> Result<AssignmentPlan, CoreError> {
    let area: AreaId = validate_reopen_area(area)?;
    let reason: String = validate_reopen_reason(reason)?;
    Ok(AssignmentPlan::Reopen { area, reason })
}
