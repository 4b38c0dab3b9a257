// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derivation of a ticket's current routing from its assignment logs.
//!
//! All functions are pure reads and treat empty logs as "none".

use ticket_desk_domain::{AreaId, CrewId};

use crate::record::{AreaAssignment, CrewAssignment};
use crate::ticket::Ticket;

/// Returns the newest area assignment of `ticket`.
#[must_use]
pub fn latest_area_assignment(ticket: &Ticket) -> Option<&AreaAssignment> {
    ticket.area_assignments.latest()
}

/// Returns the area the ticket is currently routed to.
///
/// This is the area of the newest area assignment, regardless of whether
/// that area accepted or rejected it.
#[must_use]
pub fn current_area(ticket: &Ticket) -> Option<&AreaId> {
    latest_area_assignment(ticket).map(|assignment| &assignment.area)
}

/// Returns the newest crew assignment not marked `valid: false`.
///
/// Any trailing run of invalidated entries is skipped.
#[must_use]
pub fn last_valid_crew_assignment(ticket: &Ticket) -> Option<&CrewAssignment> {
    ticket
        .crew_assignments
        .latest_matching(|assignment| assignment.is_valid())
}

/// Returns the crew of the newest valid crew assignment.
#[must_use]
pub fn current_crew(ticket: &Ticket) -> Option<&CrewId> {
    last_valid_crew_assignment(ticket).map(|assignment| &assignment.cuadrilla)
}
