// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose which assignment dialog fields are enabled for the
//! acting user. They are advisory only and do not replace the checks made
//! when a submission is planned.

use ticket_desk::{AssignmentMode, AssignmentPolicy};
use ticket_desk_audit::Ticket;
use ticket_desk_domain::ActingUser;

use crate::request_response::{Capability, TicketCapabilities};

/// Computes the dialog capabilities of `actor` for `ticket`.
///
/// # Arguments
///
/// * `policy` - The role table
/// * `actor` - The acting user
/// * `ticket` - The ticket as last read from the backend
/// * `mode` - The mode the dialog was opened in
#[must_use]
pub fn compute_ticket_capabilities(
    policy: &AssignmentPolicy,
    actor: &ActingUser,
    ticket: &Ticket,
    mode: AssignmentMode,
) -> TicketCapabilities {
    let can_assign_area: bool = policy.can_assign_area(actor);

    TicketCapabilities {
        can_assign_area: Capability::from_bool(can_assign_area),
        can_assign_crew: Capability::from_bool(policy.can_assign_crew(actor, ticket, mode)),
        can_reopen: Capability::from_bool(can_assign_area),
    }
}
