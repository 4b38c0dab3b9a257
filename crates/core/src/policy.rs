// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ticket_desk_audit::{Ticket, current_area};
use ticket_desk_domain::{ActingUser, Role};

use crate::command::AssignmentMode;

/// Which roles may perform which assignment actions.
///
/// The default table matches the back office's role taxonomy:
/// - `admin` and `atencion` route tickets to areas
/// - `admin` assigns crews on any ticket
/// - `funcionario` assigns crews only on tickets currently routed to their
///   own home area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentPolicy {
    /// Roles allowed to route a ticket to an area.
    pub area_assigners: Vec<Role>,
    /// Roles allowed to assign a crew on any ticket.
    pub crew_assigners: Vec<Role>,
    /// Roles allowed to assign a crew only within their home area.
    pub area_scoped_crew_assigners: Vec<Role>,
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self {
            area_assigners: vec![Role::Admin, Role::Atencion],
            crew_assigners: vec![Role::Admin],
            area_scoped_crew_assigners: vec![Role::Funcionario],
        }
    }
}

impl AssignmentPolicy {
    /// Whether `actor` may route tickets to an area.
    #[must_use]
    pub fn can_assign_area(&self, actor: &ActingUser) -> bool {
        self.area_assigners.contains(&actor.role)
    }

    /// Whether `actor` may assign a crew on `ticket` in `mode`.
    ///
    /// Always `false` in reopen mode. Area-scoped roles additionally need a
    /// home area equal to the ticket's current area; a missing value on
    /// either side denies.
    #[must_use]
    pub fn can_assign_crew(
        &self,
        actor: &ActingUser,
        ticket: &Ticket,
        mode: AssignmentMode,
    ) -> bool {
        if mode == AssignmentMode::Reopen {
            return false;
        }

        if self.crew_assigners.contains(&actor.role) {
            return true;
        }

        if self.area_scoped_crew_assigners.contains(&actor.role) {
            return match (actor.home_area.as_ref(), current_area(ticket)) {
                (Some(home), Some(current)) => home == current,
                _ => false,
            };
        }

        false
    }
}
