// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use ticket_desk_domain::{AreaId, CrewId, TicketId};

use crate::log::AssignmentLog;
use crate::record::{AreaAssignment, CrewAssignment};

/// A citizen-reported ticket together with its assignment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// The backend identifier.
    pub id: TicketId,
    /// Backend status string (`open`, `assigned`, `rejected`, ...). Display only.
    #[serde(default)]
    pub status: Option<String>,
    /// Area routing history, oldest first.
    #[serde(default)]
    pub area_assignments: AssignmentLog<AreaAssignment>,
    /// Crew routing history, oldest first.
    #[serde(default)]
    pub crew_assignments: AssignmentLog<CrewAssignment>,
    /// Denormalized current area. Never consulted for decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_area: Option<AreaId>,
    /// Denormalized current crew. Never consulted for decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_cuadrilla: Option<CrewId>,
}

impl Ticket {
    /// Creates a ticket with empty assignment logs.
    #[must_use]
    pub const fn new(id: TicketId) -> Self {
        Self {
            id,
            status: None,
            area_assignments: AssignmentLog::new(),
            crew_assignments: AssignmentLog::new(),
            current_area: None,
            current_cuadrilla: None,
        }
    }
}
