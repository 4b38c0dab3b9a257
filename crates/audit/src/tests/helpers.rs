// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::macros::datetime;
use ticket_desk_domain::{AreaId, CrewId, TicketId, UserId};

use crate::{AreaAssignment, CrewAssignment, Ticket};

pub fn t(minutes: i64) -> OffsetDateTime {
    datetime!(2026-03-02 08:00 UTC) + time::Duration::minutes(minutes)
}

pub fn area_at(area: &str, minutes: i64) -> AreaAssignment {
    AreaAssignment::new(AreaId::new(area), t(minutes), UserId::new("dispatcher"))
}

pub fn crew_at(crew: &str, minutes: i64) -> CrewAssignment {
    CrewAssignment::new(CrewId::new(crew), t(minutes), UserId::new("field-lead"))
}

pub fn invalidated(mut assignment: CrewAssignment) -> CrewAssignment {
    assignment.valid = Some(false);
    assignment
}

pub fn empty_ticket() -> Ticket {
    Ticket::new(TicketId::new("T-100"))
}
