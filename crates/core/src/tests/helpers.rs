// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::macros::datetime;
use ticket_desk_audit::{AreaAssignment, CrewAssignment, Ticket};
use ticket_desk_domain::{ActingUser, AreaId, CrewId, Role, TicketId, UserId};

pub fn t(minutes: i64) -> OffsetDateTime {
    datetime!(2026-03-02 08:00 UTC) + time::Duration::minutes(minutes)
}

pub fn admin() -> ActingUser {
    ActingUser::new(UserId::new("u-admin"), Role::Admin, None)
}

pub fn dispatcher() -> ActingUser {
    ActingUser::new(UserId::new("u-atencion"), Role::Atencion, None)
}

pub fn funcionario(home: Option<&str>) -> ActingUser {
    ActingUser::new(
        UserId::new("u-func"),
        Role::Funcionario,
        home.map(AreaId::new),
    )
}

pub fn citizen() -> ActingUser {
    ActingUser::new(UserId::new("u-citizen"), Role::Ciudadano, None)
}

pub fn area(id: &str) -> AreaId {
    AreaId::new(id)
}

pub fn crew(id: &str) -> CrewId {
    CrewId::new(id)
}

/// A ticket routed to `area_id` at `area_minutes`, with an optional crew
/// assigned at the given minute offset.
pub fn ticket_with(area_id: &str, area_minutes: i64, crew_at: Option<(&str, i64)>) -> Ticket {
    let mut ticket = Ticket::new(TicketId::new("T-1"));
    ticket.area_assignments.append(AreaAssignment::new(
        area(area_id),
        t(area_minutes),
        UserId::new("u-atencion"),
    ));
    if let Some((crew_id, minutes)) = crew_at {
        ticket.crew_assignments.append(CrewAssignment::new(
            crew(crew_id),
            t(minutes),
            UserId::new("u-admin"),
        ));
    }
    ticket
}

pub fn empty_ticket() -> Ticket {
    Ticket::new(TicketId::new("T-1"))
}
