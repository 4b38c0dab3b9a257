// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;
use time::macros::datetime;
use ticket_desk_audit::{AreaAssignment, CrewAssignment, Ticket};
use ticket_desk_domain::{ActingUser, AreaId, Crew, CrewId, Role, TicketId, User, UserId};
use tokio::sync::Notify;

use crate::{
    BackendError, CrewPatch, NewCrew, Paging, ReopenTicketRequest, SortSpec, TicketBackend,
    UserSearchFilters,
};

/// One observed backend interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AssignArea(TicketId, AreaId),
    AssignCrew(TicketId, CrewId),
    Reopen(ReopenTicketRequest),
    GetTicket(TicketId),
    GetCrews(AreaId),
    BusyIds(AreaId),
    SearchLight(UserSearchFilters),
    CreateCrew(NewCrew),
    UpdateCrew(CrewId, CrewPatch),
    /// Emitted when a mutating call returns.
    Finished(&'static str),
}

impl Call {
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AssignArea(..)
                | Self::AssignCrew(..)
                | Self::Reopen(..)
                | Self::CreateCrew(..)
                | Self::UpdateCrew(..)
        )
    }
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    tickets: Mutex<HashMap<TicketId, Ticket>>,
    crews: Vec<Crew>,
    busy: Vec<UserId>,
    users: Vec<User>,
    failing: HashSet<&'static str>,
    area_gate: Option<Arc<Notify>>,
    ticket_gate: Option<Arc<Notify>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticket(self, ticket: Ticket) -> Self {
        self.tickets
            .lock()
            .unwrap()
            .insert(ticket.id.clone(), ticket);
        self
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn with_busy(mut self, busy: &[&str]) -> Self {
        self.busy = busy.iter().map(|id| UserId::new(*id)).collect();
        self
    }

    pub fn with_crews(mut self, crews: Vec<Crew>) -> Self {
        self.crews = crews;
        self
    }

    /// Makes the named operation answer with a 500.
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    /// Makes `assign_area` wait until `gate` is notified.
    pub fn with_area_gate(mut self, gate: Arc<Notify>) -> Self {
        self.area_gate = Some(gate);
        self
    }

    /// Makes `get_ticket` wait until `gate` is notified.
    pub fn with_ticket_gate(mut self, gate: Arc<Notify>) -> Self {
        self.ticket_gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_mutation)
            .collect()
    }

    pub fn stored_ticket(&self, id: &str) -> Option<Ticket> {
        self.tickets.lock().unwrap().get(&TicketId::new(id)).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, operation: &'static str) -> Result<(), BackendError> {
        if self.failing.contains(operation) {
            return Err(BackendError::Status {
                status: 500,
                body: format!("{operation} exploded"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TicketBackend for RecordingBackend {
    async fn assign_area(&self, ticket: &TicketId, area: &AreaId) -> Result<(), BackendError> {
        self.record(Call::AssignArea(ticket.clone(), area.clone()));
        if let Some(gate) = &self.area_gate {
            gate.notified().await;
        }
        tokio::task::yield_now().await;
        self.check("assign_area")?;
        if let Some(stored) = self.tickets.lock().unwrap().get_mut(ticket) {
            stored.area_assignments.append(AreaAssignment::new(
                area.clone(),
                OffsetDateTime::now_utc(),
                UserId::new("u-admin"),
            ));
        }
        self.record(Call::Finished("assign_area"));
        Ok(())
    }

    async fn assign_cuadrilla(
        &self,
        ticket: &TicketId,
        crew: &CrewId,
    ) -> Result<(), BackendError> {
        self.record(Call::AssignCrew(ticket.clone(), crew.clone()));
        tokio::task::yield_now().await;
        self.check("assign_cuadrilla")?;
        self.record(Call::Finished("assign_cuadrilla"));
        Ok(())
    }

    async fn reopen_ticket(&self, request: &ReopenTicketRequest) -> Result<(), BackendError> {
        self.record(Call::Reopen(request.clone()));
        self.check("reopen_ticket")?;
        self.record(Call::Finished("reopen_ticket"));
        Ok(())
    }

    async fn get_ticket(&self, ticket: &TicketId) -> Result<Ticket, BackendError> {
        self.record(Call::GetTicket(ticket.clone()));
        if let Some(gate) = &self.ticket_gate {
            gate.notified().await;
        }
        self.check("get_ticket")?;
        self.tickets
            .lock()
            .unwrap()
            .get(ticket)
            .cloned()
            .ok_or_else(|| BackendError::Status {
                status: 404,
                body: String::from("ticket not found"),
            })
    }

    async fn get_cuadrillas(&self, area: &AreaId) -> Result<Vec<Crew>, BackendError> {
        self.record(Call::GetCrews(area.clone()));
        self.check("get_cuadrillas")?;
        Ok(self
            .crews
            .iter()
            .filter(|crew| &crew.area == area)
            .cloned()
            .collect())
    }

    async fn list_busy_user_ids(&self, area: &AreaId) -> Result<Vec<UserId>, BackendError> {
        self.record(Call::BusyIds(area.clone()));
        self.check("list_busy_user_ids")?;
        Ok(self.busy.clone())
    }

    async fn search_light(
        &self,
        filters: &UserSearchFilters,
        _sort: &SortSpec,
        _paging: &Paging,
    ) -> Result<Vec<User>, BackendError> {
        self.record(Call::SearchLight(filters.clone()));
        self.check("search_light")?;
        Ok(self
            .users
            .iter()
            .filter(|user| filters.area.is_none() || user.area == filters.area)
            .filter(|user| filters.role.as_ref().is_none_or(|role| &user.role == role))
            .filter(|user| filters.active.is_none_or(|active| user.active == active))
            .cloned()
            .collect())
    }

    async fn create_crew(&self, crew: &NewCrew) -> Result<Crew, BackendError> {
        self.record(Call::CreateCrew(crew.clone()));
        self.check("create_crew")?;
        Ok(Crew {
            id: CrewId::new("C-new"),
            name: crew.name.clone(),
            area: crew.area.clone(),
            supervisor: crew.supervisor.clone(),
            members: crew.members.clone(),
            available: crew.available,
            shift: crew.shift.clone(),
        })
    }

    async fn update_crew(&self, id: &CrewId, patch: &CrewPatch) -> Result<Crew, BackendError> {
        self.record(Call::UpdateCrew(id.clone(), patch.clone()));
        self.check("update_crew")?;
        let mut crew: Crew = self
            .crews
            .iter()
            .find(|crew| &crew.id == id)
            .cloned()
            .ok_or_else(|| BackendError::Status {
                status: 404,
                body: String::from("crew not found"),
            })?;
        if let Some(name) = &patch.name {
            crew.name.clone_from(name);
        }
        if let Some(members) = &patch.members {
            crew.members.clone_from(members);
        }
        if let Some(supervisor) = &patch.supervisor {
            crew.supervisor = supervisor.clone();
        }
        Ok(crew)
    }
}

pub fn t(minutes: i64) -> OffsetDateTime {
    datetime!(2026-03-02 08:00 UTC) + time::Duration::minutes(minutes)
}

pub fn admin() -> ActingUser {
    ActingUser::new(UserId::new("u-admin"), Role::Admin, None)
}

pub fn dispatcher() -> ActingUser {
    ActingUser::new(UserId::new("u-atencion"), Role::Atencion, None)
}

pub fn funcionario(home: &str) -> ActingUser {
    ActingUser::new(
        UserId::new("u-func"),
        Role::Funcionario,
        Some(AreaId::new(home)),
    )
}

/// Ticket `T-1` routed to `area` at minute 0, optionally with `crew` at
/// minute 10.
pub fn ticket(area: &str, crew: Option<&str>) -> Ticket {
    let mut ticket = Ticket::new(TicketId::new("T-1"));
    ticket.area_assignments.append(AreaAssignment::new(
        AreaId::new(area),
        t(0),
        UserId::new("u-atencion"),
    ));
    if let Some(crew) = crew {
        ticket.crew_assignments.append(CrewAssignment::new(
            CrewId::new(crew),
            t(10),
            UserId::new("u-admin"),
        ));
    }
    ticket
}

pub fn user(id: &str, role: Role, area: &str) -> User {
    User {
        id: UserId::new(id),
        name: format!("User {id}"),
        role,
        area: Some(AreaId::new(area)),
        active: true,
    }
}

pub fn area_a1_users() -> Vec<User> {
    vec![
        user("s1", Role::Supervisor, "A1"),
        user("s2", Role::Supervisor, "A1"),
        user("m1", Role::Cuadrilla, "A1"),
        user("m2", Role::Cuadrilla, "A1"),
        user("m3", Role::Cuadrilla, "A1"),
        User {
            active: false,
            ..user("gone", Role::Cuadrilla, "A1")
        },
        user("x1", Role::Cuadrilla, "A2"),
    ]
}

pub fn crew(id: &str, area: &str, supervisor: &str, members: &[&str]) -> Crew {
    Crew {
        id: CrewId::new(id),
        name: format!("Crew {id}"),
        area: AreaId::new(area),
        supervisor: UserId::new(supervisor),
        members: members.iter().map(|m| UserId::new(*m)).collect(),
        available: true,
        shift: None,
    }
}

pub fn ids(values: &[&str]) -> Vec<UserId> {
    values.iter().map(|v| UserId::new(*v)).collect()
}
