// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use time::macros::datetime;
use ticket_desk::AssignmentPolicy;
use ticket_desk_api::{
    BackendError, CrewPatch, NewCrew, Paging, ReopenTicketRequest, SortSpec, TicketBackend,
    UserSearchFilters,
};
use ticket_desk_audit::{AreaAssignment, CrewAssignment, Ticket};
use ticket_desk_domain::{AreaId, Crew, CrewId, Role, TicketId, User, UserId};
use tower::ServiceExt;

use crate::{AppState, build_router};

/// In-memory backend keyed by ticket id.
#[derive(Default)]
pub struct StubBackend {
    tickets: HashMap<TicketId, Ticket>,
    crews: Vec<Crew>,
    users: Vec<User>,
    busy: Vec<UserId>,
    failing: HashSet<&'static str>,
    mutations: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.tickets.insert(ticket.id.clone(), ticket);
        self
    }

    pub fn with_crews(mut self, crews: Vec<Crew>) -> Self {
        self.crews = crews;
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

    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    /// Mutating calls in the order they were attempted, as `op:args`.
    pub fn mutations(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    fn mutate(&self, operation: &'static str, detail: String) -> Result<(), BackendError> {
        self.mutations
            .lock()
            .unwrap()
            .push(format!("{operation}:{detail}"));
        self.check(operation)
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
impl TicketBackend for StubBackend {
    async fn assign_area(&self, ticket: &TicketId, area: &AreaId) -> Result<(), BackendError> {
        self.mutate("assign_area", format!("{ticket}:{area}"))
    }

    async fn assign_cuadrilla(
        &self,
        ticket: &TicketId,
        crew: &CrewId,
    ) -> Result<(), BackendError> {
        self.mutate("assign_cuadrilla", format!("{ticket}:{crew}"))
    }

    async fn reopen_ticket(&self, request: &ReopenTicketRequest) -> Result<(), BackendError> {
        self.mutate(
            "reopen_ticket",
            format!("{}:{}:{}", request.ticket_id, request.area_id, request.reason),
        )
    }

    async fn get_ticket(&self, ticket: &TicketId) -> Result<Ticket, BackendError> {
        self.check("get_ticket")?;
        self.tickets
            .get(ticket)
            .cloned()
            .ok_or_else(|| BackendError::Status {
                status: 404,
                body: format!("ticket {ticket} not found"),
            })
    }

    async fn get_cuadrillas(&self, area: &AreaId) -> Result<Vec<Crew>, BackendError> {
        self.check("get_cuadrillas")?;
        Ok(self
            .crews
            .iter()
            .filter(|crew| &crew.area == area)
            .cloned()
            .collect())
    }

    async fn list_busy_user_ids(&self, _area: &AreaId) -> Result<Vec<UserId>, BackendError> {
        self.check("list_busy_user_ids")?;
        Ok(self.busy.clone())
    }

    async fn search_light(
        &self,
        filters: &UserSearchFilters,
        _sort: &SortSpec,
        _paging: &Paging,
    ) -> Result<Vec<User>, BackendError> {
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
        self.mutate("create_crew", crew.name.clone())?;
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
        self.mutate("update_crew", id.to_string())?;
        let existing: Crew = self
            .crews
            .iter()
            .find(|crew| &crew.id == id)
            .cloned()
            .ok_or_else(|| BackendError::Status {
                status: 404,
                body: format!("crew {id} not found"),
            })?;
        Ok(Crew {
            name: patch.name.clone().unwrap_or(existing.name),
            area: patch.area.clone().unwrap_or(existing.area),
            supervisor: patch.supervisor.clone().unwrap_or(existing.supervisor),
            members: patch.members.clone().unwrap_or(existing.members),
            available: patch.available.unwrap_or(existing.available),
            shift: patch.shift.clone().or(existing.shift),
            id: existing.id,
        })
    }
}

/// Ticket `T-1`, routed to `area` and optionally worked by `crew` afterwards.
pub fn ticket(area: &str, crew: Option<&str>) -> Ticket {
    let mut ticket = Ticket::new(TicketId::new("T-1"));
    ticket.area_assignments.append(AreaAssignment::new(
        AreaId::new(area),
        datetime!(2026-03-01 10:00 UTC),
        UserId::new("u-admin"),
    ));
    if let Some(crew) = crew {
        ticket.crew_assignments.append(CrewAssignment::new(
            CrewId::new(crew),
            datetime!(2026-03-01 10:10 UTC),
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

/// Supervisors `s1`, `s2` and crew members `m1`, `m2` of `A1`.
pub fn area_a1_users() -> Vec<User> {
    vec![
        user("s1", Role::Supervisor, "A1"),
        user("s2", Role::Supervisor, "A1"),
        user("m1", Role::Cuadrilla, "A1"),
        user("m2", Role::Cuadrilla, "A1"),
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

pub fn app(backend: &Arc<StubBackend>) -> Router {
    let backend: Arc<dyn TicketBackend> = Arc::clone(backend) as Arc<dyn TicketBackend>;
    build_router(AppState::new(backend, AssignmentPolicy::default()))
}

/// Identity headers for a request.
pub struct Identity {
    pub id: &'static str,
    pub role: &'static str,
    pub area: Option<&'static str>,
}

pub const ADMIN: Identity = Identity {
    id: "u-admin",
    role: "admin",
    area: None,
};

pub const DISPATCHER: Identity = Identity {
    id: "u-atencion",
    role: "atencion",
    area: None,
};

pub const FUNCIONARIO_A1: Identity = Identity {
    id: "u-func",
    role: "funcionario",
    area: Some("A1"),
};

pub const FUNCIONARIO_A2: Identity = Identity {
    id: "u-func2",
    role: "funcionario",
    area: Some("A2"),
};

pub fn request(
    method: &str,
    uri: &str,
    identity: Option<&Identity>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(identity) = identity {
        builder = builder
            .header("x-user-id", identity.id)
            .header("x-user-role", identity.role);
        if let Some(area) = identity.area {
            builder = builder.header("x-user-area", area);
        }
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> (axum::http::StatusCode, serde_json::Value) {
    let response: Response<Body> = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
