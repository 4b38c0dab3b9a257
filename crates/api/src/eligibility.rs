// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Crew eligibility: which users may join or supervise a crew of an area.

use std::collections::HashSet;
use std::sync::Arc;

use ticket_desk_domain::{AreaId, Crew, CrewRoster, DomainError, Role, User, UserId};
use tracing::{debug, warn};

use crate::backend::{Paging, SortSpec, TicketBackend, UserSearchFilters};
use crate::error::{ApiError, translate_backend_error};
use crate::request_response::CrewEligibility;

/// Resolves crew candidates for an area.
pub struct CrewEligibilityResolver {
    backend: Arc<dyn TicketBackend>,
}

impl CrewEligibilityResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(backend: Arc<dyn TicketBackend>) -> Self {
        Self { backend }
    }

    /// Resolves the candidates for a crew of `area`.
    ///
    /// When `editing` is set, that crew's own supervisor and members are not
    /// counted as busy, so an edit can keep its current people.
    ///
    /// A failed busy-user lookup degrades to "nobody is busy" and sets
    /// `busy_lookup_degraded`; it is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if either user pool query fails.
    pub async fn resolve(
        &self,
        area: &AreaId,
        editing: Option<&Crew>,
    ) -> Result<CrewEligibility, ApiError> {
        let (mut busy, busy_lookup_degraded): (HashSet<UserId>, bool) =
            match self.backend.list_busy_user_ids(area).await {
                Ok(ids) => (ids.into_iter().collect(), false),
                Err(err) => {
                    warn!(area = %area, error = %err, "Busy user lookup failed, treating everyone as free");
                    (HashSet::new(), true)
                }
            };

        if let Some(crew) = editing {
            for id in crew.roster_ids() {
                busy.remove(id);
            }
        }

        let member_filters = UserSearchFilters::active_in_area(area, None);
        let supervisor_filters = UserSearchFilters::active_in_area(area, Some(Role::Supervisor));
        let sort = SortSpec::default();
        let paging = Paging::default();

        let (members, supervisors) = tokio::join!(
            self.backend.search_light(&member_filters, &sort, &paging),
            self.backend.search_light(&supervisor_filters, &sort, &paging),
        );
        let members: Vec<User> = members.map_err(|e| translate_backend_error("search_light", &e))?;
        let supervisors: Vec<User> =
            supervisors.map_err(|e| translate_backend_error("search_light", &e))?;

        let eligibility = CrewEligibility {
            area: area.clone(),
            available_members: without_busy(members, &busy),
            eligible_supervisors: without_busy(supervisors, &busy),
            busy_lookup_degraded,
        };

        debug!(
            area = %area,
            busy = busy.len(),
            members = eligibility.available_members.len(),
            supervisors = eligibility.eligible_supervisors.len(),
            "Resolved crew eligibility"
        );

        Ok(eligibility)
    }
}

fn without_busy(users: Vec<User>, busy: &HashSet<UserId>) -> Vec<User> {
    users
        .into_iter()
        .filter(|user| !busy.contains(&user.id))
        .collect()
}

/// Identifies one eligibility resolution started by a [`CrewForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityTicket {
    /// The area being resolved.
    pub area: AreaId,
    generation: u64,
}

/// Selection state of a crew create/edit dialog.
///
/// Changing the area clears the supervisor and member picks and discards any
/// eligibility result that was requested for a previous area.
#[derive(Debug, Clone, Default)]
pub struct CrewForm {
    area: Option<AreaId>,
    supervisor: Option<UserId>,
    members: Vec<UserId>,
    eligibility: Option<CrewEligibility>,
    generation: u64,
}

impl CrewForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form pre-filled from an existing crew.
    #[must_use]
    pub fn for_crew(crew: &Crew) -> Self {
        Self {
            area: Some(crew.area.clone()),
            supervisor: Some(crew.supervisor.clone()),
            members: crew
                .members
                .iter()
                .filter(|id| **id != crew.supervisor)
                .cloned()
                .collect(),
            eligibility: None,
            generation: 0,
        }
    }

    /// Selects an area and returns the ticket for resolving its candidates.
    ///
    /// Selecting a different area clears the supervisor, the members and the
    /// current eligibility.
    pub fn select_area(&mut self, area: AreaId) -> EligibilityTicket {
        if self.area.as_ref() != Some(&area) {
            self.area = Some(area.clone());
            self.supervisor = None;
            self.members.clear();
            self.eligibility = None;
            self.generation += 1;
        }
        EligibilityTicket {
            area,
            generation: self.generation,
        }
    }

    /// Stores an eligibility result.
    ///
    /// Returns `false`, leaving the form untouched, if the area changed
    /// since `ticket` was issued.
    pub fn apply_eligibility(
        &mut self,
        ticket: &EligibilityTicket,
        eligibility: CrewEligibility,
    ) -> bool {
        if ticket.generation != self.generation || self.area.as_ref() != Some(&ticket.area) {
            debug!(area = %ticket.area, "Discarding stale crew eligibility");
            return false;
        }
        self.eligibility = Some(eligibility);
        true
    }

    /// Picks the supervisor.
    pub fn select_supervisor(&mut self, supervisor: UserId) {
        self.supervisor = Some(supervisor);
    }

    /// Replaces the member picks.
    pub fn select_members(&mut self, members: Vec<UserId>) {
        self.members = members;
    }

    /// The selected area.
    #[must_use]
    pub const fn area(&self) -> Option<&AreaId> {
        self.area.as_ref()
    }

    /// The selected supervisor.
    #[must_use]
    pub const fn supervisor(&self) -> Option<&UserId> {
        self.supervisor.as_ref()
    }

    /// The selected members.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// The eligibility for the selected area, once resolved.
    #[must_use]
    pub const fn eligibility(&self) -> Option<&CrewEligibility> {
        self.eligibility.as_ref()
    }

    /// Builds the roster to save.
    ///
    /// # Errors
    ///
    /// Returns an error if no area or no supervisor is selected.
    pub fn roster(&self) -> Result<CrewRoster, DomainError> {
        if self.area.is_none() {
            return Err(DomainError::MissingCrewArea);
        }
        let supervisor: UserId = self.supervisor.clone().ok_or(DomainError::MissingSupervisor)?;
        Ok(CrewRoster::new(supervisor, self.members.clone()))
    }
}
