// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validated crew create and update.

use std::collections::HashSet;
use std::sync::Arc;

use ticket_desk_domain::{
    ActingUser, AreaId, Crew, CrewId, CrewRoster, DomainError, UserId, validate_crew_name,
    validate_crew_selection,
};
use tracing::info;

use crate::auth::AuthorizationService;
use crate::backend::{CrewPatch, NewCrew, TicketBackend};
use crate::eligibility::CrewEligibilityResolver;
use crate::error::{ApiError, translate_backend_error, translate_domain_error};
use crate::request_response::{CrewEligibility, CrewSaveStatus, SaveCrewRequest, SaveCrewResponse};

/// Creates and updates crews after checking them against area eligibility.
pub struct CrewService {
    backend: Arc<dyn TicketBackend>,
    resolver: CrewEligibilityResolver,
}

impl CrewService {
    /// Creates a crew service.
    #[must_use]
    pub fn new(backend: Arc<dyn TicketBackend>) -> Self {
        Self {
            resolver: CrewEligibilityResolver::new(Arc::clone(&backend)),
            backend,
        }
    }

    /// Returns the eligibility resolver.
    #[must_use]
    pub const fn resolver(&self) -> &CrewEligibilityResolver {
        &self.resolver
    }

    /// Creates a new crew.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The actor may not manage crews of the area
    /// - The name, area or supervisor is missing or invalid
    /// - The supervisor or a member is not eligible for the area
    /// - The backend rejects the call
    pub async fn create(
        &self,
        actor: &ActingUser,
        request: SaveCrewRequest,
    ) -> Result<SaveCrewResponse, ApiError> {
        let (area, roster) = self.validate(actor, &request, None).await?;

        let new_crew = NewCrew {
            name: request.name.trim().to_string(),
            area,
            supervisor: roster.supervisor().clone(),
            members: roster.into_members(),
            available: request.available,
            shift: request.shift,
        };
        let crew: Crew = self
            .backend
            .create_crew(&new_crew)
            .await
            .map_err(|e| translate_backend_error("create_crew", &e))?;

        info!(crew = %crew.id, area = %crew.area, actor = %actor.id, "Created crew");
        Ok(SaveCrewResponse {
            outcome: CrewSaveStatus::Created,
            crew,
        })
    }

    /// Updates an existing crew, sending only the fields that changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the crew cannot be found in its area, if the
    /// actor may not manage it, or for any reason [`Self::create`] fails.
    pub async fn update(
        &self,
        actor: &ActingUser,
        id: &CrewId,
        request: SaveCrewRequest,
    ) -> Result<SaveCrewResponse, ApiError> {
        let lookup_area: Option<&AreaId> = request.current_area.as_ref().or(request.area.as_ref());
        let existing: Crew = self.find_crew(id, lookup_area).await?;
        AuthorizationService::authorize_manage_crews(actor, &existing.area)?;

        let (area, roster) = self.validate(actor, &request, Some(&existing)).await?;
        let patch: CrewPatch = build_patch(&existing, &request, area, roster);

        if patch.is_empty() {
            info!(crew = %id, "Crew unchanged, nothing to update");
            return Ok(SaveCrewResponse {
                outcome: CrewSaveStatus::Unchanged,
                crew: existing,
            });
        }

        let crew: Crew = self
            .backend
            .update_crew(id, &patch)
            .await
            .map_err(|e| translate_backend_error("update_crew", &e))?;

        info!(crew = %crew.id, actor = %actor.id, "Updated crew");
        Ok(SaveCrewResponse {
            outcome: CrewSaveStatus::Updated,
            crew,
        })
    }

    async fn validate(
        &self,
        actor: &ActingUser,
        request: &SaveCrewRequest,
        existing: Option<&Crew>,
    ) -> Result<(AreaId, CrewRoster), ApiError> {
        validate_crew_name(&request.name).map_err(translate_domain_error)?;
        let area: AreaId = request
            .area
            .clone()
            .ok_or_else(|| translate_domain_error(DomainError::MissingCrewArea))?;
        AuthorizationService::authorize_manage_crews(actor, &area)?;
        let supervisor: UserId = request
            .supervisor
            .clone()
            .ok_or_else(|| translate_domain_error(DomainError::MissingSupervisor))?;
        let roster = CrewRoster::new(supervisor, request.members.clone());

        // Only the edited crew's people stay acceptable, and only in its area.
        let editing: Option<&Crew> = existing.filter(|crew| crew.area == area);
        let eligibility: CrewEligibility = self.resolver.resolve(&area, editing).await?;
        let own_people: Vec<UserId> = editing
            .map(|crew| crew.roster_ids().cloned().collect())
            .unwrap_or_default();

        validate_crew_selection(
            &roster,
            &eligibility.supervisor_ids(),
            &eligibility.member_ids(),
            &own_people,
        )
        .map_err(translate_domain_error)?;

        Ok((area, roster))
    }

    async fn find_crew(&self, id: &CrewId, area: Option<&AreaId>) -> Result<Crew, ApiError> {
        let not_found = || ApiError::ResourceNotFound {
            resource_type: String::from("Crew"),
            message: format!("Crew '{id}' does not exist"),
        };
        let area: &AreaId = area.ok_or_else(not_found)?;
        let crews: Vec<Crew> = self
            .backend
            .get_cuadrillas(area)
            .await
            .map_err(|e| translate_backend_error("get_cuadrillas", &e))?;
        crews
            .into_iter()
            .find(|crew| &crew.id == id)
            .ok_or_else(not_found)
    }
}

/// Builds the partial update between `existing` and the validated request.
fn build_patch(
    existing: &Crew,
    request: &SaveCrewRequest,
    area: AreaId,
    roster: CrewRoster,
) -> CrewPatch {
    let name: String = request.name.trim().to_string();
    let supervisor: UserId = roster.supervisor().clone();
    let members: Vec<UserId> = roster.into_members();

    CrewPatch {
        name: (name != existing.name).then_some(name),
        area: (area != existing.area).then_some(area),
        supervisor: (supervisor != existing.supervisor).then_some(supervisor),
        members: (!same_people(&members, &existing.members)).then_some(members),
        available: (request.available != existing.available).then_some(request.available),
        shift: request
            .shift
            .clone()
            .filter(|shift| existing.shift.as_ref() != Some(shift)),
    }
}

fn same_people(left: &[UserId], right: &[UserId]) -> bool {
    left.iter().collect::<HashSet<_>>() == right.iter().collect::<HashSet<_>>()
}
