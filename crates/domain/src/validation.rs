// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::roster::CrewRoster;
use crate::types::{AreaId, UserId};
use std::collections::HashSet;

/// Maximum length accepted for a crew name.
const MAX_CREW_NAME_LEN: usize = 80;

/// Validates the mandatory reason attached to a reopen request.
///
/// # Arguments
///
/// * `reason` - The reason as typed by the operator
///
/// # Returns
///
/// * `Ok(String)` with surrounding whitespace removed
/// * `Err(DomainError::MissingReopenReason)` if nothing remains after trimming
///
/// # Errors
///
/// Returns an error if the reason is empty or whitespace only.
pub fn validate_reopen_reason(reason: &str) -> Result<String, DomainError> {
    let trimmed: &str = reason.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingReopenReason);
    }
    Ok(trimmed.to_string())
}

/// Validates that a reopen request names a target area.
///
/// # Errors
///
/// Returns an error if no area was given or the area id is blank.
pub fn validate_reopen_area(area: Option<&AreaId>) -> Result<AreaId, DomainError> {
    match area {
        Some(area) if !area.as_str().trim().is_empty() => Ok(area.clone()),
        _ => Err(DomainError::MissingReopenArea),
    }
}

/// Validates a crew name.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than 80 characters.
pub fn validate_crew_name(name: &str) -> Result<(), DomainError> {
    // Rule: name must not be blank
    if name.trim().is_empty() {
        return Err(DomainError::InvalidCrewName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: name must fit the backend column
    if name.chars().count() > MAX_CREW_NAME_LEN {
        return Err(DomainError::InvalidCrewName(format!(
            "Name cannot exceed {MAX_CREW_NAME_LEN} characters"
        )));
    }

    Ok(())
}

/// Validates a crew roster against the candidates offered for its area.
///
/// The edited crew's own people are always acceptable, even when they do not
/// appear in the candidate lists.
///
/// # Arguments
///
/// * `roster` - The supervisor and members picked in the dialog
/// * `eligible_supervisors` - Supervisor candidates offered for the area
/// * `available_members` - Member candidates offered for the area
/// * `own_people` - Supervisor and members of the crew being edited, if any
///
/// # Errors
///
/// Returns an error if:
/// - The supervisor is neither eligible nor already part of the edited crew
/// - Any member is neither available nor already part of the edited crew
pub fn validate_crew_selection(
    roster: &CrewRoster,
    eligible_supervisors: &[UserId],
    available_members: &[UserId],
    own_people: &[UserId],
) -> Result<(), DomainError> {
    let own: HashSet<&UserId> = own_people.iter().collect();

    let supervisors: HashSet<&UserId> = eligible_supervisors.iter().collect();
    if !supervisors.contains(roster.supervisor()) && !own.contains(roster.supervisor()) {
        return Err(DomainError::IneligibleSupervisor {
            user: roster.supervisor().clone(),
        });
    }

    let members: HashSet<&UserId> = available_members.iter().collect();
    if let Some(user) = roster
        .selected_members()
        .iter()
        .filter(|user| *user != roster.supervisor())
        .find(|user| !members.contains(user) && !own.contains(user))
    {
        return Err(DomainError::UnavailableMember { user: user.clone() });
    }

    Ok(())
}
