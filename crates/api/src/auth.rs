// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Acting-user identity and authorization checks.
//!
//! The service never authenticates anyone itself. The session layer in front
//! of it forwards the user's id, role and home area, and this module turns
//! those raw values into an [`ActingUser`].

use std::str::FromStr;

use ticket_desk::AssignmentPolicy;
use ticket_desk_domain::{ActingUser, AreaId, Role, UserId};

use crate::error::AuthError;

/// Builds an [`ActingUser`] from forwarded session values.
///
/// # Arguments
///
/// * `user_id` - The user id, required
/// * `role` - The role string, required
/// * `home_area` - The home area, optional; blank means none
///
/// # Errors
///
/// Returns an error if the user id or role is missing or blank.
pub fn resolve_acting_user(
    user_id: Option<&str>,
    role: Option<&str>,
    home_area: Option<&str>,
) -> Result<ActingUser, AuthError> {
    let user_id: &str = user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("Missing user id"),
        })?;

    let role: Role = role
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("Missing user role"),
        })
        .and_then(|raw| {
            Role::from_str(raw).map_err(|e| AuthError::AuthenticationFailed {
                reason: e.to_string(),
            })
        })?;

    let home_area: Option<AreaId> = home_area
        .map(str::trim)
        .filter(|area| !area.is_empty())
        .map(AreaId::new);

    Ok(ActingUser::new(UserId::new(user_id), role, home_area))
}

/// Authorization service for enforcing role-based access control.
///
/// Assign-mode submissions are not checked here: fields the actor may not
/// change are dropped by the change detector instead.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to reopen tickets.
    ///
    /// Reopening routes a ticket to an area, so the area assigners of
    /// `policy` may reopen.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor's role may not route tickets.
    pub fn authorize_reopen(
        policy: &AssignmentPolicy,
        actor: &ActingUser,
    ) -> Result<(), AuthError> {
        if policy.can_assign_area(actor) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("reopen_ticket"),
            required_role: role_list(&policy.area_assigners),
        })
    }

    /// Checks if an actor is authorized to create or edit crews of `area`.
    ///
    /// Admins manage every area; funcionarios manage their own home area.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not manage crews of `area`.
    pub fn authorize_manage_crews(actor: &ActingUser, area: &AreaId) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Funcionario if actor.home_area.as_ref() == Some(area) => Ok(()),
            _ => Err(AuthError::Unauthorized {
                action: String::from("manage_crews"),
                required_role: String::from("admin or area funcionario"),
            }),
        }
    }
}

fn role_list(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<&str>>()
        .join(" or ")
}
