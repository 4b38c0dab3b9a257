// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity extraction for the server.
//!
//! The session itself is owned by the upstream cookie provider, which
//! forwards the resolved identity as request headers. This module only
//! turns those headers into an [`ActingUser`].

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use ticket_desk_api::{AuthError, resolve_acting_user};
use ticket_desk_domain::ActingUser;
use tracing::{debug, warn};

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the acting user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";
/// Header carrying the acting user's home area, if any.
pub const USER_AREA_HEADER: &str = "x-user-area";

/// Extractor for the acting user.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionUser(actor): SessionUser,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: ActingUser
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 Unauthorized if:
/// - The user id or role header is missing or blank
/// - A header is not valid UTF-8
/// - The role is not recognised
pub struct SessionUser(pub ActingUser);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id: Option<&str> = header_value(&parts.headers, USER_ID_HEADER)?;
        let role: Option<&str> = header_value(&parts.headers, USER_ROLE_HEADER)?;
        let area: Option<&str> = header_value(&parts.headers, USER_AREA_HEADER)?;

        let actor: ActingUser = resolve_acting_user(user_id, role, area).map_err(|e| {
            debug!(error = %e, "Rejecting request without a usable identity");
            SessionError::InvalidIdentity(e)
        })?;

        debug!(
            user = %actor.id,
            role = %actor.role,
            area = ?actor.home_area,
            "Resolved acting user"
        );

        Ok(Self(actor))
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<Option<&'a str>, SessionError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| {
                warn!(header = name, "Identity header is not valid UTF-8");
                SessionError::InvalidHeaderEncoding(name)
            })
        })
        .transpose()
}

/// Identity extraction errors.
///
/// Converted to HTTP 401 responses.
#[derive(Debug)]
pub enum SessionError {
    /// An identity header could not be read as text.
    InvalidHeaderEncoding(&'static str),
    /// The identity headers were missing or unusable.
    InvalidIdentity(AuthError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::InvalidHeaderEncoding(name) => format!("Header '{name}' is not valid UTF-8"),
            Self::InvalidIdentity(err) => err.to_string(),
        };
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "error": true, "message": message })),
        )
            .into_response()
    }
}
