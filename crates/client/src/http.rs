// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! REST client for the ticket backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ticket_desk_api::{
    BackendError, CrewPatch, NewCrew, Paging, ReopenTicketRequest, SortSpec, TicketBackend,
    UserSearchFilters,
};
use ticket_desk_audit::Ticket;
use ticket_desk_domain::{AreaId, Crew, CrewId, TicketId, User, UserId};
use tracing::{debug, warn};

use crate::config::{ClientConfig, ClientError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignAreaBody<'a> {
    ticket_id: &'a TicketId,
    area_id: &'a AreaId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignCrewBody<'a> {
    ticket_id: &'a TicketId,
    cuadrilla_id: &'a CrewId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AreaBody<'a> {
    area_id: &'a AreaId,
}

#[derive(Serialize)]
struct SearchBody<'a> {
    filters: &'a UserSearchFilters,
    sort: &'a SortSpec,
    paging: &'a Paging,
}

#[derive(Deserialize)]
struct BusyUserIds {
    #[serde(default)]
    ids: Vec<UserId>,
}

#[derive(Deserialize)]
struct UserPage {
    #[serde(default)]
    items: Vec<User>,
}

/// [`TicketBackend`] over the backend's REST API.
pub struct HttpTicketBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTicketBackend {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Builds a client reusing an existing [`reqwest::Client`].
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.normalized_base_url(),
            token: config.token.clone(),
        }
    }

    /// The REST base URL in use.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one so an
    /// identifier always stays a single path segment.
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, BackendError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| BackendError::Transport(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| BackendError::Transport(String::from("base URL cannot carry a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn post<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<reqwest::Response, BackendError> {
        let url = self.url(segments)?;
        debug!(url = %url, "POST to ticket backend");
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await
    }

    async fn get(&self, segments: &[&str]) -> Result<reqwest::Response, BackendError> {
        let url = self.url(segments)?;
        debug!(url = %url, "GET from ticket backend");
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await
    }
}

/// Rejects identifiers that would be dropped or reinterpreted as a path
/// segment.
fn path_segment(id: &str) -> Result<&str, BackendError> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(BackendError::InvalidPathSegment(id.to_string()));
    }
    Ok(id)
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

/// Ensure the response has a success status code, capturing the body of
/// failed responses.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unreadable body>"));
        warn!(status = status.as_u16(), body = %body, "Ticket backend returned an error");
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let text: String = response.text().await.map_err(transport)?;
    serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl TicketBackend for HttpTicketBackend {
    async fn assign_area(&self, ticket: &TicketId, area: &AreaId) -> Result<(), BackendError> {
        let body = AssignAreaBody {
            ticket_id: ticket,
            area_id: area,
        };
        self.post(&["tickets", "assignArea"], &body).await?;
        Ok(())
    }

    async fn assign_cuadrilla(
        &self,
        ticket: &TicketId,
        crew: &CrewId,
    ) -> Result<(), BackendError> {
        let body = AssignCrewBody {
            ticket_id: ticket,
            cuadrilla_id: crew,
        };
        self.post(&["tickets", "assignCuadrilla"], &body).await?;
        Ok(())
    }

    async fn reopen_ticket(&self, request: &ReopenTicketRequest) -> Result<(), BackendError> {
        self.post(&["tickets", "reopen"], request).await?;
        Ok(())
    }

    async fn get_ticket(&self, ticket: &TicketId) -> Result<Ticket, BackendError> {
        let response = self
            .get(&["tickets", path_segment(ticket.as_str())?])
            .await?;
        parse_response(response).await
    }

    async fn get_cuadrillas(&self, area: &AreaId) -> Result<Vec<Crew>, BackendError> {
        let response = self
            .post(&["cuadrillas", "byArea"], &AreaBody { area_id: area })
            .await?;
        parse_response(response).await
    }

    async fn list_busy_user_ids(&self, area: &AreaId) -> Result<Vec<UserId>, BackendError> {
        let response = self
            .post(&["cuadrillas", "busyUserIds"], &AreaBody { area_id: area })
            .await?;
        let busy: BusyUserIds = parse_response(response).await?;
        Ok(busy.ids)
    }

    async fn search_light(
        &self,
        filters: &UserSearchFilters,
        sort: &SortSpec,
        paging: &Paging,
    ) -> Result<Vec<User>, BackendError> {
        let body = SearchBody {
            filters,
            sort,
            paging,
        };
        let response = self.post(&["users", "searchLight"], &body).await?;
        let page: UserPage = parse_response(response).await?;
        Ok(page.items)
    }

    async fn create_crew(&self, crew: &NewCrew) -> Result<Crew, BackendError> {
        let response = self.post(&["cuadrillas", "create"], crew).await?;
        parse_response(response).await
    }

    async fn update_crew(&self, id: &CrewId, patch: &CrewPatch) -> Result<Crew, BackendError> {
        let response = self
            .post(
                &["cuadrillas", "update", path_segment(id.as_str())?],
                patch,
            )
            .await?;
        parse_response(response).await
    }
}
