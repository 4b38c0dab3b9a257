// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ticket_desk::{AssignmentMode, AssignmentPolicy};
use ticket_desk_api::{
    ApiError, AssignTicketRequest, AssignmentOrchestrator, AuthorizationService, CrewEligibility,
    CrewSaveStatus, CrewService, ReopenRequest, RetryCrewRequest, SaveCrewRequest,
    SaveCrewResponse, SubmissionReport, SubmissionStatus, TicketBackend, TicketCapabilities,
    compute_ticket_capabilities, translate_backend_error,
};
use ticket_desk_audit::Ticket;
use ticket_desk_client::{ClientConfig, HttpTicketBackend, PushSubscriber};
use ticket_desk_domain::{AreaId, Crew, CrewId, TicketId};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::live::{LiveEventBroadcaster, live_events_handler, spawn_push_relay};
use crate::session::SessionUser;

/// Ticket Desk Server - assignment workflow service for the ticket backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, env = "TICKET_DESK_PORT", default_value_t = 8080)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, env = "TICKET_DESK_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Base URL of the ticket backend REST API
    #[arg(long, env = "TICKET_DESK_BACKEND_URL", default_value = "http://127.0.0.1:3000/api")]
    backend_url: String,

    /// WebSocket URL of the ticket backend push channel. Live relay is off when unset.
    #[arg(long, env = "TICKET_DESK_PUSH_URL")]
    push_url: Option<String>,

    /// Timeout for backend requests, in seconds
    #[arg(long, env = "TICKET_DESK_TIMEOUT_SECS", default_value_t = 15)]
    timeout_secs: u64,

    /// Bearer token forwarded to the ticket backend
    #[arg(long, env = "TICKET_DESK_BACKEND_TOKEN", hide_env_values = true)]
    backend_token: Option<String>,

    /// Delay between push channel reconnection attempts, in seconds
    #[arg(long, env = "TICKET_DESK_RECONNECT_DELAY_SECS", default_value_t = 5)]
    reconnect_delay_secs: u64,
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend_url.clone(),
            push_url: self.push_url.clone(),
            timeout_secs: self.timeout_secs,
            token: self.backend_token.clone(),
            reconnect_delay_secs: self.reconnect_delay_secs,
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The ticket backend.
    backend: Arc<dyn TicketBackend>,
    /// Runs assignment submissions.
    orchestrator: Arc<AssignmentOrchestrator>,
    /// Creates and updates crews.
    crews: Arc<CrewService>,
    /// Live event fan-out for `/live`.
    live: LiveEventBroadcaster,
}

impl AppState {
    fn new(backend: Arc<dyn TicketBackend>, policy: AssignmentPolicy) -> Self {
        Self {
            orchestrator: Arc::new(AssignmentOrchestrator::new(Arc::clone(&backend), policy)),
            crews: Arc::new(CrewService::new(Arc::clone(&backend))),
            backend,
            live: LiveEventBroadcaster::new(),
        }
    }
}

/// Query parameters for the capabilities endpoint.
#[derive(Debug, Deserialize)]
struct CapabilitiesQuery {
    /// Dialog mode, `assign` when absent.
    #[serde(default)]
    mode: AssignmentMode,
}

/// Query parameters for the crew eligibility endpoint.
#[derive(Debug, Deserialize)]
struct EligibilityQuery {
    /// The crew being edited, if any.
    crew: Option<CrewId>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::SubmissionInFlight { .. } => StatusCode::CONFLICT,
            ApiError::Upstream { .. } => {
                warn!(error = %err, "Ticket backend failure");
                StatusCode::BAD_GATEWAY
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Converts a submission report into an HTTP response.
///
/// A failed remote step is reported as 502 with the full submission body.
fn submission_response(report: &SubmissionReport) -> Response {
    let body = report.to_response();
    let status: StatusCode = if body.outcome == SubmissionStatus::Failed {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Json(body)).into_response()
}

/// Handler for POST `/tickets/{id}/assignment` endpoint.
///
/// Routes a ticket to an area and/or crew.
async fn handle_assign(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(ticket_id): Path<TicketId>,
    Json(req): Json<AssignTicketRequest>,
) -> Result<Response, HttpError> {
    info!(
        ticket = %ticket_id,
        actor = %actor.id,
        area = ?req.area,
        crew = ?req.crew,
        "Handling assign request"
    );

    let report: SubmissionReport = app_state
        .orchestrator
        .assign(&actor, &ticket_id, req.area, req.crew)
        .await?;

    Ok(submission_response(&report))
}

/// Handler for POST `/tickets/{id}/reopen` endpoint.
async fn handle_reopen(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(ticket_id): Path<TicketId>,
    Json(req): Json<ReopenRequest>,
) -> Result<Response, HttpError> {
    info!(ticket = %ticket_id, actor = %actor.id, area = ?req.area, "Handling reopen request");

    let report: SubmissionReport = app_state
        .orchestrator
        .reopen(&actor, &ticket_id, req.area.as_ref(), &req.reason)
        .await?;

    Ok(submission_response(&report))
}

/// Handler for POST `/tickets/{id}/assignment/crew` endpoint.
///
/// Retries only the crew call after a partial failure.
async fn handle_retry_crew(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(ticket_id): Path<TicketId>,
    Json(req): Json<RetryCrewRequest>,
) -> Result<Response, HttpError> {
    info!(ticket = %ticket_id, actor = %actor.id, crew = %req.crew, "Handling crew retry");

    let report: SubmissionReport = app_state
        .orchestrator
        .retry_crew(&actor, &ticket_id, req.crew)
        .await?;

    Ok(submission_response(&report))
}

/// Handler for GET `/tickets/{id}/capabilities` endpoint.
async fn handle_get_capabilities(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(ticket_id): Path<TicketId>,
    Query(query): Query<CapabilitiesQuery>,
) -> Result<Json<TicketCapabilities>, HttpError> {
    info!(ticket = %ticket_id, actor = %actor.id, mode = %query.mode, "Handling capabilities request");

    let ticket: Ticket = app_state
        .backend
        .get_ticket(&ticket_id)
        .await
        .map_err(|e| translate_backend_error("get_ticket", &e))?;

    Ok(Json(compute_ticket_capabilities(
        app_state.orchestrator.policy(),
        &actor,
        &ticket,
        query.mode,
    )))
}

/// Handler for GET `/areas/{area}/crew-eligibility` endpoint.
///
/// With `?crew=`, the people of that crew count as available.
async fn handle_get_crew_eligibility(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(area): Path<AreaId>,
    Query(query): Query<EligibilityQuery>,
) -> Result<Json<CrewEligibility>, HttpError> {
    info!(area = %area, actor = %actor.id, crew = ?query.crew, "Handling crew eligibility request");

    AuthorizationService::authorize_manage_crews(&actor, &area).map_err(ApiError::from)?;

    let editing: Option<Crew> = match &query.crew {
        Some(crew_id) => Some(find_crew(&app_state, &area, crew_id).await?),
        None => None,
    };

    let eligibility: CrewEligibility = app_state
        .crews
        .resolver()
        .resolve(&area, editing.as_ref())
        .await?;

    Ok(Json(eligibility))
}

async fn find_crew(app_state: &AppState, area: &AreaId, id: &CrewId) -> Result<Crew, HttpError> {
    let crews: Vec<Crew> = app_state
        .backend
        .get_cuadrillas(area)
        .await
        .map_err(|e| translate_backend_error("get_cuadrillas", &e))?;
    crews.into_iter().find(|crew| &crew.id == id).ok_or_else(|| {
        HttpError::from(ApiError::ResourceNotFound {
            resource_type: String::from("Crew"),
            message: format!("Crew '{id}' does not exist in area '{area}'"),
        })
    })
}

/// Handler for POST `/crews` endpoint.
async fn handle_create_crew(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<SaveCrewRequest>,
) -> Result<(StatusCode, Json<SaveCrewResponse>), HttpError> {
    info!(actor = %actor.id, name = %req.name, area = ?req.area, "Handling create crew request");

    let response: SaveCrewResponse = app_state.crews.create(&actor, req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/crews/{id}` endpoint.
async fn handle_update_crew(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(crew_id): Path<CrewId>,
    Json(req): Json<SaveCrewRequest>,
) -> Result<Json<SaveCrewResponse>, HttpError> {
    info!(actor = %actor.id, crew = %crew_id, "Handling update crew request");

    let response: SaveCrewResponse = app_state.crews.update(&actor, &crew_id, req).await?;
    if response.outcome == CrewSaveStatus::Unchanged {
        info!(crew = %crew_id, "Crew update carried no changes");
    }
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/tickets/{id}/assignment", post(handle_assign))
        .route("/tickets/{id}/assignment/crew", post(handle_retry_crew))
        .route("/tickets/{id}/reopen", post(handle_reopen))
        .route("/tickets/{id}/capabilities", get(handle_get_capabilities))
        .route(
            "/areas/{area}/crew-eligibility",
            get(handle_get_crew_eligibility),
        )
        .route("/crews", post(handle_create_crew))
        .route("/crews/{id}", post(handle_update_crew))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Ticket Desk Server");

    let config: ClientConfig = args.client_config();
    let backend: Arc<dyn TicketBackend> = Arc::new(HttpTicketBackend::new(&config)?);
    info!(backend = %config.normalized_base_url(), "Using ticket backend");

    let app_state: AppState = AppState::new(backend, AssignmentPolicy::default());

    // Follow the backend push channel, if configured
    let cancel: CancellationToken = CancellationToken::new();
    let relay = config.push_url.as_ref().map(|url| {
        spawn_push_relay(
            PushSubscriber::new(url.clone(), config.reconnect_delay()),
            app_state.live.clone(),
            cancel.clone(),
        )
    });
    if relay.is_none() {
        info!("No push URL configured, live relay disabled");
    }

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let shutdown = cancel.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutting down");
            shutdown.cancel();
        })
        .await?;

    cancel.cancel();
    if let Some(relay) = relay {
        relay.await?;
    }

    Ok(())
}
