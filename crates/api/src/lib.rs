// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment workflow services on top of the ticket backend.
//!
//! This crate owns the remote boundary ([`TicketBackend`]), the ordered
//! execution of assignment plans, crew eligibility, and the API error
//! contract. It is transport-agnostic: the HTTP client and the HTTP server
//! live in their own crates.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod backend;
mod capabilities;
mod crews;
mod eligibility;
mod error;
mod orchestrator;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthorizationService, resolve_acting_user};
pub use backend::{
    BackendError, CrewPatch, NewCrew, POOL_PAGE_SIZE, Paging, ReopenTicketRequest, SortDirection,
    SortSpec, TicketBackend, UserSearchFilters,
};
pub use capabilities::compute_ticket_capabilities;
pub use crews::CrewService;
pub use eligibility::{CrewEligibilityResolver, CrewForm, EligibilityTicket};
pub use error::{
    ApiError, AuthError, translate_backend_error, translate_core_error, translate_domain_error,
};
pub use orchestrator::{
    AssignmentOrchestrator, DialogKey, SubmissionGuard, SubmissionOutcome, SubmissionRegistry,
    SubmissionReport, dialog_key,
};
pub use request_response::{
    AssignTicketRequest, Capability, CrewEligibility, CrewSaveStatus, ReopenRequest,
    RetryCrewRequest, SaveCrewRequest, SaveCrewResponse, SubmissionResponse, SubmissionStatus,
    TicketCapabilities,
};
