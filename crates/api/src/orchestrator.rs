// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ordered execution of assignment plans against the ticket backend.
//!
//! A plan is executed one remote call at a time. The crew call of an
//! area-then-crew plan is only issued after the area call succeeded, and a
//! failed call ends the submission without retrying.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use ticket_desk::{
    AssignmentMode, AssignmentPlan, AssignmentPolicy, AssignmentRequest, AssignmentStep, CoreError,
    OrchestratorState, plan_assignment, plan_reopen,
};
use ticket_desk_audit::Ticket;
use ticket_desk_domain::{ActingUser, AreaId, CrewId, TicketId, UserId};
use tracing::{debug, error, info};

use crate::auth::AuthorizationService;
use crate::backend::{BackendError, ReopenTicketRequest, TicketBackend};
use crate::error::{ApiError, translate_backend_error, translate_core_error};
use crate::request_response::{SubmissionResponse, SubmissionStatus};

/// How an executed plan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Every planned call succeeded.
    Committed,
    /// The plan was empty; no call was made.
    Unchanged,
    /// A planned call failed and the remaining calls were skipped.
    Failed {
        /// The step that failed.
        step: AssignmentStep,
        /// The backend's error.
        error: BackendError,
        /// Whether the area call of this plan had already succeeded.
        area_committed: bool,
    },
}

/// The result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    /// The ticket that was submitted.
    pub ticket: TicketId,
    /// The plan that was executed.
    pub plan: AssignmentPlan,
    /// How it ended.
    pub outcome: SubmissionOutcome,
    /// Every state entered, starting with `Idle` and ending with `Done`.
    pub transitions: Vec<OrchestratorState>,
}

impl SubmissionReport {
    /// Converts the report into its wire response.
    #[must_use]
    pub fn to_response(&self) -> SubmissionResponse {
        let (outcome, step, message, area_committed) = match &self.outcome {
            SubmissionOutcome::Committed => (SubmissionStatus::Committed, None, None, None),
            SubmissionOutcome::Unchanged => (SubmissionStatus::Unchanged, None, None, None),
            SubmissionOutcome::Failed {
                step,
                error,
                area_committed,
            } => (
                SubmissionStatus::Failed,
                Some(*step),
                Some(error.to_string()),
                Some(*area_committed),
            ),
        };
        SubmissionResponse {
            ticket_id: self.ticket.clone(),
            outcome,
            step,
            message,
            area_committed,
            transitions: self.transitions.clone(),
        }
    }
}

/// A remote call with its arguments.
enum RemoteCall {
    Area(AreaId),
    Crew(CrewId),
    Reopen { area: AreaId, reason: String },
}

impl RemoteCall {
    const fn step(&self) -> AssignmentStep {
        match self {
            Self::Area(_) => AssignmentStep::Area,
            Self::Crew(_) => AssignmentStep::Crew,
            Self::Reopen { .. } => AssignmentStep::Reopen,
        }
    }

    fn from_plan(plan: &AssignmentPlan) -> Vec<Self> {
        match plan {
            AssignmentPlan::Unchanged => Vec::new(),
            AssignmentPlan::AreaOnly(area) => vec![Self::Area(area.clone())],
            AssignmentPlan::CrewOnly(crew) => vec![Self::Crew(crew.clone())],
            AssignmentPlan::AreaThenCrew { area, crew } => {
                vec![Self::Area(area.clone()), Self::Crew(crew.clone())]
            }
            AssignmentPlan::Reopen { area, reason } => vec![Self::Reopen {
                area: area.clone(),
                reason: reason.clone(),
            }],
        }
    }
}

/// Records the state machine of one submission.
struct StateTracker {
    ticket: TicketId,
    current: OrchestratorState,
    transitions: Vec<OrchestratorState>,
}

impl StateTracker {
    fn new(ticket: &TicketId) -> Self {
        Self {
            ticket: ticket.clone(),
            current: OrchestratorState::Idle,
            transitions: vec![OrchestratorState::Idle],
        }
    }

    fn advance(&mut self, to: OrchestratorState) -> Result<(), CoreError> {
        if !self.current.can_transition_to(to) {
            return Err(CoreError::InvalidTransition {
                from: self.current,
                to,
            });
        }
        debug!(ticket = %self.ticket, from = ?self.current, to = ?to, "Assignment state transition");
        self.current = to;
        self.transitions.push(to);
        Ok(())
    }
}

/// Identifies one dialog instance: the acting user and the ticket.
pub type DialogKey = (UserId, TicketId);

/// Tracks which dialogs have a submission running.
#[derive(Debug, Default)]
pub struct SubmissionRegistry {
    in_flight: Mutex<HashSet<DialogKey>>,
}

impl SubmissionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as in flight.
    ///
    /// Returns `None` if a submission for `key` is already running. The
    /// mark is cleared when the returned guard is dropped.
    pub fn try_begin(&self, key: DialogKey) -> Option<SubmissionGuard<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(key.clone()) {
            return None;
        }
        Some(SubmissionGuard {
            registry: self,
            key,
        })
    }

    /// Whether a submission for `key` is running.
    #[must_use]
    pub fn is_in_flight(&self, key: &DialogKey) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

/// Clears its registry entry on drop.
#[derive(Debug)]
pub struct SubmissionGuard<'a> {
    registry: &'a SubmissionRegistry,
    key: DialogKey,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.registry
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Key identifying one dialog instance.
#[must_use]
pub fn dialog_key(actor: &ActingUser, ticket: &TicketId) -> DialogKey {
    (actor.id.clone(), ticket.clone())
}

/// Runs assignment submissions against a [`TicketBackend`].
pub struct AssignmentOrchestrator {
    backend: Arc<dyn TicketBackend>,
    policy: AssignmentPolicy,
    registry: SubmissionRegistry,
}

impl AssignmentOrchestrator {
    /// Creates an orchestrator.
    #[must_use]
    pub fn new(backend: Arc<dyn TicketBackend>, policy: AssignmentPolicy) -> Self {
        Self {
            backend,
            policy,
            registry: SubmissionRegistry::new(),
        }
    }

    /// Returns the role table in use.
    #[must_use]
    pub const fn policy(&self) -> &AssignmentPolicy {
        &self.policy
    }

    /// Returns the in-flight registry.
    #[must_use]
    pub const fn registry(&self) -> &SubmissionRegistry {
        &self.registry
    }

    /// Plans and executes a dialog submission for an already loaded ticket.
    ///
    /// # Arguments
    ///
    /// * `actor` - The acting user
    /// * `ticket` - The ticket as the dialog saw it
    /// * `request` - What the dialog submitted
    ///
    /// # Errors
    ///
    /// Returns an error, without any remote call, if:
    /// - A submission for the same actor and ticket is already running
    /// - A reopen request is invalid or the actor may not reopen
    ///
    /// Remote failures are not errors; they are reported in the outcome.
    pub async fn submit(
        &self,
        actor: &ActingUser,
        ticket: &Ticket,
        request: &AssignmentRequest,
    ) -> Result<SubmissionReport, ApiError> {
        let _guard = self.begin(actor, &ticket.id)?;
        self.plan_and_execute(actor, ticket, request).await
    }

    /// Loads a ticket and submits an assign-mode request for it.
    ///
    /// The dialog is marked in flight before the ticket is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket cannot be loaded or a submission for
    /// the same actor and ticket is already running.
    pub async fn assign(
        &self,
        actor: &ActingUser,
        ticket_id: &TicketId,
        area: Option<AreaId>,
        crew: Option<CrewId>,
    ) -> Result<SubmissionReport, ApiError> {
        let _guard = self.begin(actor, ticket_id)?;
        let ticket: Ticket = self.load_ticket(ticket_id).await?;
        self.plan_and_execute(actor, &ticket, &AssignmentRequest::Assign { area, crew })
            .await
    }

    async fn plan_and_execute(
        &self,
        actor: &ActingUser,
        ticket: &Ticket,
        request: &AssignmentRequest,
    ) -> Result<SubmissionReport, ApiError> {
        if matches!(request, AssignmentRequest::Reopen { .. }) {
            AuthorizationService::authorize_reopen(&self.policy, actor)?;
        }
        let plan: AssignmentPlan =
            plan_assignment(&self.policy, actor, ticket, request).map_err(translate_core_error)?;

        info!(
            ticket = %ticket.id,
            actor = %actor.id,
            mode = %request.mode(),
            steps = plan.steps().len(),
            "Submitting assignment"
        );
        self.execute(&ticket.id, plan).await
    }

    /// Reopens a ticket into an area.
    ///
    /// Validation happens before any remote call; the ticket is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the area is missing, the reason is blank, the
    /// actor may not reopen, or a submission is already running.
    pub async fn reopen(
        &self,
        actor: &ActingUser,
        ticket_id: &TicketId,
        area: Option<&AreaId>,
        reason: &str,
    ) -> Result<SubmissionReport, ApiError> {
        let _guard = self.begin(actor, ticket_id)?;

        AuthorizationService::authorize_reopen(&self.policy, actor)?;
        let plan: AssignmentPlan = plan_reopen(area, reason).map_err(translate_core_error)?;

        info!(ticket = %ticket_id, actor = %actor.id, "Reopening ticket");
        self.execute(ticket_id, plan).await
    }

    /// Issues only the crew call for a ticket.
    ///
    /// Used after a `Failed { step: Crew, area_committed: true }` outcome.
    /// The ticket is reloaded so the permission check sees the stored area.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket cannot be loaded, the actor may not
    /// assign crews on it, or a submission is already running.
    pub async fn retry_crew(
        &self,
        actor: &ActingUser,
        ticket_id: &TicketId,
        crew: CrewId,
    ) -> Result<SubmissionReport, ApiError> {
        let _guard = self.begin(actor, ticket_id)?;

        let ticket: Ticket = self.load_ticket(ticket_id).await?;
        if !self
            .policy
            .can_assign_crew(actor, &ticket, AssignmentMode::Assign)
        {
            return Err(ApiError::Unauthorized {
                action: String::from("assign_cuadrilla"),
                required_role: String::from("crew assigner for the ticket's area"),
            });
        }

        info!(ticket = %ticket_id, actor = %actor.id, crew = %crew, "Retrying crew assignment");
        self.execute(ticket_id, AssignmentPlan::CrewOnly(crew)).await
    }

    fn begin(
        &self,
        actor: &ActingUser,
        ticket: &TicketId,
    ) -> Result<SubmissionGuard<'_>, ApiError> {
        self.registry
            .try_begin(dialog_key(actor, ticket))
            .ok_or_else(|| ApiError::SubmissionInFlight {
                ticket: ticket.clone(),
            })
    }

    async fn load_ticket(&self, ticket_id: &TicketId) -> Result<Ticket, ApiError> {
        self.backend
            .get_ticket(ticket_id)
            .await
            .map_err(|e| translate_backend_error("get_ticket", &e))
    }

    async fn execute(
        &self,
        ticket: &TicketId,
        plan: AssignmentPlan,
    ) -> Result<SubmissionReport, ApiError> {
        let mut tracker = StateTracker::new(ticket);
        let calls: Vec<RemoteCall> = RemoteCall::from_plan(&plan);

        if calls.is_empty() {
            tracker
                .advance(OrchestratorState::Done)
                .map_err(translate_core_error)?;
            info!(ticket = %ticket, "Assignment unchanged, nothing to submit");
            return Ok(SubmissionReport {
                ticket: ticket.clone(),
                plan,
                outcome: SubmissionOutcome::Unchanged,
                transitions: tracker.transitions,
            });
        }

        let mut area_committed: bool = false;
        for call in calls {
            let step: AssignmentStep = call.step();
            tracker
                .advance(OrchestratorState::submitting(step))
                .map_err(translate_core_error)?;

            if let Err(err) = self.run(ticket, call).await {
                error!(ticket = %ticket, step = %step, error = %err, "Assignment step failed");
                tracker
                    .advance(OrchestratorState::Done)
                    .map_err(translate_core_error)?;
                return Ok(SubmissionReport {
                    ticket: ticket.clone(),
                    plan,
                    outcome: SubmissionOutcome::Failed {
                        step,
                        error: err,
                        area_committed,
                    },
                    transitions: tracker.transitions,
                });
            }

            if step == AssignmentStep::Area {
                area_committed = true;
            }
        }

        tracker
            .advance(OrchestratorState::Done)
            .map_err(translate_core_error)?;
        info!(ticket = %ticket, "Assignment committed");
        Ok(SubmissionReport {
            ticket: ticket.clone(),
            plan,
            outcome: SubmissionOutcome::Committed,
            transitions: tracker.transitions,
        })
    }

    async fn run(&self, ticket: &TicketId, call: RemoteCall) -> Result<(), BackendError> {
        match call {
            RemoteCall::Area(area) => self.backend.assign_area(ticket, &area).await,
            RemoteCall::Crew(crew) => self.backend.assign_cuadrilla(ticket, &crew).await,
            RemoteCall::Reopen { area, reason } => {
                self.backend
                    .reopen_ticket(&ReopenTicketRequest {
                        ticket_id: ticket.clone(),
                        area_id: area,
                        reason,
                    })
                    .await
            }
        }
    }
}
