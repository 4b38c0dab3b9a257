// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssignmentPlan, AssignmentStep, OrchestratorState};

use super::helpers::{area, crew};

#[test]
fn test_valid_transitions() {
    assert!(OrchestratorState::Idle.can_transition_to(OrchestratorState::SubmittingArea));
    assert!(OrchestratorState::Idle.can_transition_to(OrchestratorState::SubmittingCrew));
    assert!(OrchestratorState::Idle.can_transition_to(OrchestratorState::SubmittingReopen));
    assert!(OrchestratorState::Idle.can_transition_to(OrchestratorState::Done));
    assert!(OrchestratorState::SubmittingArea.can_transition_to(OrchestratorState::SubmittingCrew));
    assert!(OrchestratorState::SubmittingArea.can_transition_to(OrchestratorState::Done));
    assert!(OrchestratorState::SubmittingCrew.can_transition_to(OrchestratorState::Done));
    assert!(OrchestratorState::SubmittingReopen.can_transition_to(OrchestratorState::Done));
}

#[test]
fn test_invalid_transitions() {
    assert!(!OrchestratorState::SubmittingCrew.can_transition_to(OrchestratorState::SubmittingArea));
    assert!(!OrchestratorState::SubmittingReopen.can_transition_to(OrchestratorState::SubmittingCrew));
    assert!(!OrchestratorState::Done.can_transition_to(OrchestratorState::Idle));
    assert!(!OrchestratorState::Done.can_transition_to(OrchestratorState::SubmittingArea));
    assert!(!OrchestratorState::Idle.can_transition_to(OrchestratorState::Idle));
}

#[test]
fn test_submitting_state_per_step() {
    assert_eq!(
        OrchestratorState::submitting(AssignmentStep::Area),
        OrchestratorState::SubmittingArea
    );
    assert_eq!(
        OrchestratorState::submitting(AssignmentStep::Reopen),
        OrchestratorState::SubmittingReopen
    );
    assert!(OrchestratorState::Done.is_done());
}

#[test]
fn test_plan_steps_are_ordered() {
    assert!(AssignmentPlan::Unchanged.steps().is_empty());
    assert!(AssignmentPlan::Unchanged.is_unchanged());
    assert_eq!(
        AssignmentPlan::AreaOnly(area("A1")).steps(),
        vec![AssignmentStep::Area]
    );
    assert_eq!(
        AssignmentPlan::AreaThenCrew {
            area: area("A1"),
            crew: crew("C1"),
        }
        .steps(),
        vec![AssignmentStep::Area, AssignmentStep::Crew]
    );
}

#[test]
fn test_state_serializes_snake_case() {
    let json = serde_json::to_string(&OrchestratorState::SubmittingArea).unwrap();
    assert_eq!(json, "\"submitting_area\"");
}
