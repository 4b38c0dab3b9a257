// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ticket_desk::{AssignmentMode, AssignmentPolicy};

use super::helpers::{admin, dispatcher, funcionario, ticket};
use crate::{Capability, TicketCapabilities, compute_ticket_capabilities};

#[test]
fn test_admin_capabilities() {
    let caps = compute_ticket_capabilities(
        &AssignmentPolicy::default(),
        &admin(),
        &ticket("A1", None),
        AssignmentMode::Assign,
    );

    assert_eq!(
        caps,
        TicketCapabilities {
            can_assign_area: Capability::Allowed,
            can_assign_crew: Capability::Allowed,
            can_reopen: Capability::Allowed,
        }
    );
}

#[test]
fn test_reopen_mode_disables_crew() {
    let caps = compute_ticket_capabilities(
        &AssignmentPolicy::default(),
        &admin(),
        &ticket("A1", None),
        AssignmentMode::Reopen,
    );

    assert_eq!(caps.can_assign_crew, Capability::Denied);
    assert!(caps.can_assign_area.is_allowed());
}

#[test]
fn test_dispatcher_has_no_crew_field() {
    let caps = compute_ticket_capabilities(
        &AssignmentPolicy::default(),
        &dispatcher(),
        &ticket("A1", None),
        AssignmentMode::Assign,
    );

    assert!(caps.can_assign_area.is_allowed());
    assert!(!caps.can_assign_crew.is_allowed());
}

#[test]
fn test_funcionario_crew_field_follows_ticket_area() {
    let policy = AssignmentPolicy::default();
    let home = compute_ticket_capabilities(
        &policy,
        &funcionario("A1"),
        &ticket("A1", None),
        AssignmentMode::Assign,
    );
    let away = compute_ticket_capabilities(
        &policy,
        &funcionario("A1"),
        &ticket("A2", None),
        AssignmentMode::Assign,
    );

    assert!(home.can_assign_crew.is_allowed());
    assert!(!away.can_assign_crew.is_allowed());
    assert!(!home.can_assign_area.is_allowed());
    assert!(!home.can_reopen.is_allowed());
}

#[test]
fn test_capabilities_serialize_as_booleans() {
    let caps = TicketCapabilities {
        can_assign_area: Capability::Allowed,
        can_assign_crew: Capability::Denied,
        can_reopen: Capability::from_bool(true),
    };

    let json = serde_json::to_value(&caps).unwrap();

    assert_eq!(
        json,
        serde_json::json!({"canAssignArea": true, "canAssignCrew": false, "canReopen": true})
    );
}
