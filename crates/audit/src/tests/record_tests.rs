// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{crew_at, t};
use crate::{AssignmentRecord, CrewAssignment, Ticket, current_area, current_crew};
use ticket_desk_domain::{AreaId, CrewId, UserId};

#[test]
fn test_ticket_deserializes_backend_payload() {
    let json: &str = r#"{
        "id": "T-1",
        "status": "assigned",
        "areaAssignments": [
            {
                "area": "A1",
                "accepted": false,
                "rejectionReason": "wrong district",
                "respondedAt": "2026-03-02T09:00:00Z",
                "assignedAt": "2026-03-02T08:00:00Z",
                "assignedBy": "U1",
                "rejectedBy": "U7"
            },
            {
                "area": "A2",
                "accepted": null,
                "rejectionReason": null,
                "respondedAt": null,
                "assignedAt": "2026-03-02T09:30:00Z",
                "assignedBy": "U1"
            }
        ],
        "crewAssignments": [
            {
                "cuadrilla": "C1",
                "accepted": true,
                "assignedAt": "2026-03-02T10:00:00Z",
                "assignedBy": "U2",
                "valid": true
            }
        ],
        "currentArea": "A2"
    }"#;

    let ticket: Ticket = serde_json::from_str(json).unwrap();

    assert_eq!(ticket.area_assignments.len(), 2);
    assert_eq!(current_area(&ticket), Some(&AreaId::new("A2")));
    assert_eq!(current_crew(&ticket), Some(&CrewId::new("C1")));

    let first = ticket.area_assignments.iter().next().unwrap();
    assert!(first.is_rejected());
    assert_eq!(first.rejected_by, Some(UserId::new("U7")));
    assert!(first.responded_at.is_some());
}

#[test]
fn test_ticket_without_history_deserializes() {
    let ticket: Ticket = serde_json::from_str(r#"{"id": "T-2"}"#).unwrap();

    assert!(ticket.area_assignments.is_empty());
    assert!(ticket.crew_assignments.is_empty());
}

#[test]
fn test_missing_timestamp_deserializes_as_none() {
    let entry: CrewAssignment = serde_json::from_str(r#"{"cuadrilla": "C9"}"#).unwrap();

    assert!(entry.assigned_at().is_none());
    assert!(entry.assigned_by().is_none());
    assert!(entry.is_valid());
    assert!(!entry.is_rejected());
}

#[test]
fn test_valid_flag_only_false_invalidates() {
    let mut entry: CrewAssignment = crew_at("C1", 0);
    assert!(entry.is_valid());

    entry.valid = Some(true);
    assert!(entry.is_valid());

    entry.valid = Some(false);
    assert!(!entry.is_valid());
}

#[test]
fn test_new_records_carry_stamp() {
    let entry: CrewAssignment = crew_at("C1", 15);

    assert_eq!(entry.assigned_at(), Some(t(15)));
    assert_eq!(entry.assigned_by(), Some(&UserId::new("field-lead")));
    assert_eq!(entry.accepted, None);
}
