// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, UserId};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidRole(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid role: test");

    let err: DomainError = DomainError::MissingReopenArea;
    assert_eq!(format!("{err}"), "Reopening a ticket requires a target area");

    let err: DomainError = DomainError::MissingReopenReason;
    assert_eq!(
        format!("{err}"),
        "Reopening a ticket requires a non-empty reason"
    );

    let err: DomainError = DomainError::InvalidCrewName(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid crew name: test");

    let err: DomainError = DomainError::MissingCrewArea;
    assert_eq!(format!("{err}"), "A crew must belong to an area");

    let err: DomainError = DomainError::MissingSupervisor;
    assert_eq!(format!("{err}"), "A crew must have a supervisor");

    let err: DomainError = DomainError::IneligibleSupervisor {
        user: UserId::new("U1"),
    };
    assert_eq!(
        format!("{err}"),
        "User 'U1' is not an eligible supervisor for this area"
    );

    let err: DomainError = DomainError::UnavailableMember {
        user: UserId::new("U2"),
    };
    assert_eq!(
        format!("{err}"),
        "User 'U2' is not available as a crew member"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::MissingSupervisor);
    assert_eq!(err.to_string(), "A crew must have a supervisor");
}
