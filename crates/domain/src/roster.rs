// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::UserId;

/// The people selected for a crew in the create/edit dialog.
///
/// The dialog keeps the supervisor apart from the member picks, but the
/// backend's `members` list must always contain the supervisor. Use
/// [`CrewRoster::into_members`] when building a save payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewRoster {
    supervisor: UserId,
    members: Vec<UserId>,
}

impl CrewRoster {
    /// Creates a roster from a supervisor and the selected members.
    #[must_use]
    pub const fn new(supervisor: UserId, members: Vec<UserId>) -> Self {
        Self {
            supervisor,
            members,
        }
    }

    /// Returns the supervisor.
    #[must_use]
    pub const fn supervisor(&self) -> &UserId {
        &self.supervisor
    }

    /// Returns the members as selected, without the supervisor union.
    #[must_use]
    pub fn selected_members(&self) -> &[UserId] {
        &self.members
    }

    /// Returns the member list to persist.
    ///
    /// The supervisor is placed first, followed by the selected members in
    /// selection order with duplicates removed.
    #[must_use]
    pub fn into_members(self) -> Vec<UserId> {
        let mut members: Vec<UserId> = Vec::with_capacity(self.members.len() + 1);
        members.push(self.supervisor);
        for member in self.members {
            if !members.contains(&member) {
                members.push(member);
            }
        }
        members
    }
}
