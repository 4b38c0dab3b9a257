// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use ticket_desk_domain::{AreaId, CrewId};

/// The mode an assignment dialog was opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMode {
    /// Normal routing of an open ticket to an area and/or crew.
    #[default]
    Assign,
    /// Re-routing a rejected or closed ticket back to an area.
    Reopen,
}

impl AssignmentMode {
    /// Returns the wire representation of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Reopen => "reopen",
        }
    }
}

impl std::fmt::Display for AssignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an assignment dialog submitted, as data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentRequest {
    /// Route the ticket to an area and/or crew.
    ///
    /// Either field may be absent when the dialog left it empty or the
    /// field was disabled for the acting user.
    Assign {
        /// The area picked in the dialog.
        area: Option<AreaId>,
        /// The crew picked in the dialog.
        crew: Option<CrewId>,
    },
    /// Reopen the ticket and route it to an area.
    Reopen {
        /// The target area. Required.
        area: Option<AreaId>,
        /// Why the ticket is being reopened. Required, non-blank.
        reason: String,
    },
}

impl AssignmentRequest {
    /// Returns the dialog mode this request belongs to.
    #[must_use]
    pub const fn mode(&self) -> AssignmentMode {
        match self {
            Self::Assign { .. } => AssignmentMode::Assign,
            Self::Reopen { .. } => AssignmentMode::Reopen,
        }
    }
}
