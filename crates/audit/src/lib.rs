// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment history for tickets.
//!
//! Every routing decision about a ticket is recorded by the backend as an
//! immutable assignment record appended to one of two logs: the area log and
//! the crew log. These logs are the only source of truth for a ticket's
//! current area and crew. Denormalized "current" fields on the ticket are
//! for display and are never consulted by decision logic.

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

mod history;
mod log;
mod record;
mod ticket;

#[cfg(test)]
mod tests;

pub use history::{current_area, current_crew, last_valid_crew_assignment, latest_area_assignment};
pub use log::AssignmentLog;
pub use record::{AreaAssignment, AssignmentRecord, CrewAssignment};
pub use ticket::Ticket;
