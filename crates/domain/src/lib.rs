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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod roster;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use roster::CrewRoster;
pub use types::{ActingUser, AreaId, Crew, CrewId, Role, ShiftId, TicketId, User, UserId};
pub use validation::{
    validate_crew_name, validate_crew_selection, validate_reopen_area, validate_reopen_reason,
};
