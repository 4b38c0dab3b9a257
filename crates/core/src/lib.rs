// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment decision rules.
//!
//! Given a ticket's history, the acting user, and what the assignment dialog
//! submitted, this crate decides which remote calls are needed and in what
//! order. It performs no I/O.

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

mod command;
mod detect;
mod error;
mod policy;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use command::{AssignmentMode, AssignmentRequest};
pub use detect::{AssignmentDecision, detect_changes, plan_assignment, plan_reopen};
pub use error::CoreError;
pub use policy::AssignmentPolicy;
pub use state::{AssignmentPlan, AssignmentStep, OrchestratorState};
