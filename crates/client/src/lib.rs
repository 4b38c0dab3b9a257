// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Network clients for the ticket backend.
//!
//! [`HttpTicketBackend`] implements the `TicketBackend` boundary over the
//! backend's REST API. [`PushSubscriber`] follows the backend's WebSocket
//! push channel and republishes ticket events.

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

mod config;
mod http;
mod push;

#[cfg(test)]
mod tests;

pub use config::{ClientConfig, ClientError};
pub use http::HttpTicketBackend;
pub use push::{PushError, PushSubscriber, TicketEvent, TicketEventKind, parse_push_frame};
