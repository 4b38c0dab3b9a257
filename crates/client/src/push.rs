// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subscriber for the backend's ticket push channel.
//!
//! The backend announces ticket changes as JSON text frames of the form
//! `{"event": "ticket:new" | "ticket:update", "data": {...}}`.
//! [`PushSubscriber::run`] keeps a connection open, decodes those frames
//! and republishes them on a broadcast channel until cancelled.

use std::time::Duration;

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use ticket_desk_domain::TicketId;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

type PushStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Kind of ticket change announced by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketEventKind {
    /// `ticket:new`
    New,
    /// `ticket:update`
    Updated,
}

impl TicketEventKind {
    /// Parses a wire event name.
    #[must_use]
    pub fn from_wire(event: &str) -> Option<Self> {
        match event {
            "ticket:new" => Some(Self::New),
            "ticket:update" => Some(Self::Updated),
            _ => None,
        }
    }

    /// The wire event name.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::New => "ticket:new",
            Self::Updated => "ticket:update",
        }
    }
}

/// A decoded push notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketEvent {
    /// What happened.
    pub kind: TicketEventKind,
    /// The affected ticket.
    pub ticket: TicketId,
    /// The raw `data` object sent by the backend.
    pub payload: serde_json::Value,
}

/// Errors raised by the push channel.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The WebSocket connection could not be established.
    #[error("Failed to connect to push channel at {url}: {message}")]
    Connection {
        /// The push URL.
        url: String,
        /// Underlying error.
        message: String,
    },

    /// A frame was not valid JSON or lacked the event envelope.
    #[error("Malformed push frame: {0}")]
    Malformed(String),

    /// The frame carried an event this subscriber does not handle.
    #[error("Unknown push event '{0}'")]
    UnknownEvent(String),

    /// The event data did not identify a ticket.
    #[error("Push event '{0}' carries no ticket id")]
    MissingTicketId(String),
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Decodes one push text frame.
///
/// The ticket id is read from `data.id`, falling back to `data._id`.
///
/// # Errors
///
/// Returns an error if the frame is malformed, names an unknown event, or
/// carries no ticket id.
pub fn parse_push_frame(text: &str) -> Result<TicketEvent, PushError> {
    let envelope: Envelope =
        serde_json::from_str(text).map_err(|e| PushError::Malformed(e.to_string()))?;
    let kind = TicketEventKind::from_wire(&envelope.event)
        .ok_or_else(|| PushError::UnknownEvent(envelope.event.clone()))?;
    let ticket: TicketId = ["id", "_id"]
        .iter()
        .find_map(|key| envelope.data.get(*key).and_then(serde_json::Value::as_str))
        .filter(|id| !id.trim().is_empty())
        .map(TicketId::new)
        .ok_or_else(|| PushError::MissingTicketId(envelope.event.clone()))?;

    Ok(TicketEvent {
        kind,
        ticket,
        payload: envelope.data,
    })
}

/// How a connected session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Disconnected,
    Cancelled,
}

/// Follows the backend push channel and republishes ticket events.
pub struct PushSubscriber {
    url: String,
    reconnect_delay: Duration,
}

impl PushSubscriber {
    /// Creates a subscriber for `url` that waits `reconnect_delay` between
    /// connection attempts.
    #[must_use]
    pub fn new(url: impl Into<String>, reconnect_delay: Duration) -> Self {
        Self {
            url: url.into(),
            reconnect_delay,
        }
    }

    /// The push URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connects once.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Connection`] if the handshake fails.
    async fn connect(&self) -> Result<PushStream, PushError> {
        let (stream, _response) =
            connect_async(self.url.as_str())
                .await
                .map_err(|e| PushError::Connection {
                    url: self.url.clone(),
                    message: e.to_string(),
                })?;
        info!(url = %self.url, "Connected to ticket push channel");
        Ok(stream)
    }

    /// Runs until `cancel` fires, reconnecting with a fixed delay whenever
    /// the connection fails or drops.
    pub async fn run(&self, events: &broadcast::Sender<TicketEvent>, cancel: &CancellationToken) {
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);
            debug!(url = %self.url, attempt, "Opening ticket push channel");

            tokio::select! {
                () = cancel.cancelled() => break,
                result = self.connect() => match result {
                    Ok(mut stream) => {
                        attempt = 0;
                        if process_messages(&mut stream, events, cancel).await == SessionEnd::Cancelled {
                            break;
                        }
                        warn!(url = %self.url, "Ticket push channel dropped");
                    }
                    Err(e) => {
                        warn!(error = %e, attempt, "Push channel connection attempt failed");
                    }
                },
            }

            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }

        info!(url = %self.url, "Ticket push subscriber stopped");
    }
}

async fn process_messages(
    stream: &mut PushStream,
    events: &broadcast::Sender<TicketEvent>,
    cancel: &CancellationToken,
) -> SessionEnd {
    loop {
        let next = tokio::select! {
            () = cancel.cancelled() => return SessionEnd::Cancelled,
            next = stream.next() => next,
        };

        match next {
            Some(Ok(Message::Text(text))) => handle_text_message(&text, events),
            Some(Ok(Message::Binary(_))) => {
                trace!("Ignoring binary push frame");
            }
            Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
            Some(Ok(Message::Close(frame))) => {
                info!(?frame, "Push channel closed by backend");
                return SessionEnd::Disconnected;
            }
            Some(Err(e)) => {
                error!(error = %e, "Push channel receive error");
                return SessionEnd::Disconnected;
            }
            None => return SessionEnd::Disconnected,
        }
    }
}

fn handle_text_message(text: &str, events: &broadcast::Sender<TicketEvent>) {
    match parse_push_frame(text) {
        Ok(event) => {
            debug!(ticket = %event.ticket, event = event.kind.as_wire(), "Ticket push event");
            // Fails only when nobody is subscribed.
            let _ = events.send(event);
        }
        Err(e) => {
            warn!(error = %e, "Skipping push frame");
        }
    }
}
