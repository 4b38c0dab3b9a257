// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live ticket notifications for operator UIs.
//!
//! Ticket events received from the backend push channel are relayed to
//! every connected WebSocket client. Events are hints to refresh; clients
//! must still read tickets over HTTP for authoritative data.
//!
//! # Architecture
//!
//! - [`PushSubscriber`] feeds a `broadcast` channel of [`TicketEvent`]s
//! - [`LiveEventBroadcaster::relay`] maps them to [`LiveEvent`]s
//! - `/live` sockets stream every [`LiveEvent`] after a `connected` frame
//! - Nothing sent by a client is acted upon

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use ticket_desk_client::{PushSubscriber, TicketEvent, TicketEventKind};
use ticket_desk_domain::TicketId;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Maximum number of events to buffer per channel.
/// Slow clients lose the oldest events.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live event types sent to UIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A ticket was created.
    TicketCreated {
        /// The new ticket.
        ticket: TicketId,
        /// The ticket as announced by the backend.
        data: serde_json::Value,
    },
    /// A ticket changed.
    TicketUpdated {
        /// The changed ticket.
        ticket: TicketId,
        /// The ticket as announced by the backend.
        data: serde_json::Value,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (RFC 3339).
        timestamp: String,
    },
}

impl From<TicketEvent> for LiveEvent {
    fn from(event: TicketEvent) -> Self {
        match event.kind {
            TicketEventKind::New => Self::TicketCreated {
                ticket: event.ticket,
                data: event.payload,
            },
            TicketEventKind::Updated => Self::TicketUpdated {
                ticket: event.ticket,
                data: event.payload,
            },
        }
    }
}

/// Fan-out of live events to connected UIs.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to the event stream.
    ///
    /// Events sent before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }

    /// Forwards ticket events until `events` is closed.
    pub async fn relay(&self, mut events: broadcast::Receiver<TicketEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => self.broadcast(&LiveEvent::from(event)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live relay fell behind the push channel");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("Live relay stopped");
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts following the backend push channel and relaying its events.
///
/// Both tasks stop once `cancel` fires.
pub fn spawn_push_relay(
    subscriber: PushSubscriber,
    broadcaster: LiveEventBroadcaster,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let (tx, rx) = broadcast::channel::<TicketEvent>(EVENT_BUFFER_SIZE);
    let relay: JoinHandle<()> = tokio::spawn(async move { broadcaster.relay(rx).await });

    tokio::spawn(async move {
        info!(url = subscriber.url(), "Starting ticket push relay");
        subscriber.run(&tx, &cancel).await;
        // Closing the channel ends the relay.
        drop(tx);
        if let Err(e) = relay.await {
            error!(error = %e, "Live relay task failed");
        }
    })
}

/// Handles WebSocket upgrade requests for live event streaming.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `app_state` - Application state holding the broadcaster
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(app_state): AxumState<AppState>,
) -> Response {
    let broadcaster: LiveEventBroadcaster = app_state.live.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Streams live events to one client until it disconnects.
async fn handle_socket(socket: WebSocket, broadcaster: LiveEventBroadcaster) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            let event: LiveEvent = match rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client fell behind, events dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}
