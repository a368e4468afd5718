// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live change notifications for operator screens.
//!
//! Read-only notifications over WebSocket. An event says that something
//! changed, never what the new state is: a screen holding an assignment
//! session for a date uses `AssignmentsReplaced` to notice that its copy is
//! stale and must re-read over HTTP. Nothing is ever accepted from clients.

use axum::{
    extract::{
        FromRef, State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt, stream::SplitSink};
use serde::{Deserialize, Serialize};
use sitecrew_domain::{SiteId, StaffId, iso_date};
use std::sync::Arc;
use time::Date;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Events held for slow subscribers before they are told to resync.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live change events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// The assignments of a date were replaced.
    AssignmentsReplaced {
        #[serde(with = "iso_date")]
        date: Date,
        assignment_count: usize,
        support_assignment_count: usize,
    },
    /// A staff member's availability was replaced.
    AvailabilityReplaced { staff_id: StaffId },
    /// A site was created, updated or deleted.
    SiteChanged { site_id: SiteId },
    /// First message on every connection.
    Connected {
        /// Server time, ISO 8601.
        timestamp: String,
    },
    /// The subscriber fell behind and `missed` events were dropped.
    /// Anything the screen holds may be stale.
    Resync { missed: u64 },
}

/// Fans live events out to every connected WebSocket client.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Publishes `event`. Dropped silently when nobody is listening.
    pub fn broadcast(&self, event: &LiveEvent) {
        let receivers: usize = self.tx.send(event.clone()).unwrap_or(0);
        debug!(?event, receivers, "Published live event");
    }

    /// Subscribes to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live)
    }
}

/// `GET /live`: upgrades to a WebSocket that streams [`LiveEvent`]s.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| stream_events(socket, broadcaster.subscribe()))
}

fn connected_event() -> LiveEvent {
    LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    }
}

async fn send_event(sink: &mut SplitSink<WebSocket, Message>, event: &LiveEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => sink.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            error!(?e, "Failed to serialize live event");
            true
        }
    }
}

/// Runs one connection until the client closes it or a send fails.
///
/// Incoming text and binary frames are ignored.
async fn stream_events(socket: WebSocket, mut rx: broadcast::Receiver<LiveEvent>) {
    info!("Live subscriber connected");
    let (mut sink, mut incoming) = socket.split();

    if !send_event(&mut sink, &connected_event()).await {
        warn!("Live subscriber left before the greeting");
        return;
    }

    loop {
        tokio::select! {
            published = rx.recv() => {
                let event: LiveEvent = match published {
                    Ok(event) => event,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "Live subscriber lagged");
                        LiveEvent::Resync { missed }
                    }
                    Err(RecvError::Closed) => break,
                };
                if !send_event(&mut sink, &event).await {
                    break;
                }
            }
            frame = incoming.next() => match frame {
                None | Some(Ok(Message::Close(_))) => break,
                Some(Ok(Message::Text(_) | Message::Binary(_))) => {
                    debug!("Ignoring frame from live subscriber");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(?e, "Live socket error");
                    break;
                }
            },
        }
    }

    info!("Live subscriber disconnected");
}
