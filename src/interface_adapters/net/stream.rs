use crate::interface_adapters::http::{ApiError, GAME_NOT_RUNNING, protocol_violation};
use crate::interface_adapters::shutdown::ShutdownListener;
use crate::interface_adapters::state::AppState;
use crate::use_cases::session::push_cycle;
use crate::use_cases::{
    CycleOutcome, GameEndedFrame, ProtocolVariant, RequestReplyCycle, SessionState,
    TerminationReason,
};

use axum::{
    Error,
    extract::{
        State,
        ws::{
            CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code,
            rejection::WebSocketUpgradeRejection,
        },
    },
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};
use tokio::time::{MissedTickBehavior, interval, timeout};
use tracing::{Instrument, debug, info, info_span, warn};

const LOG_THROTTLE: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
enum NetError {
    // Categorizes transport failures; any of them ends the session.
    #[error("websocket error: {0}")]
    Ws(#[from] Error),
    #[error("failed to serialize frame: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("send did not complete within {0:?}")]
    SendTimeout(Duration),
}

#[derive(Debug)]
enum Termination {
    GameEnded,
    // Close frame the peer sent, if any.
    ClientClosed(Option<CloseFrame>),
    TransportFault(NetError),
    Shutdown,
}

impl Termination {
    fn reason(&self) -> TerminationReason {
        match self {
            Termination::GameEnded => TerminationReason::GameEnded,
            Termination::ClientClosed(_) => TerminationReason::ClientClosed,
            Termination::TransportFault(_) => TerminationReason::TransportError,
            Termination::Shutdown => TerminationReason::Shutdown,
        }
    }
}

enum Incoming {
    Text(Utf8Bytes),
    Ignored,
    Closed(Option<CloseFrame>),
    Fault(NetError),
}

fn classify_incoming(incoming: Option<Result<Message, Error>>) -> Incoming {
    match incoming {
        Some(Ok(Message::Text(text))) => Incoming::Text(text),
        Some(Ok(Message::Binary(_) | Message::Ping(_) | Message::Pong(_))) => Incoming::Ignored,
        Some(Ok(Message::Close(frame))) => Incoming::Closed(frame),
        Some(Err(e)) => Incoming::Fault(NetError::Ws(e)),
        None => Incoming::Closed(None),
    }
}

fn next_conn_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

/// Upgraded connection plus its lifecycle bookkeeping.
///
/// The socket is owned here, so it is released on every exit path of the
/// session task, including a panic while assembling a frame.
struct Session {
    socket: WebSocket,
    state: SessionState,
    send_timeout: Duration,

    msgs_out: u64,
    bytes_out: u64,
    ignored_in: u64,
    last_ignored_log: Instant,
}

impl Session {
    fn new(socket: WebSocket, send_timeout: Duration) -> Self {
        Self {
            socket,
            state: SessionState::Handshaking,
            send_timeout,
            msgs_out: 0,
            bytes_out: 0,
            ignored_in: 0,
            last_ignored_log: Instant::now()
                .checked_sub(LOG_THROTTLE)
                .unwrap_or_else(Instant::now),
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid session transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "session state");
        self.state = next;
    }

    async fn send_json<T: Serialize>(&mut self, payload: &T) -> Result<(), NetError> {
        let txt = serde_json::to_string(payload)?;
        let bytes = txt.len();
        // A client that stops reading must not pin this task forever.
        timeout(self.send_timeout, self.socket.send(Message::Text(txt.into())))
            .await
            .map_err(|_| NetError::SendTimeout(self.send_timeout))??;
        self.msgs_out += 1;
        self.bytes_out += bytes as u64;
        Ok(())
    }

    fn note_ignored(&mut self, bytes: usize) {
        self.ignored_in += 1;
        if should_log(&mut self.last_ignored_log) {
            debug!(bytes, ignored = self.ignored_in, "ignoring client message");
        }
    }

    async fn finish(mut self, termination: Termination) {
        let reason = termination.reason();

        if reason.drains() {
            self.transition(SessionState::Draining);
            if reason == TerminationReason::GameEnded {
                // Best-effort: the session closes whether or not this lands.
                if let Err(e) = self.send_json(&GameEndedFrame::default()).await {
                    debug!(error = %e, "terminal message not delivered");
                }
            }
        }

        let close_frame = match termination {
            // Echo whatever the peer presented.
            Termination::ClientClosed(Some(frame)) => Some(frame),
            Termination::ClientClosed(None) | Termination::GameEnded => Some(CloseFrame {
                code: close_code::NORMAL,
                reason: Utf8Bytes::from_static(""),
            }),
            Termination::Shutdown => Some(CloseFrame {
                code: close_code::NORMAL,
                reason: Utf8Bytes::from_static("server shutting down"),
            }),
            Termination::TransportFault(e) => {
                warn!(error = %e, "session transport fault");
                None
            }
        };

        self.transition(SessionState::Closed);
        if let Some(frame) = close_frame {
            let _ = timeout(self.send_timeout, self.socket.send(Message::Close(Some(frame)))).await;
        }

        debug!(
            msgs_out = self.msgs_out,
            bytes_out = self.bytes_out,
            ignored_in = self.ignored_in,
            "connection stats"
        );
        info!(reason = %reason, "client disconnected");
    }
}

/// `/ws/connect`: server-timer-driven stream.
pub async fn push_ws_handler(
    State(state): State<Arc<AppState>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            debug!(%rejection, "rejected non-upgrade request");
            return protocol_violation();
        }
    };

    // No upgrade while there is nothing to stream.
    if state.reader.read_view().is_err() {
        info!("refusing push stream: game not in progress");
        return ApiError::unavailable(GAME_NOT_RUNNING).into_response();
    }

    ws.on_failed_upgrade(|e| warn!(error = %e, "websocket upgrade failed"))
        .on_upgrade(move |socket| run_session(socket, ProtocolVariant::Push, state))
}

/// `/ws/connect_v2`: client-command-driven stream.
pub async fn request_reply_ws_handler(
    State(state): State<Arc<AppState>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            debug!(%rejection, "rejected non-upgrade request");
            return protocol_violation();
        }
    };

    ws.on_failed_upgrade(|e| warn!(error = %e, "websocket upgrade failed"))
        .on_upgrade(move |socket| run_session(socket, ProtocolVariant::RequestReply, state))
}

async fn run_session(socket: WebSocket, variant: ProtocolVariant, state: Arc<AppState>) {
    let conn_id = next_conn_id();
    let span = info_span!("session", conn_id, %variant);

    async move {
        let mut session = Session::new(socket, state.stream.send_timeout);
        let mut shutdown = state.shutdown.listener();
        session.transition(SessionState::Active);
        info!("client connected");

        let termination = match variant {
            ProtocolVariant::Push => run_push(&mut session, &state, &mut shutdown).await,
            ProtocolVariant::RequestReply => {
                run_request_reply(&mut session, &state, &mut shutdown).await
            }
        };

        session.finish(termination).await;
    }
    .instrument(span)
    .await
}

async fn run_push(
    session: &mut Session,
    state: &AppState,
    shutdown: &mut ShutdownListener,
) -> Termination {
    let mut ticker = interval(state.stream.push_tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.wait() => return Termination::Shutdown,

            // Push clients have nothing to say, but closes and faults still count.
            incoming = session.socket.recv() => {
                match classify_incoming(incoming) {
                    Incoming::Text(text) => session.note_ignored(text.len()),
                    Incoming::Ignored => session.note_ignored(0),
                    Incoming::Closed(frame) => return Termination::ClientClosed(frame),
                    Incoming::Fault(e) => return Termination::TransportFault(e),
                }
            }

            _ = ticker.tick() => {
                match push_cycle(&state.reader, &state.stream.policy) {
                    CycleOutcome::GameEnded => return Termination::GameEnded,
                    CycleOutcome::Send(frame) => {
                        if let Err(e) = session.send_json(&frame).await {
                            return Termination::TransportFault(e);
                        }
                    }
                }
            }
        }
    }
}

async fn run_request_reply(
    session: &mut Session,
    state: &AppState,
    shutdown: &mut ShutdownListener,
) -> Termination {
    let mut cycle = RequestReplyCycle::new(state.stream.policy.clone());

    loop {
        let incoming = tokio::select! {
            _ = shutdown.wait() => return Termination::Shutdown,
            incoming = session.socket.recv() => incoming,
        };

        let text = match classify_incoming(incoming) {
            Incoming::Text(text) => text,
            Incoming::Ignored => {
                session.note_ignored(0);
                continue;
            }
            Incoming::Closed(frame) => return Termination::ClientClosed(frame),
            Incoming::Fault(e) => return Termination::TransportFault(e),
        };

        match cycle.on_message(text.as_str(), &state.reader, Instant::now(), Utc::now()) {
            None => session.note_ignored(text.len()),
            Some(CycleOutcome::GameEnded) => return Termination::GameEnded,
            Some(CycleOutcome::Send(reply)) => {
                if let Err(e) = session.send_json(&reply.frame).await {
                    return Termination::TransportFault(e);
                }
                // Only a delivered reply moves the cadence clock.
                cycle.confirm_sent(&reply);
            }
        }
    }
}
