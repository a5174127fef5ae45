// Transport-independent half of a streaming session.
// A session moves `Handshaking -> Active -> Draining -> Closed`, or straight
// from `Active` to `Closed` when the peer disappears. The cycle types here
// decide what to send on each tick or command; the network adapter owns the
// socket and only reports back whether a send went through.

use crate::use_cases::cadence::{CadencePolicy, CadenceScheduler, DueSet};
use crate::use_cases::frames::{
    PushFrame, REPLY_CLASSES, ReplyFrame, assemble_push_frame, assemble_reply_frame,
};
use crate::use_cases::world_reader::WorldReader;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Instant;

/// The only client message that triggers a RequestReply cycle.
pub const GET_DATA_COMMAND: &str = "get_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVariant {
    /// Server timer drives every frame.
    Push,
    /// Client drives cadence with `get_data`.
    RequestReply,
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVariant::Push => f.write_str("push"),
            ProtocolVariant::RequestReply => f.write_str("request_reply"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Handshaking,
    Active,
    Draining,
    Closed,
}

impl SessionState {
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Handshaking, Active)
                | (Handshaking, Closed)
                | (Active, Draining)
                | (Active, Closed)
                | (Draining, Closed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    GameEnded,
    ClientClosed,
    TransportError,
    Shutdown,
}

impl TerminationReason {
    /// Orderly endings pass through `Draining`; abrupt ones go straight to `Closed`.
    pub fn drains(self) -> bool {
        matches!(self, TerminationReason::GameEnded | TerminationReason::Shutdown)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            TerminationReason::GameEnded => "game_ended",
            TerminationReason::ClientClosed => "client_closed",
            TerminationReason::TransportError => "transport_error",
            TerminationReason::Shutdown => "shutdown",
        };
        f.write_str(reason)
    }
}

#[derive(Debug)]
pub enum CycleOutcome<F> {
    Send(F),
    GameEnded,
}

/// One Push tick: every enabled class, no cadence gating.
pub fn push_cycle(reader: &WorldReader, policy: &CadencePolicy) -> CycleOutcome<PushFrame> {
    match reader.read_view() {
        Ok(view) => CycleOutcome::Send(assemble_push_frame(&view, policy)),
        Err(_) => CycleOutcome::GameEnded,
    }
}

/// Reply assembled for a `get_data` command, not yet confirmed as sent.
#[derive(Debug)]
pub struct PendingReply {
    pub frame: ReplyFrame,
    due: DueSet,
    at: Instant,
}

/// RequestReply state for one connection.
#[derive(Debug)]
pub struct RequestReplyCycle {
    cadence: CadenceScheduler,
}

impl RequestReplyCycle {
    pub fn new(policy: CadencePolicy) -> Self {
        Self {
            cadence: CadenceScheduler::new(policy),
        }
    }

    /// Returns `None` for anything other than `get_data`.
    pub fn on_message(
        &self,
        text: &str,
        reader: &WorldReader,
        now: Instant,
        timestamp: DateTime<Utc>,
    ) -> Option<CycleOutcome<PendingReply>> {
        if text != GET_DATA_COMMAND {
            return None;
        }

        let view = match reader.read_view() {
            Ok(view) => view,
            Err(_) => return Some(CycleOutcome::GameEnded),
        };
        let due = self.cadence.due_classes(&REPLY_CLASSES, now);
        Some(CycleOutcome::Send(PendingReply {
            frame: assemble_reply_frame(&view, &due, timestamp),
            due,
            at: now,
        }))
    }

    /// Advances the cadence clock once the reply actually reached the socket.
    pub fn confirm_sent(&mut self, reply: &PendingReply) {
        self.cadence.mark_refreshed(&reply.due, reply.at);
    }

    pub fn cadence(&self) -> &CadenceScheduler {
        &self.cadence
    }
}
