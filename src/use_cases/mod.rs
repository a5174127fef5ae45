// Use cases layer: world reads, snapshot assembly, cadence, and session protocol.

pub mod cadence;
pub mod frames;
pub mod session;
pub mod snapshot;
pub mod world_reader;

#[cfg(test)]
pub(crate) mod test_support;

pub use cadence::{CadencePolicy, CadenceScheduler, DueSet};
pub use frames::{GameEndedFrame, PushFrame, REPLY_CLASSES, ReplyFrame};
pub use session::{
    CycleOutcome, GET_DATA_COMMAND, ProtocolVariant, RequestReplyCycle, SessionState,
    TerminationReason,
};
pub use world_reader::WorldReader;
