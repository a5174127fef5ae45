use crate::interface_adapters::shutdown::ShutdownSignal;
use crate::use_cases::{CadencePolicy, WorldReader};
use std::time::Duration;

/// Settings shared by every streaming session.
#[derive(Debug, Clone)]
pub struct StreamSettings {
    /// Tick interval for the Push variant.
    pub push_tick: Duration,
    /// Upper bound for a single frame send before the client is dropped.
    pub send_timeout: Duration,
    /// Refresh intervals and feature toggles.
    pub policy: CadencePolicy,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            push_tick: Duration::from_millis(100),
            send_timeout: Duration::from_secs(2),
            policy: CadencePolicy::default(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    // Read-only access to the published world.
    pub reader: WorldReader,
    pub stream: StreamSettings,
    // Tells active sessions the server is stopping.
    pub shutdown: ShutdownSignal,
}
