pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::config::{http_port, stream_settings};
pub use frameworks::server::{run, run_with_config};
pub use interface_adapters::shutdown::ShutdownSignal;
pub use interface_adapters::state::StreamSettings;
pub use interface_adapters::store::{WatchWorldStore, WorldPublisher, world_channel};
