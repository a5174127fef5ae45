// Interface adapters: HTTP/WebSocket handling and the World Store channel.

pub mod http;
pub mod net;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod store;
