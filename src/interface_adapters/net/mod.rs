// Network adapter modules split by one-shot HTTP queries vs streaming sockets.

pub mod query;
pub mod stream;

pub use query::{
    containers_handler, corpses_handler, exfils_handler, game_state_handler, loose_loot_handler,
    map_handler, players_handler, quests_handler,
};
pub use stream::{push_ws_handler, request_reply_ws_handler};
