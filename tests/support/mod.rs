// Shared helpers for integration tests: a per-test feed server and WebSocket client utilities.
#![allow(dead_code)]

use feed_server::domain::{
    Exfil, ExfilStatus, LootEntity, LootSet, LootStash, LooseItem, PlayerState, Vec3, WorldView,
};
use feed_server::{ShutdownSignal, StreamSettings, WorldPublisher, world_channel};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::{io, net::SocketAddr, sync::Arc, time::Duration};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Message, protocol::CloseFrame},
};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

// Running server plus the handles a test needs to drive it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub publisher: WorldPublisher,
    pub shutdown: ShutdownSignal,
    handle: JoinHandle<io::Result<()>>,
}

impl TestServer {
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    // Trigger graceful shutdown and wait for the serve loop to return.
    pub async fn stop(self) -> io::Result<()> {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
    }
}

// Settings with a fast Push tick so tests do not wait on the default cadence.
pub fn fast_settings() -> StreamSettings {
    StreamSettings {
        push_tick: Duration::from_millis(20),
        ..StreamSettings::default()
    }
}

pub async fn spawn_server(initial: WorldView) -> TestServer {
    spawn_server_with(initial, fast_settings()).await
}

pub async fn spawn_server_with(initial: WorldView, settings: StreamSettings) -> TestServer {
    // Bind before spawning so the port accepts connections as soon as this returns.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");

    let (publisher, store) = world_channel(initial);
    let shutdown = ShutdownSignal::new();
    let handle = tokio::spawn(feed_server::run(
        listener,
        Arc::new(store),
        settings,
        shutdown.clone(),
    ));

    TestServer {
        addr,
        publisher,
        shutdown,
        handle,
    }
}

pub async fn ws_connect(server: &TestServer, path: &str) -> WsClient {
    let (ws, _resp) = connect_async(server.ws_url(path))
        .await
        .expect("websocket handshake");
    ws
}

pub async fn ws_send_text(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.into()))
        .await
        .expect("send text frame");
}

// Next text frame parsed as JSON; control frames are skipped.
pub async fn ws_recv_json(ws: &mut WsClient) -> Value {
    tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            let msg = ws
                .next()
                .await
                .expect("stream ended before a text frame")
                .expect("websocket error");
            match msg {
                Message::Text(text) => {
                    return serde_json::from_str::<Value>(text.as_str()).expect("json frame");
                }
                Message::Close(frame) => panic!("unexpected close: {frame:?}"),
                _ => continue,
            }
        }
    })
    .await
    .expect("timed out waiting for a text frame")
}

pub async fn ws_expect_no_message(ws: &mut WsClient, wait: Duration) {
    let result = tokio::time::timeout(wait, ws.next()).await;

    // We only succeed if we timed out without seeing anything.
    if let Ok(msg) = result {
        panic!("unexpected message: {msg:?}");
    }
}

// Reads until the server's close frame, skipping any data still in flight.
pub async fn ws_expect_close(ws: &mut WsClient) -> Option<CloseFrame> {
    tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(frame))) => return frame,
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("websocket error before close: {e}"),
                None => panic!("stream ended without a close frame"),
            }
        }
    })
    .await
    .expect("timed out waiting for close")
}

// Reads until a text frame carries `key`, skipping frames that do not.
pub async fn ws_recv_json_with(ws: &mut WsClient, key: &str) -> Value {
    tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            let value = ws_recv_json(ws).await;
            if value.get(key).is_some() {
                return value;
            }
        }
    })
    .await
    .expect("timed out waiting for matching frame")
}

pub fn in_game_view() -> WorldView {
    let mut view = WorldView::idle();
    view.phase.in_game = true;
    view.phase.map_name = "Customs".to_string();
    view
}

pub fn player_named(name: &str, position: Vec3) -> PlayerState {
    PlayerState {
        name: Some(name.to_string()),
        profile_id: Some(format!("profile-{name}")),
        account_id: Some(format!("account-{name}")),
        is_pmc: true,
        is_alive: true,
        is_active: true,
        position,
        ..PlayerState::default()
    }
}

// In-game view with Alice, one corpse, one loose item and one exfil.
pub fn raid_view() -> WorldView {
    let mut view = in_game_view();
    view.players.insert(
        "alice".to_string(),
        player_named("Alice", Vec3::new(1.0, 2.0, 3.0)),
    );
    view.loot = Some(LootSet {
        entities: vec![
            LootEntity::LooseItem(LooseItem {
                name: "LEDX".to_string(),
                id: "ledx".to_string(),
                value: 1_000_000,
                position: Vec3::new(5.0, 0.5, 5.0),
            }),
            LootEntity::Container(LootStash {
                name: "Weapon box".to_string(),
                items: Vec::new(),
                value: 40_000,
                important: false,
                position: Vec3::new(6.0, 0.0, 6.0),
            }),
            LootEntity::Corpse(LootStash {
                name: "Reshala".to_string(),
                items: Vec::new(),
                value: 120_000,
                important: true,
                position: Vec3::new(7.0, 0.0, 7.0),
            }),
        ],
        cached: true,
    });
    view.exfils = Some(vec![Exfil {
        name: "ZB-1011".to_string(),
        status: ExfilStatus::Pending,
        position: Vec3::new(-50.0, 0.0, 30.0),
    }]);
    view
}

// Raid view whose frames are large enough to fill socket buffers quickly.
pub fn bulky_raid_view(loose_items: usize) -> WorldView {
    let mut view = raid_view();
    if let Some(loot) = view.loot.as_mut() {
        loot.entities
            .extend((0..loose_items).map(|i| {
                LootEntity::LooseItem(LooseItem {
                    name: format!("Bolts #{i}"),
                    id: format!("bolts-{i}"),
                    value: 15_000,
                    position: Vec3::new(i as f32, 1.0, -(i as f32)),
                })
            }));
    }
    view
}

// Reads frames until `deadline`, returning the client and how many text frames arrived.
pub async fn ws_read_until(
    mut ws: WsClient,
    deadline: tokio::time::Instant,
) -> Result<(WsClient, usize), String> {
    let mut frames = 0;
    loop {
        match tokio::time::timeout_at(deadline, ws.next()).await {
            Err(_) => return Ok((ws, frames)),
            Ok(Some(Ok(Message::Text(_)))) => frames += 1,
            Ok(Some(Ok(Message::Close(frame)))) => return Err(format!("closed: {frame:?}")),
            Ok(Some(Ok(_))) => continue,
            Ok(Some(Err(e))) => return Err(format!("websocket error: {e}")),
            Ok(None) => return Err("stream ended".to_string()),
        }
    }
}

// Drains whatever the server buffered and reports whether the stream then ended.
pub async fn ws_drain_until_end(ws: &mut WsClient, wait: Duration) -> bool {
    tokio::time::timeout(wait, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await
    .is_ok()
}
