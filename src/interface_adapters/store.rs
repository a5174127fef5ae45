// Latest-value World Store backed by a watch channel.

use crate::domain::{WorldStore, WorldView};
use std::sync::Arc;
use tokio::sync::watch;

/// Producer side: whoever keeps the world current publishes whole views here.
#[derive(Clone)]
pub struct WorldPublisher {
    tx: watch::Sender<Arc<WorldView>>,
}

/// Read side handed to the server; every read clones one published `Arc`.
#[derive(Clone)]
pub struct WatchWorldStore {
    rx: watch::Receiver<Arc<WorldView>>,
}

/// Creates a connected publisher/store pair seeded with `initial`.
pub fn world_channel(initial: WorldView) -> (WorldPublisher, WatchWorldStore) {
    let (tx, rx) = watch::channel(Arc::new(initial));
    (WorldPublisher { tx }, WatchWorldStore { rx })
}

impl WorldPublisher {
    /// Replaces the current view in one step.
    pub fn publish(&self, view: WorldView) {
        // send_replace keeps the value even when no reader is subscribed yet.
        self.tx.send_replace(Arc::new(view));
    }

    /// Publishes a modified copy of the current view.
    pub fn update<F>(&self, apply: F)
    where
        F: FnOnce(&mut WorldView),
    {
        self.tx.send_modify(|current| {
            let mut next = WorldView::clone(current);
            apply(&mut next);
            *current = Arc::new(next);
        });
    }

    pub fn current(&self) -> Arc<WorldView> {
        self.tx.borrow().clone()
    }
}

impl WorldStore for WatchWorldStore {
    fn current(&self) -> Arc<WorldView> {
        // Clone the Arc and release the borrow right away; never hold it across an await.
        self.rx.borrow().clone()
    }
}
