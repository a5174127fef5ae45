// Server-wide stop signal observed by every streaming session.

use tokio::sync::watch;

#[derive(Clone)]
pub struct ShutdownSignal {
    tx: watch::Sender<bool>,
}

/// Per-task receiver; cheap to create for each session.
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Resolves once `trigger` has been called.
    pub async fn triggered(&self) {
        self.listener().wait().await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownListener {
    /// Resolves when shutdown is triggered or the signal is gone.
    pub async fn wait(&mut self) {
        // wait_for checks the current value first, so a trigger that happened
        // before this call is not missed.
        let _ = self.rx.wait_for(|stopping| *stopping).await;
    }
}
