//! Shutdown coordination for the gateway.

use tokio::sync::broadcast;

/// Programmatic shutdown trigger.
///
/// The server listens on a receiver alongside the OS signals. Dropping the
/// coordinator also releases every receiver, so keep it alive for as long as
/// the server should run.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to hand to [`crate::http::HttpServer::run`].
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscribed server to stop.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
