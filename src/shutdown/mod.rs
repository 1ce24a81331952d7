//! Shutdown coordination
//!
//! The `/shutdown` handler must not terminate the process from inside the
//! request call stack, or the caller would see a connection reset instead of
//! the response body. Handlers hold a [`ShutdownHandle`] and fire it; the
//! serve loop holds the matching [`ShutdownListener`], waits a short flush
//! delay, and exits the process.

use tokio::sync::mpsc;

/// Sending half of the shutdown channel, cloned into handler state
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: mpsc::Sender<()>,
}

impl ShutdownHandle {
    /// Request process shutdown.
    ///
    /// Never blocks and never fails from the handler's point of view:
    /// a full or closed channel means a shutdown is already underway.
    pub fn request(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Receiving half of the shutdown channel, owned by the serve loop
#[derive(Debug)]
pub struct ShutdownListener {
    rx: mpsc::Receiver<()>,
}

impl ShutdownListener {
    /// Wait until a shutdown has been requested.
    ///
    /// Pends forever if every handle has been dropped without firing,
    /// which keeps the serve loop running.
    pub async fn wait(&mut self) {
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

/// Create a connected handle/listener pair
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownListener) {
    let (tx, rx) = mpsc::channel(1);
    (ShutdownHandle { tx }, ShutdownListener { rx })
}
