//! Signal handling and the daemon event stream

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

use super::bridge::BridgeRequest;

/// Events driving the daemon loop
#[derive(Debug)]
pub enum DaemonEvent {
    /// A bridge request with its response channel
    Request(BridgeRequest),
    /// Shutdown requested via SIGINT/SIGTERM
    Shutdown,
}

/// Daemon event stream
///
/// Merges OS shutdown signals (SIGINT/SIGTERM) with bridge requests into a
/// single channel, so the daemon loop consumes exactly one event at a time.
pub struct DaemonEventStream {
    receiver: mpsc::Receiver<DaemonEvent>,
}

impl DaemonEventStream {
    /// Create the event stream and start listening for shutdown signals.
    ///
    /// Returns the stream and a sender for other event sources (the bridge
    /// server).
    pub async fn new() -> Result<(Self, mpsc::Sender<DaemonEvent>), std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        // Setup SIGINT handler (shutdown)
        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
            let _ = tx_int.send(DaemonEvent::Shutdown).await;
        });

        // Setup SIGTERM handler (shutdown)
        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
            let _ = tx_term.send(DaemonEvent::Shutdown).await;
        });

        Ok((Self { receiver: rx }, tx))
    }

    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<DaemonEvent> {
        self.receiver.recv().await
    }
}
