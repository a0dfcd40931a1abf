//! Unix domain socket bridge for daemon control
//!
//! Wire format is one JSON object per line. A request names a command and
//! carries a map of named arguments; the response reports `ok`,
//! `not_implemented`, or a transport-level `error`. The two timer commands
//! themselves never produce `error`; that status is reserved for requests
//! the daemon could not decode.
//!
//! Connections are handled concurrently, but every decoded request is
//! funneled through one channel so the daemon dispatches strictly one at a
//! time.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{mpsc, oneshot};

use super::signals::DaemonEvent;

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("focus-capsule.sock"))
            .unwrap_or_else(|_| std::env::temp_dir().join("focus-capsule.sock"));
        Self { path }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// One request line on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    pub command: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// One response line on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WireResponse {
    /// Command recognized and handled
    Ok,
    /// Command name outside the supported set
    NotImplemented,
    /// Request could not be decoded or delivered
    Error { message: String },
}

/// A decoded request awaiting dispatch, with its response channel
#[derive(Debug)]
pub struct BridgeRequest {
    pub command: String,
    pub args: Map<String, Value>,
    pub respond_to: oneshot::Sender<WireResponse>,
}

/// Unix domain socket server feeding the daemon loop
pub struct BridgeServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
}

impl BridgeServer {
    /// Create a new bridge server
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
        }
    }

    /// Bind the listening socket
    pub fn bind(&mut self) -> io::Result<()> {
        // Remove stale socket file if it exists
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    /// Get the bound socket path
    pub fn path(&self) -> String {
        self.socket_path.path().to_string_lossy().to_string()
    }

    /// Accept and handle connections until the event channel closes.
    ///
    /// Each connection gets its own task; decoded requests all flow into
    /// `tx`, so ordering across a single connection is preserved and the
    /// daemon loop stays the only dispatcher.
    pub async fn run(&self, tx: mpsc::Sender<DaemonEvent>) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, tx).await {
                            eprintln!("Bridge connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("Bridge accept error: {}", e);
                }
            }
        }
    }

    /// Cleanup socket resources
    pub fn cleanup(&self) {
        let _ = self.socket_path.cleanup();
    }
}

impl Drop for BridgeServer {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Handle a single client connection
async fn handle_connection(stream: UnixStream, tx: mpsc::Sender<DaemonEvent>) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            // Peer closed the connection
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<WireRequest>(&line) {
            Ok(request) => {
                let (respond_to, outcome) = oneshot::channel();
                let sent = tx
                    .send(DaemonEvent::Request(BridgeRequest {
                        command: request.command,
                        args: request.args,
                        respond_to,
                    }))
                    .await;

                if sent.is_err() {
                    WireResponse::Error {
                        message: "Daemon is shutting down".to_string(),
                    }
                } else {
                    outcome.await.unwrap_or(WireResponse::Error {
                        message: "Daemon dropped the request".to_string(),
                    })
                }
            }
            Err(e) => WireResponse::Error {
                message: format!("Invalid request: {}", e),
            },
        };

        let mut payload = serde_json::to_string(&response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        payload.push('\n');
        writer.write_all(payload.as_bytes()).await?;
        writer.flush().await?;
    }
}

/// Unix domain socket client for sending commands to the daemon
pub struct BridgeClient {
    socket_path: SocketPath,
}

impl BridgeClient {
    /// Create a new bridge client
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }

    /// Check if daemon appears to be running (socket exists)
    pub fn is_daemon_running(&self) -> bool {
        self.socket_path.exists()
    }

    /// Send one command and wait for its response
    pub async fn send(&self, command: &str, args: Map<String, Value>) -> io::Result<WireResponse> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        let request = WireRequest {
            command: command.to_string(),
            args,
        };
        let mut payload = serde_json::to_string(&request)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        payload.push('\n');
        writer.write_all(payload.as_bytes()).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        serde_json::from_str(&response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
