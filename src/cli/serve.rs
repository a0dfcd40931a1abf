//! Daemon app runner

use std::process::ExitCode;

use crate::application::{CommandDispatcher, DispatchOutcome, NotificationPresenter};
use crate::infrastructure::notification::create_gateway;

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::ServeOptions;
use super::bridge::{BridgeServer, SocketPath, WireResponse};
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::{DaemonEvent, DaemonEventStream};

/// Run daemon mode
pub async fn run_serve(options: ServeOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Acquire PID file
    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another daemon is already running (PID: {})", pid));
            }
            _ => {
                presenter.error(&e.to_string());
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    // Select the notification gateway
    let (gateway, backend) = create_gateway(options.backend, options.progress).await;
    let dispatcher = CommandDispatcher::new(NotificationPresenter::new(gateway));

    // The channel must exist before the first update reaches the OS.
    dispatcher.presenter().ensure_channel().await;

    // Setup event stream (returns stream + sender for the bridge server)
    let (mut events, event_tx) = match DaemonEventStream::new().await {
        Ok(pair) => pair,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Bind the bridge socket
    let socket_path = options
        .socket_path
        .clone()
        .map(SocketPath::with_path)
        .unwrap_or_default();
    let mut server = BridgeServer::new(socket_path);
    if let Err(e) = server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    let socket_display = server.path();

    // Spawn the accept loop; the server cleans up its socket file on drop
    tokio::spawn(async move {
        let _ = server.run(event_tx).await;
    });

    presenter.daemon_status("Started, waiting for commands...");
    presenter.info(&format!(
        "Backend: {} | PID: {} | Socket: {} | SIGINT: exit",
        backend,
        std::process::id(),
        socket_display,
    ));

    // Main event loop: strictly one request at a time, each handled to
    // completion (notification side effect included) before its response
    // goes out.
    loop {
        match events.recv().await {
            Some(DaemonEvent::Request(request)) => {
                let outcome = dispatcher.handle(&request.command, &request.args).await;
                let response = match outcome {
                    DispatchOutcome::Success => WireResponse::Ok,
                    DispatchOutcome::NotImplemented => {
                        presenter.warn(&format!("Unsupported command: {}", request.command));
                        WireResponse::NotImplemented
                    }
                };
                // The client may have disconnected while waiting.
                let _ = request.respond_to.send(response);
            }
            Some(DaemonEvent::Shutdown) | None => break,
        }
    }

    presenter.daemon_status("Stopped");
    let _ = pid_file.release();

    ExitCode::from(EXIT_SUCCESS)
}
