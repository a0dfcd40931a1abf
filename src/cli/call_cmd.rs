//! Call command handler - sends raw commands to the running daemon

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::application::DispatchOutcome;

use super::bridge::{BridgeClient, SocketPath, WireResponse};
use super::presenter::Presenter;

/// Handle the call subcommand.
///
/// Prints the daemon's verdict on stdout (`ok` / `not implemented`) and
/// returns it so the caller can pick an exit code. `Err` covers everything
/// that kept the command from being judged: bad argument JSON, no daemon,
/// transport failures, undecodable requests.
pub async fn handle_call_command(
    command: &str,
    args_json: &str,
    socket_path: Option<PathBuf>,
    presenter: &Presenter,
) -> Result<DispatchOutcome, String> {
    // Decode the argument object up front so typos fail before any I/O.
    let args = parse_args_object(args_json)?;

    let socket = socket_path.map(SocketPath::with_path).unwrap_or_default();
    let client = BridgeClient::new(socket);

    if !client.is_daemon_running() {
        return Err("No daemon running. Start with: focus-capsule serve".to_string());
    }

    let response = client
        .send(command, args)
        .await
        .map_err(|e| format!("Failed to communicate with daemon: {}", e))?;

    match response {
        WireResponse::Ok => {
            presenter.output("ok");
            Ok(DispatchOutcome::Success)
        }
        WireResponse::NotImplemented => {
            presenter.output("not implemented");
            Ok(DispatchOutcome::NotImplemented)
        }
        WireResponse::Error { message } => Err(message),
    }
}

fn parse_args_object(args_json: &str) -> Result<Map<String, Value>, String> {
    let value: Value =
        serde_json::from_str(args_json).map_err(|e| format!("Invalid --args JSON: {}", e))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err("--args must be a JSON object".to_string()),
    }
}
