use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::protocol::{read_message, write_message, Request, Response};
use crate::{open_store, write_content};

/// Run the native-messaging loop on stdin/stdout.
///
/// One request in, exactly one response out; malformed input gets an error
/// response instead of killing the loop; a clean EOF ends it.
pub fn serve_command(store_flag: Option<&str>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    tracing::info!("codedrop host v{} serving", codedrop_core::version());

    loop {
        let Some(bytes) = read_message(&mut input).context("Failed to read request frame")? else {
            break;
        };

        let response = match serde_json::from_slice::<Request>(&bytes) {
            Ok(request) => handle_request(store_flag, request),
            Err(err) => Response::error(format!("Invalid request: {err}")),
        };

        write_message(&mut output, &response).context("Failed to write response frame")?;
    }

    Ok(())
}

/// Dispatch one request to its handler.
pub fn handle_request(store_flag: Option<&str>, request: Request) -> Response {
    match request {
        Request::Save { path, content, destination, relative_path } => {
            handle_save(store_flag, &path, &content, destination.as_deref(), relative_path.as_deref())
        }
        Request::Ping => Response::pong(),
    }
}

/// Write the file and, when the sender identified the destination, record
/// the relative path in recent history. History failures are logged, never
/// surfaced: the save already succeeded.
fn handle_save(
    store_flag: Option<&str>,
    path: &str,
    content: &str,
    destination: Option<&str>,
    relative_path: Option<&str>,
) -> Response {
    let written = match write_content(Path::new(path), content) {
        Ok(written) => written,
        Err(err) => return Response::save_failed(format!("{err:#}")),
    };

    if let (Some(destination), Some(relative_path)) = (destination, relative_path) {
        match open_store(store_flag) {
            Ok((_path, store)) => {
                if let Err(err) = store.remember(destination, relative_path) {
                    tracing::warn!("failed to record recent path for {destination}: {err}");
                }
            }
            Err(err) => tracing::warn!("history store unavailable: {err:#}"),
        }
    }

    Response::saved(written.to_string_lossy())
}
