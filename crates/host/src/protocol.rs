//! Native-messaging wire protocol.
//!
//! Browsers frame native-messaging traffic as a 4-byte native-endian
//! length followed by a JSON body, one message per request and exactly one
//! per response. The host never retries and never answers twice.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

/// Incoming request, discriminated by the `action` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    /// Write content to an absolute path. The optional destination fields
    /// let the sender have the save recorded in recent-path history.
    Save {
        path: String,
        content: String,
        #[serde(default)]
        destination: Option<String>,
        #[serde(default)]
        relative_path: Option<String>,
    },
    /// Connection test.
    Ping,
}

/// Outgoing response. Untagged: every variant carries `success`, which is
/// all the sender switches on.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    SaveResult {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        full_path: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Pong {
        success: bool,
    },
    Error {
        success: bool,
        error: String,
    },
}

impl Response {
    pub fn saved(full_path: impl Into<String>) -> Self {
        Response::SaveResult { success: true, full_path: Some(full_path.into()), error: None }
    }

    pub fn save_failed(error: impl Into<String>) -> Self {
        Response::SaveResult { success: false, full_path: None, error: Some(error.into()) }
    }

    pub fn pong() -> Self {
        Response::Pong { success: true }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Response::Error { success: false, error: error.into() }
    }
}

/// Read one framed message body. Returns `Ok(None)` on clean EOF so the
/// serve loop can exit without treating shutdown as an error.
pub fn read_message<R: Read>(input: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut len_bytes = [0u8; 4];
    if let Err(err) = input.read_exact(&mut len_bytes) {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            return Ok(None);
        }
        return Err(err);
    }
    let len = u32::from_ne_bytes(len_bytes) as usize;

    let mut buffer = vec![0u8; len];
    input.read_exact(&mut buffer)?;
    Ok(Some(buffer))
}

/// Write one framed response.
pub fn write_message<W: Write>(output: &mut W, response: &Response) -> io::Result<()> {
    let json = serde_json::to_vec(response)?;
    output.write_all(&(json.len() as u32).to_ne_bytes())?;
    output.write_all(&json)?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn framing_round_trips() {
        let mut buf = Vec::new();
        write_message(&mut buf, &Response::pong()).expect("write");

        let mut cursor = Cursor::new(buf);
        let body = read_message(&mut cursor).expect("read").expect("message");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value, serde_json::json!({"success": true}));

        // The stream is drained; the next read is a clean EOF.
        assert!(read_message(&mut cursor).expect("read").is_none());
    }

    #[test]
    fn save_request_parses_with_and_without_destination() {
        let bare: Request = serde_json::from_str(
            r#"{"action":"save","path":"/tmp/x.rs","content":"fn main() {}"}"#,
        )
        .expect("parse");
        match bare {
            Request::Save { destination, relative_path, .. } => {
                assert_eq!(destination, None);
                assert_eq!(relative_path, None);
            }
            other => panic!("unexpected request: {other:?}"),
        }

        let tracked: Request = serde_json::from_str(
            r#"{"action":"save","path":"/tmp/x.rs","content":"","destination":"proj1","relative_path":"src/x.rs"}"#,
        )
        .expect("parse");
        match tracked {
            Request::Save { destination, relative_path, .. } => {
                assert_eq!(destination.as_deref(), Some("proj1"));
                assert_eq!(relative_path.as_deref(), Some("src/x.rs"));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn error_response_serializes_with_success_false() {
        let json = serde_json::to_value(Response::error("nope")).expect("serialize");
        assert_eq!(json, serde_json::json!({"success": false, "error": "nope"}));
    }

    #[test]
    fn save_result_omits_absent_fields() {
        let json = serde_json::to_value(Response::saved("/tmp/x.rs")).expect("serialize");
        assert_eq!(json, serde_json::json!({"success": true, "full_path": "/tmp/x.rs"}));
    }
}
