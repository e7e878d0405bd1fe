//! Request loop
//!
//! Reads one request per line, answers each in order, and between requests
//! sleeps until the next reload fallback is due so a stalled load still
//! settles and the presentation layer hears about it.

use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::commands::{dispatch, tabs::CommandResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct Response {
    id: Value,
    #[serde(flatten)]
    result: CommandResult<Value>,
}

/// Answer a single request line.
///
/// Returns `None` for blank lines. Malformed JSON is answered with a null id.
pub fn handle_line(state: &AppState, line: &str) -> Option<Value> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let request: Value = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed request");
            return Some(to_line(Response {
                id: Value::Null,
                result: CommandResult::err(format!("parse error: {e}")),
            }));
        }
    };

    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let params = match request.get("params") {
        None | Some(Value::Null) => json!({}),
        Some(params) => params.clone(),
    };

    let result = dispatch(state, method, &params);
    if let Some(error) = &result.error {
        tracing::debug!(method = %method, error = %error, "Request failed");
    }

    Some(to_line(Response { id, result }))
}

fn to_line(response: Response) -> Value {
    serde_json::to_value(&response).unwrap_or_else(|e| {
        json!({ "id": Value::Null, "success": false, "data": Value::Null, "error": e.to_string() })
    })
}

async fn write_line<W>(writer: &mut W, value: &Value) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

/// Serve requests from `reader` until end of input.
pub async fn serve<R, W>(state: AppState, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let ready = json!({ "event": "ready", "version": env!("CARGO_PKG_VERSION") });
    write_line(&mut writer, &ready).await?;

    let mut lines = reader.lines();

    loop {
        let deadline = state.with_browser(|browser| browser.next_deadline());

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("Input closed, shutting down");
                    break;
                };

                if let Some(response) = handle_line(&state, &line) {
                    write_line(&mut writer, &response).await?;
                }
            }
            _ = sleep_until(deadline) => {
                let view = state.with_browser(|browser| {
                    browser.tick(Instant::now()).then(|| browser.view())
                });

                if let Some(view) = view {
                    write_line(&mut writer, &json!({ "event": "view", "data": view })).await?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neutron_core::Config;

    fn state() -> AppState {
        AppState::new(Config::default()).unwrap()
    }

    #[test]
    fn test_handle_line() {
        let state = state();
        let response = handle_line(&state, r#"{"id": 7, "method": "ping"}"#).unwrap();
        assert_eq!(response["id"], 7);
        assert_eq!(response["success"], true);
        assert_eq!(response["data"], "pong");
        assert_eq!(response["error"], Value::Null);
    }

    #[test]
    fn test_blank_and_malformed_lines() {
        let state = state();
        assert!(handle_line(&state, "   ").is_none());

        let response = handle_line(&state, "{oops").unwrap();
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["success"], false);
        assert!(response["error"].as_str().unwrap().starts_with("parse error"));
    }

    #[test]
    fn test_null_params_treated_as_empty() {
        let state = state();
        let response =
            handle_line(&state, r#"{"id": "a", "method": "tabs.close", "params": null}"#).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["data"]["changed"], true);
    }

    #[tokio::test]
    async fn test_serve_round_trip() {
        let input = concat!(
            r#"{"id": 1, "method": "nav.navigate", "params": {"input": "netflix"}}"#,
            "\n\n",
            r#"{"id": 2, "method": "view.get"}"#,
            "\n",
        );
        let mut output = Vec::new();

        serve(state(), input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["event"], "ready");
        assert_eq!(lines[1]["id"], 1);
        assert_eq!(
            lines[1]["data"]["view"]["tabs"][0]["url"],
            "https://www.netflix.com"
        );
        assert_eq!(lines[2]["id"], 2);
        assert_eq!(lines[2]["data"]["address_bar"]["secure"], true);
    }
}
