// HTTP client for the maze service.
use gloo_net::http::{Request, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::AbortSignal;

use crate::config::api_base_url;
use crate::model::{GenerateMazeRequest, MazeResponse, SimulateRequest, SimulateResponse};

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("request aborted")]
    Aborted,
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Builds the error for a non-2xx response, preferring the server's `{"error"}` message.
pub fn shape_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() || body.starts_with('{') {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {body}")
            }
        });
    ApiError::Status { status, message }
}

fn endpoint(path: &str) -> String {
    format!("{}{}", api_base_url().trim_end_matches('/'), path)
}

fn was_aborted(signal: Option<&AbortSignal>) -> bool {
    signal.is_some_and(|s| s.aborted())
}

async fn read_json<T: DeserializeOwned>(resp: Response, signal: Option<&AbortSignal>) -> Result<T, ApiError> {
    let status = resp.status();
    let ok = resp.ok();
    let text = resp.text().await.map_err(|e| {
        if was_aborted(signal) {
            ApiError::Aborted
        } else {
            ApiError::Network(e.to_string())
        }
    })?;
    if !ok {
        return Err(shape_error(status, &text));
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn post_json<B, T>(path: &str, body: &B, signal: Option<&AbortSignal>) -> Result<T, ApiError>
where
    B: serde::Serialize,
    T: DeserializeOwned,
{
    let url = endpoint(path);
    let request = Request::post(&url)
        .abort_signal(signal)
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    let resp = request.send().await.map_err(|e| {
        if was_aborted(signal) {
            ApiError::Aborted
        } else {
            ApiError::Network(e.to_string())
        }
    })?;
    let result = read_json(resp, signal).await;
    if let Err(e) = &result {
        if *e != ApiError::Aborted {
            tracing::warn!(url = %url, error = %e, "request failed");
        }
    }
    result
}

pub async fn generate_maze(req: &GenerateMazeRequest) -> Result<MazeResponse, ApiError> {
    tracing::debug!(width = req.width, height = req.height, seed = ?req.seed, "generating maze");
    let maze: MazeResponse = post_json("/maze/generate", req, None).await?;
    maze.check_dimensions().map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(maze)
}

pub async fn simulate(req: &SimulateRequest<'_>, signal: Option<&AbortSignal>) -> Result<SimulateResponse, ApiError> {
    tracing::debug!(algorithm = req.algorithm.key(), "simulating");
    post_json("/simulate", req, signal).await
}
