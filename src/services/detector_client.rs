// Detection API Client
// POSTs user text to the detection endpoint and extracts the first document

use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::DetectRequest;

const REQUEST_TIMEOUT_SECS: u64 = 80;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    JsonError(String),
}

/// What the detector returned for one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionReply {
    /// `documents[0]`, untouched.
    Document(Value),
    /// `documents` missing, not a list, or empty.
    Empty,
}

pub struct DetectorClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl DetectorClient {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, DetectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Ignores system proxy settings.
    pub fn direct(endpoint: &str, api_key: &str) -> Result<Self, DetectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn with_proxy(endpoint: &str, api_key: &str, proxy_url: &str) -> Result<Self, DetectorError> {
        let proxy = reqwest::Proxy::all(proxy_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .proxy(proxy)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One request, no retry.
    pub async fn analyze(&self, text: &str) -> Result<DetectionReply, DetectorError> {
        let request = DetectRequest {
            document: text.to_string(),
        };

        let start = Instant::now();
        debug!(chars = text.chars().count(), "detector.request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as i64;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), latency_ms, "detector.api_error");
            return Err(DetectorError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let reply = parse_reply(&body)?;
        info!(
            status = status.as_u16(),
            latency_ms,
            empty = matches!(reply, DetectionReply::Empty),
            "detector.response"
        );
        Ok(reply)
    }
}

/// Pull `documents[0]` out of a response body.
pub fn parse_reply(body: &str) -> Result<DetectionReply, DetectorError> {
    let response: Value =
        serde_json::from_str(body).map_err(|e| DetectorError::JsonError(e.to_string()))?;
    Ok(reply_from_value(&response))
}

/// Same as `parse_reply` for an already-decoded response.
pub fn reply_from_value(response: &Value) -> DetectionReply {
    first_document(response.get("documents").cloned())
}

fn first_document(documents: Option<Value>) -> DetectionReply {
    match documents {
        Some(Value::Array(mut docs)) if !docs.is_empty() => DetectionReply::Document(docs.swap_remove(0)),
        _ => DetectionReply::Empty,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one canned HTTP response and hand back the raw request.
    pub async fn one_shot_server(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}/v2/predict/text", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..split]
            .lines()
            .find_map(|l| {
                let (k, v) = l.split_once(':')?;
                k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        raw.len() >= split + 4 + content_length
    }
}
