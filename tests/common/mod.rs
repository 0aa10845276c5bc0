//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use barbra::action::{ActionExecutor, RecordingDevice};
use barbra::command::CommandProcessor;
use barbra::core::config::{AssistantConfig, CloudConfig, LocalConfig};
use barbra::llm::AiBackends;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Address with nothing listening
pub const DEAD_URL: &str = "http://127.0.0.1:9";

/// A request as seen by [`serve_once`]
#[derive(Debug)]
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<String> {
        let prefix = format!("{}:", name.to_lowercase());
        self.head
            .lines()
            .find(|line| line.to_lowercase().starts_with(&prefix))
            .map(|line| line[prefix.len()..].trim().to_string())
    }
}

/// Serve a single HTTP response, then stop
///
/// Returns the base URL and a handle yielding the captured request.
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        let (head, body_start) = loop {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = find(&raw, b"\r\n\r\n") {
                break (String::from_utf8_lossy(&raw[..pos]).to_string(), pos + 4);
            }
        };

        let content_length = head
            .lines()
            .find_map(|line| {
                let lower = line.to_lowercase();
                lower
                    .strip_prefix("content-length:")
                    .map(|v| v.trim().parse::<usize>().unwrap_or(0))
            })
            .unwrap_or(0);

        while raw.len() < body_start + content_length {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
        }
        let request_body = String::from_utf8_lossy(&raw[body_start..]).to_string();

        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason(status),
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        CapturedRequest {
            head,
            body: request_body,
        }
    });

    (format!("http://{}", addr), handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Backend config with both endpoints under `base`
pub fn config_for(cloud_base: &str, local_base: &str) -> AssistantConfig {
    AssistantConfig {
        cloud: CloudConfig {
            api_url: format!("{}/v1/chat/completions", cloud_base),
            ..Default::default()
        },
        local: LocalConfig {
            api_url: format!("{}/api/generate", local_base),
            ..Default::default()
        },
    }
}

/// Processor with a recording device and the given backend config
pub fn processor_with(config: AssistantConfig) -> (CommandProcessor, Arc<RecordingDevice>) {
    let device = Arc::new(RecordingDevice::new());
    let processor = CommandProcessor::new(
        ActionExecutor::new(device.clone()),
        AiBackends::new(config),
    );
    (processor, device)
}
