//! Shared helpers for HTTP integration tests.
//!
//! `serve_once` binds a loopback listener, answers exactly one request with a
//! canned response and hands back the raw request text for inspection.

#![allow(dead_code)]

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use visual_search_core::config::ServiceConfig;
use visual_search_core::HttpSearchClient;

/// Canned HTTP response.
pub struct CannedResponse {
    pub status_line: &'static str,
    pub body: String,
}

impl CannedResponse {
    pub fn ok_json(value: serde_json::Value) -> Self {
        Self {
            status_line: "200 OK",
            body: value.to_string(),
        }
    }

    pub fn raw(status_line: &'static str, body: &str) -> Self {
        Self {
            status_line,
            body: body.to_string(),
        }
    }
}

/// Serve one request. Returns the base URL and a handle yielding the request.
pub async fn serve_once(response: CannedResponse) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept failed");
        let request = read_request(&mut socket).await;
        let reply = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            response.status_line,
            response.body.len(),
            response.body
        );
        socket
            .write_all(reply.as_bytes())
            .await
            .expect("write failed");
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}", addr), handle)
}

/// Base URL of a port that refuses connections.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    drop(listener);
    format!("http://{}", addr)
}

/// Client for `base_url` that ignores any proxy settings in the environment.
pub fn client_for(base_url: &str) -> HttpSearchClient {
    let config = ServiceConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ServiceConfig::default()
    };
    let http = Client::builder()
        .no_proxy()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()
        .expect("Failed to build reqwest client");
    HttpSearchClient::with_http_client(&config, http)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.expect("read failed");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if request_complete(&buf) {
            break;
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let body_len = buf.len() - (header_end + 4);

    if head.contains("transfer-encoding: chunked") {
        return buf.ends_with(b"0\r\n\r\n");
    }

    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body_len >= content_length
}
