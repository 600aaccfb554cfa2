// crates/contract-forge-providers/tests/common/mod.rs
// =============================================================================
// Module: Provider Test Helpers
// Description: Local HTTP stub servers for provider tests.
// Purpose: Capture outbound requests and serve canned responses.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

/// Request details captured by a stub server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request method.
    pub method: String,
    /// Request URL path.
    pub url: String,
    /// Authorization header, if any.
    pub authorization: Option<String>,
    /// Content-Type header, if any.
    pub content_type: Option<String>,
    /// Request body.
    pub body: String,
}

/// Running stub server handle.
pub struct StubServer {
    /// Base URL of the server.
    pub url: String,
    /// Receives the captured request.
    pub requests: mpsc::Receiver<CapturedRequest>,
    /// Server thread.
    pub handle: thread::JoinHandle<()>,
}

/// Spawns a server answering one request with `status` and `body`.
pub fn spawn_stub(status: u16, body: &'static str) -> StubServer {
    spawn_stub_with_delay(status, body, Duration::ZERO)
}

/// Spawns a server that waits `delay` before answering one request.
pub fn spawn_stub_with_delay(status: u16, body: &'static str, delay: Duration) -> StubServer {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");
    let (sender, requests) = mpsc::channel();
    let handle = thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let header = |name: &'static str| {
                request
                    .headers()
                    .iter()
                    .find(|header| header.field.equiv(name))
                    .map(|header| header.value.as_str().to_string())
            };
            let authorization = header("Authorization");
            let content_type = header("Content-Type");
            let method = request.method().as_str().to_string();
            let url = request.url().to_string();
            let mut request_body = String::new();
            let _ = std::io::Read::read_to_string(request.as_reader(), &mut request_body);
            let _ = sender.send(CapturedRequest {
                method,
                url,
                authorization,
                content_type,
                body: request_body,
            });
            thread::sleep(delay);
            let json = Header::from_bytes("Content-Type", "application/json").unwrap();
            let response =
                Response::from_string(body).with_status_code(status).with_header(json);
            let _ = request.respond(response);
        }
    });
    StubServer {
        url,
        requests,
        handle,
    }
}
