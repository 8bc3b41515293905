//! Fake dataset host for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1 and serves `GET /natega.zip`. Status, body and response delay
//! can be changed between requests; every request's headers are recorded.
//!
//! # Example
//!
//! [`raw_response_server`] covers what axum cannot send, such as a
//! non-standard reason phrase on the status line.
//!
//! ```rust,no_run
//! let server = FakeDatasetServer::start(archive_of(&sample_records())).await?;
//! let cfg = SourceConfig { location: server.url(), ..SourceConfig::default() };
//! ```

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

struct ServerState {
    status: StatusCode,
    body: Vec<u8>,
    delay: Duration,
    requests: Vec<HeaderMap>,
}

/// Handle to the running fake server. The server task lives as long as the
/// test runtime.
pub struct FakeDatasetServer {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl FakeDatasetServer {
    /// Start serving `body` with `200 OK`. Returns once the server is
    /// listening.
    pub async fn start(body: Vec<u8>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ServerState {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/natega.zip", get(serve_archive))
            .with_state(Arc::clone(&state));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// `http://127.0.0.1:PORT/natega.zip`
    pub fn url(&self) -> String {
        format!("http://{}/natega.zip", self.addr)
    }

    pub async fn set_status(&self, status: u16) {
        self.state.lock().await.status = StatusCode::from_u16(status).expect("valid status");
    }

    pub async fn set_body(&self, body: Vec<u8>) {
        self.state.lock().await.body = body;
    }

    /// Hold every response back by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        self.state.lock().await.delay = delay;
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }

    /// Headers of the most recent request.
    pub async fn last_request(&self) -> Option<HeaderMap> {
        self.state.lock().await.requests.last().cloned()
    }
}

async fn serve_archive(
    State(state): State<Arc<Mutex<ServerState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let (status, body, delay) = {
        let mut s = state.lock().await;
        s.requests.push(headers);
        (s.status, s.body.clone(), s.delay)
    };
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    (status, body)
}

/// Answer every connection with `response` written verbatim, after reading
/// the request head. Returns the `http://…/natega.zip` URL.
pub async fn raw_response_server(response: &'static str) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    Ok(format!("http://{addr}/natega.zip"))
}
