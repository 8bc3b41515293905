//! HTTP(S) source: a single cache-defeating GET via the hyper client.
//!
//! TLS goes through rustls with the bundled webpki roots, so `https://`
//! locations work without a system certificate store.

use crate::Fetcher;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty, LengthLimitError, Limited};
use hyper::ext::ReasonPhrase;
use hyper::{header, Request, Response, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use natega_core::FetchError;

pub struct HttpSource {
    uri: Uri,
    max_bytes: u64,
    client: Client<HttpsConnector<HttpConnector>, Empty<Bytes>>,
}

impl HttpSource {
    pub fn new(uri: Uri, max_bytes: u64) -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { uri, max_bytes, client }
    }
}

impl Fetcher for HttpSource {
    async fn fetch(&self) -> Result<Bytes, FetchError> {
        let req = Request::get(self.uri.clone())
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache")
            .body(Empty::<Bytes>::new())
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let resp = self
            .client
            .request(req)
            .await
            .map_err(|e| FetchError::Transport(error_chain(&e)))?;

        let status = resp.status();
        tracing::debug!(uri = %self.uri, status = status.as_u16(), "archive response");
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status_text(&resp),
            });
        }

        let advertised = resp
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        if advertised.is_some_and(|len| len > self.max_bytes) {
            return Err(FetchError::TooLarge { limit: self.max_bytes });
        }

        let limit = usize::try_from(self.max_bytes).unwrap_or(usize::MAX);
        let body = Limited::new(resp.into_body(), limit)
            .collect()
            .await
            .map_err(|e| {
                if e.downcast_ref::<LengthLimitError>().is_some() {
                    FetchError::TooLarge { limit: self.max_bytes }
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;

        Ok(body.to_bytes())
    }

    fn describe(&self) -> String {
        self.uri.to_string()
    }
}

/// The reason phrase the server sent, else the standard one for the code,
/// else empty. hyper only records the phrase when it differs from the
/// standard one.
fn status_text<B>(resp: &Response<B>) -> String {
    resp.extensions()
        .get::<ReasonPhrase>()
        .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
        .filter(|phrase| !phrase.trim().is_empty())
        .or_else(|| resp.status().canonical_reason().map(str::to_string))
        .unwrap_or_default()
}

/// Render an error with its whole source chain: `outer: inner: innermost`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
