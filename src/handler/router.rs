//! Request dispatch module
//!
//! Entry point for HTTP request processing: validates the method,
//! answers preflight probes, hands file requests to `static_files`,
//! and emits the access log entry.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context passed to the file-serving layer
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling.
///
/// Never fails: every per-request error is converted into an HTTP
/// status so the accept loop keeps running.
pub async fn handle_request<B>(
    req: &Request<B>,
    state: &Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    let response = match *method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: uri.path(),
                is_head: *method == Method::HEAD,
                range_header: req
                    .headers()
                    .get("range")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
            };
            static_files::serve(&ctx, state).await
        }
        Method::OPTIONS => http::build_options_response(),
        _ => http::build_405_response(),
    };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length_of(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        entry.referer = header_string(req, "referer");
        entry.user_agent = header_string(req, "user-agent");
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Size reported in the access log: the declared Content-Length, so
/// HEAD responses log the size a GET would have transferred
fn content_length_of(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_state() -> Arc<AppState> {
        let cfg = Config::load_from("does-not-exist").expect("defaults should load");
        Arc::new(AppState::new(&cfg).expect("cwd root"))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:54321".parse().unwrap()
    }

    fn request(method: Method, path: &str) -> Request<()> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(())
            .unwrap()
    }

    #[tokio::test]
    async fn options_returns_200_preflight() {
        let state = test_state();
        let req = request(Method::OPTIONS, "/anything/at/all");
        let resp = handle_request(&req, &state, peer()).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn unsupported_methods_get_405() {
        let state = test_state();
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let req = request(method.clone(), "/");
            let resp = handle_request(&req, &state, peer()).await.unwrap();
            assert_eq!(resp.status(), 405, "method {method} should be rejected");
        }
    }

    #[tokio::test]
    async fn missing_file_gets_404() {
        let state = test_state();
        let req = request(Method::GET, "/missing.js");
        let resp = handle_request(&req, &state, peer()).await.unwrap();
        assert_eq!(resp.status(), 404);
    }
}
