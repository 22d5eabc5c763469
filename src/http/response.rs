//! HTTP response building module
//!
//! Every response the server emits goes through `dev_builder`, so the
//! permissive CORS and range-support headers are present on successes
//! and errors alike. Browser module loaders depend on these being
//! bit-exact.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http::range::ByteRange;

/// Start a response carrying the development headers
fn dev_builder(status: u16) -> hyper::http::response::Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .header("Accept-Ranges", "bytes")
        .header("Cross-Origin-Resource-Policy", "cross-origin")
}

/// Build 200 OK response for a fully served file
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    dev_builder(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 206 Partial Content response for a satisfiable Range request
pub fn build_partial_response(
    data: Bytes,
    content_type: &str,
    range: ByteRange,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let body = if is_head { Bytes::new() } else { data };

    dev_builder(206)
        .header("Content-Type", content_type)
        .header("Content-Length", range.byte_count())
        .header(
            "Content-Range",
            format!("bytes {}-{}/{total_size}", range.start, range.end),
        )
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build OPTIONS response (CORS preflight probe): 200, headers only
pub fn build_options_response() -> Response<Full<Bytes>> {
    dev_builder(200)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    plain_text_response(403, "403 Forbidden")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    plain_text_response(404, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    dev_builder(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    dev_builder(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("416 Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    plain_text_response(500, "500 Internal Server Error")
}

fn plain_text_response(status: u16, message: &'static str) -> Response<Full<Bytes>> {
    dev_builder(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| {
            log_build_error("error", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    const DEV_HEADERS: [(&str, &str); 5] = [
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "GET, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Accept-Ranges", "bytes"),
        ("Cross-Origin-Resource-Policy", "cross-origin"),
    ];

    fn assert_dev_headers(resp: &Response<Full<Bytes>>) {
        for (name, value) in DEV_HEADERS {
            assert_eq!(
                resp.headers().get(name).map(|v| v.to_str().unwrap()),
                Some(value),
                "missing or wrong header {name}"
            );
        }
    }

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn file_response_carries_dev_headers_and_length() {
        let data = Bytes::from_static(b"export const x = 1;");
        let len = data.len();
        let resp = build_file_response(data.clone(), "text/typescript", false);
        assert_eq!(resp.status(), 200);
        assert_dev_headers(&resp);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/typescript"
        );
        assert_eq!(
            resp.headers().get("Content-Length").unwrap(),
            &len.to_string()
        );
        assert_eq!(body_bytes(resp).await, data);
    }

    #[tokio::test]
    async fn head_response_keeps_headers_drops_body() {
        let data = Bytes::from_static(b"hello world");
        let resp = build_file_response(data.clone(), "text/plain; charset=utf-8", true);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Length").unwrap(),
            &data.len().to_string()
        );
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn options_response_is_empty_200() {
        let resp = build_options_response();
        assert_eq!(resp.status(), 200);
        assert_dev_headers(&resp);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[test]
    fn partial_response_has_content_range() {
        let data = Bytes::from_static(b"0123456789");
        let range = ByteRange { start: 2, end: 5 };
        let resp = build_partial_response(data, "application/octet-stream", range, 10, false);
        assert_eq!(resp.status(), 206);
        assert_dev_headers(&resp);
        assert_eq!(resp.headers().get("Content-Range").unwrap(), "bytes 2-5/10");
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "4");
    }

    #[test]
    fn error_responses_carry_dev_headers() {
        for resp in [
            build_403_response(),
            build_404_response(),
            build_405_response(),
            build_416_response(42),
            build_500_response(),
        ] {
            assert_dev_headers(&resp);
        }
        assert_eq!(
            build_405_response().headers().get("Allow").unwrap(),
            "GET, HEAD, OPTIONS"
        );
        assert_eq!(
            build_416_response(42).headers().get("Content-Range").unwrap(),
            "bytes */42"
        );
    }
}
