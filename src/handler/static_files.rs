//! Static file serving module
//!
//! Resolves request paths against the serving root, enforces the
//! traversal boundary, applies the directory-index policy, and builds
//! the file response.
//!
//! Directory policy: the configured index files are tried in order;
//! a directory without one answers 404.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::PathBuf;
use tokio::fs;

/// Per-request failure, mapped onto an HTTP status
#[derive(Debug)]
pub enum FileError {
    /// Path does not resolve to a servable file: 404
    NotFound,
    /// Traversal outside the root or permission denial: 403
    Forbidden,
    /// Unexpected I/O failure: 500
    Io(io::Error),
}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::Forbidden,
            _ => Self::Io(e),
        }
    }
}

/// Serve a GET/HEAD request for a file under the root.
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let (content, content_type) = match load(state, ctx.path).await {
        Ok(loaded) => loaded,
        Err(e) => return error_response(ctx.path, &e),
    };

    let total_size = content.len();
    match http::evaluate_range(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Partial(range) => {
            let slice = Bytes::from(content[range.start..=range.end].to_vec());
            http::build_partial_response(slice, content_type, range, total_size, ctx.is_head)
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size),
        RangeOutcome::Full => http::build_file_response(Bytes::from(content), content_type, ctx.is_head),
    }
}

fn error_response(path: &str, error: &FileError) -> Response<Full<Bytes>> {
    match error {
        FileError::NotFound => http::build_404_response(),
        FileError::Forbidden => {
            logger::log_warning(&format!("Forbidden request blocked: {path}"));
            http::build_403_response()
        }
        FileError::Io(e) => {
            logger::log_error(&format!("Failed serving '{path}': {e}"));
            http::build_500_response()
        }
    }
}

/// Resolve a URL path to file content and its content type.
pub async fn load(state: &AppState, url_path: &str) -> Result<(Vec<u8>, &'static str), FileError> {
    let relative = sanitize_path(url_path)?;
    let mut file_path = state.root.join(relative);

    // Directory-index policy
    let meta = fs::metadata(&file_path).await.map_err(FileError::from)?;
    if meta.is_dir() {
        file_path = find_index(&file_path, &state.config.routes.index_files)
            .await
            .ok_or(FileError::NotFound)?;
    }

    // Resolve symlinks and re-check the boundary; the sanitized join
    // alone is not enough once links are involved
    let canonical = fs::canonicalize(&file_path).await.map_err(FileError::from)?;
    if !canonical.starts_with(&state.root) {
        return Err(FileError::Forbidden);
    }

    let content = fs::read(&canonical).await.map_err(FileError::from)?;
    let content_type = http::mime::content_type(canonical.extension().and_then(|e| e.to_str()));
    Ok((content, content_type))
}

async fn find_index(dir: &std::path::Path, index_files: &[String]) -> Option<PathBuf> {
    for index_file in index_files {
        let candidate = dir.join(index_file);
        if let Ok(meta) = fs::metadata(&candidate).await {
            if meta.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Collapse a URL path into a root-relative filesystem path.
///
/// Percent escapes are decoded first so encoded traversal sequences
/// cannot slip through; any `..` segment is rejected outright.
fn sanitize_path(url_path: &str) -> Result<PathBuf, FileError> {
    let decoded = percent_decode(url_path);
    let mut relative = PathBuf::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(FileError::Forbidden),
            _ => {
                if segment.contains('\\') || segment.contains('\0') {
                    return Err(FileError::Forbidden);
                }
                relative.push(segment);
            }
        }
    }
    Ok(relative)
}

/// Decode %XX escapes; invalid escapes pass through literally
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
