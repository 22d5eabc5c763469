//! MIME type resolution module
//!
//! Two-tier extension lookup: a fixed override table for source-style
//! assets takes precedence unconditionally, then a general table for
//! common web assets, then `application/octet-stream`.
//!
//! The override tier exists because generic MIME tables lack or
//! misclassify emerging source extensions (`.tsx` in particular), and
//! browser module loaders refuse scripts served with the wrong type.

const FALLBACK: &str = "application/octet-stream";

/// Resolve the Content-Type for a file extension.
///
/// Total function: every input maps to some MIME string.
pub fn content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return FALLBACK;
    };
    override_type(ext)
        .or_else(|| general_type(ext))
        .unwrap_or(FALLBACK)
}

/// Fixed overrides for source-style assets served to module loaders
fn override_type(ext: &str) -> Option<&'static str> {
    match ext {
        "ts" | "tsx" => Some("text/typescript"),
        "jsx" => Some("text/javascript"),
        "js" => Some("application/javascript"),
        "json" => Some("application/json"),
        "css" => Some("text/css"),
        "html" => Some("text/html"),
        _ => None,
    }
}

/// General extension table for everything the override tier does not claim
fn general_type(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        // Text
        "htm" => "text/html; charset=utf-8",
        "txt" | "md" => "text/plain; charset=utf-8",
        "xml" => "application/xml",

        // JavaScript/WASM
        "mjs" => "application/javascript",
        "wasm" => "application/wasm",
        "map" => "application/json",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",
        "mov" => "video/quicktime",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Documents
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",

        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_table_is_exact() {
        assert_eq!(content_type(Some("ts")), "text/typescript");
        assert_eq!(content_type(Some("tsx")), "text/typescript");
        assert_eq!(content_type(Some("jsx")), "text/javascript");
        assert_eq!(content_type(Some("js")), "application/javascript");
        assert_eq!(content_type(Some("json")), "application/json");
        assert_eq!(content_type(Some("css")), "text/css");
        assert_eq!(content_type(Some("html")), "text/html");
    }

    #[test]
    fn override_wins_over_general_table() {
        // "html" exists in both tiers with different values; the override
        // must take precedence unconditionally
        assert_eq!(general_type("htm"), Some("text/html; charset=utf-8"));
        assert_eq!(content_type(Some("html")), "text/html");
    }

    #[test]
    fn general_table_types() {
        assert_eq!(content_type(Some("png")), "image/png");
        assert_eq!(content_type(Some("wasm")), "application/wasm");
        assert_eq!(content_type(Some("woff2")), "font/woff2");
        assert_eq!(content_type(Some("mp4")), "video/mp4");
    }

    #[test]
    fn unknown_extension_falls_back() {
        assert_eq!(content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(content_type(None), "application/octet-stream");
    }
}
