//! Request handler module
//!
//! Method gating, dispatch to static file serving, and access logging.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
