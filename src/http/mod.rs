//! HTTP protocol layer module
//!
//! Content-type resolution, Range parsing, and response builders,
//! decoupled from the file-serving business logic.

pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use range::{evaluate_range, RangeOutcome};
pub use response::{
    build_403_response, build_404_response, build_405_response, build_416_response,
    build_500_response, build_file_response, build_options_response, build_partial_response,
};
