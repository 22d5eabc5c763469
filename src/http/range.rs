//! HTTP Range header evaluation (RFC 7233, single range, bytes unit)
//!
//! Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
//! Multi-range and non-bytes units are ignored and answered with the
//! full representation.

/// A byte range already resolved against the file size.
/// Both bounds are inclusive and `start <= end < file_size` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes the range covers
    #[inline]
    pub const fn byte_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Outcome of evaluating a request's Range header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No Range header, malformed header, or unsupported form: serve 200
    Full,
    /// Valid satisfiable range: serve 206
    Partial(ByteRange),
    /// Syntactically valid but unsatisfiable: serve 416
    Unsatisfiable,
}

/// Evaluate a Range header value against the file size.
pub fn evaluate_range(header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(ranges) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    // Single range only
    if ranges.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = ranges.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        // Suffix form: "-N" means the last N bytes
        return suffix_range(end_str, file_size);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if end < start {
            return RangeOutcome::Unsatisfiable;
        }
        end.min(file_size - 1)
    };

    RangeOutcome::Partial(ByteRange { start, end })
}

fn suffix_range(suffix_str: &str, file_size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if suffix == 0 || file_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    // A suffix longer than the file covers the whole file
    RangeOutcome::Partial(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_header_serves_full() {
        assert_eq!(evaluate_range(None, 100), RangeOutcome::Full);
    }

    #[test]
    fn fixed_range() {
        let outcome = evaluate_range(Some("bytes=0-9"), 100);
        assert_eq!(
            outcome,
            RangeOutcome::Partial(ByteRange { start: 0, end: 9 })
        );
        if let RangeOutcome::Partial(r) = outcome {
            assert_eq!(r.byte_count(), 10);
        }
    }

    #[test]
    fn open_ended_range() {
        assert_eq!(
            evaluate_range(Some("bytes=50-"), 100),
            RangeOutcome::Partial(ByteRange { start: 50, end: 99 })
        );
    }

    #[test]
    fn suffix_range_takes_tail() {
        assert_eq!(
            evaluate_range(Some("bytes=-20"), 100),
            RangeOutcome::Partial(ByteRange { start: 80, end: 99 })
        );
    }

    #[test]
    fn oversized_suffix_covers_whole_file() {
        assert_eq!(
            evaluate_range(Some("bytes=-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
        );
    }

    #[test]
    fn end_clamped_to_file_size() {
        assert_eq!(
            evaluate_range(Some("bytes=90-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 90, end: 99 })
        );
    }

    #[test]
    fn start_past_end_of_file_is_unsatisfiable() {
        assert_eq!(
            evaluate_range(Some("bytes=200-"), 100),
            RangeOutcome::Unsatisfiable
        );
        assert_eq!(
            evaluate_range(Some("bytes=100-"), 100),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn inverted_range_is_unsatisfiable() {
        assert_eq!(
            evaluate_range(Some("bytes=50-10"), 100),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn malformed_headers_are_ignored() {
        assert_eq!(evaluate_range(Some("bytes=a-b"), 100), RangeOutcome::Full);
        assert_eq!(evaluate_range(Some("items=0-9"), 100), RangeOutcome::Full);
        assert_eq!(
            evaluate_range(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Full
        );
    }

    #[test]
    fn empty_file_suffix_is_unsatisfiable() {
        assert_eq!(
            evaluate_range(Some("bytes=-5"), 0),
            RangeOutcome::Unsatisfiable
        );
    }
}
