//! Utility functions for string formatting and comparison.

pub mod collate;
pub mod format;

// Re-export commonly used functions at module level
pub use collate::compare_sv;
pub use format::{escape_html, format_phone, truncate_string};
