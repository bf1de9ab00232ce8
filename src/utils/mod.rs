//! Utility functions shared across the crate.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file and data directory (XDG-compliant)
//! - [`bigram`] - 2-character token extraction for indexing and querying
//! - [`encoding`] - Text decoding for CSV exports (cp932, UTF-8, ...)
//! - [`progress`] - Spinner / progress bar helpers
//!
//! ## Key Functions
//!
//! ```
//! use addrgram::utils::tokenize;
//!
//! let tokens = tokenize("東京都");
//! assert_eq!(tokens, vec!["東京", "京都"]);
//! ```

pub mod app_data;
pub mod bigram;
pub mod encoding;
pub mod progress;

pub use app_data::*;
pub use bigram::*;
pub use encoding::*;
