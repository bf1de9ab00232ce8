//! Source records and their search strings.

pub mod csv;
pub mod normalize;
pub mod record;

pub use csv::{parse_csv, read_csv_path};
pub use normalize::{normalize, normalize_all};
pub use record::{Dataset, FieldSchema, Record, ResolvedSchema};
