pub mod build;
pub mod reader;
pub mod stats;
pub mod types;
pub mod writer;

pub use build::{build_index, build_index_with_progress};
pub use reader::{from_json, read_index_file};
pub use types::*;
pub use writer::{to_json, write_index_file};
