//! Storage collaborator: validated opens, path helpers, file identity.

pub mod operations;
pub mod validation;

pub use operations::{get_output_path, is_same_file, open_source};
pub use validation::{validate_key, validate_path};
