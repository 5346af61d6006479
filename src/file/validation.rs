use std::path::Path;

use crate::config::{MAX_PATH_BYTES, MIN_KEY_LEN};
use crate::error::{Result, TransformError};

/// Rejects keys shorter than the cipher block size.
pub fn validate_key(key: &[u8]) -> Result<()> {
    if key.len() < MIN_KEY_LEN {
        return Err(TransformError::Validation(format!("key must be at least {MIN_KEY_LEN} bytes, got {}", key.len())));
    }
    Ok(())
}

/// Rejects empty paths and paths beyond the host limit.
pub fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(TransformError::Validation("path is empty".to_string()));
    }
    if path.as_os_str().len() > MAX_PATH_BYTES {
        return Err(TransformError::Validation(format!("path exceeds {MAX_PATH_BYTES} bytes: {}...", path.display().to_string().chars().take(32).collect::<String>())));
    }
    Ok(())
}
