use thiserror::Error;

/// Errors raised when building or resizing a cache.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LruError {
    #[error("capacity must be positive, got {0}")]
    InvalidCapacity(usize),
}

/// Rejects a zero capacity.
pub(crate) fn check_capacity(capacity: usize) -> Result<usize, LruError> {
    if capacity == 0 {
        return Err(LruError::InvalidCapacity(capacity));
    }
    Ok(capacity)
}
