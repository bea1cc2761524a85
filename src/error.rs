use thiserror::Error;

/// Failure reported by the OS mapping layer.
#[derive(Debug, Error)]
#[error("failed to map {size} bytes: {message}")]
pub struct MapError {
  pub size: usize,
  pub message: String,
}

#[derive(Debug, Error)]
pub enum AllocationError {
  #[error("heap budget of {requested} bytes cannot be split into two semi-spaces")]
  InvalidHeapSize { requested: usize },

  #[error("OutOfMemory: requested {requested} bytes, {available} bytes available after collection")]
  OutOfMemory { requested: usize, available: usize },

  #[error(transparent)]
  Map(#[from] MapError),
}
