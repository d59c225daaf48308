//! Result alias used across the workspace.

use crate::errors::ErrorEnvelope;

/// Shared result type; the error defaults to [`ErrorEnvelope`].
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;
