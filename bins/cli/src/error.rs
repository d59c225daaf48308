use openai_settings_shared::{ErrorCode, ErrorEnvelope, ErrorKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    InvalidInput = 2,
    Io = 3,
    Internal = 1,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Exit code for a failed infra call.
    ///
    /// Local store failures and raw I/O errors map to [`Self::Io`]; invariant
    /// violations are internal; everything else is caller input.
    #[must_use]
    pub fn for_envelope(error: &ErrorEnvelope) -> Self {
        if error.is_namespace("storage") || error.code == ErrorCode::io() {
            return Self::Io;
        }
        match error.kind {
            ErrorKind::Invariant => Self::Internal,
            ErrorKind::Expected | ErrorKind::Unexpected => Self::InvalidInput,
        }
    }
}

#[derive(Debug)]
pub enum CliError {
    InvalidInput(String),
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl CliError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::InvalidInput,
            Self::Io(_) => ExitCode::Io,
            Self::Serialization(_) => ExitCode::Internal,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(formatter, "invalid input: {message}"),
            Self::Io(error) => write!(formatter, "io error: {error}"),
            Self::Serialization(error) => write!(formatter, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_exit_codes() {
        let storage = ErrorEnvelope::expected(
            ErrorCode::new("storage", "write_failed"),
            "disk full",
        );
        let io = ErrorEnvelope::expected(ErrorCode::io(), "closed");
        let config = ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_env_int"),
            "bad int",
        );
        let bug = ErrorEnvelope::invariant(ErrorCode::internal(), "bug");

        assert_eq!(ExitCode::for_envelope(&storage), ExitCode::Io);
        assert_eq!(ExitCode::for_envelope(&io), ExitCode::Io);
        assert_eq!(ExitCode::for_envelope(&config), ExitCode::InvalidInput);
        assert_eq!(ExitCode::for_envelope(&bug), ExitCode::Internal);
    }
}
