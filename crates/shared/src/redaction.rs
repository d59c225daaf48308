//! Secret detection and redaction utilities.
//!
//! API keys travel through forms, config files, and HTTP headers. These
//! helpers keep them out of logs and error messages.

/// Checks if a key/variable name likely refers to a secret.
///
/// Uses case-insensitive pattern matching to detect common secret-related
/// naming conventions.
///
/// # Examples
///
/// ```
/// use openai_settings_shared::is_secret_key;
///
/// assert!(is_secret_key("apiKey"));
/// assert!(is_secret_key("OAS_REMOTE_AUTH_TOKEN"));
/// assert!(!is_secret_key("LOG_LEVEL"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
}

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

const SANITIZE_MIN_LEN: usize = 10;
const SANITIZE_PREFIX_LEN: usize = 7;
const SANITIZE_SUFFIX_LEN: usize = 4;

/// Shortens an API key for display: first 7 characters, `...`, last 4.
///
/// Keys shorter than 10 characters (including the empty string) are returned
/// unchanged. Works on characters, not bytes.
///
/// # Examples
///
/// ```
/// use openai_settings_shared::sanitize_api_key;
///
/// assert_eq!(sanitize_api_key("sk-abcdefghijklmnop"), "sk-abcd...mnop");
/// assert_eq!(sanitize_api_key("short"), "short");
/// ```
pub fn sanitize_api_key(key: &str) -> String {
    let len = key.chars().count();
    if len < SANITIZE_MIN_LEN {
        return key.to_string();
    }
    let prefix: String = key.chars().take(SANITIZE_PREFIX_LEN).collect();
    let suffix: String = key.chars().skip(len - SANITIZE_SUFFIX_LEN).collect();
    format!("{prefix}...{suffix}")
}

/// A secret string wrapper that redacts on Display/Debug.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true when the wrapped secret is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Display-safe rendering (see [`sanitize_api_key`]).
    #[must_use]
    pub fn sanitized(&self) -> String {
        sanitize_api_key(&self.0)
    }

    /// Consume and return the underlying secret.
    pub fn into_inner(self) -> Box<str> {
        self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl AsRef<str> for SecretString {
    fn as_ref(&self) -> &str {
        self.expose()
    }
}

impl From<Box<str>> for SecretString {
    fn from(value: Box<str>) -> Self {
        Self(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_secret_patterns() {
        assert!(is_secret_key("API_KEY"));
        assert!(is_secret_key("apiKey"));
        assert!(is_secret_key("OPENAI_API_KEY"));
        assert!(is_secret_key("ACCESS_TOKEN"));
        assert!(is_secret_key("CLIENT_SECRET"));
        assert!(is_secret_key("DB_PASSWORD"));
        assert!(is_secret_key("credentials"));
        assert!(is_secret_key("OAS_REMOTE_AUTH_TOKEN"));
    }

    #[test]
    fn rejects_non_secret_patterns() {
        assert!(!is_secret_key("LOG_LEVEL"));
        assert!(!is_secret_key("model"));
        assert!(!is_secret_key("OAS_OPENAI_BASE_URL"));
        assert!(!is_secret_key("TIMEOUT_MS"));
    }

    #[test]
    fn sanitize_keeps_prefix_and_suffix() {
        let key = format!("sk-{}", "a".repeat(44) + "WXYZ");
        assert_eq!(sanitize_api_key(&key), "sk-aaaa...WXYZ");
    }

    #[test]
    fn sanitize_boundary_lengths() {
        assert_eq!(sanitize_api_key(""), "");
        assert_eq!(sanitize_api_key("123456789"), "123456789");
        assert_eq!(sanitize_api_key("1234567890"), "1234567...7890");
    }

    #[test]
    fn sanitize_counts_characters() {
        assert_eq!(sanitize_api_key("ééééééééééxyz"), "ééééééé...éxyz");
    }

    #[test]
    fn secret_string_redacts_display() {
        let secret = SecretString::new("sk-shhhhhhhhhhh");
        assert_eq!(secret.to_string(), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(secret.sanitized(), "sk-shhh...hhhh");
    }
}
