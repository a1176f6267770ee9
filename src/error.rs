//! Unified error types for the assistant core.

use std::fmt;

// ---------------------------------------------------------------------------
// UsageError
// ---------------------------------------------------------------------------

/// A command was issued with a missing or invalid argument.
///
/// Usage errors are user-facing text; the iteration that produced one always
/// continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UsageError {}

// ---------------------------------------------------------------------------
// FsError
// ---------------------------------------------------------------------------

/// Failures from local filesystem operations.
///
/// Every variant carries the entry or path the operation targeted. On any
/// failure the directory snapshot is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    /// The target does not exist.
    NotFound(String),
    /// The target exists but is not a directory.
    NotADirectory(String),
    /// Read or traverse access to the target is unavailable.
    PermissionDenied(String),
    /// An entry of that name already exists.
    AlreadyExists(String),
    /// The directory is not empty and cannot be removed.
    NotEmpty(String),
    /// Any other OS-level failure, carried as text.
    Other(String),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "not found: {name}"),
            Self::NotADirectory(name) => write!(f, "not a directory: {name}"),
            Self::PermissionDenied(name) => write!(f, "permission denied: {name}"),
            Self::AlreadyExists(name) => write!(f, "already exists: {name}"),
            Self::NotEmpty(name) => write!(f, "directory not empty: {name}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FsError {}

impl FsError {
    /// Classify an `io::Error` against a target name.
    pub fn from_io(err: &std::io::Error, target: &str) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(target.to_string()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(target.to_string()),
            ErrorKind::AlreadyExists => Self::AlreadyExists(target.to_string()),
            _ => Self::Other(format!("{target}: {err}")),
        }
    }
}

/// Failure from either argument validation or the filesystem layer.
///
/// Local command handlers convert this to display text before it reaches the
/// interaction loop; nothing escapes a local path as a raw error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalError {
    Usage(UsageError),
    Fs(FsError),
}

impl fmt::Display for LocalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(e) => write!(f, "{e}"),
            Self::Fs(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LocalError {}

impl From<UsageError> for LocalError {
    fn from(e: UsageError) -> Self {
        Self::Usage(e)
    }
}

impl From<FsError> for LocalError {
    fn from(e: FsError) -> Self {
        Self::Fs(e)
    }
}

// ---------------------------------------------------------------------------
// RemoteError
// ---------------------------------------------------------------------------

/// Failures from the remote query client.
///
/// Converted to displayable text at the client boundary; the core never
/// retries a failed call.
#[derive(Debug)]
pub enum RemoteError {
    /// Non-2xx response; carries status code and response body.
    Status(u16, String),
    /// The request exceeded the configured timeout.
    Timeout,
    /// The endpoint was unreachable or the connection failed.
    Network(String),
    /// 2xx response that carried no choices.
    EmptyResponse,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code, body) => write!(f, "API error: {code} - {body}"),
            Self::Timeout => write!(f, "request timed out; the endpoint may be slow or unreachable"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::EmptyResponse => write!(f, "no response received from the model"),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_error_display_is_verbatim() {
        assert_eq!(
            UsageError("Usage: cd <directory>".into()).to_string(),
            "Usage: cd <directory>"
        );
    }

    #[test]
    fn fs_error_display_variants() {
        assert_eq!(FsError::NotFound("x".into()).to_string(), "not found: x");
        assert_eq!(
            FsError::NotADirectory("x".into()).to_string(),
            "not a directory: x"
        );
        assert_eq!(
            FsError::NotEmpty("d".into()).to_string(),
            "directory not empty: d"
        );
    }

    #[test]
    fn fs_error_classifies_io_kinds() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(
            FsError::from_io(&not_found, "file.txt"),
            FsError::NotFound("file.txt".into())
        );
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert_eq!(
            FsError::from_io(&denied, "file.txt"),
            FsError::PermissionDenied("file.txt".into())
        );
        let exists = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "dup");
        assert_eq!(
            FsError::from_io(&exists, "file.txt"),
            FsError::AlreadyExists("file.txt".into())
        );
    }

    #[test]
    fn local_error_wraps_both_classes() {
        let usage = LocalError::from(UsageError("bad name".into()));
        assert_eq!(usage.to_string(), "bad name");
        let fs = LocalError::from(FsError::AlreadyExists("src".into()));
        assert_eq!(fs.to_string(), "already exists: src");
    }

    #[test]
    fn remote_error_display_variants() {
        assert_eq!(
            RemoteError::Status(503, "overloaded".into()).to_string(),
            "API error: 503 - overloaded"
        );
        assert!(RemoteError::Timeout.to_string().contains("timed out"));
        assert_eq!(
            RemoteError::EmptyResponse.to_string(),
            "no response received from the model"
        );
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        assert!(e.to_string().starts_with("io:"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }
}
