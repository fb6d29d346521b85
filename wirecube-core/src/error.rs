/// Error types for surfaces and configuration
use std::fmt;

/// Failure reported by a drawing surface
///
/// Every variant is fatal: the frame driver stops and hands the error to its
/// caller without retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The window, renderer or backing context could not be created
    Initialization(String),
    /// A clear, draw or present call failed mid-frame
    Render(String),
}

impl SurfaceError {
    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialization(msg) => write!(f, "surface initialization failed: {msg}"),
            Self::Render(msg) => write!(f, "render failed: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A configuration value that could not be parsed or is out of range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Name of the setting, e.g. `viewport`
    pub key: String,
    pub message: String,
}

impl ConfigError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_display() {
        let err = SurfaceError::initialization("no tty");
        assert_eq!(err.to_string(), "surface initialization failed: no tty");
        let err = SurfaceError::render("broken pipe");
        assert_eq!(err.to_string(), "render failed: broken pipe");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::new("viewport", "expected WIDTHxHEIGHT");
        assert_eq!(err.to_string(), "invalid viewport: expected WIDTHxHEIGHT");
    }
}
