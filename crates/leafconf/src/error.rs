//! Error types for serialization and config file operations.
//!
//! Two layers, matching where a failure can originate:
//!
//! - [`FormatError`] – raised by a schema type while rendering or parsing text.
//! - [`ConfigError`] – raised by [`crate::Config`] at the file-system boundary.
//!   It wraps [`FormatError`] so callers of `load()` / `save()` only have one
//!   type to match on.

use std::path::PathBuf;

use thiserror::Error;

use crate::serialization::Format;

/// Errors produced while converting a schema type to or from text.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The schema type does not support the requested format.
    #[error("unsupported format: {0}")]
    Unsupported(Format),

    /// The value could not be rendered (e.g. a map with non-string keys in TOML).
    #[error("failed to encode {format}: {diagnostic}")]
    Encode { format: Format, diagnostic: String },

    /// The text is not a valid document, or does not match the schema.
    #[error("failed to parse {format}: {diagnostic}")]
    Parse { format: Format, diagnostic: String },

    /// The document parsed, but the schema rejected its values.
    #[error("invalid {format} document: {diagnostic}")]
    Invalid { format: Format, diagnostic: String },

    /// A format name (e.g. from a CLI flag) did not match any known format.
    #[error("unknown format name: {0:?}")]
    UnknownName(String),
}

/// Errors produced by [`crate::Config`] file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file (or its temporary sibling) could not be opened.
    #[error("could not open config at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file was opened but could not be read to the end.
    #[error("could not read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendered document could not be written and committed.
    #[error("could not write config at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema type failed to serialize or deserialize.
    #[error(transparent)]
    Format(#[from] FormatError),
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_includes_path() {
        // Arrange
        let err = ConfigError::Open {
            path: PathBuf::from("/tmp/leafconf/settings.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("/tmp/leafconf/settings.toml"), "got {msg}");
        assert!(msg.contains("denied"), "got {msg}");
    }

    #[test]
    fn test_format_error_is_transparent_inside_config_error() {
        let inner = FormatError::Unsupported(Format::Yaml);
        let outer = ConfigError::from(FormatError::Unsupported(Format::Yaml));
        assert_eq!(inner.to_string(), outer.to_string());
    }

    #[test]
    fn test_parse_error_names_the_format() {
        let err = FormatError::Parse {
            format: Format::Json,
            diagnostic: "expected value at line 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse JSON: expected value at line 1"
        );
    }
}
