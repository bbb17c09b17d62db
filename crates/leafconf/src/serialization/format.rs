//! The closed set of text formats a schema type can be rendered into.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// A structured text format.
///
/// [`Format::Toml`] is the primary format: it is what [`crate::Config`] uses
/// on disk.  JSON and YAML are alternates, typically used for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Every supported format, primary first.
    pub const ALL: [Format; 3] = [Format::Toml, Format::Json, Format::Yaml];

    /// The on-disk format used by the config store.
    pub const PRIMARY: Format = Format::Toml;

    /// Conventional file extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// Maps a file extension back to a format.  Matching is case-insensitive
    /// and accepts the `yml` spelling.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Toml => "TOML",
            Format::Json => "JSON",
            Format::Yaml => "YAML",
        };
        f.write_str(name)
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_extension(s.trim()).ok_or_else(|| FormatError::UnknownName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_format_is_toml() {
        assert_eq!(Format::PRIMARY, Format::Toml);
        assert_eq!(Format::ALL[0], Format::PRIMARY);
    }

    #[test]
    fn test_extension_round_trips_through_from_extension() {
        for format in Format::ALL {
            assert_eq!(Format::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn test_yml_alias_maps_to_yaml() {
        assert_eq!(Format::from_extension("YML"), Some(Format::Yaml));
    }

    #[test]
    fn test_from_str_accepts_display_names() {
        // Arrange / Act
        let parsed: Vec<Format> = ["TOML", "json", " Yaml "]
            .iter()
            .map(|s| s.parse().expect("known name"))
            .collect();

        // Assert
        assert_eq!(parsed, vec![Format::Toml, Format::Json, Format::Yaml]);
    }

    #[test]
    fn test_from_str_rejects_unknown_name() {
        let result: Result<Format, _> = "ini".parse();
        assert!(matches!(result, Err(FormatError::UnknownName(name)) if name == "ini"));
    }
}
