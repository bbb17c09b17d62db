//! Serialization capabilities a schema type implements to be stored on disk.
//!
//! The store never touches a concrete grammar.  It only asks the schema type
//! to render itself ([`Serializable`]) or to replace itself from text
//! ([`Deserializable`]), passing a [`Format`] tag along.
//!
//! # Implementing the traits (for beginners)
//!
//! Most schema types derive serde's `Serialize` / `Deserialize` and forward to
//! the [`codec`] helpers:
//!
//! ```rust
//! use leafconf::{codec, Deserializable, Format, FormatError, Observers, Serializable, Subject};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
//! struct Settings {
//!     volume: u8,
//!     #[serde(skip)]
//!     observers: Observers,
//! }
//!
//! impl Serializable for Settings {
//!     fn serialize_as(&self, format: Format) -> Result<String, FormatError> {
//!         codec::encode(self, format)
//!     }
//! }
//!
//! impl Deserializable for Settings {
//!     fn deserialize_from(&mut self, text: &str, format: Format) -> Result<(), FormatError> {
//!         codec::decode_into(self, text, format)
//!     }
//! }
//!
//! impl Subject for Settings {
//!     fn observers(&self) -> &Observers { &self.observers }
//!     fn observers_mut(&mut self) -> &mut Observers { &mut self.observers }
//! }
//!
//! let mut s = Settings::default();
//! s.deserialize_from("volume = 7", Format::Toml).unwrap();
//! assert_eq!(s.volume, 7);
//! ```
//!
//! The methods are called `serialize_as` / `deserialize_from` rather than
//! `serialize` / `deserialize` so they never clash with serde's own trait
//! methods on the same type.

pub mod codec;
mod format;

pub use format::Format;

use crate::error::FormatError;

/// Can render its current state as text.
pub trait Serializable {
    /// Renders the receiver in `format`.
    ///
    /// Must not mutate the receiver.  Values the format cannot represent are
    /// reported as [`FormatError::Encode`], never dropped.
    ///
    /// # Errors
    ///
    /// [`FormatError::Unsupported`] if the type does not render `format`,
    /// [`FormatError::Encode`] if rendering fails.
    fn serialize_as(&self, format: Format) -> Result<String, FormatError>;
}

/// Can replace its own state from text.
pub trait Deserializable {
    /// Parses `text` as `format` and replaces the receiver's entire state.
    ///
    /// Either every field reflects the parsed document, or an error is
    /// returned and the receiver is left exactly as it was.
    ///
    /// # Errors
    ///
    /// [`FormatError::Unsupported`] for a format the type does not read,
    /// [`FormatError::Parse`] for malformed text or schema mismatches, and
    /// [`FormatError::Invalid`] when [`Deserializable::validate`] rejects the
    /// parsed values.
    fn deserialize_from(&mut self, text: &str, format: Format) -> Result<(), FormatError>;

    /// Checks values that parsed correctly but make no sense for the
    /// application (a zero port, an empty host name).  Runs on the freshly
    /// parsed candidate before it replaces the receiver.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
