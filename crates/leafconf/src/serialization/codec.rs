//! serde-backed encode/decode for every [`Format`].
//!
//! These helpers are what a serde-derived schema type forwards its
//! [`Serializable`](super::Serializable) and
//! [`Deserializable`](super::Deserializable) implementations to.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use super::{Deserializable, Format};
use crate::error::FormatError;
use crate::observer::Subject;

/// Renders `value` as `format` text.
///
/// TOML and JSON use their pretty printers so files on disk stay readable.
///
/// # Errors
///
/// Returns [`FormatError::Encode`] when the value cannot be represented
/// in `format`.
pub fn encode<T: Serialize + ?Sized>(value: &T, format: Format) -> Result<String, FormatError> {
    let encoded = match format {
        Format::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
        Format::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    };
    encoded.map_err(|diagnostic| FormatError::Encode { format, diagnostic })
}

/// Parses `text` as `format` into a new `T`.
///
/// # Errors
///
/// Returns [`FormatError::Parse`] carrying the decoder's diagnostic (which
/// includes line/column information where the decoder provides it).
pub fn decode<T: DeserializeOwned>(text: &str, format: Format) -> Result<T, FormatError> {
    let decoded = match format {
        Format::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    };
    decoded.map_err(|diagnostic| FormatError::Parse {
        format,
        diagnostic: diagnostic.trim_end().to_string(),
    })
}

/// Replaces `target` with the document in `text`, all or nothing.
///
/// The document is decoded into a temporary and validated first.  Only
/// then are the target's observer registrations moved onto the temporary and
/// the temporary swapped in, so subscribers survive a reload and a failed
/// parse leaves `target` untouched.
///
/// # Errors
///
/// [`FormatError::Parse`] from [`decode`], or [`FormatError::Invalid`] when
/// [`Deserializable::validate`] rejects the candidate.
pub fn decode_into<T>(target: &mut T, text: &str, format: Format) -> Result<(), FormatError>
where
    T: DeserializeOwned + Deserializable + Subject,
{
    let mut fresh: T = decode(text, format)?;
    fresh
        .validate()
        .map_err(|diagnostic| FormatError::Invalid { format, diagnostic })?;

    std::mem::swap(fresh.observers_mut(), target.observers_mut());
    *target = fresh;
    trace!(%format, bytes = text.len(), "replaced values from document");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
