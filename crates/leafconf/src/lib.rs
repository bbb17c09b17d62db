//! # leafconf
//!
//! A generic, file-backed configuration store.  An application describes its
//! settings as a plain struct (the "schema type"), hands a default instance to
//! [`Config`], and gets back a container that:
//!
//! - loads the schema from disk, falling back to the defaults on first run,
//! - persists it again on request (or when the store is dropped),
//! - notifies registered observers whenever the live values change.
//!
//! # Architecture overview (for beginners)
//!
//! The crate is split into four small modules:
//!
//! - **`proxy`** – [`ObservableValue`], a single value plus a change handler
//!   that only fires when the value actually changes.
//!
//! - **`serialization`** – The [`Format`] tag and the two capabilities a schema
//!   type implements to be stored on disk: [`Serializable`] and
//!   [`Deserializable`].  The `codec` sub-module turns any serde type into an
//!   implementation in two lines.
//!
//! - **`observer`** – The [`Observer`] / [`Subject`] protocol.  Subjects hold
//!   weak references, so a dropped observer silently stops receiving events.
//!
//! - **`store`** – [`Config`], which ties a schema type to a file path and
//!   drives load / save / revert / notify.
//!
//! Errors live in `error` and are re-exported here.

pub mod error;
pub mod observer;
pub mod proxy;
pub mod serialization;
pub mod store;

pub use error::{ConfigError, FormatError};
pub use observer::{observer_fn, ConfigEvent, Observer, Observers, Subject};
pub use proxy::ObservableValue;
pub use serialization::{codec, Deserializable, Format, Serializable};
pub use store::{Config, SavingPolicy, Schema};
