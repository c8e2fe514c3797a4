//! Bailey core: keys, grafting and the backing contract.
//!
//! This crate defines what every storage backend agrees on:
//! - `Key`: a validated, filesystem-portable object name
//! - `graft`: key to filesystem path translation under a root
//! - `Backing`: the byte-level store/fetch/exists/remove/enumerate contract
//! - `Fetched`: a leaf payload or a container listing
//! - `Error`: the shared error taxonomy
//!
//! # Example
//!
//! ```rust
//! use bailey_core_store::{Backing, Error, Fetched, Key};
//!
//! fn read_leaf(backing: &mut dyn Backing, raw: &str) -> Result<Option<bytes::Bytes>, Error> {
//!     let key = Key::parse(raw).map_err(|reason| Error::invalid_key(raw, reason))?;
//!     Ok(backing.fetch(&key)?.into_value())
//! }
//! ```

pub use bytes::Bytes;

mod error;
mod graft;
mod key;
mod memory;
pub mod payload;
mod traits;

pub use error::Error;
pub use graft::graft;
pub use key::{Key, KeyError, DISALLOWED_CHARACTERS, RESERVED_NAMES};
pub use memory::MemoryBacking;
pub use traits::{Backing, Fetched, ObjectInfo};

/// Parse a raw key, reporting failures as [`Error::InvalidKey`].
pub fn parse_key(raw: &str) -> Result<Key, Error> {
    Key::parse(raw).map_err(|reason| Error::invalid_key(raw, reason))
}
