//! Serde Integration for Bailey
//!
//! This layer turns a byte-oriented `Backing` into a store of arbitrary
//! serializable values:
//! - `ObjectStore`: typed `put`/`get`/`contains`/`delete`/`keys`
//! - `Object`: a stored value or a container listing
//! - `Codec` / `JsonCodec`: value <-> bytes
//! - `source`: module-name lookups over a store
//!
//! # Example
//!
//! ```rust
//! use bailey_serde_store::{MemoryBacking, ObjectStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let mut store = ObjectStore::new(MemoryBacking::new());
//! let alice = User { name: "Alice".into(), age: 30 };
//! store.put("/users/alice", &alice).unwrap();
//!
//! let back: User = store.get_value("/users/alice").unwrap();
//! assert_eq!(back, alice);
//! ```

pub use bytes::Bytes;

mod codec;
pub mod source;
mod typed;

pub use codec::{Codec, JsonCodec};
pub use source::SourceResolver;
pub use typed::{Object, ObjectStore};

// Re-export core types for convenience
pub use bailey_core_store::{
    Backing, Error, Fetched, Key, KeyError, MemoryBacking, ObjectInfo,
};
