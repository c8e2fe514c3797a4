//! Typed access over any backing.

use serde::de::DeserializeOwned;
use serde::Serialize;

use bailey_core_store::{parse_key, Backing, Error, Fetched, ObjectInfo};

use crate::codec::{Codec, JsonCodec};

/// What a typed read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object<T> {
    /// A stored value.
    Value(T),
    /// The names of a container's immediate children.
    Listing(Vec<String>),
}

impl<T> Object<T> {
    pub fn into_value(self) -> Option<T> {
        match self {
            Object::Value(value) => Some(value),
            Object::Listing(_) => None,
        }
    }

    pub fn into_listing(self) -> Option<Vec<String>> {
        match self {
            Object::Value(_) => None,
            Object::Listing(names) => Some(names),
        }
    }
}

/// A key-value store over a byte-oriented backing.
///
/// Values are serialized with the codec on the way in and deserialized on
/// the way out. Raw keys are validated before the backing sees them, and
/// backing errors pass through untouched.
///
/// # Example
///
/// ```rust
/// use bailey_serde_store::{MemoryBacking, Object, ObjectStore};
///
/// let mut store = ObjectStore::new(MemoryBacking::new());
/// store.put("/food/eggs", &2).unwrap();
///
/// assert!(store.contains("/food").unwrap());
/// assert_eq!(store.get::<i32>("/food/eggs").unwrap(), Object::Value(2));
/// assert_eq!(
///     store.get::<i32>("/food").unwrap(),
///     Object::Listing(vec!["eggs".to_string()])
/// );
/// ```
pub struct ObjectStore<B, C = JsonCodec> {
    backing: B,
    codec: C,
}

impl<B: Backing> ObjectStore<B> {
    pub fn new(backing: B) -> Self {
        Self::with_codec(backing, JsonCodec)
    }
}

impl<B: Backing, C: Codec> ObjectStore<B, C> {
    pub fn with_codec(backing: B, codec: C) -> Self {
        Self { backing, codec }
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }

    pub fn backing_mut(&mut self) -> &mut B {
        &mut self.backing
    }

    pub fn into_inner(self) -> B {
        self.backing
    }

    /// True if `key` holds a value or is a container.
    pub fn contains(&mut self, key: &str) -> Result<bool, Error> {
        let key = parse_key(key)?;
        self.backing.exists(&key)
    }

    /// Serialize `value` and store it at `key`, replacing any previous value.
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), Error> {
        let key = parse_key(key)?;
        let data = self.codec.encode(value)?;
        self.backing.store(&key, data)
    }

    /// Read `key`: a stored value, or a container's child names.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Object<T>, Error> {
        let key = parse_key(key)?;
        match self.backing.fetch(&key)? {
            Fetched::Value(data) => Ok(Object::Value(self.codec.decode(&data)?)),
            Fetched::Listing(names) => Ok(Object::Listing(names)),
        }
    }

    /// Read a stored value, failing with [`Error::Container`] if `key` is a
    /// container.
    pub fn get_value<T: DeserializeOwned>(&mut self, key: &str) -> Result<T, Error> {
        match self.get(key)? {
            Object::Value(value) => Ok(value),
            Object::Listing(_) => Err(Error::container(key)),
        }
    }

    /// The child names of a container, failing with [`Error::Leaf`] if
    /// `key` holds a value.
    pub fn list(&mut self, key: &str) -> Result<Vec<String>, Error> {
        let parsed = parse_key(key)?;
        match self.backing.fetch(&parsed)? {
            Fetched::Listing(names) => Ok(names),
            Fetched::Value(_) => Err(Error::leaf(key)),
        }
    }

    /// Remove the value at `key`.
    pub fn delete(&mut self, key: &str) -> Result<(), Error> {
        let key = parse_key(key)?;
        self.backing.remove(&key)
    }

    /// Every key in the store, containers included.
    pub fn keys(&mut self) -> Result<Vec<String>, Error> {
        self.backing.enumerate()
    }

    /// Metadata for `key`. Reserved; currently always empty.
    pub fn info(&mut self, key: &str) -> Result<ObjectInfo, Error> {
        let key = parse_key(key)?;
        self.backing.info(&key)
    }
}
