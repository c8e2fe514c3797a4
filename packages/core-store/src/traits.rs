//! The backing contract.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{Error, Key};

/// The result of reading a key.
///
/// A key is either a leaf holding bytes, or a container whose existence is
/// implied by keys stored beneath it. Reading a container yields the names
/// of its immediate children, never a payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fetched {
    Value(#[serde(with = "crate::payload")] Bytes),
    Listing(Vec<String>),
}

impl Fetched {
    pub fn is_listing(&self) -> bool {
        matches!(self, Fetched::Listing(_))
    }

    /// The payload of a leaf, or `None` for a container.
    pub fn into_value(self) -> Option<Bytes> {
        match self {
            Fetched::Value(bytes) => Some(bytes),
            Fetched::Listing(_) => None,
        }
    }
}

/// Per-object metadata. Reserved; currently always empty.
pub type ObjectInfo = BTreeMap<String, String>;

/// Byte-oriented storage for validated keys.
///
/// Implementations own (or, for remote backings, proxy) the authoritative
/// state. Every method receives an already-validated [`Key`].
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Backing>`.
pub trait Backing: Send + Sync {
    /// Persist `data` at `key`, replacing whatever was there. Missing
    /// ancestor containers come into existence as a side effect.
    fn store(&mut self, key: &Key, data: Bytes) -> Result<(), Error>;

    /// True if `key` is a leaf or a container.
    fn exists(&mut self, key: &Key) -> Result<bool, Error>;

    /// Read a leaf's bytes or a container's child names.
    ///
    /// Fails with [`Error::NotFound`] when the key is neither.
    fn fetch(&mut self, key: &Key) -> Result<Fetched, Error>;

    /// Erase the leaf at `key`.
    ///
    /// Fails with [`Error::NotFound`] if absent and [`Error::Container`]
    /// if `key` is a container; subtrees are never removed.
    fn remove(&mut self, key: &Key) -> Result<(), Error>;

    /// Every key currently reachable, leaves and containers alike, in
    /// canonical `/a/b` form. Each call takes a fresh snapshot.
    fn enumerate(&mut self) -> Result<Vec<String>, Error>;

    /// Metadata about the object at `key`.
    fn info(&mut self, _key: &Key) -> Result<ObjectInfo, Error> {
        Ok(ObjectInfo::new())
    }
}

// Blanket implementations for references and boxes

impl<T: Backing + ?Sized> Backing for &mut T {
    fn store(&mut self, key: &Key, data: Bytes) -> Result<(), Error> {
        (*self).store(key, data)
    }

    fn exists(&mut self, key: &Key) -> Result<bool, Error> {
        (*self).exists(key)
    }

    fn fetch(&mut self, key: &Key) -> Result<Fetched, Error> {
        (*self).fetch(key)
    }

    fn remove(&mut self, key: &Key) -> Result<(), Error> {
        (*self).remove(key)
    }

    fn enumerate(&mut self) -> Result<Vec<String>, Error> {
        (*self).enumerate()
    }

    fn info(&mut self, key: &Key) -> Result<ObjectInfo, Error> {
        (*self).info(key)
    }
}

impl<T: Backing + ?Sized> Backing for Box<T> {
    fn store(&mut self, key: &Key, data: Bytes) -> Result<(), Error> {
        self.as_mut().store(key, data)
    }

    fn exists(&mut self, key: &Key) -> Result<bool, Error> {
        self.as_mut().exists(key)
    }

    fn fetch(&mut self, key: &Key) -> Result<Fetched, Error> {
        self.as_mut().fetch(key)
    }

    fn remove(&mut self, key: &Key) -> Result<(), Error> {
        self.as_mut().remove(key)
    }

    fn enumerate(&mut self) -> Result<Vec<String>, Error> {
        self.as_mut().enumerate()
    }

    fn info(&mut self, key: &Key) -> Result<ObjectInfo, Error> {
        self.as_mut().info(key)
    }
}
