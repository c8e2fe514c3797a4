//! In-memory backing.

use std::collections::BTreeMap;
use std::ops::Bound;

use bytes::Bytes;

use crate::{Backing, Error, Fetched, Key};

/// A backing that keeps every node in an ordered map.
///
/// Containers are created as a side effect of storing a descendant and are
/// never removed, mirroring the directories of the filesystem backing.
///
/// # Example
///
/// ```rust
/// use bailey_core_store::{Backing, Fetched, MemoryBacking, key};
/// use bytes::Bytes;
///
/// let mut backing = MemoryBacking::new();
/// backing.store(&key!("/food/eggs"), Bytes::from_static(b"2")).unwrap();
///
/// assert!(backing.exists(&key!("/food")).unwrap());
/// assert_eq!(
///     backing.fetch(&key!("/food")).unwrap(),
///     Fetched::Listing(vec!["eggs".to_string()])
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryBacking {
    nodes: BTreeMap<Key, Node>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf(Bytes),
    Container,
}

impl MemoryBacking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes strictly beneath `key`, in key order.
    ///
    /// Descendants sort contiguously right after their ancestor.
    fn descendants<'a>(&'a self, key: &'a Key) -> impl Iterator<Item = &'a Key> + 'a {
        self.nodes
            .range::<Key, _>((Bound::Excluded(key), Bound::Unbounded))
            .map(|(k, _)| k)
            .take_while(move |k| key.is_ancestor_of(k))
    }
}

impl Backing for MemoryBacking {
    fn store(&mut self, key: &Key, data: Bytes) -> Result<(), Error> {
        if let Some(Node::Container) = self.nodes.get(key) {
            return Err(Error::container(key));
        }

        let mut ancestors = Vec::new();
        let mut current = key.parent();
        while let Some(ancestor) = current {
            if let Some(Node::Leaf(_)) = self.nodes.get(&ancestor) {
                return Err(Error::leaf(ancestor));
            }
            current = ancestor.parent();
            ancestors.push(ancestor);
        }

        tracing::debug!(key = %key, len = data.len(), "storing in memory");
        for ancestor in ancestors {
            self.nodes.entry(ancestor).or_insert(Node::Container);
        }
        self.nodes.insert(key.clone(), Node::Leaf(data));
        Ok(())
    }

    fn exists(&mut self, key: &Key) -> Result<bool, Error> {
        Ok(self.nodes.contains_key(key))
    }

    fn fetch(&mut self, key: &Key) -> Result<Fetched, Error> {
        match self.nodes.get(key) {
            Some(Node::Leaf(data)) => Ok(Fetched::Value(data.clone())),
            Some(Node::Container) => Ok(Fetched::Listing(
                self.descendants(key)
                    .filter(|k| key.is_parent_of(k))
                    .map(|k| k.name().to_string())
                    .collect(),
            )),
            None => Err(Error::not_found(key)),
        }
    }

    fn remove(&mut self, key: &Key) -> Result<(), Error> {
        match self.nodes.get(key) {
            Some(Node::Leaf(_)) => {
                self.nodes.remove(key);
                Ok(())
            }
            Some(Node::Container) => Err(Error::container(key)),
            None => Err(Error::not_found(key)),
        }
    }

    fn enumerate(&mut self) -> Result<Vec<String>, Error> {
        Ok(self.nodes.keys().map(Key::to_string).collect())
    }
}
