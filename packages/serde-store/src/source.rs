//! Locating source text stored under a module namespace.
//!
//! Dotted module names map onto keys beneath a reserved prefix:
//! `pkg.mod` lives at `/py/pkg/mod`. Only lookup is provided here; what a
//! caller does with the text is its own business.

use bailey_core_store::{Backing, Error, KeyError};

use crate::codec::Codec;
use crate::typed::ObjectStore;

/// The default namespace for module source.
pub const MODULE_PREFIX: &str = "/py";

/// The key a dotted module name resolves to under `prefix`.
///
/// Every dotted segment must be non-empty and free of `/`, so `""`, `a..b`
/// and `.a` are rejected with [`Error::InvalidKey`] instead of collapsing
/// onto some other key.
///
/// ```rust
/// use bailey_serde_store::source::{module_key, MODULE_PREFIX};
///
/// assert_eq!(module_key(MODULE_PREFIX, "hello").unwrap(), "/py/hello");
/// assert_eq!(module_key(MODULE_PREFIX, "pkg.sub.mod").unwrap(), "/py/pkg/sub/mod");
/// assert!(module_key(MODULE_PREFIX, "pkg..mod").is_err());
/// ```
pub fn module_key(prefix: &str, name: &str) -> Result<String, Error> {
    for segment in name.split('.') {
        if segment.is_empty() {
            return Err(Error::invalid_key(name, KeyError::Empty));
        }
        if segment.contains('/') {
            return Err(Error::invalid_key(
                name,
                KeyError::DisallowedCharacter {
                    component: segment.to_string(),
                    character: '/',
                },
            ));
        }
    }
    Ok(format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        name.replace('.', "/")
    ))
}

/// Resolves dotted module names to stored source text.
pub struct SourceResolver<'a, B, C> {
    store: &'a mut ObjectStore<B, C>,
    prefix: String,
}

impl<'a, B: Backing, C: Codec> SourceResolver<'a, B, C> {
    pub fn new(store: &'a mut ObjectStore<B, C>) -> Self {
        Self::with_prefix(store, MODULE_PREFIX)
    }

    pub fn with_prefix(store: &'a mut ObjectStore<B, C>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// The key holding `name`'s source, if the store has it.
    pub fn find(&mut self, name: &str) -> Result<Option<String>, Error> {
        let key = module_key(&self.prefix, name)?;
        if self.store.contains(&key)? {
            Ok(Some(key))
        } else {
            Ok(None)
        }
    }

    /// The source text for `name`.
    pub fn load(&mut self, name: &str) -> Result<String, Error> {
        let key = module_key(&self.prefix, name)?;
        self.store.get_value(&key)
    }
}
