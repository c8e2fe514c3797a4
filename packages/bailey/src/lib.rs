//! Bailey: a hierarchical key-value object store.
//!
//! Keys look like filesystem paths (`/food/eggs`). Values are serialized on
//! the way in and deserialized on the way out. A key whose descendants hold
//! values is a container and reads back as the names of its children.
//!
//! ```ignore
//! let mut store = bailey::open_store("/srv/bailey")?;
//! store.put("/food/eggs", &2)?;
//! assert_eq!(store.get::<i32>("/food")?, bailey::Object::Listing(vec!["eggs".into()]));
//!
//! let mut remote = bailey::connect("http://localhost:8080")?;
//! remote.put("/answer", &42)?;
//! ```

use std::path::PathBuf;

pub use bailey_core_store::{
    graft, parse_key, Backing, Bytes, Error, Fetched, Key, KeyError, MemoryBacking, ObjectInfo,
};
pub use bailey_fs_store::FsBacking;
pub use bailey_http::{connect, RemoteBacking, RemoteService, ServerHandle};
pub use bailey_serde_store::source::{module_key, MODULE_PREFIX};
pub use bailey_serde_store::{Codec, JsonCodec, Object, ObjectStore, SourceResolver};

/// Open a store over the directory at `root`, which must already exist.
pub fn open_store(root: impl Into<PathBuf>) -> Result<ObjectStore<FsBacking>, Error> {
    Ok(ObjectStore::new(FsBacking::new(root)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Recipe {
        name: String,
        eggs: u32,
    }

    #[test]
    fn open_store_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path()).unwrap();
        let recipe = Recipe {
            name: "omelette".to_string(),
            eggs: 3,
        };

        store.put("/recipes/omelette", &recipe).unwrap();
        assert_eq!(
            store.get_value::<Recipe>("/recipes/omelette").unwrap(),
            recipe
        );
        assert_eq!(
            store.get::<Recipe>("/recipes").unwrap(),
            Object::Listing(vec!["omelette".to_string()])
        );
        assert_eq!(
            store.keys().unwrap(),
            vec!["/recipes", "/recipes/omelette"]
        );
    }

    #[test]
    fn open_store_requires_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            open_store(dir.path().join("missing")),
            Err(Error::RootInvalid { .. })
        ));
    }

    #[test]
    fn local_and_remote_share_one_directory() {
        let dir = tempfile::tempdir().unwrap();
        let server = ServerHandle::spawn("127.0.0.1:0", FsBacking::new(dir.path()).unwrap()).unwrap();

        let mut remote = connect(&server.url()).unwrap();
        remote.put("/answer", &42).unwrap();

        let mut local = open_store(dir.path()).unwrap();
        assert_eq!(local.get_value::<i32>("/answer").unwrap(), 42);
    }

    #[test]
    fn module_sources_load_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(dir.path()).unwrap();
        store
            .put(&module_key(MODULE_PREFIX, "spam.eggs").unwrap(), "def ham(): pass\n")
            .unwrap();

        let mut resolver = SourceResolver::new(&mut store);
        assert_eq!(resolver.load("spam.eggs").unwrap(), "def ham(): pass\n");
        assert!(resolver.find("spam.missing").unwrap().is_none());
    }
}
