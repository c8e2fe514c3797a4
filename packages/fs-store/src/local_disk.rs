use std::{fs, io, path};

use bailey_core_store::{graft, Backing, Bytes, Error, Fetched, Key};

/// A backing rooted at a directory on the local filesystem.
pub struct FsBacking {
    root: path::PathBuf,
}

impl FsBacking {
    /// Open a backing rooted at `root`.
    ///
    /// The root must already exist and be a directory; it is never created.
    pub fn new(root: impl Into<path::PathBuf>) -> Result<FsBacking, Error> {
        let root = root.into();
        let attr = fs::metadata(&root).map_err(|source| Error::RootInvalid {
            path: root.clone(),
            source,
        })?;

        if !attr.is_dir() {
            return Err(Error::RootInvalid {
                path: root,
                source: io::Error::other("Root path must be a directory."),
            });
        }

        match root.canonicalize() {
            Ok(root) => Ok(FsBacking { root }),
            Err(source) => Err(Error::RootInvalid { path: root, source }),
        }
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    fn key_to_file_path(&self, key: &Key) -> path::PathBuf {
        graft(&self.root, key)
    }

    fn list_children(dir: &path::Path) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => {
                    tracing::warn!(dir = %dir.display(), ?name, "skipping non-UTF-8 entry");
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn write_leaf(file_path: &path::Path, data: &[u8]) -> Result<(), Error> {
        match fs::write(file_path, data) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                // Ancestor containers are missing; create them and retry once.
                if let Some(parent) = file_path.parent() {
                    tracing::debug!(dir = %parent.display(), "creating ancestor containers");
                    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
                }
                fs::write(file_path, data).map_err(|e| Error::io(file_path, e))
            }
            Err(err) => Err(Error::io(file_path, err)),
        }
    }
}

/// A path is missing when it, or one of its ancestors, isn't there. An
/// ancestor that is a regular file counts as missing too.
fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

impl Backing for FsBacking {
    fn store(&mut self, key: &Key, data: Bytes) -> Result<(), Error> {
        let file_path = self.key_to_file_path(key);
        tracing::debug!(key = %key, path = %file_path.display(), len = data.len(), "storing");

        if file_path.is_dir() {
            return Err(Error::container(key));
        }

        let mut ancestor = key.parent();
        while let Some(parent) = ancestor {
            if self.key_to_file_path(&parent).is_file() {
                return Err(Error::leaf(parent));
            }
            ancestor = parent.parent();
        }

        Self::write_leaf(&file_path, &data)
    }

    fn exists(&mut self, key: &Key) -> Result<bool, Error> {
        let file_path = self.key_to_file_path(key);
        Ok(file_path.is_file() || file_path.is_dir())
    }

    fn fetch(&mut self, key: &Key) -> Result<Fetched, Error> {
        let file_path = self.key_to_file_path(key);
        tracing::debug!(key = %key, path = %file_path.display(), "fetching");

        let attr = match fs::metadata(&file_path) {
            Ok(attr) => attr,
            Err(err) if is_missing(&err) => return Err(Error::not_found(key)),
            Err(err) => return Err(Error::io(file_path, err)),
        };

        if attr.is_dir() {
            return Self::list_children(&file_path).map(Fetched::Listing);
        }

        fs::read(&file_path)
            .map(|data| Fetched::Value(Bytes::from(data)))
            .map_err(|e| Error::io(file_path, e))
    }

    fn remove(&mut self, key: &Key) -> Result<(), Error> {
        let file_path = self.key_to_file_path(key);
        tracing::debug!(key = %key, path = %file_path.display(), "removing");

        match fs::metadata(&file_path) {
            Ok(attr) if attr.is_dir() => Err(Error::container(key)),
            Ok(_) => fs::remove_file(&file_path).map_err(|e| Error::io(file_path, e)),
            Err(err) if is_missing(&err) => Err(Error::not_found(key)),
            Err(err) => Err(Error::io(file_path, err)),
        }
    }

    fn enumerate(&mut self) -> Result<Vec<String>, Error> {
        let mut keys = Vec::new();
        for entry in walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            let mut key = String::new();
            let mut utf8 = true;
            for component in relative.components() {
                match component.as_os_str().to_str() {
                    Some(name) => {
                        key.push('/');
                        key.push_str(name);
                    }
                    None => {
                        utf8 = false;
                        break;
                    }
                }
            }

            if utf8 {
                keys.push(key);
            } else {
                tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 path");
            }
        }
        Ok(keys)
    }
}
