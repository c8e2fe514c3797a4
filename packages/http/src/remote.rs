//! Remote Bailey backing over HTTP.
//!
//! This module provides a client for a Bailey server exposing its store via
//! [`RemoteService`](crate::RemoteService).
//!
//! ## Protocol
//!
//! - `store(key, bytes)` → `put`
//! - `exists(key)` → `present`
//! - `fetch(key)` → `get`
//! - `remove(key)` → `delete`
//! - `info(key)` → `info`
//! - `enumerate()` → not supported; fails immediately
//!
//! ## Example
//!
//! ```ignore
//! use bailey_http::connect;
//!
//! let mut store = connect("http://localhost:8080")?;
//! store.put("/users/alice", &user)?;
//! let user: User = store.get_value("/users/alice")?;
//! ```

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;

use bailey_core_store::{Backing, Bytes, Error as StoreError, Fetched, Key, ObjectInfo};
use bailey_serde_store::ObjectStore;

use crate::types::{Call, Reply};
use crate::Error;

/// A backing that forwards every call to a remote service.
///
/// Each call is one blocking request/response round trip; no session
/// state is kept between calls.
pub struct RemoteBacking {
    client: Client,
    base_url: Url,
}

impl RemoteBacking {
    /// Create a backing for the server at `base_url`,
    /// e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a backing with a custom reqwest client (timeouts, proxies).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    fn call<T: DeserializeOwned>(&self, call: &Call) -> Result<T, StoreError> {
        let url = self.endpoint("rpc")?;
        tracing::debug!(method = call.method(), key = call.key(), %url, "remote call");

        let response = self
            .client
            .post(url)
            .json(call)
            .send()
            .map_err(Error::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { status }.into());
        }

        let reply: Reply<T> = response.json().map_err(Error::from)?;
        match reply {
            Reply::Result(value) => Ok(value),
            Reply::Fault(fault) => Err(fault.into()),
        }
    }

    /// The method names the server answers to.
    pub fn methods(&self) -> Result<Vec<String>, StoreError> {
        let url = self.endpoint("rpc/methods")?;
        let response = self.client.get(url).send().map_err(Error::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { status }.into());
        }

        Ok(response.json().map_err(Error::from)?)
    }
}

impl Backing for RemoteBacking {
    fn store(&mut self, key: &Key, data: Bytes) -> Result<(), StoreError> {
        let _: String = self.call(&Call::Put {
            key: key.to_string(),
            value: data,
        })?;
        Ok(())
    }

    fn exists(&mut self, key: &Key) -> Result<bool, StoreError> {
        self.call(&Call::Present {
            key: key.to_string(),
        })
    }

    fn fetch(&mut self, key: &Key) -> Result<Fetched, StoreError> {
        self.call(&Call::Get {
            key: key.to_string(),
        })
    }

    fn remove(&mut self, key: &Key) -> Result<(), StoreError> {
        let _: String = self.call(&Call::Delete {
            key: key.to_string(),
        })?;
        Ok(())
    }

    fn enumerate(&mut self) -> Result<Vec<String>, StoreError> {
        Err(StoreError::unsupported("enumerate over a remote connection"))
    }

    fn info(&mut self, key: &Key) -> Result<ObjectInfo, StoreError> {
        self.call(&Call::Info {
            key: key.to_string(),
        })
    }
}

/// Open a typed store on the server at `base_url`.
pub fn connect(base_url: &str) -> Result<ObjectStore<RemoteBacking>, StoreError> {
    Ok(ObjectStore::new(RemoteBacking::new(base_url)?))
}
