//! Serving a backing over HTTP.
//!
//! The service is a thin shim: each call validates its key, runs against
//! the local backing, and turns any error into a structured [`Fault`].

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use bailey_core_store::{parse_key, Backing, Bytes, Error, Fetched, ObjectInfo};

use crate::types::{Call, Fault, Reply, METHODS};

/// Exposes a backing as the five remote operations.
pub struct RemoteService<B> {
    backing: Arc<Mutex<B>>,
}

impl<B> Clone for RemoteService<B> {
    fn clone(&self) -> Self {
        Self {
            backing: self.backing.clone(),
        }
    }
}

impl<B: Backing + 'static> RemoteService<B> {
    pub fn new(backing: B) -> Self {
        Self {
            backing: Arc::new(Mutex::new(backing)),
        }
    }

    fn with_backing<T>(&self, f: impl FnOnce(&mut B) -> Result<T, Error>) -> Result<T, Error> {
        let mut guard = self.backing.lock().map_err(|_| Error::RemoteFault {
            code: "internal".to_string(),
            message: "backing lock poisoned".to_string(),
        })?;
        f(&mut *guard)
    }

    pub fn get(&self, key: &str) -> Result<Fetched, Error> {
        let key = parse_key(key)?;
        self.with_backing(|b| b.fetch(&key))
    }

    pub fn put(&self, key: &str, value: Bytes) -> Result<String, Error> {
        let parsed = parse_key(key)?;
        self.with_backing(|b| b.store(&parsed, value))?;
        Ok(key.to_string())
    }

    pub fn delete(&self, key: &str) -> Result<String, Error> {
        let parsed = parse_key(key)?;
        self.with_backing(|b| b.remove(&parsed))?;
        Ok(key.to_string())
    }

    pub fn present(&self, key: &str) -> Result<bool, Error> {
        let key = parse_key(key)?;
        self.with_backing(|b| b.exists(&key))
    }

    pub fn info(&self, key: &str) -> Result<ObjectInfo, Error> {
        let key = parse_key(key)?;
        self.with_backing(|b| b.info(&key))
    }

    /// Run one call and encode its reply.
    pub fn dispatch(&self, call: Call) -> serde_json::Value {
        tracing::debug!(method = call.method(), key = call.key(), "dispatching");
        match call {
            Call::Get { key } => encode_reply(self.get(&key)),
            Call::Put { key, value } => encode_reply(self.put(&key, value)),
            Call::Delete { key } => encode_reply(self.delete(&key)),
            Call::Present { key } => encode_reply(self.present(&key)),
            Call::Info { key } => encode_reply(self.info(&key)),
        }
    }

    /// The HTTP surface: `POST /rpc` and `GET /rpc/methods`.
    pub fn router(self) -> Router {
        Router::new()
            .route("/rpc", post(rpc_handler::<B>))
            .route("/rpc/methods", get(methods_handler))
            .with_state(self)
    }
}

fn encode_reply<T: Serialize>(result: Result<T, Error>) -> serde_json::Value {
    let reply = match result {
        Ok(value) => Reply::Result(value),
        Err(err) => {
            tracing::debug!(error = %err, "replying with fault");
            Reply::Fault(Fault::from(&err))
        }
    };
    serde_json::to_value(&reply).unwrap_or_else(|e| {
        serde_json::json!({"fault": {"code": "internal", "message": e.to_string()}})
    })
}

async fn rpc_handler<B: Backing + 'static>(
    State(service): State<RemoteService<B>>,
    Json(call): Json<Call>,
) -> Response {
    // Backings block; keep them off the async workers.
    match tokio::task::spawn_blocking(move || service.dispatch(call)).await {
        Ok(reply) => Json(reply).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn methods_handler() -> Json<Vec<&'static str>> {
    Json(METHODS.to_vec())
}

/// Serve `service` on `listener` until the future is dropped or fails.
pub async fn serve<B: Backing + 'static>(
    listener: tokio::net::TcpListener,
    service: RemoteService<B>,
) -> std::io::Result<()> {
    axum::serve(listener, service.router()).await
}
