//! # bailey-http
//!
//! Remote access to Bailey stores over HTTP.
//!
//! ## Pieces
//!
//! ### RemoteService
//!
//! Wraps a local backing and answers the five protocol calls (`get`,
//! `put`, `delete`, `present`, `info`) through an axum router:
//!
//! ```ignore
//! use bailey_http::{serve, RemoteService};
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! serve(listener, RemoteService::new(FsBacking::new("/srv/bailey")?)).await?;
//! ```
//!
//! ### RemoteBacking
//!
//! A blocking `Backing` that forwards each call to a service. Faults come
//! back as the matching local error (`InvalidKey`, `NotFound`, ...) when
//! the fault code is recognised, and as `RemoteFault` otherwise.
//!
//! ```ignore
//! use bailey_http::connect;
//!
//! let mut store = connect("http://localhost:8080")?;
//! store.put("/answer", &42)?;
//! ```
//!
//! ### ServerHandle
//!
//! Runs a service on a background thread, for tests and embedding.

pub mod error;
pub mod handle;
pub mod remote;
pub mod service;
pub mod types;

// Re-export main types
pub use error::Error;
pub use handle::ServerHandle;
pub use remote::{connect, RemoteBacking};
pub use service::{serve, RemoteService};
pub use types::{Call, Fault, FaultKind, Reply, METHODS};
