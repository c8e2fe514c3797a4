//! Serving a directory-backed store over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use bailey_core_store::Error as StoreError;
use bailey_fs_store::FsBacking;
use bailey_http::{serve, RemoteService};

/// Bailey server - share a directory of objects over HTTP
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "bailey-server")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Directory holding the stored objects; must already exist
    #[arg(long, env = "BAILEY_ROOT", default_value = "/tmp/bailey")]
    pub root: PathBuf,

    /// Address to listen on
    #[arg(long, env = "BAILEY_ADDR", default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to serve on {addr}: {source}")]
    Io {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Open the root, bind the address and serve until the process ends.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let backing = FsBacking::new(&config.root)?;
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| ServerError::Io {
            addr: config.addr,
            source,
        })?;
    let addr = listener.local_addr().unwrap_or(config.addr);

    tracing::info!(
        "serving objects from {} at {}",
        backing.root().display(),
        addr
    );

    serve(listener, RemoteService::new(backing))
        .await
        .map_err(|source| ServerError::Io { addr, source })
}
