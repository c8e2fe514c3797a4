//! Running a service on a background thread.

use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::thread;

use tokio::sync::oneshot;

use bailey_core_store::Backing;

use crate::service::RemoteService;

/// A server running on its own thread with its own runtime.
///
/// Dropping the handle shuts the server down and waits for it to exit.
///
/// ```ignore
/// let server = ServerHandle::spawn("127.0.0.1:0", FsBacking::new(root)?)?;
/// let mut store = bailey_http::connect(&server.url())?;
/// ```
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<io::Result<()>>>,
}

impl ServerHandle {
    /// Bind `addr` (port 0 picks a free port) and start serving `backing`.
    pub fn spawn<B: Backing + 'static>(addr: impl ToSocketAddrs, backing: B) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let service = RemoteService::new(backing);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = thread::Builder::new()
            .name("bailey-server".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    let listener = tokio::net::TcpListener::from_std(listener)?;
                    tracing::info!(%addr, "bailey server listening");
                    axum::serve(listener, service.router())
                        .with_graceful_shutdown(async move {
                            let _ = shutdown_rx.await;
                        })
                        .await
                })
            })?;

        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for [`connect`](crate::connect).
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the server and wait for it to exit.
    pub fn shutdown(mut self) -> io::Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> io::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| io::Error::other("server thread panicked"))?,
            None => Ok(()),
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::warn!(error = %err, "bailey server did not shut down cleanly");
        }
    }
}
