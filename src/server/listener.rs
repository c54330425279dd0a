use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use super::config::ServerConfig;
use super::error::ServerError;
use super::registry::SessionRegistry;
use super::session::Session;
use super::store::Store;

/// Accepts connections and spawns a [`Session`] task for each one.
pub struct Server {
    listener: TcpListener,
    store: Arc<Store>,
    registry: Arc<SessionRegistry>,
}

impl Server {
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(config.bind_address)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.bind_address,
                source,
            })?;

        Ok(Self {
            listener,
            store: Arc::new(Store::new(config.max_key_len)),
            registry: Arc::new(SessionRegistry::new()),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn store(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }

    pub fn registry(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.registry)
    }

    /// Accepts forever. Returns only when accepting fails.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(std::future::pending()).await
    }

    /// Accepts until `shutdown` resolves. Sessions already running are left
    /// alone.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("listener stopped");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (socket, peer) = accepted.map_err(ServerError::Accept)?;
                    self.spawn_session(socket, peer);
                }
            }
        }
    }

    fn spawn_session(&self, socket: tokio::net::TcpStream, peer: SocketAddr) {
        let session = Session::new(
            socket,
            peer,
            Arc::clone(&self.store),
            Arc::clone(&self.registry),
        );
        info!(session = session.id(), %peer, "connection successful");

        tokio::spawn(session.run());
    }
}
