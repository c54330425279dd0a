use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::codec::Utf8FrameCodec;
use super::commands::{self, Outcome};
use super::error::SessionError;
use super::registry::SessionRegistry;
use super::request::parse_request;
use super::store::Store;

/// Why a session's loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Quit,
    ClientClosed,
    ForcedClose,
    Error,
}

/// One accepted connection and its command loop.
pub struct Session {
    id: String,
    peer: SocketAddr,
    framed: Framed<TcpStream, Utf8FrameCodec>,
    store: Arc<Store>,
    registry: Arc<SessionRegistry>,
    cancel_token: CancellationToken,
}

impl Session {
    /// Creates the session and registers it before returning.
    pub fn new(
        socket: TcpStream,
        peer: SocketAddr,
        store: Arc<Store>,
        registry: Arc<SessionRegistry>,
    ) -> Self {
        let id = Uuid::new_v4().to_string();
        let cancel_token = registry.register(&id);
        Self {
            id,
            peer,
            framed: Framed::new(socket, Utf8FrameCodec::new()),
            store,
            registry,
            cancel_token,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Runs until QUIT, disconnect, forced close or an I/O failure, then
    /// closes the socket and deregisters.
    pub async fn run(mut self) -> CloseReason {
        let reason = match self.serve().await {
            Ok(reason) => reason,
            Err(err) => {
                warn!(session = %self.id, peer = %self.peer, error = %err, "session failed");
                CloseReason::Error
            }
        };

        if let Err(err) = self.framed.get_mut().shutdown().await {
            debug!(session = %self.id, error = %err, "socket shutdown failed");
        }
        self.registry.deregister(&self.id);
        info!(session = %self.id, peer = %self.peer, ?reason, "connection closed");
        reason
    }

    async fn serve(&mut self) -> Result<CloseReason, SessionError> {
        loop {
            // Cancellation is only observed here, so a forced close never
            // lands between a command and its reply.
            let frame = tokio::select! {
                biased;
                _ = self.cancel_token.cancelled() => return Ok(CloseReason::ForcedClose),
                frame = self.framed.next() => frame,
            };
            let line = match frame {
                Some(line) => line?,
                None => return Ok(CloseReason::ClientClosed),
            };

            let outcome = match parse_request(&line) {
                Ok(request) => {
                    debug!(session = %self.id, command = ?request.command(), "received command");
                    commands::dispatch(request, &self.store, &self.registry).await
                }
                Err(err) => {
                    debug!(session = %self.id, %line, "rejected command");
                    Outcome::reply(err.to_string())
                }
            };

            for reply in outcome.replies {
                self.framed.send(reply).await?;
            }
            if outcome.close {
                return Ok(CloseReason::Quit);
            }
        }
    }
}
