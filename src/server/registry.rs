use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

/// The live set of sessions, in registration order.
///
/// Sessions are force-closed by cancelling their token; each one removes
/// itself once its loop observes the cancellation.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<Vec<SessionHandle>>,
}

#[derive(Debug, Clone)]
struct SessionHandle {
    id: String,
    cancel_token: CancellationToken,
}

/// Outcome of a `SELECTED` sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectReport {
    /// Every id registered when the sweep ran, in registration order.
    pub listed: Vec<String>,
    /// The subset that was told to close.
    pub disconnected: Vec<String>,
}

impl DisconnectReport {
    /// Text sent back to the session that issued `SELECTED`.
    pub fn to_reply(&self) -> String {
        let listing: String = self.listed.iter().map(|id| format!("{id}\n")).collect();
        if listing.is_empty() {
            "No connected clients.".to_string()
        } else {
            format!("Connected clients:\n{listing}")
        }
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, Vec<SessionHandle>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a session and returns the token that closes it.
    pub fn register(&self, id: &str) -> CancellationToken {
        let cancel_token = CancellationToken::new();
        self.sessions().push(SessionHandle {
            id: id.to_string(),
            cancel_token: cancel_token.clone(),
        });
        cancel_token
    }

    /// Returns whether the session was still registered.
    pub fn deregister(&self, id: &str) -> bool {
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|handle| handle.id != id);
        sessions.len() != before
    }

    pub fn ids(&self) -> Vec<String> {
        self.sessions().iter().map(|h| h.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }

    /// Cancels every session whose id is not `selected_id`.
    ///
    /// The live set is snapshotted under the lock and the tokens are
    /// cancelled after it is released. Nothing is removed here.
    pub fn disconnect_all_except(&self, selected_id: &str) -> DisconnectReport {
        let snapshot: Vec<SessionHandle> = self.sessions().clone();

        let mut disconnected = Vec::new();
        for handle in &snapshot {
            if handle.id != selected_id {
                handle.cancel_token.cancel();
                disconnected.push(handle.id.clone());
            }
        }
        DisconnectReport {
            listed: snapshot.into_iter().map(|h| h.id).collect(),
            disconnected,
        }
    }
}
