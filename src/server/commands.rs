use tracing::info;

use super::registry::SessionRegistry;
use super::request::Request;
use super::store::{Store, WILDCARD};

/// Frames to send back for one command, and whether the session ends after
/// sending them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub replies: Vec<String>,
    pub close: bool,
}

impl Outcome {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            replies: vec![text.into()],
            close: false,
        }
    }

    fn closing(text: impl Into<String>) -> Self {
        Self {
            replies: vec![text.into()],
            close: true,
        }
    }
}

/// First frame of a `SELECTED` answer. The connection report follows it.
pub const SELECTED_REPLY: &str = "Selected client disconnected other clients";

/// Whether a reply is followed by a second frame carrying the report.
pub fn has_report(first_reply: &str) -> bool {
    first_reply == SELECTED_REPLY
}

fn not_found(key: &str) -> String {
    format!("Error: The key {key} does not exist")
}

pub async fn dispatch(request: Request, store: &Store, registry: &SessionRegistry) -> Outcome {
    match request {
        Request::Get { key } => Outcome::reply(get_command_from_request(store, &key).await),
        Request::Put { key, value } => {
            Outcome::reply(put_command_from_request(store, &key, &value).await)
        }
        Request::Delete { key } => Outcome::reply(del_command_from_request(store, &key).await),
        Request::Keys => Outcome::reply(keys_command_from_request(store).await),
        Request::Selected { session_id } => selected_command_from_request(registry, &session_id),
        Request::Quit => Outcome::closing("Connection closed"),
    }
}

async fn get_command_from_request(store: &Store, key: &str) -> String {
    match store.get(key).await {
        Ok(Some(value)) => value,
        Ok(None) => not_found(key),
        Err(err) => err.to_string(),
    }
}

async fn put_command_from_request(store: &Store, key: &str, value: &str) -> String {
    match store.put(key, value).await {
        Ok(()) => "Value stored successfully".to_string(),
        Err(err) => err.to_string(),
    }
}

async fn del_command_from_request(store: &Store, key: &str) -> String {
    let removed = store.delete(key).await;
    if key == WILDCARD {
        "All values were deleted".to_string()
    } else if removed {
        "Key deleted successfully".to_string()
    } else {
        not_found(key)
    }
}

async fn keys_command_from_request(store: &Store) -> String {
    store.list_keys().await.join(", ")
}

fn selected_command_from_request(registry: &SessionRegistry, session_id: &str) -> Outcome {
    let report = registry.disconnect_all_except(session_id);
    info!(
        selected = session_id,
        disconnected = ?report.disconnected,
        "disconnected sessions"
    );
    Outcome {
        replies: vec![SELECTED_REPLY.to_string(), report.to_reply()],
        close: false,
    }
}
