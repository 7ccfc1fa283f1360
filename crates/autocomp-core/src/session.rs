//! Live development sessions receiving targeted update notifications.

use serde::Serialize;
use tokio::sync::mpsc;

/// Kind tag of an update record for a consumer module.
pub const JS_UPDATE: &str = "js-update";

/// One consumer that must be reloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    #[serde(rename = "type")]
    pub kind: String,
    /// `/` followed by the root-relative consumer path.
    pub path: String,
    pub accepted_path: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Update {
    pub fn js(path: String, timestamp: i64) -> Self {
        Self {
            kind: JS_UPDATE.to_string(),
            accepted_path: path.clone(),
            path,
            timestamp,
        }
    }
}

/// A batch of updates sent as one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub updates: Vec<Update>,
}

impl UpdatePayload {
    pub fn new(updates: Vec<Update>) -> Self {
        Self {
            kind: "update".to_string(),
            updates,
        }
    }
}

/// An attached development server.
pub trait LiveSession: Send + Sync {
    fn send(&self, payload: UpdatePayload);
}

/// A [`LiveSession`] that forwards payloads into a channel.
#[derive(Debug, Clone)]
pub struct ChannelSession {
    tx: mpsc::UnboundedSender<UpdatePayload>,
}

impl ChannelSession {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<UpdatePayload>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl LiveSession for ChannelSession {
    fn send(&self, payload: UpdatePayload) {
        if self.tx.send(payload).is_err() {
            tracing::warn!("Live session closed, dropping update");
        }
    }
}
