//! Local notification center.
//!
//! Holds the ordered list of user-facing alerts produced by the engine
//! and forwards read-state changes to optional fire-and-forget hooks so
//! an external owner can persist them.

use std::sync::Arc;
use swapboard_domain::{Notification, Severity};
use tokio::sync::RwLock;
use tracing::debug;

/// Fire-and-forget callbacks invoked when the user changes read state.
///
/// All methods default to no-ops; implementors override what they need.
/// Nothing is awaited, matching the injected-callback contract.
pub trait NotificationHooks: Send + Sync {
    /// A single notification was marked as read.
    fn on_mark_as_read(&self, _id: &str) {}

    /// A notification was dismissed.
    fn on_dismiss(&self, _id: &str) {}

    /// Every notification was marked as read.
    fn on_mark_all_as_read(&self) {}
}

struct NoHooks;

impl NotificationHooks for NoHooks {}

/// Ordered collection of notifications with monotonic read state.
#[derive(Clone)]
pub struct NotificationCenter {
    entries: Arc<RwLock<Vec<Notification>>>,
    hooks: Arc<dyn NotificationHooks>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    /// Creates an empty center with no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            hooks: Arc::new(NoHooks),
        }
    }

    /// Creates an empty center forwarding read-state changes to `hooks`.
    #[must_use]
    pub fn with_hooks(hooks: Arc<dyn NotificationHooks>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            hooks,
        }
    }

    /// Appends a notification.
    pub async fn push(&self, notification: Notification) {
        debug!(
            id = %notification.id,
            severity = ?notification.severity,
            title = %notification.title,
            "Notification pushed"
        );
        self.entries.write().await.push(notification);
    }

    /// Appends a success notice and returns its id.
    pub async fn push_success(&self, title: &str, message: &str) -> String {
        let notification = Notification::success(title, message);
        let id = notification.id.clone();
        self.push(notification).await;
        id
    }

    /// Appends an error notice and returns its id.
    pub async fn push_error(&self, title: &str, message: &str) -> String {
        let notification = Notification::error(title, message);
        let id = notification.id.clone();
        self.push(notification).await;
        id
    }

    /// All notifications, newest last.
    pub async fn all(&self) -> Vec<Notification> {
        self.entries.read().await.clone()
    }

    /// The most recent `limit` notifications.
    pub async fn recent(&self, limit: usize) -> Vec<Notification> {
        let entries = self.entries.read().await;
        let start = entries.len().saturating_sub(limit);
        entries[start..].to_vec()
    }

    /// Number of unread notifications.
    pub async fn unread_count(&self) -> usize {
        self.entries.read().await.iter().filter(|n| !n.read).count()
    }

    /// Marks one notification as read. Read state never reverts.
    ///
    /// Returns whether an unread entry with that id existed.
    pub async fn mark_as_read(&self, id: &str) -> bool {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.iter_mut().find(|n| n.id == id && !n.read) else {
            return false;
        };
        entry.read = true;
        self.hooks.on_mark_as_read(id);
        true
    }

    /// Removes a notification regardless of read state.
    ///
    /// Returns whether an entry with that id existed.
    pub async fn dismiss(&self, id: &str) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|n| n.id != id);
        if entries.len() == before {
            return false;
        }
        self.hooks.on_dismiss(id);
        true
    }

    /// Marks every notification as read, returning how many changed.
    pub async fn mark_all_as_read(&self) -> usize {
        let mut entries = self.entries.write().await;
        let mut changed = 0;
        for entry in entries.iter_mut().filter(|n| !n.read) {
            entry.read = true;
            changed += 1;
        }
        if changed > 0 {
            self.hooks.on_mark_all_as_read();
        }
        changed
    }

    /// Count of notifications with the given severity.
    pub async fn count_by_severity(&self, severity: Severity) -> usize {
        self.entries
            .read()
            .await
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }
}
