// ─── Download Status ───
// Storage callbacks from the engine's download manager, surfaced to the user
// when a download fails for good.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Status of a storage-tree node, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Unknown,
    /// Downloading a new map or updating an old one.
    Progress,
    /// Applying a downloaded diff.
    Applying,
    Enqueued,
    Failed,
    Updatable,
    Done,
    Downloadable,
    /// A group whose leaves are partly downloaded.
    Partly,
}

impl NodeStatus {
    pub fn code(self) -> i32 {
        match self {
            NodeStatus::Unknown => 0,
            NodeStatus::Progress => 1,
            NodeStatus::Applying => 2,
            NodeStatus::Enqueued => 3,
            NodeStatus::Failed => 4,
            NodeStatus::Updatable => 5,
            NodeStatus::Done => 6,
            NodeStatus::Downloadable => 7,
            NodeStatus::Partly => 8,
        }
    }
}

impl From<i32> for NodeStatus {
    fn from(code: i32) -> Self {
        match code {
            1 => NodeStatus::Progress,
            2 => NodeStatus::Applying,
            3 => NodeStatus::Enqueued,
            4 => NodeStatus::Failed,
            5 => NodeStatus::Updatable,
            6 => NodeStatus::Done,
            7 => NodeStatus::Downloadable,
            8 => NodeStatus::Partly,
            _ => NodeStatus::Unknown,
        }
    }
}

/// One record of a status batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStatusEvent {
    pub item_id: String,
    pub is_leaf_node: bool,
    pub old_status: NodeStatus,
    pub new_status: NodeStatus,
}

pub trait StorageCallback: Send + Sync {
    fn on_status_changed(&self, batch: &[StorageStatusEvent]);

    fn on_progress(&self, item_id: &str, local_size: u64, remote_size: u64);
}

/// The engine's download manager, as far as the shell needs it.
pub trait DownloadManager: Send + Sync {
    fn subscribe(&self, callback: Arc<dyn StorageCallback>);

    /// Whether the automatic retry of failed downloads has given up.
    fn is_autoretry_failed(&self) -> bool;

    fn display_name(&self, item_id: &str) -> String;
}

pub trait Notifier: Send + Sync {
    fn notify_download_failed(&self, item_id: &str, display_name: &str);
}

/// Raises a notification for the first failed leaf of each batch.
///
/// Processing stops at that first failed leaf whether or not a notification
/// was raised; later failures in the same batch are not reported.
pub struct DownloadStatusRelay {
    downloads: Arc<dyn DownloadManager>,
    notifier: Arc<dyn Notifier>,
}

impl DownloadStatusRelay {
    pub fn new(downloads: Arc<dyn DownloadManager>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            downloads,
            notifier,
        }
    }
}

impl StorageCallback for DownloadStatusRelay {
    fn on_status_changed(&self, batch: &[StorageStatusEvent]) {
        let Some(failed) = batch
            .iter()
            .find(|item| item.is_leaf_node && item.new_status == NodeStatus::Failed)
        else {
            return;
        };

        if !self.downloads.is_autoretry_failed() {
            debug!("Download of {} failed, autoretry still pending", failed.item_id);
            return;
        }

        let name = self.downloads.display_name(&failed.item_id);
        warn!("Download of {} ({}) failed", failed.item_id, name);
        self.notifier.notify_download_failed(&failed.item_id, &name);
    }

    fn on_progress(&self, _item_id: &str, _local_size: u64, _remote_size: u64) {}
}
