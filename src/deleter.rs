//! Batched move-to-trash driver with running progress accounting

use tracing::info;

use crate::client::GmailClient;
use crate::error::{Result, ServiceError};

/// Maximum identifiers per batched deletion request
pub const BATCH_SIZE: usize = 100;

/// Final outcome of a deletion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionResult {
    pub deleted_count: usize,
    pub total_count: usize,
}

/// Running (deleted, total) tuple, recomputed after each batch
#[derive(Debug, Clone, Copy)]
pub struct DeletionProgress {
    pub deleted_count: usize,
    pub total_count: usize,
}

impl DeletionProgress {
    /// Percent complete, rounded to one decimal place
    pub fn percent(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        let raw = self.deleted_count as f64 / self.total_count as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }
}

/// Move all given messages to trash in batches of at most `batch_size`
///
/// Chunks are processed strictly in sequence: each provider request is
/// awaited before the next starts, with no retry or backoff. An error aborts
/// the remaining chunks; messages trashed by earlier chunks stay trashed.
pub async fn delete_all(
    client: &dyn GmailClient,
    message_ids: &[String],
    batch_size: usize,
) -> Result<DeletionResult> {
    if message_ids.is_empty() {
        return Err(ServiceError::InvalidInput(
            "No message IDs provided".to_string(),
        ));
    }

    if batch_size == 0 {
        return Err(ServiceError::InvalidInput(
            "Batch size must be at least 1".to_string(),
        ));
    }

    let total_count = message_ids.len();
    let mut deleted_count = 0;

    for (batch_index, chunk) in message_ids.chunks(batch_size).enumerate() {
        client.batch_trash(chunk).await?;

        deleted_count += chunk.len();
        let progress = DeletionProgress {
            deleted_count,
            total_count,
        };
        info!(
            batch = batch_index + 1,
            deleted = deleted_count,
            total = total_count,
            percent = progress.percent(),
            "Trashed batch"
        );
    }

    Ok(DeletionResult {
        deleted_count,
        total_count,
    })
}
