mod kanboard;
mod task;

pub use kanboard::KanboardClient;
pub use task::{Task, UNKNOWN_COLUMN};

use crate::error::TrackerError;
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
pub trait TaskSource: Send + Sync {
    /// All tasks of one project, in tracker order
    async fn fetch_all(&self, project_id: u64) -> Result<Vec<Task>, TrackerError>;

    /// Column title of a single task, for tasks fetched without one
    async fn resolve_column(&self, task_id: &str) -> Result<Option<String>, TrackerError>;
}

/// Fetch every task of a project and make sure each one carries a column label.
///
/// Tasks missing a label are looked up one by one; anything still blank after
/// the lookup is labeled [`UNKNOWN_COLUMN`]. Fetch order is preserved.
pub async fn fetch_tasks(
    source: &dyn TaskSource,
    project_id: u64,
) -> Result<Vec<Task>, TrackerError> {
    let mut tasks = source.fetch_all(project_id).await?;
    let mut backfilled = 0;

    for task in tasks.iter_mut().filter(|t| !t.has_column()) {
        let resolved = source
            .resolve_column(&task.id)
            .await?
            .filter(|c| !c.trim().is_empty());
        debug!("Backfilled column for task {}: {:?}", task.id, resolved);
        task.column_name = Some(resolved.unwrap_or_else(|| UNKNOWN_COLUMN.to_string()));
        backfilled += 1;
    }

    info!(
        "Fetched {} tasks for project {} ({} column lookups)",
        tasks.len(),
        project_id,
        backfilled
    );
    Ok(tasks)
}
