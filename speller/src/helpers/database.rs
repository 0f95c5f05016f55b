use crate::models::database::ScoreRecord;
use speller_db::Instance;
use speller_error::Error;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Records a score. The write lock covers the whole read-modify-write.
pub async fn submit(
    instance: Arc<RwLock<Instance<ScoreRecord>>>,
    record: ScoreRecord,
) -> Result<(), Error> {
    let (name, score) = (record.name.clone(), record.score);

    instance.write().await.submit(record).map_err(|err| {
        error!(name, score, "Failed to persist score: {}", err);
        err
    })?;

    info!(name, score, "New score recorded.");

    Ok(())
}

/// Ranked high scores, best first.
pub async fn list(
    instance: Arc<RwLock<Instance<ScoreRecord>>>,
) -> Vec<ScoreRecord> {
    instance.read().await.list()
}
