use sqlx::SqlitePool;

use crate::models::entry::today_key;
use crate::scheduler::{self, Schedule};

pub fn spawn_cleanup_worker(db: SqlitePool, schedule: Schedule) {
    scheduler::spawn("incomplete-entry-cleanup", schedule, move || {
        let db = db.clone();
        async move {
            let today = today_key();
            match purge_incomplete_entries(&db, &today).await {
                Ok(count) => {
                    tracing::info!(purged = count, %today, "Cleanup: deleted incomplete entries");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Cleanup worker error, retrying next run");
                }
            }
        }
    });
}

/// Deletes every entry dated before `today` whose goals are empty, as one
/// transaction. Returns the number of entries removed.
pub async fn purge_incomplete_entries(db: &SqlitePool, today: &str) -> Result<u64, sqlx::Error> {
    let mut tx = db.begin().await?;

    let stale = sqlx::query_scalar::<_, String>(
        "SELECT date FROM entries WHERE date < $1 AND goals = '' ORDER BY date",
    )
    .bind(today)
    .fetch_all(&mut *tx)
    .await?;

    // Any early return drops `tx`, which rolls the batch back.
    for date in &stale {
        sqlx::query("DELETE FROM entries WHERE date = $1")
            .bind(date)
            .execute(&mut *tx)
            .await?;
        tracing::debug!(%date, "Cleanup: removing incomplete entry");
    }

    tx.commit().await?;
    Ok(stale.len() as u64)
}
