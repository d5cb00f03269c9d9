//! Entry store. One row per calendar date; every function checks out its own
//! pooled connection for the duration of the query.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::entry::{Entry, EntryFields};

pub async fn create_entry(db: &SqlitePool, date: &str, fields: &EntryFields) -> AppResult<Entry> {
    let now = Utc::now();

    let result = sqlx::query_as::<_, Entry>(
        r#"
        INSERT INTO entries (date, goals, achievements, challenges, lessons, tasks, notes, mood, reflection, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING *
        "#,
    )
    .bind(date)
    .bind(&fields.goals)
    .bind(&fields.achievements)
    .bind(&fields.challenges)
    .bind(&fields.lessons)
    .bind(&fields.tasks)
    .bind(&fields.notes)
    .bind(fields.mood)
    .bind(&fields.reflection)
    .bind(now)
    .fetch_one(db)
    .await;

    match result {
        Ok(entry) => {
            tracing::info!(date = %entry.date, "Entry created");
            Ok(entry)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::DuplicateEntry(date.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn find_entry(db: &SqlitePool, date: &str) -> AppResult<Entry> {
    sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE date = $1")
        .bind(date)
        .fetch_optional(db)
        .await?
        .ok_or(AppError::NotFound("Entry not found.".into()))
}

/// All entries, newest date first.
pub async fn list_entries(db: &SqlitePool) -> AppResult<Vec<Entry>> {
    let entries = sqlx::query_as::<_, Entry>("SELECT * FROM entries ORDER BY date DESC")
        .fetch_all(db)
        .await?;

    Ok(entries)
}

/// Replaces every writable field. Only the entry dated `today` may change.
pub async fn update_entry(
    db: &SqlitePool,
    date: &str,
    today: &str,
    fields: &EntryFields,
) -> AppResult<Entry> {
    if date != today {
        return Err(AppError::Forbidden(
            "You can only update today's entries.".into(),
        ));
    }

    let entry = sqlx::query_as::<_, Entry>(
        r#"
        UPDATE entries SET
            goals = $2,
            achievements = $3,
            challenges = $4,
            lessons = $5,
            tasks = $6,
            notes = $7,
            mood = $8,
            reflection = $9,
            updated_at = $10
        WHERE date = $1
        RETURNING *
        "#,
    )
    .bind(date)
    .bind(&fields.goals)
    .bind(&fields.achievements)
    .bind(&fields.challenges)
    .bind(&fields.lessons)
    .bind(&fields.tasks)
    .bind(&fields.notes)
    .bind(fields.mood)
    .bind(&fields.reflection)
    .bind(Utc::now())
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound("Entry not found.".into()))?;

    tracing::info!(date = %entry.date, "Entry updated");
    Ok(entry)
}

pub async fn delete_entry(db: &SqlitePool, date: &str) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM entries WHERE date = $1")
        .bind(date)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Entry not found.".into()));
    }

    tracing::info!(date, "Entry deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;

    fn fields(goals: &str) -> EntryFields {
        EntryFields {
            goals: goals.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_find_entry() {
        let db = test_pool().await;
        let mut input = fields("write tests");
        input.mood = Some(4);

        let created = create_entry(&db, "2024-05-01", &input).await.unwrap();
        assert_eq!(created.date, "2024-05-01");
        assert_eq!(created.mood, Some(4));

        let found = find_entry(&db, "2024-05-01").await.unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.goals, "write tests");
        assert_eq!(found.reflection, "");
    }

    #[tokio::test]
    async fn test_duplicate_date_rejected_and_original_kept() {
        let db = test_pool().await;
        create_entry(&db, "2024-05-01", &fields("original")).await.unwrap();

        let err = create_entry(&db, "2024-05-01", &fields("imposter"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEntry(ref d) if d == "2024-05-01"));

        let kept = find_entry(&db, "2024-05-01").await.unwrap();
        assert_eq!(kept.goals, "original");
        assert_eq!(list_entries(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_entry() {
        let db = test_pool().await;
        let err = find_entry(&db, "2024-05-01").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_entries_newest_first() {
        let db = test_pool().await;
        for date in ["2024-02-10", "2023-12-31", "2024-11-02", "2024-02-09"] {
            create_entry(&db, date, &fields("g")).await.unwrap();
        }

        let dates: Vec<String> = list_entries(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec!["2024-11-02", "2024-02-10", "2024-02-09", "2023-12-31"]);
    }

    #[tokio::test]
    async fn test_update_entry_today() {
        let db = test_pool().await;
        create_entry(&db, "2024-05-01", &fields("before")).await.unwrap();

        let mut input = fields("after");
        input.notes = "went well".into();
        let updated = update_entry(&db, "2024-05-01", "2024-05-01", &input)
            .await
            .unwrap();
        assert_eq!(updated.goals, "after");
        assert_eq!(updated.notes, "went well");
        assert_eq!(updated.mood, None);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_past_entry_forbidden() {
        let db = test_pool().await;
        create_entry(&db, "2024-04-30", &fields("before")).await.unwrap();

        for input in [fields("after"), fields(""), EntryFields::default()] {
            let err = update_entry(&db, "2024-04-30", "2024-05-01", &input)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
        assert_eq!(find_entry(&db, "2024-04-30").await.unwrap().goals, "before");
    }

    #[tokio::test]
    async fn test_update_missing_entry() {
        let db = test_pool().await;
        let err = update_entry(&db, "2024-05-01", "2024-05-01", &fields("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let db = test_pool().await;
        create_entry(&db, "2024-05-01", &fields("a")).await.unwrap();
        create_entry(&db, "2024-05-02", &fields("b")).await.unwrap();

        delete_entry(&db, "2024-05-01").await.unwrap();

        assert!(matches!(
            find_entry(&db, "2024-05-01").await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert_eq!(list_entries(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_entry_leaves_store_unchanged() {
        let db = test_pool().await;
        create_entry(&db, "2024-05-02", &fields("b")).await.unwrap();

        let err = delete_entry(&db, "2024-05-01").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let remaining = list_entries(&db).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].goals, "b");
    }
}
