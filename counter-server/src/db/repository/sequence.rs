//! Order number sequence (single-row counter)

use super::{RepoError, RepoResult};
use sqlx::{SqliteConnection, SqliteExecutor};

/// Increment and return the next order sequence value
///
/// Must be the first statement of the placing transaction so the write lock is
/// taken before anything else is read.
pub async fn next_value(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let value: Option<i64> = sqlx::query_scalar(
        "UPDATE order_sequence SET last_value = last_value + 1 WHERE id = 1 RETURNING last_value",
    )
    .fetch_optional(&mut *conn)
    .await?;
    value.ok_or_else(|| RepoError::Database("order_sequence row is missing".into()))
}

/// Current value (last number handed out)
pub async fn current<'e, E>(executor: E) -> RepoResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let value: Option<i64> = sqlx::query_scalar("SELECT last_value FROM order_sequence WHERE id = 1")
        .fetch_optional(executor)
        .await?;
    Ok(value.unwrap_or(0))
}

pub async fn reset(conn: &mut SqliteConnection) -> RepoResult<()> {
    sqlx::query("UPDATE order_sequence SET last_value = 0 WHERE id = 1")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_sequence_increments_and_resets() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let mut conn = pool.acquire().await.unwrap();

        assert_eq!(current(&mut *conn).await.unwrap(), 0);
        assert_eq!(next_value(&mut conn).await.unwrap(), 1);
        assert_eq!(next_value(&mut conn).await.unwrap(), 2);
        assert_eq!(current(&mut *conn).await.unwrap(), 2);

        reset(&mut conn).await.unwrap();
        assert_eq!(next_value(&mut conn).await.unwrap(), 1);
    }
}
