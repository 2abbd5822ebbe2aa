//! Score Repository

use super::{RepoError, RepoResult};
use shared::models::Score;
use sqlx::SqlitePool;

pub async fn create(
    pool: &SqlitePool,
    customer_name: &str,
    score: &str,
    created_at: i64,
) -> RepoResult<Score> {
    let row = sqlx::query_as::<_, Score>(
        "INSERT INTO scores (customer_name, score, created_at) VALUES (?, ?, ?) RETURNING id, customer_name, score, created_at",
    )
    .bind(customer_name)
    .bind(score)
    .bind(created_at)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| RepoError::Database("Failed to create score".into()))
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Score>> {
    let scores = sqlx::query_as::<_, Score>(
        "SELECT id, customer_name, score, created_at FROM scores ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(scores)
}
