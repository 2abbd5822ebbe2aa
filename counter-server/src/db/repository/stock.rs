//! Stock Repository

use super::{RepoError, RepoResult};
use crate::store::NewStockItem;
use shared::models::StockItem;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const STOCK_SELECT: &str = "SELECT id, name, description, detailed_description, price, image_ref, quantity, is_available, is_promo FROM stock";

/// Outcome of a conditional decrement
#[derive(Debug, Clone, PartialEq)]
pub enum Reservation {
    /// Units taken; carries the snapshot for the order line
    Reserved { name: String, unit_price: f64 },
    /// No row with this id
    Missing,
    /// Row exists but holds fewer units than requested
    Short { name: String, available: i64 },
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<StockItem>> {
    let sql = format!("{STOCK_SELECT} ORDER BY id");
    let items = sqlx::query_as::<_, StockItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<StockItem>> {
    let sql = format!("{STOCK_SELECT} WHERE is_available = 1 ORDER BY id");
    let items = sqlx::query_as::<_, StockItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<StockItem>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{STOCK_SELECT} WHERE id = ?");
    let item = sqlx::query_as::<_, StockItem>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: &NewStockItem) -> RepoResult<StockItem> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO stock (name, description, detailed_description, price, image_ref, quantity, is_available, is_promo) VALUES (?, ?, ?, ?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.detailed_description)
    .bind(data.price)
    .bind(&data.image_ref)
    .bind(data.quantity)
    .bind(data.is_promo)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create stock item".into()))
}

pub async fn update_price_quantity(
    pool: &SqlitePool,
    id: i64,
    price: f64,
    quantity: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE stock SET price = ?, quantity = ? WHERE id = ?")
        .bind(price)
        .bind(quantity)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Stock item {id} not found")));
    }
    Ok(())
}

/// Add units to one item
///
/// Returns false when the id does not exist or the sum would overflow
/// (SQLite's `+` turns an overflowing INTEGER into REAL instead of failing).
pub async fn add_quantity<'e, E>(executor: E, id: i64, quantity: i64) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "UPDATE stock SET quantity = quantity + ?1 WHERE id = ?2 AND quantity <= 9223372036854775807 - ?1",
    )
    .bind(quantity)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Add units to the oldest item carrying `name`
///
/// Used for lines whose stock reference was cleared by a delete. Returns
/// false when no item carries the name or the sum would overflow.
pub async fn add_quantity_by_name<'e, E>(executor: E, name: &str, quantity: i64) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "UPDATE stock SET quantity = quantity + ?1 \
         WHERE id = (SELECT id FROM stock WHERE name = ?2 ORDER BY id LIMIT 1) \
         AND quantity <= 9223372036854775807 - ?1",
    )
    .bind(quantity)
    .bind(name)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Flip `is_available`, returns the new value (None when the id does not exist)
pub async fn toggle_availability(pool: &SqlitePool, id: i64) -> RepoResult<Option<bool>> {
    let value: Option<bool> = sqlx::query_scalar(
        "UPDATE stock SET is_available = 1 - is_available WHERE id = ? RETURNING is_available",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(value)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM stock WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Stock item {id} not found")));
    }
    Ok(())
}

/// Take `quantity` units of item `id` if, and only if, enough are on hand
///
/// Single conditional UPDATE: concurrent callers can never drive the quantity
/// below zero. On a miss the row is read back to tell a missing item from a
/// short one.
pub async fn reserve(conn: &mut SqliteConnection, id: i64, quantity: i64) -> RepoResult<Reservation> {
    let reserved: Option<(String, f64)> = sqlx::query_as(
        "UPDATE stock SET quantity = quantity - ?1 WHERE id = ?2 AND quantity >= ?1 RETURNING name, price",
    )
    .bind(quantity)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some((name, unit_price)) = reserved {
        return Ok(Reservation::Reserved { name, unit_price });
    }

    let current: Option<(String, i64)> =
        sqlx::query_as("SELECT name, quantity FROM stock WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(match current {
        Some((name, available)) => Reservation::Short { name, available },
        None => Reservation::Missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    fn pie(quantity: i64) -> NewStockItem {
        NewStockItem {
            name: "Pie".into(),
            description: None,
            detailed_description: Some("Apple pie".into()),
            price: 5.0,
            image_ref: None,
            quantity,
            is_promo: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let item = create(&pool, &pie(10)).await.unwrap();
        assert_eq!(item.name, "Pie");
        assert_eq!(item.quantity, 10);
        assert!(item.is_available);
        assert!(!item.is_promo);

        let found = find_by_id(&pool, item.id).await.unwrap().unwrap();
        assert_eq!(found, item);
        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reserve_outcomes() {
        let pool = test_pool().await;
        let item = create(&pool, &pie(3)).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let r = reserve(&mut conn, item.id, 2).await.unwrap();
        assert_eq!(
            r,
            Reservation::Reserved {
                name: "Pie".into(),
                unit_price: 5.0
            }
        );

        let r = reserve(&mut conn, item.id, 5).await.unwrap();
        assert_eq!(
            r,
            Reservation::Short {
                name: "Pie".into(),
                available: 1
            }
        );

        let r = reserve(&mut conn, 999, 1).await.unwrap();
        assert_eq!(r, Reservation::Missing);
        drop(conn);

        // the short attempt left the quantity untouched
        let after = find_by_id(&pool, item.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 1);
    }

    #[tokio::test]
    async fn test_toggle_availability_twice_restores() {
        let pool = test_pool().await;
        let item = create(&pool, &pie(1)).await.unwrap();

        assert_eq!(toggle_availability(&pool, item.id).await.unwrap(), Some(false));
        assert_eq!(toggle_availability(&pool, item.id).await.unwrap(), Some(true));
        assert_eq!(toggle_availability(&pool, 999).await.unwrap(), None);
        assert_eq!(find_available(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_quantity_by_name_hits_oldest_only() {
        let pool = test_pool().await;
        let first = create(&pool, &pie(1)).await.unwrap();
        let second = create(&pool, &pie(1)).await.unwrap();

        assert!(add_quantity_by_name(&pool, "Pie", 4).await.unwrap());
        assert!(!add_quantity_by_name(&pool, "Cake", 4).await.unwrap());

        let first = find_by_id(&pool, first.id).await.unwrap().unwrap();
        let second = find_by_id(&pool, second.id).await.unwrap().unwrap();
        assert_eq!(first.quantity, 5);
        assert_eq!(second.quantity, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let pool = test_pool().await;
        assert!(matches!(
            update_price_quantity(&pool, 42, 1.0, 1).await,
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(delete(&pool, 42).await, Err(RepoError::NotFound(_))));
    }
}
