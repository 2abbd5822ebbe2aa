//! Order Repository
//!
//! Orders live in `orders`; their line snapshots in `order_lines`
//! (`ON DELETE CASCADE`). Reads always return orders with their lines.

use std::collections::HashMap;

use super::{RepoError, RepoResult};
use crate::store::{NewOrder, OrderQuery};
use shared::models::{Order, OrderLine, OrderStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};

const ORDER_COLUMNS: &str =
    "id, customer_name, phone, order_number, total, payment_method, status, created_at, called_at";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    phone: Option<String>,
    order_number: String,
    total: f64,
    payment_method: String,
    status: OrderStatus,
    created_at: i64,
    called_at: Option<i64>,
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLine>) -> Order {
        Order {
            id: self.id,
            customer_name: self.customer_name,
            phone: self.phone,
            order_number: self.order_number,
            lines,
            total: self.total,
            payment_method: self.payment_method,
            status: self.status,
            created_at: self.created_at,
            called_at: self.called_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    order_id: i64,
    stock_id: Option<i64>,
    name: String,
    unit_price: f64,
    quantity: i64,
}

/// Insert the order header, returns the new id
pub async fn insert(
    conn: &mut SqliteConnection,
    order: &NewOrder,
    order_number: &str,
) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (customer_name, phone, order_number, total, payment_method, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&order.customer_name)
    .bind(&order.phone)
    .bind(order_number)
    .bind(order.total)
    .bind(&order.payment_method)
    .bind(order.status)
    .bind(order.created_at)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn insert_line(
    conn: &mut SqliteConnection,
    order_id: i64,
    line_no: i64,
    line: &OrderLine,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_lines (order_id, line_no, stock_id, name, unit_price, quantity) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(line_no)
    .bind(line.stock_id)
    .bind(&line.name)
    .bind(line.unit_price)
    .bind(line.quantity)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn lines_of<'e, E>(executor: E, order_id: i64) -> RepoResult<Vec<OrderLine>>
where
    E: SqliteExecutor<'e>,
{
    let lines = sqlx::query_as::<_, OrderLine>(
        "SELECT stock_id, name, unit_price, quantity FROM order_lines WHERE order_id = ? ORDER BY line_no",
    )
    .bind(order_id)
    .fetch_all(executor)
    .await?;
    Ok(lines)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
    let row = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let lines = lines_of(&mut *conn, id).await?;
    Ok(Some(row.into_order(lines)))
}

pub async fn find_status<'e, E>(executor: E, id: i64) -> RepoResult<Option<OrderStatus>>
where
    E: SqliteExecutor<'e>,
{
    let status: Option<OrderStatus> = sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(status)
}

/// List orders matching `query`, lines included
pub async fn list(pool: &SqlitePool, query: &OrderQuery) -> RepoResult<Vec<Order>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {ORDER_COLUMNS} FROM orders"));
    if !query.statuses.is_empty() {
        qb.push(" WHERE status IN (");
        let mut separated = qb.separated(", ");
        for status in &query.statuses {
            separated.push_bind(*status);
        }
        separated.push_unseparated(")");
    }
    qb.push(" ORDER BY ");
    qb.push(query.sort.sql());
    if let Some(limit) = query.limit {
        qb.push(" LIMIT ");
        qb.push_bind(limit);
    }

    let rows: Vec<OrderRow> = qb.build_query_as().fetch_all(pool).await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = lines_for(pool, rows.iter().map(|r| r.id)).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let order_lines = lines.remove(&row.id).unwrap_or_default();
            row.into_order(order_lines)
        })
        .collect())
}

async fn lines_for(
    pool: &SqlitePool,
    order_ids: impl Iterator<Item = i64>,
) -> RepoResult<HashMap<i64, Vec<OrderLine>>> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT order_id, stock_id, name, unit_price, quantity FROM order_lines WHERE order_id IN (",
    );
    let mut separated = qb.separated(", ");
    for id in order_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(") ORDER BY order_id, line_no");

    let rows: Vec<LineRow> = qb.build_query_as().fetch_all(pool).await?;
    let mut grouped: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    for row in rows {
        grouped.entry(row.order_id).or_default().push(OrderLine {
            stock_id: row.stock_id,
            name: row.name,
            unit_price: row.unit_price,
            quantity: row.quantity,
        });
    }
    Ok(grouped)
}

/// Compare-and-set on status, returns false when the order is missing or in
/// another state
pub async fn set_status_if<'e, E>(
    executor: E,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query("UPDATE orders SET status = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Complete the oldest ready order in one statement, returns its id
pub async fn claim_next_ready(conn: &mut SqliteConnection, called_at: i64) -> RepoResult<Option<i64>> {
    let id: Option<i64> = sqlx::query_scalar(
        "UPDATE orders SET status = ?1, called_at = ?2 \
         WHERE id = (SELECT id FROM orders WHERE status = ?3 ORDER BY created_at ASC, id ASC LIMIT 1) \
         RETURNING id",
    )
    .bind(OrderStatus::Completed)
    .bind(called_at)
    .bind(OrderStatus::Ready)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn count_by_status(pool: &SqlitePool, status: OrderStatus) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM orders WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

/// Remove every order and line and rewind the AUTOINCREMENT counters
pub async fn delete_all(conn: &mut SqliteConnection) -> RepoResult<u64> {
    sqlx::query("DELETE FROM order_lines")
        .execute(&mut *conn)
        .await?;
    let removed = sqlx::query("DELETE FROM orders")
        .execute(&mut *conn)
        .await?
        .rows_affected();
    sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('orders', 'order_lines')")
        .execute(&mut *conn)
        .await?;
    Ok(removed)
}
