use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{Item, NewItem, Pagination},
    traits::CatalogError,
};

pub async fn fetch_items(pagination: Pagination, conn: &mut SqliteConnection) -> Result<Vec<Item>, CatalogError> {
    let mut builder = QueryBuilder::new("SELECT * FROM items ");
    if let Some(cursor) = pagination.cursor {
        builder.push("WHERE id > ");
        builder.push_bind(cursor);
    }
    builder.push(" ORDER BY id LIMIT ");
    builder.push_bind(pagination.limit());
    trace!("🗃️ Executing query: {}", builder.sql());
    let items = builder.build_query_as::<Item>().fetch_all(conn).await?;
    Ok(items)
}

pub async fn fetch_item_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Item>, CatalogError> {
    let item = sqlx::query_as("SELECT * FROM items WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(item)
}

pub async fn insert_item(item: NewItem, conn: &mut SqliteConnection) -> Result<Item, CatalogError> {
    let item = sqlx::query_as(
        r#"
            INSERT INTO items (name, description, price, quantity, currency_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(item.name)
    .bind(item.description)
    .bind(item.price)
    .bind(item.quantity)
    .bind(item.currency_id)
    .fetch_one(conn)
    .await?;
    Ok(item)
}

/// Conditionally decrements the item's stock. The `quantity >= n` guard makes the check-then-act atomic: zero
/// rows affected means the item either does not exist or holds less stock than requested, and nothing changed.
pub async fn decrement_stock(item_id: i64, by: i64, conn: &mut SqliteConnection) -> Result<bool, CatalogError> {
    let result = sqlx::query(
        "UPDATE items SET quantity = quantity - $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 AND quantity >= $1",
    )
    .bind(by)
    .bind(item_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}
