use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order},
    traits::CatalogError,
};

/// Inserts a new order using the given connection. This is not atomic on its own: the settlement path embeds the
/// call inside the same transaction as the stock decrement and passes `&mut *tx` as the connection argument.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, CatalogError> {
    let order = sqlx::query_as(
        r#"
            INSERT INTO orders (user_id, item_id, currency_id, quantity, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(order.user_id)
    .bind(order.item_id)
    .bind(order.currency_id)
    .bind(order.quantity)
    .bind(order.total_price)
    .fetch_one(conn)
    .await?;
    Ok(order)
}

pub async fn fetch_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, CatalogError> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(order)
}

pub async fn count_orders_for_item(item_id: i64, conn: &mut SqliteConnection) -> Result<i64, CatalogError> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM orders WHERE item_id = $1").bind(item_id).fetch_one(conn).await?;
    Ok(count)
}
