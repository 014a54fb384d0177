use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{Currency, NewCurrency, Pagination},
    traits::CatalogError,
};

/// Fetches a page of currencies ordered by id. The cursor is the last-seen id; `id > cursor` gives the
/// skip-one semantics the API promises.
pub async fn fetch_currencies(
    pagination: Pagination,
    conn: &mut SqliteConnection,
) -> Result<Vec<Currency>, CatalogError> {
    let mut builder = QueryBuilder::new("SELECT * FROM currencies ");
    if let Some(cursor) = pagination.cursor {
        builder.push("WHERE id > ");
        builder.push_bind(cursor);
    }
    builder.push(" ORDER BY id LIMIT ");
    builder.push_bind(pagination.limit());
    trace!("🗃️ Executing query: {}", builder.sql());
    let currencies = builder.build_query_as::<Currency>().fetch_all(conn).await?;
    Ok(currencies)
}

pub async fn fetch_currency_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Currency>, CatalogError> {
    let currency =
        sqlx::query_as("SELECT * FROM currencies WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(currency)
}

/// Fetches the currencies with the given ids. Ids without a matching row are silently absent from the result.
pub async fn fetch_currencies_by_ids(
    ids: &[i64],
    conn: &mut SqliteConnection,
) -> Result<Vec<Currency>, CatalogError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut builder = QueryBuilder::new("SELECT * FROM currencies WHERE id IN (");
    let mut in_list = builder.separated(", ");
    for id in ids {
        in_list.push_bind(*id);
    }
    builder.push(")");
    let currencies = builder.build_query_as::<Currency>().fetch_all(conn).await?;
    Ok(currencies)
}

/// Inserts the currency, or refreshes name and symbol when the provider id is already known.
pub async fn upsert_currency(
    currency: NewCurrency,
    conn: &mut SqliteConnection,
) -> Result<Currency, CatalogError> {
    let currency = sqlx::query_as(
        r#"
            INSERT INTO currencies (name, symbol, provider_id) VALUES ($1, $2, $3)
            ON CONFLICT (provider_id) DO UPDATE
                SET name = excluded.name, symbol = excluded.symbol, updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(currency.name)
    .bind(currency.symbol)
    .bind(currency.provider_id)
    .fetch_one(conn)
    .await?;
    Ok(currency)
}
