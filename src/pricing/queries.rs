//! Database queries for the pricing engine.

use sqlx::PgPool;

use crate::error::AppError;

use super::models::PropertyRate;

/// Find the rate of a single property
pub async fn find_property_rate(
    pool: &PgPool,
    property_id: i64,
) -> Result<Option<PropertyRate>, AppError> {
    let rate = sqlx::query_as::<_, PropertyRate>(
        r#"
        SELECT
            id AS property_id,
            name,
            status,
            max_guests,
            price_per_person_day
        FROM properties
        WHERE id = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(property_id)
    .fetch_optional(pool)
    .await?;

    Ok(rate)
}

/// Rates of every listed property, for cache warm-up
pub async fn list_property_rates(pool: &PgPool) -> Result<Vec<PropertyRate>, AppError> {
    let rates = sqlx::query_as::<_, PropertyRate>(
        r#"
        SELECT
            id AS property_id,
            name,
            status,
            max_guests,
            price_per_person_day
        FROM properties
        WHERE deleted_at IS NULL
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rates)
}
