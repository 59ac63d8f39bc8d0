use async_trait::async_trait;
use sqlx::PgPool;

use domain::{DomainError, ProductionEntry, ProductionLogRepository, SerialNumber};

use crate::wire;

/// Raw `apontamentos` row as stored, before domain mapping.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductionRow {
    pub numero_serie: String,
    pub data_hora: String,
}

impl TryFrom<ProductionRow> for ProductionEntry {
    type Error = DomainError;

    fn try_from(row: ProductionRow) -> Result<Self, Self::Error> {
        Ok(ProductionEntry::new(
            SerialNumber::new(row.numero_serie)?,
            wire::parse_timestamp(&row.data_hora)?,
        ))
    }
}

/// PostgreSQL implementation of ProductionLogRepository
pub struct PostgresProductionLogRepository {
    pool: PgPool,
}

impl PostgresProductionLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductionLogRepository for PostgresProductionLogRepository {
    async fn fetch_latest(&self, limit: i64) -> Result<Vec<ProductionEntry>, DomainError> {
        // The inner query trims to the newest `limit` rows; the outer one
        // restores log order for the selection flow.
        let rows = sqlx::query_as::<_, ProductionRow>(
            r#"
            SELECT numero_serie, data_hora
            FROM (
                SELECT id, numero_serie, data_hora
                FROM apontamentos
                ORDER BY id DESC
                LIMIT $1
            ) latest
            ORDER BY id
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Store(format!("Database error: {}", e)))?;

        rows.into_iter().map(ProductionEntry::try_from).collect()
    }
}
