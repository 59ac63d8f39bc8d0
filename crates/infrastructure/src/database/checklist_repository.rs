use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::{
    ChecklistItem, ChecklistRecord, ChecklistRepository, DomainError, ItemStatus, SerialNumber,
};

use crate::wire;

/// Raw `checklists` row as stored, before domain mapping.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ChecklistRow {
    pub numero_serie: String,
    pub item: String,
    pub status: String,
    pub observacoes: Option<String>,
    pub inspetor: String,
    pub data_hora: String,
    pub produto_reprovado: String,
    pub reinspecao: String,
    pub batch_id: Option<String>,
}

impl TryFrom<ChecklistRow> for ChecklistRecord {
    type Error = DomainError;

    fn try_from(row: ChecklistRow) -> Result<Self, Self::Error> {
        let item = ChecklistItem::from_key(&row.item)
            .ok_or_else(|| DomainError::Store(format!("unknown item key {:?}", row.item)))?;
        // Unknown status strings read back as N/A rather than poisoning the
        // whole page. Legacy rows predate the fixed status vocabulary.
        let status = ItemStatus::parse(&row.status).unwrap_or(ItemStatus::NaoAplicavel);
        let batch_id = row
            .batch_id
            .map(|id| {
                Uuid::parse_str(&id)
                    .map_err(|e| DomainError::Store(format!("invalid batch id {id:?}: {e}")))
            })
            .transpose()?;

        Ok(ChecklistRecord {
            serial: SerialNumber::new(row.numero_serie)?,
            item,
            status,
            observation: row.observacoes,
            inspector: row.inspetor,
            recorded_at: wire::parse_timestamp(&row.data_hora)?,
            product_rejected: wire::parse_flag(&row.produto_reprovado),
            reinspection: wire::parse_flag(&row.reinspecao),
            batch_id,
        })
    }
}

/// PostgreSQL implementation of ChecklistRepository
pub struct PostgresChecklistRepository {
    pool: PgPool,
}

impl PostgresChecklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChecklistRepository for PostgresChecklistRepository {
    async fn fetch_range(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ChecklistRecord>, DomainError> {
        let rows = sqlx::query_as::<_, ChecklistRow>(
            r#"
            SELECT numero_serie, item, status, observacoes, inspetor, data_hora,
                   produto_reprovado, reinspecao, batch_id
            FROM checklists
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Store(format!("Database error: {}", e)))?;

        rows.into_iter().map(ChecklistRecord::try_from).collect()
    }

    async fn insert(&self, record: &ChecklistRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO checklists (
                numero_serie, item, status, observacoes, inspetor, data_hora,
                produto_reprovado, reinspecao, batch_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.serial.as_str())
        .bind(record.item.key())
        .bind(record.status.as_str())
        .bind(record.observation.as_deref())
        .bind(&record.inspector)
        .bind(wire::render_timestamp(record.recorded_at))
        .bind(wire::render_flag(record.product_rejected))
        .bind(wire::render_flag(record.reinspection))
        .bind(record.batch_id.map(|id| id.to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Store(format!("Database error: {}", e)))?;

        Ok(())
    }
}
