use crate::infrastructure::db::dto::AiGenerationRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::StoreError;
use crate::infrastructure::db::stores::ai_generation_store::AiGenerationStore;
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct AiGenerationStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl AiGenerationStorePostgres {
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: AiGenerationRow,
    ) -> Result<AiGenerationRow, StoreError> {
        let stored = sqlx::query_as::<_, AiGenerationRow>(
            "INSERT INTO ai_generations (id, kind, prompt, result, model, tokens_used, created_at)
            VALUES ($1,$2,$3,$4,$5,$6,$7)
            RETURNING id, kind, prompt, result, model, tokens_used, created_at",
        )
        .bind(row.id)
        .bind(&row.kind)
        .bind(&row.prompt)
        .bind(&row.result)
        .bind(&row.model)
        .bind(row.tokens_used)
        .bind(row.created_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }
}

#[async_trait]
impl AiGenerationStore for AiGenerationStorePostgres {
    async fn insert(&self, row: &AiGenerationRow) -> Result<AiGenerationRow, StoreError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::insert_impl_conn(conn, row)))
            .await
    }
}
