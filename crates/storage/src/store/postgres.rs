use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{FromRow, PgPool, postgres::PgPoolOptions, types::Json};
use uuid::Uuid;

use super::{Body, Document, DocumentStore, into_body};
use crate::error::{Result, StorageError};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// PostgreSQL-backed document store.
///
/// Every collection shares the `documents` table; bodies are JSONB objects.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Value>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = StorageError;

    fn try_from(row: DocumentRow) -> Result<Self> {
        Ok(Document::new(row.id, into_body(row.body.0)?))
    }
}

impl PgStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(url)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1
            ORDER BY seq
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Document::try_from).collect()
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Document> {
        sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?
        .try_into()
    }

    async fn insert(&self, collection: &str, body: Body) -> Result<Document> {
        sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            RETURNING id, body
            "#,
        )
        .bind(collection)
        .bind(Uuid::new_v4())
        .bind(Json(body))
        .fetch_one(&self.pool)
        .await?
        .try_into()
    }

    async fn insert_many(&self, collection: &str, bodies: Vec<Body>) -> Result<Vec<Document>> {
        let mut tx = self.pool.begin().await?;
        let mut documents = Vec::with_capacity(bodies.len());

        for body in bodies {
            let row = sqlx::query_as::<_, DocumentRow>(
                r#"
                INSERT INTO documents (collection, id, body)
                VALUES ($1, $2, $3)
                RETURNING id, body
                "#,
            )
            .bind(collection)
            .bind(Uuid::new_v4())
            .bind(Json(body))
            .fetch_one(&mut *tx)
            .await?;

            documents.push(Document::try_from(row)?);
        }

        tx.commit().await?;

        Ok(documents)
    }

    async fn merge(&self, collection: &str, id: Uuid, patch: Body) -> Result<Document> {
        sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET body = body || $3,
                updated_at = now()
            WHERE collection = $1 AND id = $2
            RETURNING id, body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(patch))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?
        .try_into()
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn delete_all(&self, collection: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
