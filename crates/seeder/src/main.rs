use anyhow::Context;
use clap::Parser;
use storage::{Database, seed::seed_athletes};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Replaces the athlete collection with the fixed sample set", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("seed={},storage={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(&cli).await {
        tracing::error!("Error seeding data: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let db = Database::connect(&cli.database_url, 1)
        .await
        .context("Failed to connect to database")?;

    seed_and_close(&db).await
}

/// Seeds, then closes the store whether or not seeding succeeded.
async fn seed_and_close(db: &Database) -> anyhow::Result<()> {
    let result = seed(db).await;
    db.close().await;

    result
}

async fn seed(db: &Database) -> anyhow::Result<()> {
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    let athletes = seed_athletes(db.store())
        .await
        .context("Failed to replace athletes")?;

    for athlete in &athletes {
        tracing::debug!(athlete_id = %athlete.id, name = %athlete.name, "Inserted athlete");
    }
    tracing::info!("Sample data imported: {} athletes", athletes.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use storage::{
        error::{Result, StorageError},
        store::{Body, Document, DocumentStore},
    };
    use uuid::Uuid;

    #[test]
    fn test_cli_parses_database_url() {
        let cli = Cli::try_parse_from(["seed", "--database-url", "memory://", "-v"]).unwrap();
        assert_eq!(cli.database_url, "memory://");
        assert!(cli.verbose);
    }

    #[tokio::test]
    async fn test_run_against_memory_store() {
        let cli = Cli {
            database_url: "memory://".to_string(),
            verbose: false,
        };
        assert!(run(&cli).await.is_ok());
    }

    /// Store that fails every athlete write and records whether it was closed.
    struct FailingStore {
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn find_all(&self, _collection: &str) -> Result<Vec<Document>> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _collection: &str, _id: Uuid) -> Result<Document> {
            Err(StorageError::NotFound)
        }

        async fn insert(&self, _collection: &str, _body: Body) -> Result<Document> {
            Err(StorageError::Connection("write refused".to_string()))
        }

        async fn merge(&self, _collection: &str, _id: Uuid, _patch: Body) -> Result<Document> {
            Err(StorageError::NotFound)
        }

        async fn delete(&self, _collection: &str, _id: Uuid) -> Result<()> {
            Err(StorageError::NotFound)
        }

        async fn delete_all(&self, _collection: &str) -> Result<u64> {
            Err(StorageError::Connection("write refused".to_string()))
        }

        async fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_store_is_closed_when_seeding_fails() {
        let closed = Arc::new(AtomicBool::new(false));
        let db = Database::from_store(FailingStore {
            closed: closed.clone(),
        });

        let result = seed_and_close(&db).await;

        assert!(result.is_err());
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_run_fails_on_unknown_scheme() {
        let cli = Cli {
            database_url: "mongodb://localhost:27017/coach".to_string(),
            verbose: false,
        };
        assert!(run(&cli).await.is_err());
    }
}
