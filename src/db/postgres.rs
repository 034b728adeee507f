use crate::config::Config;
use crate::db::models::Book;
use crate::db::schema::POSTGRES_INIT;
use crate::db::traits::{BookRepository, BookSource};
use crate::error::ShelfError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tracing::debug;

pub type PgPool = Pool<Postgres>;

#[derive(Clone)]
pub struct BooksStorage {
    pool: PgPool,
}

impl BooksStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a brand-new pool for `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, ShelfError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), ShelfError> {
        for stmt in POSTGRES_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// `SELECT * FROM books`, unordered and unpaginated.
    pub async fn list_all(&self) -> Result<Vec<Book>, ShelfError> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Insert a row and return its generated id.
    pub async fn insert(
        &self,
        title: Option<&str>,
        author: Option<&str>,
    ) -> Result<i32, ShelfError> {
        let rec: (i32,) =
            sqlx::query_as("INSERT INTO books (title, author) VALUES ($1, $2) RETURNING id")
                .bind(title)
                .bind(author)
                .fetch_one(&self.pool)
                .await?;
        Ok(rec.0)
    }
}

impl BookRepository for BooksStorage {
    async fn list_books(&self) -> Result<Vec<Book>, ShelfError> {
        self.list_all().await
    }
}

/// Opens a fresh [`BooksStorage`] per request from the configured `DATABASE_URL`.
#[derive(Clone)]
pub struct PgBookSource {
    config: Arc<Config>,
}

impl PgBookSource {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl BookSource for PgBookSource {
    type Repo = BooksStorage;

    async fn open(&self) -> Result<BooksStorage, ShelfError> {
        let url = self.config.require_database_url()?;
        debug!(
            max_connections = self.config.max_connections,
            "opening request-scoped pool"
        );
        BooksStorage::connect(url, self.config.max_connections).await
    }
}
