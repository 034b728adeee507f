//! SQL DDL for the `books` table.
//! The table is owned by the external database; this is only used to
//! bootstrap local development databases and integration tests.

/// Postgres schema with:
/// - `id` SERIAL PRIMARY KEY
/// - `title`, `author` nullable VARCHAR
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id SERIAL PRIMARY KEY,
    title VARCHAR NULL,
    author VARCHAR NULL
);
"#;
