//! Database module: the `books` model, schema and Postgres access.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for bootstrapping the `books` table
//! - `postgres.rs`: pool construction and queries
//! - `traits.rs`: repository seams used by the handlers and the poller

pub mod models;
pub mod postgres;
pub mod schema;
pub mod traits;

pub use models::Book;
pub use postgres::{BooksStorage, PgBookSource, PgPool};
pub use schema::POSTGRES_INIT;
pub use traits::{BookRepository, BookSource};
