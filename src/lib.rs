pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod service;

pub use db::{Book, BookRepository, BookSource};
pub use error::ShelfError;
pub use service::{BookPoller, DisplayBinding, PollSnapshot};
