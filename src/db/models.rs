use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `books`. Title and author are nullable columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: Option<String>,
    pub author: Option<String>,
}

impl Book {
    pub fn new(id: i32, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }
}
