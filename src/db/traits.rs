use crate::db::models::Book;
use crate::error::ShelfError;
use std::future::Future;

/// Read access to the `books` row set.
pub trait BookRepository: Send + Sync {
    /// Every row of `books`, in whatever order the backend returns them.
    fn list_books(&self) -> impl Future<Output = Result<Vec<Book>, ShelfError>> + Send;
}

/// Opens a repository for a single request.
///
/// Each call yields a fresh repository; nothing is shared between requests.
/// Implementations must fail with a configuration error before touching the
/// network when they are not configured.
pub trait BookSource: Clone + Send + Sync + 'static {
    type Repo: BookRepository + 'static;

    fn open(&self) -> impl Future<Output = Result<Self::Repo, ShelfError>> + Send;
}
