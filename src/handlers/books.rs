use axum::{
    Json,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use std::convert::Infallible;
use tracing::{debug, error, info};

use crate::db::{Book, BookRepository, BookSource};
use crate::error::{ApiErrorResponse, ShelfError};
use crate::router::ShelfState;
use crate::service::clock::Clock;
use crate::service::poller::{BookPoller, PollSnapshot};

/// GET /api/books -> every row of `books`, fetched through a fresh pool.
pub async fn list_books_handler<S, C>(
    State(state): State<ShelfState<S, C>>,
) -> Result<Json<Vec<Book>>, ShelfError>
where
    S: BookSource,
    C: Clock,
{
    let repo = state.source.open().await?;
    let books = repo.list_books().await?;
    debug!(count = books.len(), ?books, "books fetched");
    Ok(Json(books))
}

/// GET /api/books/stream -> `snapshot` events from a fresh poller.
///
/// Configuration errors are returned as a plain error response before the
/// event stream starts. A query failure mid-stream becomes a final `error`
/// event. Client disconnect drops the stream, which stops the poller.
pub async fn stream_books_handler<S, C>(
    State(state): State<ShelfState<S, C>>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ShelfError>
where
    S: BookSource,
    C: Clock,
{
    let repo = state.source.open().await?;
    let poller = BookPoller::new(repo, state.clock.clone(), state.poll);
    info!(
        count = poller.settings().count,
        interval = ?poller.settings().interval,
        "book stream started"
    );

    let events = poller.into_stream().map(|item| Ok(to_event(item)));
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn to_event(item: Result<PollSnapshot, ShelfError>) -> Event {
    let encoded = item
        .and_then(|snapshot| serde_json::to_string(&snapshot).map_err(ShelfError::from));
    match encoded {
        Ok(data) => Event::default().event("snapshot").data(data),
        Err(e) => {
            error!(error = %e, "book stream failed");
            error_event(&e)
        }
    }
}

fn error_event(err: &ShelfError) -> Event {
    let body = ApiErrorResponse { error: err.body() };
    let data = serde_json::to_string(&body)
        .unwrap_or_else(|_| r#"{"error":{"code":"INTERNAL_ERROR","message":""}}"#.to_string());
    Event::default().event("error").data(data)
}
