use axum::{Router, routing::get};
use std::sync::Arc;

use crate::config::Config;
use crate::db::{BookSource, PgBookSource};
use crate::handlers::books::{list_books_handler, stream_books_handler};
use crate::handlers::page::landing_handler;
use crate::service::clock::{Clock, SystemClock};
use crate::service::poller::PollSettings;

/// Shared router state. Holds only configuration-level values; no pool
/// lives here, since every request opens its own.
#[derive(Clone)]
pub struct ShelfState<S, C = SystemClock> {
    pub source: S,
    pub clock: C,
    pub poll: PollSettings,
    pub page_title: Arc<str>,
}

impl<S, C> ShelfState<S, C> {
    pub fn new(source: S, clock: C, cfg: &Config) -> Self {
        Self {
            source,
            clock,
            poll: PollSettings::from(cfg),
            page_title: Arc::from(cfg.page_title.as_str()),
        }
    }
}

impl ShelfState<PgBookSource, SystemClock> {
    pub fn from_config(cfg: Arc<Config>) -> Self {
        Self::new(PgBookSource::new(cfg.clone()), SystemClock, &cfg)
    }
}

pub fn shelf_router<S, C>(state: ShelfState<S, C>) -> Router
where
    S: BookSource,
    C: Clock,
{
    Router::new()
        .route("/", get(landing_handler::<S, C>))
        .route("/api/books", get(list_books_handler::<S, C>))
        .route("/api/books/stream", get(stream_books_handler::<S, C>))
        .with_state(state)
}
