#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, Utc};
use shelfcast::service::Clock;
use shelfcast::{Book, BookRepository, BookSource, ShelfError};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory stand-in for the `books` table.
#[derive(Clone, Default)]
pub struct MemoryBooks {
    pub rows: Arc<Vec<Book>>,
    pub queries: Arc<AtomicUsize>,
    pub fail_on_query: Option<usize>,
}

impl BookRepository for MemoryBooks {
    async fn list_books(&self) -> Result<Vec<Book>, ShelfError> {
        let n = self.queries.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_query == Some(n) {
            return Err(ShelfError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(self.rows.as_ref().clone())
    }
}

/// Hands out the same in-memory table on every open and counts opens.
#[derive(Clone, Default)]
pub struct MemorySource {
    pub books: MemoryBooks,
    pub opens: Arc<AtomicUsize>,
}

impl MemorySource {
    pub fn with_rows(rows: Vec<Book>) -> Self {
        Self {
            books: MemoryBooks {
                rows: Arc::new(rows),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.books.queries.load(Ordering::SeqCst)
    }
}

impl BookSource for MemorySource {
    type Repo = MemoryBooks;

    async fn open(&self) -> Result<MemoryBooks, ShelfError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(self.books.clone())
    }
}

pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new(1, "The Left Hand of Darkness", "Ursula K. Le Guin"),
        Book::new(2, "Kindred", "Octavia E. Butler"),
        Book {
            id: 3,
            title: Some("Untitled draft".to_string()),
            author: None,
        },
    ]
}

/// Clock that advances by exactly the slept duration and never waits.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Arc::new(Mutex::new(DateTime::<Utc>::UNIX_EPOCH)),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    fn sleep(&self, dur: Duration) -> impl Future<Output = ()> + Send {
        {
            let mut now = self.now.lock().unwrap();
            *now += TimeDelta::from_std(dur).unwrap();
        }
        tokio::task::yield_now()
    }
}
