//! In-memory mock implementation of the book store.
//!
//! Records live in a [`MockState`] shared behind a single async mutex. The
//! state is created once at process start and handed to every
//! [`MockBookStore`] that should see the same records.

use std::{sync::Arc, time::Duration};
use async_trait::async_trait;
use mea::mutex::Mutex;
use tracing::debug;

use bookstore_core::{
    backend::{BookStore, BookStoreBuilder},
    book::Book,
    error::BookStoreResult,
};

/// Handle to a [`MockState`] shared between stores and tasks.
pub type SharedMockState = Arc<Mutex<MockState>>;


/// The records held by the mock store and the source of their identifiers.
///
/// Identifiers come from a counter that starts at 1 and only ever grows. It
/// lives as long as the state does, so ids are never reused while the process
/// runs, even after the record holding them is removed.
#[derive(Debug)]
pub struct MockState {
    /// Records in insertion order.
    books: Vec<Book>,
    next_id: u64,
}

impl MockState {
    /// Creates an empty state whose first assigned id will be `"1"`.
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates an empty state wrapped in a shareable, lock-guarded handle.
    pub fn shared() -> SharedMockState {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the state holds no records.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books
            .iter()
            .position(|book| book.id() == Some(id))
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}


/// Book store backed by process-local memory.
///
/// Every operation takes the state lock for its whole duration, so the
/// counter increment and the collection update of a `create` are atomic with
/// respect to concurrent callers. Clones share the same state.
///
/// # Example
///
/// ```ignore
/// use bookstore_memory::{MockBookStore, MockState};
/// use bookstore_core::{backend::BookStore, book::Book};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MockBookStore::new(MockState::shared());
///
///     let stored = store.create(Book::new("Dune", "Herbert", "SciFi", 12.5)).await?;
///     assert_eq!(stored.id(), Some("1"));
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct MockBookStore {
    state: SharedMockState,
    latency: Duration,
}

impl MockBookStore {
    /// Creates a store over the given state with no simulated latency.
    pub fn new(state: SharedMockState) -> Self {
        Self {
            state,
            latency: Duration::ZERO,
        }
    }

    /// Creates a builder for a store with custom options.
    pub fn builder() -> MockBookStoreBuilder {
        MockBookStoreBuilder::default()
    }

    /// Returns the handle to the state this store operates on.
    pub fn state(&self) -> &SharedMockState {
        &self.state
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockBookStore {
    fn default() -> Self {
        Self::new(MockState::shared())
    }
}


#[async_trait]
impl BookStore for MockBookStore {
    async fn list(&self) -> BookStoreResult<Vec<Book>> {
        self.simulate_latency().await;

        Ok(self.state.lock().await.books.clone())
    }

    async fn get(&self, id: &str) -> BookStoreResult<Option<Book>> {
        self.simulate_latency().await;

        Ok(
            self.state
                .lock()
                .await
                .books
                .iter()
                .find(|book| book.id() == Some(id))
                .cloned()
        )
    }

    async fn create(&self, candidate: Book) -> BookStoreResult<Book> {
        self.simulate_latency().await;

        let mut state = self.state.lock().await;
        let book = candidate.with_id(state.allocate_id());
        state.books.push(book.clone());

        debug!(id = book.id(), "mock store created book");
        Ok(book)
    }

    async fn replace(&self, id: &str, candidate: Book) -> BookStoreResult<Option<Book>> {
        self.simulate_latency().await;

        let mut state = self.state.lock().await;
        let index = match state.position(id) {
            Some(index) => index,
            None => return Ok(None),
        };

        let book = candidate.with_id(id);
        state.books[index] = book.clone();

        debug!(id, "mock store replaced book");
        Ok(Some(book))
    }

    async fn remove(&self, id: &str) -> BookStoreResult<Option<Book>> {
        self.simulate_latency().await;

        let mut state = self.state.lock().await;
        let removed = state
            .position(id)
            .map(|index| state.books.remove(index));

        if removed.is_some() {
            debug!(id, "mock store removed book");
        }
        Ok(removed)
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}


/// Builder for [`MockBookStore`] instances.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use bookstore_memory::{MockBookStore, MockState};
/// use bookstore_core::backend::BookStoreBuilder;
///
/// let store = MockBookStore::builder()
///     .state(MockState::shared())
///     .latency(Duration::from_millis(10))
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct MockBookStoreBuilder {
    state: Option<SharedMockState>,
    latency: Duration,
}

impl MockBookStoreBuilder {
    /// Uses an existing state instead of a fresh one.
    pub fn state(mut self, state: SharedMockState) -> Self {
        self.state = Some(state);
        self
    }

    /// Delays every operation by `latency` to imitate a remote backend.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl BookStoreBuilder for MockBookStoreBuilder {
    type Store = MockBookStore;

    async fn build(self) -> BookStoreResult<Self::Store> {
        Ok(MockBookStore {
            state: self.state.unwrap_or_else(MockState::shared),
            latency: self.latency,
        })
    }
}
