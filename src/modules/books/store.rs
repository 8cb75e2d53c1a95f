//! In-memory book catalog.
//!
//! The store keeps books in insertion order and trusts its callers to have
//! validated field constraints already. It does no locking of its own; the
//! books module shares it behind a [`tokio::sync::RwLock`].

use std::sync::Arc;

use shelf_http::error::AppError;
use shelf_kernel::settings::IdPolicy;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Book, NewBook};

/// Store handle shared between the module and its handlers
pub type SharedStore = Arc<RwLock<BookStore>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("book {0} not found")]
    NotFound(i64),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::not_found(err.to_string()),
        }
    }
}

/// Ordered collection of books plus the identifier policy.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
    policy: IdPolicy,
    /// Highest identification ever stored; only consulted by `IdPolicy::Monotonic`
    highest_issued: i64,
}

impl BookStore {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            books: Vec::new(),
            policy,
            highest_issued: 0,
        }
    }

    /// Build a store holding `books` in the given order.
    pub fn with_books(policy: IdPolicy, books: impl IntoIterator<Item = Book>) -> Self {
        let mut store = Self::new(policy);
        store.seed(books);
        store
    }

    /// Append pre-identified books as they are.
    pub fn seed(&mut self, books: impl IntoIterator<Item = Book>) {
        for book in books {
            self.highest_issued = self.highest_issued.max(book.identification);
            self.books.push(book);
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    /// First book with the given identification.
    pub fn get_by_id(&self, id: i64) -> Result<&Book, StoreError> {
        self.books
            .iter()
            .find(|book| book.identification == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn filter_by_published_date(&self, published_date: i32) -> Vec<Book> {
        self.filter(|book| book.published_date == published_date)
    }

    pub fn filter_by_rating(&self, rating: i32) -> Vec<Book> {
        self.filter(|book| book.rating == rating)
    }

    fn filter(&self, predicate: impl Fn(&Book) -> bool) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| predicate(book))
            .cloned()
            .collect()
    }

    /// Append a new book and return the identification it was given.
    pub fn insert(&mut self, candidate: NewBook) -> i64 {
        let identification = self.next_id();
        self.highest_issued = self.highest_issued.max(identification);
        self.books.push(candidate.with_id(identification));

        tracing::debug!(
            identification,
            policy = ?self.policy,
            total = self.books.len(),
            "book inserted"
        );
        identification
    }

    fn next_id(&self) -> i64 {
        match self.policy {
            IdPolicy::LastPlusOne => self
                .books
                .last()
                .map_or(1, |book| book.identification + 1),
            IdPolicy::Monotonic => self.highest_issued + 1,
        }
    }

    /// Overwrite, in place, every book carrying the candidate's identification.
    pub fn replace(&mut self, candidate: Book) -> Result<(), StoreError> {
        let mut replaced = 0usize;
        for slot in self
            .books
            .iter_mut()
            .filter(|book| book.identification == candidate.identification)
        {
            *slot = candidate.clone();
            replaced += 1;
        }

        if replaced == 0 {
            return Err(StoreError::NotFound(candidate.identification));
        }

        tracing::debug!(
            identification = candidate.identification,
            replaced,
            "book replaced"
        );
        Ok(())
    }

    /// Remove the first book with the given identification and return it.
    pub fn delete(&mut self, id: i64) -> Result<Book, StoreError> {
        let position = self
            .books
            .iter()
            .position(|book| book.identification == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.books.remove(position);
        tracing::debug!(identification = id, total = self.books.len(), "book deleted");
        Ok(removed)
    }
}
