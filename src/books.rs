//! Book resource service
//!
//! Owner-scoped CRUD over the books store. Every mutation is a full
//! load-transform-save of the collection; existence is always checked
//! before ownership, so an unknown id is NotFound even for non-owners.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookshelfError, Result};
use crate::storage::JsonStore;

/// A book record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    /// Id of the user who created the record; never reassigned
    pub owner_id: String,
}

/// Fields supplied when creating a book
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
}

/// Partial fields for updating a book; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub published_year: Option<i32>,
}

impl BookPatch {
    fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(genre) = &self.genre {
            book.genre = genre.clone();
        }
        if let Some(year) = self.published_year {
            book.published_year = year;
        }
    }
}

/// CRUD over the books store
pub struct BookService {
    store: JsonStore<Book>,
}

impl BookService {
    pub fn new(store: JsonStore<Book>) -> Self {
        Self { store }
    }

    /// All books, unfiltered
    pub async fn list(&self) -> Vec<Book> {
        self.store.load().await
    }

    /// Look up one book by id
    pub async fn get(&self, id: &str) -> Result<Book> {
        self.store
            .load()
            .await
            .into_iter()
            .find(|b| b.id == id)
            .ok_or(BookshelfError::NotFound)
    }

    /// Create a book owned by the given user
    pub async fn create(&self, fields: NewBook, owner_id: &str) -> Result<Book> {
        let book = Book {
            id: Uuid::new_v4().to_string(),
            title: fields.title,
            author: fields.author,
            genre: fields.genre,
            published_year: fields.published_year,
            owner_id: owner_id.to_string(),
        };

        self.store
            .mutate(move |mut books| {
                books.push(book.clone());
                Ok((books, book))
            })
            .await
    }

    /// Merge partial fields into an existing book
    pub async fn update(&self, id: &str, owner_id: &str, patch: BookPatch) -> Result<Book> {
        let id = id.to_string();
        let owner_id = owner_id.to_string();

        self.store
            .mutate(move |mut books| {
                let book = books
                    .iter_mut()
                    .find(|b| b.id == id)
                    .ok_or(BookshelfError::NotFound)?;
                if book.owner_id != owner_id {
                    return Err(BookshelfError::Forbidden);
                }
                patch.apply(book);
                let updated = book.clone();
                Ok((books, updated))
            })
            .await
    }

    /// Remove a book
    pub async fn delete(&self, id: &str, owner_id: &str) -> Result<()> {
        let id = id.to_string();
        let owner_id = owner_id.to_string();

        self.store
            .mutate(move |books| {
                let book = books
                    .iter()
                    .find(|b| b.id == id)
                    .ok_or(BookshelfError::NotFound)?;
                if book.owner_id != owner_id {
                    return Err(BookshelfError::Forbidden);
                }
                let remaining: Vec<Book> = books.into_iter().filter(|b| b.id != id).collect();
                Ok((remaining, ()))
            })
            .await
    }
}
