//! Book create/edit/delete flows with cache invalidation.

#[cfg(test)]
#[path = "book_editor_test.rs"]
mod book_editor_test;

use crate::error::ApiError;
use crate::forms::{BookForm, BookFormDefaults, FormMode};
use crate::net::api::{ApiClient, ApiResponse};
use crate::net::types::Book;
use crate::state::query_cache::{BookQueries, QueryKey};

pub const CREATE_SUCCESS: &str = "Book created.";
pub const CREATE_FAILED: &str = "Could not create the book.";
pub const EDIT_SUCCESS: &str = "Book updated.";
pub const EDIT_FAILED: &str = "Could not update the book.";
pub const DELETE_SUCCESS: &str = "Book deleted.";
pub const DELETE_FAILED: &str = "Could not delete the book.";

#[derive(Clone)]
pub struct BookEditor {
    client: ApiClient,
    queries: BookQueries,
}

impl BookEditor {
    #[must_use]
    pub fn new(client: ApiClient, queries: BookQueries) -> Self {
        Self { client, queries }
    }

    /// One book, from the detail cache while fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the book has to be fetched and the request fails.
    pub async fn book(&self, id: &str) -> Result<Book, ApiError> {
        self.queries
            .detail
            .get_or_fetch(id.to_owned(), || self.client.get_book(id))
            .await
    }

    /// Editor prefill for book `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the book cannot be loaded.
    pub async fn load(&self, id: &str) -> Result<BookFormDefaults, ApiError> {
        let book = self.book(id).await?;
        Ok(BookFormDefaults::from(&book))
    }

    /// Validate and send one multipart `POST /api/books`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything when the form
    /// is invalid, or the request error.
    pub async fn submit_create(&self, form: BookForm) -> Result<ApiResponse, ApiError> {
        let valid = form.validate(FormMode::Create)?;
        let response = self.client.create_book(valid.into_multipart()?).await?;
        self.queries.invalidate(&QueryKey::Books);
        Ok(response)
    }

    /// Validate and send one multipart `PUT /api/books/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything when the form
    /// is invalid, or the request error.
    pub async fn submit_edit(&self, id: &str, form: BookForm) -> Result<ApiResponse, ApiError> {
        let valid = form.validate(FormMode::Edit)?;
        let response = self.client.edit_book(id, valid.into_multipart()?).await?;
        self.invalidate_book(id);
        Ok(response)
    }

    /// Send `DELETE /api/books/:id`.
    ///
    /// # Errors
    ///
    /// Returns the request error; caches stay untouched on failure.
    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        let response = self.client.delete_book(id).await?;
        self.invalidate_book(id);
        Ok(response)
    }

    fn invalidate_book(&self, id: &str) {
        self.queries.invalidate(&QueryKey::Books);
        self.queries.invalidate(&QueryKey::Book(id.to_owned()));
    }
}
