//! Book list page: cached listing, title search and file download.

#[cfg(test)]
#[path = "books_test.rs"]
mod books_test;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::types::Book;
use crate::state::query_cache::BookQueries;

/// One rendered row of the book table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookRow {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub author_name: String,
    /// Creation date in the viewer's time zone.
    pub created_on: String,
    pub cover_image: String,
    pub file: String,
}

impl BookRow {
    #[must_use]
    pub fn from_book<Tz>(book: &Book, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            genre: book.genre.clone(),
            author_name: book.author.display_name().to_owned(),
            created_on: format_created_on(book.created_at, tz),
            cover_image: book.cover_image.clone(),
            file: book.file.clone(),
        }
    }
}

/// The filtered table plus the counts for its footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BooksView {
    pub rows: Vec<BookRow>,
    pub total: usize,
}

impl BooksView {
    #[must_use]
    pub fn summary(&self) -> String {
        summary(self.rows.len(), self.total)
    }
}

/// Books whose title contains `query`, ignoring case. An empty query keeps all.
#[must_use]
pub fn filter_books<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    let needle = query.to_lowercase();
    books
        .iter()
        .filter(|book| book.title.to_lowercase().contains(&needle))
        .collect()
}

#[must_use]
pub fn summary(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total} books")
}

/// Local file name for a downloaded book: `"<title>.pdf"`.
#[must_use]
pub fn download_file_name(title: &str) -> String {
    let safe = title
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect::<String>();
    let stem = if safe.is_empty() { "book" } else { safe.as_str() };
    format!("{stem}.pdf")
}

fn format_created_on<Tz>(created_at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    created_at.with_timezone(tz).format("%Y-%m-%d").to_string()
}

/// Book list backed by the shared list cache.
#[derive(Clone)]
pub struct BooksPage {
    client: ApiClient,
    queries: BookQueries,
}

impl BooksPage {
    #[must_use]
    pub fn new(client: ApiClient, queries: BookQueries) -> Self {
        Self { client, queries }
    }

    /// All books, from cache while fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the list has to be fetched and the request fails.
    pub async fn load(&self) -> Result<Vec<Book>, ApiError> {
        self.queries
            .list
            .get_or_fetch((), || self.client.get_books())
            .await
    }

    /// Load and filter the list by `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub async fn view(&self, query: &str) -> Result<BooksView, ApiError> {
        let books = self.load().await?;
        let rows = filter_books(&books, query)
            .into_iter()
            .map(|book| BookRow::from_book(book, &Local))
            .collect();
        Ok(BooksView { rows, total: books.len() })
    }

    /// Download `book`'s file into `dir` as `"<title>.pdf"`; returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the file cannot be written.
    pub async fn download(&self, book: &Book, dir: &Path) -> Result<PathBuf, ApiError> {
        let bytes = self.client.download(&book.file).await?;
        let path = dir.join(download_file_name(&book.title));
        tokio::fs::write(&path, &bytes).await?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "book downloaded");
        Ok(path)
    }
}
