//! Book create/edit form: validation and multipart encoding.

#[cfg(test)]
#[path = "book_test.rs"]
mod book_test;

use reqwest::multipart::Form;

use super::{ValidationErrors, has_min_chars};
use crate::error::ApiError;
use crate::net::types::Book;
use crate::net::upload::FileUpload;

pub const TITLE_TOO_SHORT: &str = "Title must be at least 2 characters.";
pub const GENRE_TOO_SHORT: &str = "Genre must be at least 2 characters.";
pub const DESCRIPTION_TOO_SHORT: &str = "Description must be at least 2 characters.";
pub const COVER_IMAGE_REQUIRED: &str = "Cover Image is required";
pub const BOOK_FILE_REQUIRED: &str = "Book File is required";

const MIN_TEXT_CHARS: usize = 2;

/// Whether the form creates a new record or replaces an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    /// Cover image and book file are both required.
    Create,
    /// Cover image is required; the book file may be left unchanged.
    Edit,
}

/// Raw book form input as entered by the operator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub genre: String,
    pub description: String,
    pub cover_image: Option<FileUpload>,
    pub file: Option<FileUpload>,
}

/// Values used to prefill the editor from a stored book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookFormDefaults {
    pub title: String,
    pub genre: String,
    pub description: String,
    /// URL of the cover currently on the server, shown until replaced.
    pub cover_image_url: String,
}

impl From<&Book> for BookFormDefaults {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            genre: book.genre.clone(),
            description: book.description.clone(),
            cover_image_url: book.cover_image.clone(),
        }
    }
}

impl BookFormDefaults {
    /// An editable form carrying these text values and no files yet.
    #[must_use]
    pub fn into_form(self) -> BookForm {
        BookForm {
            title: self.title,
            genre: self.genre,
            description: self.description,
            cover_image: None,
            file: None,
        }
    }
}

/// A book form that passed validation; the only way to build an upload body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidBookForm {
    title: String,
    genre: String,
    description: String,
    cover_image: FileUpload,
    file: Option<FileUpload>,
}

impl BookForm {
    /// Check every field for `mode`, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any field fails.
    pub fn validate(self, mode: FormMode) -> Result<ValidBookForm, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !has_min_chars(&self.title, MIN_TEXT_CHARS) {
            errors.add("title", TITLE_TOO_SHORT);
        }
        if !has_min_chars(&self.genre, MIN_TEXT_CHARS) {
            errors.add("genre", GENRE_TOO_SHORT);
        }
        if !has_min_chars(&self.description, MIN_TEXT_CHARS) {
            errors.add("description", DESCRIPTION_TOO_SHORT);
        }
        if self.cover_image.is_none() {
            errors.add("coverImage", COVER_IMAGE_REQUIRED);
        }
        if mode == FormMode::Create && self.file.is_none() {
            errors.add("file", BOOK_FILE_REQUIRED);
        }

        match (errors.is_empty(), self.cover_image) {
            (true, Some(cover_image)) => Ok(ValidBookForm {
                title: self.title.trim().to_owned(),
                genre: self.genre.trim().to_owned(),
                description: self.description.trim().to_owned(),
                cover_image,
                file: self.file,
            }),
            _ => Err(errors),
        }
    }
}

impl ValidBookForm {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Encode as the multipart body of `POST /api/books` or `PUT /api/books/:id`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file part carries an unparsable MIME type.
    pub fn into_multipart(self) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("title", self.title)
            .text("genre", self.genre)
            .text("description", self.description)
            .part("coverImage", self.cover_image.into_part()?);
        if let Some(file) = self.file {
            form = form.part("file", file.into_part()?);
        }
        Ok(form)
    }
}
