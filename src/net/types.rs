//! Wire DTOs for the book-catalog REST API.
//!
//! DESIGN
//! ======
//! Field names follow the server's JSON (`_id`, `coverImage`, `createdAt`).
//! The server owns every record; the client only displays these values and
//! round-trips them through the editor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book record as returned by `GET /api/books` and `GET /api/books/:id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub description: String,
    pub author: AuthorRef,
    /// Public URL of the cover image.
    pub cover_image: String,
    /// Public URL of the downloadable book file.
    pub file: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The `author` field: either a bare user id or a populated user document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Populated(Author),
    Id(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl AuthorRef {
    /// Human-readable author label; falls back to the raw id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Populated(author) => &author.name,
            Self::Id(id) => id,
        }
    }
}

/// Body of `POST /api/users/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/users/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response of the login and register endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub access_token: String,
}
