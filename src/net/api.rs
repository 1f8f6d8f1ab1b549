//! REST client for the book-catalog server.
//!
//! Every request goes to the configured base URL with a JSON content type.
//! When the session holds a token, `Authorization: Bearer <token>` is attached
//! verbatim; without one the header is omitted entirely.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] and transport failures become
//! [`ApiError::Http`]. There is no retry, backoff or timeout policy.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::types::{AuthToken, Book, LoginRequest, RegisterRequest};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::state::auth::TokenStore;

const LOGIN_PATH: [&str; 3] = ["api", "users", "login"];
const REGISTER_PATH: [&str; 3] = ["api", "users", "register"];
const BOOKS_PATH: [&str; 2] = ["api", "books"];

fn book_path(id: &str) -> [&str; 3] {
    ["api", "books", id]
}

/// A successful (2xx) response with its raw body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as loose JSON; empty or non-JSON bodies map to `Null`.
    #[must_use]
    pub fn value(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Token-bearing HTTP client bound to one server.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenStore,
}

impl ApiClient {
    /// Build a client for `config.base_url` that reads its token from `tokens`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute `http(s)` URL or
    /// the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url, tokens })
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Absolute URL for `segments` under the base URL, each segment percent-encoded.
    #[must_use]
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Start a request to `segments`, attaching the bearer token when one is set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] if the token contains characters
    /// that cannot appear in a header.
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.url(segments);
        tracing::debug!(%method, path = url.path(), "api request");
        let builder = self.http.request(method, url);
        match self.tokens.token() {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
                value.set_sensitive(true);
                Ok(builder.header(AUTHORIZATION, value))
            }
            None => Ok(builder),
        }
    }

    /// Perform a prepared request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure and
    /// [`ApiError::Status`] when the server answers with a non-2xx status.
    pub async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let path = response.url().path().to_owned();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %path, "api request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(ApiResponse { status: status.as_u16(), body })
    }

    /// `POST /api/users/login`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no token.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthToken, ApiError> {
        let request = self.request(Method::POST, &LOGIN_PATH)?.json(credentials);
        self.send(request).await?.json()
    }

    /// `POST /api/users/register`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no token.
    pub async fn register(&self, account: &RegisterRequest) -> Result<AuthToken, ApiError> {
        let request = self.request(Method::POST, &REGISTER_PATH)?.json(account);
        self.send(request).await?.json()
    }

    /// `GET /api/books`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a book list.
    pub async fn get_books(&self) -> Result<Vec<Book>, ApiError> {
        let request = self.request(Method::GET, &BOOKS_PATH)?;
        self.send(request).await?.json()
    }

    /// `GET /api/books/:id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a book.
    pub async fn get_book(&self, id: &str) -> Result<Book, ApiError> {
        let request = self.request(Method::GET, &book_path(id))?;
        self.send(request).await?.json()
    }

    /// `POST /api/books` with a multipart body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_book(&self, form: Form) -> Result<ApiResponse, ApiError> {
        let request = self.request(Method::POST, &BOOKS_PATH)?.multipart(form);
        self.send(request).await
    }

    /// `PUT /api/books/:id` with a multipart body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn edit_book(&self, id: &str, form: Form) -> Result<ApiResponse, ApiError> {
        let request = self.request(Method::PUT, &book_path(id))?.multipart(form);
        self.send(request).await
    }

    /// `DELETE /api/books/:id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_book(&self, id: &str) -> Result<ApiResponse, ApiError> {
        let request = self.request(Method::DELETE, &book_path(id))?;
        self.send(request).await
    }

    /// Fetch a book file. `file_url` is usually an absolute storage URL;
    /// relative URLs resolve against the base URL. No token is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, the request fails or is rejected.
    pub async fn download(&self, file_url: &str) -> Result<Vec<u8>, ApiError> {
        let url = self
            .base_url
            .join(file_url)
            .map_err(|_| ApiError::InvalidUrl(file_url.to_owned()))?;
        tracing::debug!(%url, "downloading book file");
        let request = self.http.get(url).header(ACCEPT, "*/*");
        Ok(self.send(request).await?.body)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|_| ApiError::InvalidUrl(raw.to_owned()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_owned()));
    }
    Ok(url)
}
