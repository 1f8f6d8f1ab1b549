//! Bookdesk: authenticated admin client for a book-catalog REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` talks to the remote server, `state` holds the session token and the
//! query cache, `forms` validates operator input, and `pages` composes those
//! into the login, book list and book editor flows. The `cli` crate is the
//! interactive surface on top of this library.

pub mod config;
pub mod error;
pub mod forms;
pub mod net;
pub mod notify;
pub mod pages;
pub mod state;

pub use config::ClientConfig;
pub use error::ApiError;
pub use net::api::ApiClient;
pub use state::auth::TokenStore;
