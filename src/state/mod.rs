//! Client-side state: the session token and cached query results.

pub mod auth;
pub mod query_cache;
