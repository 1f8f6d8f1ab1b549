//! Networking modules for the book-catalog REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs authenticated HTTP calls, `types` defines the JSON schema,
//! and `upload` builds the file parts of multipart bodies.

pub mod api;
pub mod types;
pub mod upload;

#[cfg(test)]
#[path = "types_test.rs"]
pub(crate) mod types_test;
