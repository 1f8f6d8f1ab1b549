//! Screen-level flows built on the API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page issues one or two API calls, turns the result into render-ready
//! data, and reports the outcome as a [`crate::notify::Notice`]. Failed
//! mutations leave the session and caches exactly as they were.

pub mod book_editor;
pub mod books;
pub mod login;
