//! Client-side validation of operator input.
//!
//! DESIGN
//! ======
//! Validation runs before any request is built; a form that fails never
//! reaches the network. Messages are the ones shown to the operator, so they
//! are part of the contract and tested verbatim.

pub mod auth;
pub mod book;


use std::collections::BTreeMap;
use std::fmt;

pub use auth::{LoginForm, RegisterForm};
pub use book::{BookForm, BookFormDefaults, FormMode, ValidBookForm};

/// Field-keyed validation messages, ordered by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`, empty when it passed.
    #[must_use]
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Every message in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.fields.values().flatten().map(String::as_str)
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for message in self.messages() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// `true` when `value` has at least `min` characters after trimming.
pub(crate) fn has_min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}
