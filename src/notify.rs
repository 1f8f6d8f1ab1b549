//! Operator-facing notices (the toast layer).
//!
//! Every flow outcome that the operator should see is a `Notice`; the CLI
//! prints them, a graphical front end would pop them up.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::fmt;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    /// Error notice for a failed request; validation failures show their
    /// own messages, everything else shows `fallback`.
    #[must_use]
    pub fn from_error(error: &ApiError, fallback: &str) -> Self {
        match error {
            ApiError::Validation(errors) => Self::error(errors.to_string()),
            _ => Self::error(fallback),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}
