//! Errors at the boundary with the host application.
//!
//! Unparseable date text is not an error anywhere in this crate; the parsing
//! and formatting functions return `None` (or the input unchanged) instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown calendar {0:?}: calendar must be one of: gregorian, jalali")]
    UnknownCalendar(String),

    #[error("unknown preference scope {0:?}: scope must be either 'system' or 'user'")]
    UnknownScope(String),

    #[error("cannot store calendar preference for anonymous sessions")]
    AnonymousUser,

    #[error("invalid date {0:?}: expected three integer fields")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
