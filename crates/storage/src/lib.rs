#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use kalos_domain as domain;

pub mod backup;
mod sqlite;
pub mod text;

pub use sqlite::SqliteStore;

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid name: {0}")]
    Name(#[from] domain::NameError),
}

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Storage(#[from] domain::StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Storage(#[from] domain::StorageError),
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}
