//! Error type for `tourclub-store-sqlite`.

use thiserror::Error;
use tourclub_core::{ErrorKind, StoreError};

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] tourclub_core::Error),

  /// The database could not be opened or its schema applied.
  #[error("cannot open store: {0}")]
  Connection(#[source] tokio_rusqlite::Error),

  #[error("{op}: {source}")]
  Query {
    op:     &'static str,
    #[source]
    source: tokio_rusqlite::Error,
  },

  /// A stored value does not decode into its domain type.
  #[error("malformed stored value: {0}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// Whether the statement was refused by a foreign key, uniqueness or check
  /// constraint, i.e. the caller referenced something that does not exist.
  pub fn is_constraint_violation(&self) -> bool {
    let Self::Query { source, .. } = self else { return false };
    matches!(
      source,
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
        if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
  }
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Core(e) => e.kind(),
      _ if self.is_constraint_violation() => ErrorKind::Parameter,
      _ => ErrorKind::Store,
    }
  }
}
