//! Error types for `tourclub-core`.

use thiserror::Error;

use crate::attribute::AttrKind;

#[derive(Debug, Error)]
pub enum Error {
  /// A scalar request parameter could not be parsed.
  #[error("invalid value {value:?} for parameter `{name}`")]
  Parameter { name: &'static str, value: String },

  /// The request deadline expired before the composition finished.
  #[error("request deadline exceeded")]
  Timeout,

  #[error("attribute {0} is not defined")]
  UnknownAttribute(i64),

  #[error("attribute {attribute} holds {declared} values, not {requested}")]
  AttributeTypeMismatch {
    attribute: i64,
    declared:  AttrKind,
    requested: AttrKind,
  },

  #[error("unknown attribute type tag: {0}")]
  UnknownAttributeType(i64),
}

impl Error {
  pub fn parameter(name: &'static str, value: impl Into<String>) -> Self {
    Self::Parameter { name, value: value.into() }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Timeout => ErrorKind::Timeout,
      Self::Parameter { .. }
      | Self::UnknownAttribute(_)
      | Self::AttributeTypeMismatch { .. }
      | Self::UnknownAttributeType(_) => ErrorKind::Parameter,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of a failure, used by the HTTP layer to pick a
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Client-supplied input was malformed or inconsistent.
  Parameter,
  /// The request deadline expired.
  Timeout,
  /// The backing store failed.
  Store,
}

/// Error type of a [`ClubStore`](crate::store::ClubStore) backend.
///
/// Backends must be able to carry core errors (parameter parsing and deadline
/// expiry happen above the store) and report which class a failure falls in.
pub trait StoreError:
  std::error::Error + From<Error> + Send + Sync + 'static
{
  fn kind(&self) -> ErrorKind;
}
