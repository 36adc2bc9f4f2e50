//! Domain error types for `rolebook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("role {0} not found")]
  RoleNotFound(i64),

  #[error("user role {0} not found")]
  UserRoleNotFound(i64),

  /// The referenced role does not exist or has been soft-deleted.
  #[error("role {0} is either deleted or does not exist")]
  RoleUnavailable(i64),

  #[error("role key {0:?} already exists")]
  DuplicateRoleKey(String),

  #[error("invalid {field}: {reason}")]
  Invalid {
    field:  &'static str,
    reason: &'static str,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
