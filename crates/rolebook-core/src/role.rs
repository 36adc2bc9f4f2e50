//! Role — a named permission or category that users can be assigned to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A stored role row.
///
/// `deleted_at` is `None` while the role is active. Soft-deleted roles stay in
/// the table but are excluded from every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
  pub id:          i64,
  pub role_key:    String,
  pub description: String,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
  pub deleted_at:  Option<DateTime<Utc>>,
}

impl Role {
  pub fn is_active(&self) -> bool { self.deleted_at.is_none() }
}

/// Caller-supplied fields for creating or replacing a role.
///
/// Unknown fields (an echoed `id`, timestamps) are ignored on deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
  pub role_key:    String,
  pub description: String,
}

impl NewRole {
  pub fn new(role_key: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      role_key:    role_key.into(),
      description: description.into(),
    }
  }

  /// Both fields are required and must contain something other than
  /// whitespace.
  pub fn validate(&self) -> Result<()> {
    if self.role_key.trim().is_empty() {
      return Err(Error::Invalid { field: "role_key", reason: "must not be blank" });
    }
    if self.description.trim().is_empty() {
      return Err(Error::Invalid { field: "description", reason: "must not be blank" });
    }
    Ok(())
  }
}
