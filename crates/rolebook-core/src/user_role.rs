//! UserRole — the assignment of an email-identified user to a [`Role`].
//!
//! [`Role`]: crate::role::Role

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A stored user-role row joined with the key of the role it references.
///
/// `role_key` comes from a left join and is reported even when the role has
/// since been soft-deleted; deleting a role does not cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
  pub id:         i64,
  pub email:      String,
  pub role_id:    i64,
  pub role_key:   Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl UserRole {
  pub fn is_active(&self) -> bool { self.deleted_at.is_none() }
}

/// Caller-supplied fields for creating or replacing a user-role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserRole {
  pub email:   String,
  pub role_id: i64,
}

impl NewUserRole {
  pub fn new(email: impl Into<String>, role_id: i64) -> Self {
    Self { email: email.into(), role_id }
  }

  /// `email` is required; its format is not checked.
  pub fn validate(&self) -> Result<()> {
    if self.email.trim().is_empty() {
      return Err(Error::Invalid { field: "email", reason: "must not be blank" });
    }
    Ok(())
  }
}

/// Filter for listing user-roles.
#[derive(Debug, Clone, Default)]
pub struct UserRoleFilter {
  /// Exact-match filter on `email`.
  pub email: Option<String>,
}
