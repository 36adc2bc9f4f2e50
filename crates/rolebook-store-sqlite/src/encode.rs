//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use rolebook_core::{role::Role, user_role::UserRole};

use crate::{Error, Result};

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

// ─── Column lists ────────────────────────────────────────────────────────────

/// Column list matching [`RawRole::from_row`].
pub const ROLE_COLUMNS: &str =
  "id, role_key, description, created_at, updated_at, deleted_at";

/// Joined select matching [`RawUserRole::from_row`]. Callers append their own
/// `AND ...` conditions and ordering.
pub const USER_ROLE_SELECT: &str = "
  SELECT ur.id, ur.email, ur.role_id, r.role_key,
         ur.created_at, ur.updated_at, ur.deleted_at
  FROM user_roles ur
  LEFT JOIN roles r ON r.id = ur.role_id
  WHERE ur.deleted_at IS NULL";

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `roles` row as read from SQLite, before timestamp decoding.
pub struct RawRole {
  pub id:          i64,
  pub role_key:    String,
  pub description: String,
  pub created_at:  String,
  pub updated_at:  String,
  pub deleted_at:  Option<String>,
}

impl RawRole {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      role_key:    row.get(1)?,
      description: row.get(2)?,
      created_at:  row.get(3)?,
      updated_at:  row.get(4)?,
      deleted_at:  row.get(5)?,
    })
  }

  pub fn into_role(self) -> Result<Role> {
    Ok(Role {
      id:          self.id,
      role_key:    self.role_key,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
      deleted_at:  decode_opt_dt(self.deleted_at)?,
    })
  }
}

/// A joined `user_roles` row as read from SQLite.
pub struct RawUserRole {
  pub id:         i64,
  pub email:      String,
  pub role_id:    i64,
  pub role_key:   Option<String>,
  pub created_at: String,
  pub updated_at: String,
  pub deleted_at: Option<String>,
}

impl RawUserRole {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      email:      row.get(1)?,
      role_id:    row.get(2)?,
      role_key:   row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
      deleted_at: row.get(6)?,
    })
  }

  pub fn into_user_role(self) -> Result<UserRole> {
    Ok(UserRole {
      id:         self.id,
      email:      self.email,
      role_id:    self.role_id,
      role_key:   self.role_key,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      deleted_at: decode_opt_dt(self.deleted_at)?,
    })
  }
}
