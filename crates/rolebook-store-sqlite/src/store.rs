//! [`SqliteStore`] — the SQLite implementation of [`RoleStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use rolebook_core::{
  role::{NewRole, Role},
  store::RoleStore,
  user_role::{NewUserRole, UserRole, UserRoleFilter},
};

use crate::{
  Error, Location, Result,
  encode::{ROLE_COLUMNS, RawRole, RawUserRole, USER_ROLE_SELECT, encode_dt},
  schema::SCHEMA,
};

// ─── Write outcomes ──────────────────────────────────────────────────────────

/// Result of a conditional write, decided inside the connection closure so the
/// check and the write observe the same database state.
enum Outcome<T> {
  Written(T),
  NotFound,
  DuplicateKey,
  RoleUnavailable,
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A rolebook store backed by a single SQLite database.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open the database named by a connection string (see
  /// [`Location::parse`]) and run schema initialisation.
  pub async fn connect(url: &str) -> Result<Self> {
    match Location::parse(url)? {
      Location::Memory => Self::open_in_memory().await,
      Location::File(path) => Self::open(path).await,
    }
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    tracing::debug!(path = %path.as_ref().display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RoleStore impl ──────────────────────────────────────────────────────────

impl RoleStore for SqliteStore {
  type Error = Error;

  // ── Roles ─────────────────────────────────────────────────────────────────

  async fn list_roles(&self) -> Result<Vec<Role>> {
    let raws: Vec<RawRole> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ROLE_COLUMNS} FROM roles WHERE deleted_at IS NULL ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], RawRole::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRole::into_role).collect()
  }

  async fn get_role(&self, id: i64) -> Result<Option<Role>> {
    let raw: Option<RawRole> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {ROLE_COLUMNS} FROM roles WHERE id = ?1 AND deleted_at IS NULL"),
            rusqlite::params![id],
            RawRole::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRole::into_role).transpose()
  }

  async fn create_role(&self, input: NewRole) -> Result<Role> {
    input.validate()?;
    let key = input.role_key.clone();
    let now = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let inserted = conn.query_row(
          &format!(
            "INSERT INTO roles (role_key, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             RETURNING {ROLE_COLUMNS}"
          ),
          rusqlite::params![input.role_key, input.description, now],
          RawRole::from_row,
        );
        match inserted {
          Ok(raw) => Ok(Outcome::Written(raw)),
          Err(e) if is_unique_violation(&e) => Ok(Outcome::DuplicateKey),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match outcome {
      Outcome::Written(raw) => raw.into_role(),
      _ => Err(rolebook_core::Error::DuplicateRoleKey(key).into()),
    }
  }

  async fn update_role(&self, id: i64, input: NewRole) -> Result<Role> {
    input.validate()?;
    let key = input.role_key.clone();
    let now = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let updated = conn
          .query_row(
            &format!(
              "UPDATE roles
               SET role_key = ?1, description = ?2, updated_at = ?3
               WHERE id = ?4 AND deleted_at IS NULL
               RETURNING {ROLE_COLUMNS}"
            ),
            rusqlite::params![input.role_key, input.description, now, id],
            RawRole::from_row,
          )
          .optional();
        match updated {
          Ok(Some(raw)) => Ok(Outcome::Written(raw)),
          Ok(None) => Ok(Outcome::NotFound),
          Err(e) if is_unique_violation(&e) => Ok(Outcome::DuplicateKey),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match outcome {
      Outcome::Written(raw) => raw.into_role(),
      Outcome::DuplicateKey => Err(rolebook_core::Error::DuplicateRoleKey(key).into()),
      _ => Err(rolebook_core::Error::RoleNotFound(id).into()),
    }
  }

  async fn delete_role(&self, id: i64) -> Result<()> {
    let now = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE roles SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
          rusqlite::params![now, id],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(rolebook_core::Error::RoleNotFound(id).into());
    }
    Ok(())
  }

  // ── User roles ────────────────────────────────────────────────────────────

  async fn list_user_roles(&self, filter: UserRoleFilter) -> Result<Vec<UserRole>> {
    let raws: Vec<RawUserRole> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(email) = filter.email {
          let mut stmt =
            conn.prepare(&format!("{USER_ROLE_SELECT} AND ur.email = ?1 ORDER BY ur.id"))?;
          stmt
            .query_map(rusqlite::params![email], RawUserRole::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!("{USER_ROLE_SELECT} ORDER BY ur.id"))?;
          stmt
            .query_map([], RawUserRole::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUserRole::into_user_role).collect()
  }

  async fn get_user_role(&self, id: i64) -> Result<Option<UserRole>> {
    let raw: Option<RawUserRole> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("{USER_ROLE_SELECT} AND ur.id = ?1"),
            rusqlite::params![id],
            RawUserRole::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUserRole::into_user_role).transpose()
  }

  async fn create_user_role(&self, input: NewUserRole) -> Result<UserRole> {
    input.validate()?;
    let role_id = input.role_id;
    let now = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // The role check is part of the insert itself.
        let inserted: Option<i64> = tx
          .query_row(
            "INSERT INTO user_roles (email, role_id, created_at, updated_at)
             SELECT ?1, ?2, ?3, ?3
             WHERE EXISTS (SELECT 1 FROM roles WHERE id = ?2 AND deleted_at IS NULL)
             RETURNING id",
            rusqlite::params![input.email, input.role_id, now],
            |row| row.get(0),
          )
          .optional()?;

        let Some(id) = inserted else {
          return Ok(Outcome::RoleUnavailable);
        };

        let raw = tx.query_row(
          &format!("{USER_ROLE_SELECT} AND ur.id = ?1"),
          rusqlite::params![id],
          RawUserRole::from_row,
        )?;
        tx.commit()?;
        Ok(Outcome::Written(raw))
      })
      .await?;

    match outcome {
      Outcome::Written(raw) => raw.into_user_role(),
      _ => Err(rolebook_core::Error::RoleUnavailable(role_id).into()),
    }
  }

  async fn update_user_role(&self, id: i64, input: NewUserRole) -> Result<UserRole> {
    input.validate()?;
    let role_id = input.role_id;
    let now = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists = tx
          .query_row(
            "SELECT 1 FROM user_roles WHERE id = ?1 AND deleted_at IS NULL",
            rusqlite::params![id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !exists {
          return Ok(Outcome::NotFound);
        }

        let changed = tx.execute(
          "UPDATE user_roles
           SET email = ?1, role_id = ?2, updated_at = ?3
           WHERE id = ?4 AND deleted_at IS NULL
             AND EXISTS (SELECT 1 FROM roles WHERE id = ?2 AND deleted_at IS NULL)",
          rusqlite::params![input.email, input.role_id, now, id],
        )?;
        if changed == 0 {
          return Ok(Outcome::RoleUnavailable);
        }

        let raw = tx.query_row(
          &format!("{USER_ROLE_SELECT} AND ur.id = ?1"),
          rusqlite::params![id],
          RawUserRole::from_row,
        )?;
        tx.commit()?;
        Ok(Outcome::Written(raw))
      })
      .await?;

    match outcome {
      Outcome::Written(raw) => raw.into_user_role(),
      Outcome::NotFound => Err(rolebook_core::Error::UserRoleNotFound(id).into()),
      _ => Err(rolebook_core::Error::RoleUnavailable(role_id).into()),
    }
  }

  async fn delete_user_role(&self, id: i64) -> Result<()> {
    let now = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE user_roles SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
          rusqlite::params![now, id],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(rolebook_core::Error::UserRoleNotFound(id).into());
    }
    Ok(())
  }
}
