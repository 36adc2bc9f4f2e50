//! The `RoleStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `rolebook-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  Error,
  role::{NewRole, Role},
  user_role::{NewUserRole, UserRole, UserRoleFilter},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Error type produced by a [`RoleStore`] backend.
///
/// Backends wrap domain failures in their own error type; `as_domain` hands
/// them back out so callers can classify a failure without knowing which
/// backend produced it. `None` means the failure is infrastructural.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn as_domain(&self) -> Option<&Error>;
}

impl StoreError for Error {
  fn as_domain(&self) -> Option<&Error> { Some(self) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a rolebook storage backend.
///
/// Rows are never hard-deleted. Every read, update and delete targets active
/// rows only (`deleted_at IS NULL`).
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RoleStore: Send + Sync {
  type Error: StoreError;

  // ── Roles ─────────────────────────────────────────────────────────────

  /// List all active roles in insertion order.
  fn list_roles(&self) -> impl Future<Output = Result<Vec<Role>, Self::Error>> + Send + '_;

  /// Retrieve an active role by id. Returns `None` if absent or deleted.
  fn get_role(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Role>, Self::Error>> + Send + '_;

  /// Insert a role. Timestamps and id are assigned by the store.
  ///
  /// Fails with [`Error::DuplicateRoleKey`] if the key is taken, including by
  /// a soft-deleted role.
  fn create_role(
    &self,
    input: NewRole,
  ) -> impl Future<Output = Result<Role, Self::Error>> + Send + '_;

  /// Replace key and description of an active role and touch `updated_at`.
  ///
  /// Fails with [`Error::RoleNotFound`] if no active row matches.
  fn update_role(
    &self,
    id: i64,
    input: NewRole,
  ) -> impl Future<Output = Result<Role, Self::Error>> + Send + '_;

  /// Soft-delete an active role. Dependent user-roles are left untouched.
  ///
  /// Fails with [`Error::RoleNotFound`] if no active row matches.
  fn delete_role(&self, id: i64) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── User roles ────────────────────────────────────────────────────────

  /// List active user-roles joined with their role key.
  fn list_user_roles(
    &self,
    filter: UserRoleFilter,
  ) -> impl Future<Output = Result<Vec<UserRole>, Self::Error>> + Send + '_;

  /// Retrieve an active user-role by id. Returns `None` if absent or deleted.
  fn get_user_role(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<UserRole>, Self::Error>> + Send + '_;

  /// Insert a user-role referencing an active role.
  ///
  /// The role check and the insert happen atomically. Fails with
  /// [`Error::RoleUnavailable`] if the role is missing or deleted.
  fn create_user_role(
    &self,
    input: NewUserRole,
  ) -> impl Future<Output = Result<UserRole, Self::Error>> + Send + '_;

  /// Replace email and role of an active user-role and touch `updated_at`.
  ///
  /// Fails with [`Error::UserRoleNotFound`] or [`Error::RoleUnavailable`];
  /// on failure the stored row is unchanged.
  fn update_user_role(
    &self,
    id: i64,
    input: NewUserRole,
  ) -> impl Future<Output = Result<UserRole, Self::Error>> + Send + '_;

  /// Soft-delete an active user-role.
  ///
  /// Fails with [`Error::UserRoleNotFound`] when zero rows are affected.
  fn delete_user_role(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
