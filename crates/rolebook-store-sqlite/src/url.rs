//! Parsing of the `DATABASE_URL` connection string.

use std::path::PathBuf;

use crate::{Error, Result};

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  Memory,
  File(PathBuf),
}

impl Location {
  /// Accepts `sqlite::memory:`, `:memory:`, `sqlite://<path>`,
  /// `sqlite:<path>` or a bare filesystem path. Query strings such as
  /// `?mode=rwc` are dropped. Any other `scheme://` is rejected.
  pub fn parse(url: &str) -> Result<Self> {
    let url = url.trim();
    let rest = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);

    if rest.contains("://") {
      return Err(Error::UnsupportedUrl(url.to_owned()));
    }

    let path = rest.split('?').next().unwrap_or_default();
    match path {
      "" => Err(Error::UnsupportedUrl(url.to_owned())),
      ":memory:" => Ok(Self::Memory),
      p => Ok(Self::File(PathBuf::from(p))),
    }
  }
}
