// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Internal: {0}")]
	Internal(String),
}

/// SQLite extended result codes for `SQLITE_CONSTRAINT_PRIMARYKEY` and
/// `SQLITE_CONSTRAINT_UNIQUE`.
const SQLITE_UNIQUE_CODES: [&str; 2] = ["1555", "2067"];

impl DbError {
	/// Returns true if the error is a uniqueness or primary-key violation.
	pub fn is_unique_violation(&self) -> bool {
		match self {
			DbError::Sqlx(sqlx::Error::Database(e)) => {
				e.is_unique_violation()
					|| e
						.code()
						.is_some_and(|code| SQLITE_UNIQUE_CODES.contains(&&*code))
			}
			_ => false,
		}
	}
}

pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_other_errors_are_not_unique_violations() {
		assert!(!DbError::NotFound("org 1".to_string()).is_unique_violation());
		assert!(!DbError::Sqlx(sqlx::Error::RowNotFound).is_unique_violation());
	}
}
