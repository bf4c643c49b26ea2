// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for Kiln server.
//!
//! Provisioning runs inside a [`UnitOfWork`]: one SQLite transaction plus the
//! hooks to run once it commits. The store traits in [`store`] describe the
//! operations provisioning needs; [`UnitOfWork`] implements them in [`org`] and
//! [`user`].

pub mod dialect;
pub mod error;
pub mod org;
pub mod pool;
pub mod store;
pub mod testing;
pub mod uow;
pub mod user;

pub use dialect::{Dialect, SqliteDialect};
pub use error::{DbError, Result};
pub use pool::{create_pool, run_migrations};
pub use store::{
	AccountFilter, CommitHook, CommitHooks, MembershipStore, OrgStore, TransactionContext,
	UserIdentity, UserStore,
};
pub use uow::UnitOfWork;

pub(crate) fn parse_timestamp(
	value: &str,
	column: &str,
) -> Result<chrono::DateTime<chrono::Utc>> {
	chrono::DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&chrono::Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}
