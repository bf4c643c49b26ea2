// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Unit of work: one database transaction plus its commit hooks.

use std::fmt;

use sqlx::sqlite::{Sqlite, SqliteConnection, SqlitePool};
use sqlx::Transaction;

use crate::error::DbError;
use crate::store::{CommitHook, CommitHooks};

/// A transaction whose side effects are deferred until commit.
///
/// Dropping a unit of work without committing rolls the transaction back and
/// discards the registered hooks.
pub struct UnitOfWork {
	tx: Transaction<'static, Sqlite>,
	hooks: Vec<CommitHook>,
}

impl UnitOfWork {
	/// Begin a new transaction on `pool`.
	///
	/// The write lock is taken up front (`BEGIN IMMEDIATE`): concurrent units of
	/// work wait on the pool's busy timeout and never read a snapshot that a
	/// peer's commit has already made stale.
	#[tracing::instrument(skip(pool))]
	pub async fn begin(pool: &SqlitePool) -> Result<Self, DbError> {
		let tx = pool.begin_with("BEGIN IMMEDIATE").await?;
		Ok(Self {
			tx,
			hooks: Vec::new(),
		})
	}

	pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
		&mut self.tx
	}

	/// Number of hooks waiting for commit.
	pub fn pending_hooks(&self) -> usize {
		self.hooks.len()
	}

	/// Commit the transaction, then run the hooks in registration order.
	#[tracing::instrument(skip(self), fields(hooks = self.hooks.len()))]
	pub async fn commit(self) -> Result<(), DbError> {
		let Self { tx, hooks } = self;
		tx.commit().await?;

		tracing::debug!(count = hooks.len(), "transaction committed, running commit hooks");
		for hook in hooks {
			hook();
		}
		Ok(())
	}

	/// Roll the transaction back. Registered hooks never run.
	#[tracing::instrument(skip(self), fields(hooks = self.hooks.len()))]
	pub async fn rollback(self) -> Result<(), DbError> {
		let Self { tx, hooks } = self;
		drop(hooks);
		tx.rollback().await?;
		tracing::debug!("transaction rolled back");
		Ok(())
	}
}

impl CommitHooks for UnitOfWork {
	fn on_commit(&mut self, hook: CommitHook) {
		self.hooks.push(hook);
	}
}

impl fmt::Debug for UnitOfWork {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UnitOfWork")
			.field("pending_hooks", &self.hooks.len())
			.finish_non_exhaustive()
	}
}
