// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User account storage.

use async_trait::async_trait;
use kiln_server_auth::{NewUser, OrgId, User, UserId};
use sqlx::Row;

use crate::dialect::{not_service_account_filter, SqliteDialect};
use crate::error::DbError;
use crate::parse_timestamp;
use crate::store::{AccountFilter, UserIdentity, UserStore};
use crate::uow::UnitOfWork;

const USER_COLUMNS: &str = "id, name, login, email, is_admin, is_service_account, org_id, \
	salt, rands, password, created, updated, last_seen_at";

fn filter_clause(filter: AccountFilter) -> String {
	match filter {
		AccountFilter::Any => String::new(),
		AccountFilter::ExcludeServiceAccounts => {
			format!(" AND {}", not_service_account_filter(&SqliteDialect))
		}
	}
}

#[async_trait]
impl UserStore for UnitOfWork {
	#[tracing::instrument(skip(self, identity), fields(case_insensitive = identity.case_insensitive))]
	async fn find_user_by_identity(
		&mut self,
		identity: UserIdentity<'_>,
	) -> Result<Option<User>, DbError> {
		let predicate = if identity.case_insensitive {
			"LOWER(email) = LOWER(?) OR LOWER(login) = LOWER(?)"
		} else {
			"email = ? OR login = ?"
		};
		let sql = format!("SELECT {USER_COLUMNS} FROM \"user\" WHERE {predicate} LIMIT 1");

		let row = sqlx::query(&sql)
			.bind(identity.email)
			.bind(identity.login)
			.fetch_optional(self.conn())
			.await?;

		row.map(|r| parse_user_row(&r)).transpose()
	}

	/// Create a user account.
	///
	/// # Database Constraints
	/// - `login` and `email` must be unique
	/// - `org_id` must reference an existing organization
	/// - an explicit `id` must not be taken
	#[tracing::instrument(skip(self, user), fields(login = %user.login, org_id = %user.org_id))]
	async fn insert_user(&mut self, user: NewUser) -> Result<User, DbError> {
		let result = sqlx::query(
			r#"
			INSERT INTO "user" (id, name, login, email, is_admin, is_service_account, org_id,
				salt, rands, password, created, updated, last_seen_at)
			VALUES (?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.map(UserId::get))
		.bind(&user.name)
		.bind(&user.login)
		.bind(&user.email)
		.bind(user.is_admin as i32)
		.bind(user.org_id.get())
		.bind(&user.salt)
		.bind(&user.rands)
		.bind(&user.password)
		.bind(user.created.to_rfc3339())
		.bind(user.updated.to_rfc3339())
		.bind(user.last_seen_at.to_rfc3339())
		.execute(self.conn())
		.await?;

		let user = user.with_id(UserId::new(result.last_insert_rowid()));
		tracing::debug!(user_id = %user.id, "user inserted");
		Ok(user)
	}

	#[tracing::instrument(skip(self), fields(user_id = %id))]
	async fn get_user_by_id(
		&mut self,
		id: UserId,
		filter: AccountFilter,
	) -> Result<Option<User>, DbError> {
		let sql = format!(
			"SELECT {USER_COLUMNS} FROM \"user\" WHERE id = ?{}",
			filter_clause(filter)
		);

		let row = sqlx::query(&sql)
			.bind(id.get())
			.fetch_optional(self.conn())
			.await?;

		row.map(|r| parse_user_row(&r)).transpose()
	}

	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	async fn update_user(&mut self, user: &User, filter: AccountFilter) -> Result<(), DbError> {
		let sql = format!(
			r#"
			UPDATE "user"
			SET name = ?, login = ?, email = ?, is_admin = ?, org_id = ?,
				salt = ?, rands = ?, password = ?, updated = ?
			WHERE id = ?{}
			"#,
			filter_clause(filter)
		);

		let result = sqlx::query(&sql)
			.bind(&user.name)
			.bind(&user.login)
			.bind(&user.email)
			.bind(user.is_admin as i32)
			.bind(user.org_id.get())
			.bind(&user.salt)
			.bind(&user.rands)
			.bind(&user.password)
			.bind(user.updated.to_rfc3339())
			.bind(user.id.get())
			.execute(self.conn())
			.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("user {}", user.id)));
		}

		tracing::debug!(user_id = %user.id, "user updated");
		Ok(())
	}
}

fn parse_user_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let is_admin: i32 = row.get("is_admin");
	let is_service_account: i32 = row.get("is_service_account");
	let created: String = row.get("created");
	let updated: String = row.get("updated");
	let last_seen_at: String = row.get("last_seen_at");

	Ok(User {
		id: UserId::new(row.get("id")),
		name: row.get("name"),
		login: row.get("login"),
		email: row.get("email"),
		is_admin: is_admin != 0,
		is_service_account: is_service_account != 0,
		org_id: OrgId::new(row.get("org_id")),
		salt: row.get("salt"),
		rands: row.get("rands"),
		password: row.get("password"),
		created: parse_timestamp(&created, "created")?,
		updated: parse_timestamp(&updated, "updated")?,
		last_seen_at: parse_timestamp(&last_seen_at, "last_seen_at")?,
	})
}
