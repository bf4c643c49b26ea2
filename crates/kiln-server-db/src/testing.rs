// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Test fixtures: in-memory pools with the production schema applied.

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::pool::run_migrations;

/// Single-connection in-memory pool with migrations applied.
///
/// The pool never recycles its connection, since closing it would discard the
/// in-memory database.
pub async fn create_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str(":memory:")
		.unwrap()
		.foreign_keys(true);

	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect_with(options)
		.await
		.expect("Failed to create test pool");

	run_migrations(&pool).await.unwrap();
	pool
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
	let sql = format!("SELECT COUNT(*) FROM \"{table}\"");
	let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(pool).await.unwrap();
	count
}

pub async fn insert_org_row(pool: &SqlitePool, id: i64, name: &str) {
	let now = Utc::now().to_rfc3339();
	sqlx::query("INSERT INTO org (id, name, created, updated) VALUES (?, ?, ?, ?)")
		.bind(id)
		.bind(name)
		.bind(&now)
		.bind(&now)
		.execute(pool)
		.await
		.unwrap();
}

/// Insert a bare user row, bypassing provisioning.
pub async fn insert_user_row(
	pool: &SqlitePool,
	id: i64,
	login: &str,
	org_id: i64,
	is_service_account: bool,
) {
	let now = Utc::now().to_rfc3339();
	sqlx::query(
		r#"
		INSERT INTO "user" (id, login, email, is_service_account, org_id, salt, rands, password, created, updated, last_seen_at)
		VALUES (?, ?, ?, ?, ?, 'saltsalt00', 'randsrands', '', ?, ?, ?)
		"#,
	)
	.bind(id)
	.bind(login)
	.bind(format!("{login}@example.com"))
	.bind(is_service_account as i32)
	.bind(org_id)
	.bind(&now)
	.bind(&now)
	.bind(&now)
	.execute(pool)
	.await
	.unwrap();
}
