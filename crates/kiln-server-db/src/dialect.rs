// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQL dialect helpers for identifier quoting and boolean literals.

/// Renders dialect-specific SQL fragments.
pub trait Dialect: Send + Sync {
	/// Quote an identifier so reserved words (such as `user`) are safe to use.
	fn quote(&self, ident: &str) -> String;

	/// Render a boolean literal.
	fn boolean_str(&self, value: bool) -> &'static str;
}

/// SQLite: double-quoted identifiers, integer booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
	fn quote(&self, ident: &str) -> String {
		format!("\"{}\"", ident.replace('"', "\"\""))
	}

	fn boolean_str(&self, value: bool) -> &'static str {
		if value {
			"1"
		} else {
			"0"
		}
	}
}

/// Predicate excluding service-account rows from the `user` table.
pub fn not_service_account_filter(dialect: &dyn Dialect) -> String {
	format!(
		"{}.is_service_account = {}",
		dialect.quote("user"),
		dialect.boolean_str(false)
	)
}
