// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization and membership storage.
//!
//! Implements [`OrgStore`] and [`MembershipStore`] on [`UnitOfWork`]. Ids are
//! SQLite integer row ids; timestamps are stored as RFC 3339 text.

use async_trait::async_trait;
use kiln_server_auth::{NewOrganization, OrgId, OrgMembership, OrgRole, Organization, UserId};
use sqlx::Row;

use crate::error::DbError;
use crate::parse_timestamp;
use crate::store::{MembershipStore, OrgStore};
use crate::uow::UnitOfWork;

#[async_trait]
impl OrgStore for UnitOfWork {
	/// Get an organization by ID.
	///
	/// # Returns
	/// `None` if no organization exists with this ID.
	#[tracing::instrument(skip(self), fields(org_id = %id))]
	async fn get_org_by_id(&mut self, id: OrgId) -> Result<Option<Organization>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, name, created, updated
			FROM org
			WHERE id = ?
			"#,
		)
		.bind(id.get())
		.fetch_optional(self.conn())
		.await?;

		row.map(|r| parse_org_row(&r)).transpose()
	}

	/// Create an organization with a database-assigned id.
	///
	/// # Errors
	/// Returns `DbError::Sqlx` if insert fails (e.g., duplicate name).
	#[tracing::instrument(skip(self, org), fields(name = %org.name))]
	async fn insert_org(&mut self, org: NewOrganization) -> Result<Organization, DbError> {
		let result = sqlx::query(
			r#"
			INSERT INTO org (name, created, updated)
			VALUES (?, ?, ?)
			"#,
		)
		.bind(&org.name)
		.bind(org.created.to_rfc3339())
		.bind(org.updated.to_rfc3339())
		.execute(self.conn())
		.await?;

		let org = org.with_id(OrgId::new(result.last_insert_rowid()));
		tracing::debug!(org_id = %org.id, name = %org.name, "organization inserted");
		Ok(org)
	}

	/// Create an organization with an explicit id.
	///
	/// # Database Constraints
	/// - `id` must be unique
	/// - `name` must be unique
	#[tracing::instrument(skip(self, org), fields(org_id = %id, name = %org.name))]
	async fn insert_org_with_id(
		&mut self,
		id: OrgId,
		org: NewOrganization,
	) -> Result<Organization, DbError> {
		sqlx::query(
			r#"
			INSERT INTO org (id, name, created, updated)
			VALUES (?, ?, ?, ?)
			"#,
		)
		.bind(id.get())
		.bind(&org.name)
		.bind(org.created.to_rfc3339())
		.bind(org.updated.to_rfc3339())
		.execute(self.conn())
		.await?;

		tracing::debug!(org_id = %id, name = %org.name, "organization inserted with explicit id");
		Ok(org.with_id(id))
	}
}

#[async_trait]
impl MembershipStore for UnitOfWork {
	/// Add a user to an organization.
	///
	/// # Database Constraints
	/// - (`org_id`, `user_id`) must be unique
	/// - `org_id` must reference an existing organization
	/// - `user_id` must reference an existing user
	#[tracing::instrument(skip(self, membership), fields(org_id = %membership.org_id, user_id = %membership.user_id, role = %membership.role))]
	async fn insert_membership(&mut self, membership: &OrgMembership) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO org_user (org_id, user_id, role, created, updated)
			VALUES (?, ?, ?, ?, ?)
			"#,
		)
		.bind(membership.org_id.get())
		.bind(membership.user_id.get())
		.bind(membership.role.as_str())
		.bind(membership.created.to_rfc3339())
		.bind(membership.updated.to_rfc3339())
		.execute(self.conn())
		.await?;

		tracing::debug!(
			org_id = %membership.org_id,
			user_id = %membership.user_id,
			role = %membership.role,
			"member added to organization"
		);
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(org_id = %org_id, user_id = %user_id))]
	async fn get_membership(
		&mut self,
		org_id: OrgId,
		user_id: UserId,
	) -> Result<Option<OrgMembership>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT org_id, user_id, role, created, updated
			FROM org_user
			WHERE org_id = ? AND user_id = ?
			"#,
		)
		.bind(org_id.get())
		.bind(user_id.get())
		.fetch_optional(self.conn())
		.await?;

		row.map(|r| parse_membership_row(&r)).transpose()
	}
}

fn parse_org_row(row: &sqlx::sqlite::SqliteRow) -> Result<Organization, DbError> {
	let created: String = row.get("created");
	let updated: String = row.get("updated");

	Ok(Organization {
		id: OrgId::new(row.get("id")),
		name: row.get("name"),
		created: parse_timestamp(&created, "created")?,
		updated: parse_timestamp(&updated, "updated")?,
	})
}

fn parse_membership_row(row: &sqlx::sqlite::SqliteRow) -> Result<OrgMembership, DbError> {
	let role: String = row.get("role");
	let created: String = row.get("created");
	let updated: String = row.get("updated");

	Ok(OrgMembership {
		org_id: OrgId::new(row.get("org_id")),
		user_id: UserId::new(row.get("user_id")),
		role: OrgRole::from(role),
		created: parse_timestamp(&created, "created")?,
		updated: parse_timestamp(&updated, "updated")?,
	})
}
