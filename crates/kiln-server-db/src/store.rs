// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transaction-scoped store interfaces used by provisioning.
//!
//! Every method runs on the caller's transaction, so reads observe earlier
//! writes of the same unit of work and nothing becomes visible to other
//! connections until the unit of work commits.

use async_trait::async_trait;
use kiln_server_auth::{
	NewOrganization, NewUser, OrgId, OrgMembership, Organization, User, UserId,
};

use crate::error::DbError;

/// Callback run once the enclosing transaction has committed.
pub type CommitHook = Box<dyn FnOnce() + Send + 'static>;

/// Registry of commit-deferred callbacks.
pub trait CommitHooks {
	/// Register `hook` to run after a successful commit.
	///
	/// Hooks run in registration order and are discarded on rollback.
	fn on_commit(&mut self, hook: CommitHook);
}

/// Which account rows a user lookup or update may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountFilter {
	Any,
	/// Only rows with `is_service_account = false`.
	ExcludeServiceAccounts,
}

/// Login/email pair used for duplicate detection.
#[derive(Debug, Clone, Copy)]
pub struct UserIdentity<'a> {
	pub login: &'a str,
	pub email: &'a str,
	/// Compare with `LOWER()` on both sides.
	pub case_insensitive: bool,
}

#[async_trait]
pub trait OrgStore: Send {
	async fn get_org_by_id(&mut self, id: OrgId) -> Result<Option<Organization>, DbError>;

	/// Insert with an id assigned by the database.
	async fn insert_org(&mut self, org: NewOrganization) -> Result<Organization, DbError>;

	/// Insert with a caller-chosen id. Fails with a unique violation if the id is taken.
	async fn insert_org_with_id(
		&mut self,
		id: OrgId,
		org: NewOrganization,
	) -> Result<Organization, DbError>;
}

#[async_trait]
pub trait UserStore: Send {
	/// Find a user whose email or login matches the identity.
	async fn find_user_by_identity(
		&mut self,
		identity: UserIdentity<'_>,
	) -> Result<Option<User>, DbError>;

	async fn insert_user(&mut self, user: NewUser) -> Result<User, DbError>;

	async fn get_user_by_id(
		&mut self,
		id: UserId,
		filter: AccountFilter,
	) -> Result<Option<User>, DbError>;

	/// Overwrite the row identified by `user.id`.
	///
	/// Returns `DbError::NotFound` if no row matches the id and filter.
	async fn update_user(&mut self, user: &User, filter: AccountFilter) -> Result<(), DbError>;
}

#[async_trait]
pub trait MembershipStore: Send {
	async fn insert_membership(&mut self, membership: &OrgMembership) -> Result<(), DbError>;

	async fn get_membership(
		&mut self,
		org_id: OrgId,
		user_id: UserId,
	) -> Result<Option<OrgMembership>, DbError>;
}

/// Everything provisioning needs from an open transaction.
pub trait TransactionContext: OrgStore + UserStore + MembershipStore + CommitHooks + Send {}

impl<T> TransactionContext for T where T: OrgStore + UserStore + MembershipStore + CommitHooks + Send {}
