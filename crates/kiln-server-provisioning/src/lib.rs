// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User and organization provisioning for Kiln server.
//!
//! - [`UserProvisioner`] creates a user, its organization when needed, and its
//!   membership in one transaction
//! - [`OrgResolver`] decides which organization a new user joins
//! - [`AdminResetter`] reissues credentials for the well-known admin account
//! - [`ensure_admin`] creates or resets that account at startup
//!
//! Every operation runs on a caller-owned [`kiln_server_db::TransactionContext`].
//! Events are registered as commit hooks and are only published once the
//! caller commits.

pub mod admin;
pub mod bootstrap;
pub mod error;
pub mod normalize;
pub mod org_resolver;
pub mod provisioner;

pub use admin::{AdminCredentials, AdminResetter};
pub use bootstrap::ensure_admin;
pub use error::ProvisioningError;
pub use normalize::NormalizedIdentity;
pub use org_resolver::{OrgRequest, OrgResolver};
pub use provisioner::UserProvisioner;

use kiln_server_auth::{OrgId, Password, UserId};

/// A request to create one user account.
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
	/// Fixed row id for the account. Assigned by the store when `None`.
	pub user_id: Option<UserId>,
	pub login: String,
	/// Falls back to `login` when empty.
	pub email: String,
	pub name: Option<String>,
	/// Existing organization to join. Only honored when auto-assignment is enabled.
	pub org_id: Option<OrgId>,
	/// Name for a newly created organization when auto-assignment is disabled.
	pub org_name: Option<String>,
	/// Empty means the account has no password.
	pub password: Password,
	pub is_admin: bool,
	/// Overrides the configured auto-assign role for non-admin users.
	pub default_org_role: Option<String>,
}

impl CreateUserRequest {
	pub fn new(login: impl Into<String>, email: impl Into<String>) -> Self {
		Self {
			login: login.into(),
			email: email.into(),
			..Default::default()
		}
	}
}
