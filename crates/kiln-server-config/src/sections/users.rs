// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User provisioning policy.

use kiln_server_auth::{OrgId, OrgRole, MAIN_ORG_ID};
use serde::Deserialize;

/// Provisioning policy (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersConfig {
	/// Place new users into one well-known organization instead of creating one per user.
	pub auto_assign_org: bool,
	/// Target organization for auto-assignment.
	pub auto_assign_org_id: OrgId,
	/// Role granted to auto-assigned non-admin users.
	pub auto_assign_org_role: OrgRole,
	/// Match and store login/email lowercased.
	pub case_insensitive_login: bool,
}

impl Default for UsersConfig {
	fn default() -> Self {
		Self {
			auto_assign_org: true,
			auto_assign_org_id: MAIN_ORG_ID,
			auto_assign_org_role: OrgRole::Viewer,
			case_insensitive_login: false,
		}
	}
}

/// Provisioning policy layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersConfigLayer {
	#[serde(default)]
	pub auto_assign_org: Option<bool>,
	#[serde(default)]
	pub auto_assign_org_id: Option<i64>,
	#[serde(default)]
	pub auto_assign_org_role: Option<String>,
	#[serde(default)]
	pub case_insensitive_login: Option<bool>,
}

impl UsersConfigLayer {
	pub fn merge(&mut self, other: UsersConfigLayer) {
		if other.auto_assign_org.is_some() {
			self.auto_assign_org = other.auto_assign_org;
		}
		if other.auto_assign_org_id.is_some() {
			self.auto_assign_org_id = other.auto_assign_org_id;
		}
		if other.auto_assign_org_role.is_some() {
			self.auto_assign_org_role = other.auto_assign_org_role;
		}
		if other.case_insensitive_login.is_some() {
			self.case_insensitive_login = other.case_insensitive_login;
		}
	}

	pub fn finalize(self) -> UsersConfig {
		let defaults = UsersConfig::default();
		UsersConfig {
			auto_assign_org: self.auto_assign_org.unwrap_or(defaults.auto_assign_org),
			auto_assign_org_id: self
				.auto_assign_org_id
				.map(OrgId::new)
				.unwrap_or(defaults.auto_assign_org_id),
			auto_assign_org_role: self
				.auto_assign_org_role
				.map(OrgRole::from)
				.unwrap_or(defaults.auto_assign_org_role),
			case_insensitive_login: self
				.case_insensitive_login
				.unwrap_or(defaults.case_insensitive_login),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = UsersConfigLayer::default().finalize();
		assert!(config.auto_assign_org);
		assert_eq!(config.auto_assign_org_id, OrgId::new(1));
		assert_eq!(config.auto_assign_org_role, OrgRole::Viewer);
		assert!(!config.case_insensitive_login);
	}

	#[test]
	fn test_custom_role_is_kept() {
		let layer = UsersConfigLayer {
			auto_assign_org_role: Some("Auditor".to_string()),
			..Default::default()
		};
		assert_eq!(
			layer.finalize().auto_assign_org_role,
			OrgRole::Custom("Auditor".to_string())
		);
	}
}
