// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization and membership entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{OrgId, OrgRole, UserId};

/// Id reserved for the first organization of an installation.
pub const MAIN_ORG_ID: OrgId = OrgId::new(1);

/// Name given to the main organization when it is bootstrapped.
pub const MAIN_ORG_NAME: &str = "Main Org.";

/// An organization users belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
	pub id: OrgId,
	pub name: String,
	pub created: DateTime<Utc>,
	pub updated: DateTime<Utc>,
}

/// Organization values prior to insertion, when no id has been assigned yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
	pub name: String,
	pub created: DateTime<Utc>,
	pub updated: DateTime<Utc>,
}

impl NewOrganization {
	pub fn new(name: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			name: name.into(),
			created: now,
			updated: now,
		}
	}

	/// Attach the id assigned by the store.
	pub fn with_id(self, id: OrgId) -> Organization {
		Organization {
			id,
			name: self.name,
			created: self.created,
			updated: self.updated,
		}
	}
}

/// A user's role within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMembership {
	pub org_id: OrgId,
	pub user_id: UserId,
	pub role: OrgRole,
	pub created: DateTime<Utc>,
	pub updated: DateTime<Utc>,
}

impl OrgMembership {
	pub fn new(org_id: OrgId, user_id: UserId, role: OrgRole) -> Self {
		let now = Utc::now();
		Self {
			org_id,
			user_id,
			role,
			created: now,
			updated: now,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_org_timestamps_match() {
		let org = NewOrganization::new("Acme");
		assert_eq!(org.created, org.updated);
		let org = org.with_id(OrgId::new(5));
		assert_eq!(org.id, OrgId::new(5));
		assert_eq!(org.name, "Acme");
	}

	#[test]
	fn test_main_org_constants() {
		assert_eq!(MAIN_ORG_ID.get(), 1);
		assert_eq!(MAIN_ORG_NAME, "Main Org.");
	}
}
