// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for identity and membership.
//!
//! - **ID newtypes**: Type-safe wrappers around the `i64` row ids used by the
//!   relational store ([`UserId`], [`OrgId`]) preventing accidental mixing
//! - **Organization roles**: [`OrgRole`], the role granted by a membership row
//!
//! All ID types implement transparent serde serialization (as plain integers).

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(i64);

		impl $name {
			/// Create a new ID from a raw row id.
			pub const fn new(id: i64) -> Self {
				Self(id)
			}

			/// Get the raw row id.
			pub const fn get(self) -> i64 {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<i64> for $name {
			fn from(id: i64) -> Self {
				Self(id)
			}
		}

		impl From<$name> for i64 {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(OrgId, "Unique identifier for an organization.");

// =============================================================================
// Organization Roles
// =============================================================================

/// Role granted to a user within an organization.
///
/// The built-in roles render as `Admin`, `Editor`, `Viewer` and `None`. Any other
/// name is kept verbatim as [`OrgRole::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrgRole {
	/// Manage members and settings.
	Admin,
	/// Create and modify content.
	Editor,
	/// Read-only access.
	Viewer,
	/// Member without a basic role.
	None,
	/// Role defined outside the built-in set.
	Custom(String),
}

impl OrgRole {
	/// Returns the built-in organization roles.
	pub fn builtin() -> [OrgRole; 4] {
		[OrgRole::Admin, OrgRole::Editor, OrgRole::Viewer, OrgRole::None]
	}

	pub fn as_str(&self) -> &str {
		match self {
			OrgRole::Admin => "Admin",
			OrgRole::Editor => "Editor",
			OrgRole::Viewer => "Viewer",
			OrgRole::None => "None",
			OrgRole::Custom(name) => name,
		}
	}

	pub fn is_builtin(&self) -> bool {
		!matches!(self, OrgRole::Custom(_))
	}
}

impl fmt::Display for OrgRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for OrgRole {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(OrgRole::from(s.to_string()))
	}
}

impl From<String> for OrgRole {
	fn from(s: String) -> Self {
		match s.as_str() {
			"Admin" => OrgRole::Admin,
			"Editor" => OrgRole::Editor,
			"Viewer" => OrgRole::Viewer,
			"None" => OrgRole::None,
			_ => OrgRole::Custom(s),
		}
	}
}

impl From<&str> for OrgRole {
	fn from(s: &str) -> Self {
		OrgRole::from(s.to_string())
	}
}

impl From<OrgRole> for String {
	fn from(role: OrgRole) -> Self {
		match role {
			OrgRole::Custom(name) => name,
			builtin => builtin.as_str().to_string(),
		}
	}
}
