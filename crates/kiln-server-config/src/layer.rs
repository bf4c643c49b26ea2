// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use serde::Deserialize;

use crate::sections::{
	AdminConfigLayer, DatabaseConfigLayer, LoggingConfigLayer, UsersConfigLayer,
};

/// One source's view of the configuration. Absent sections and fields leave
/// lower-precedence values in place when merged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub users: Option<UsersConfigLayer>,
	#[serde(default)]
	pub admin: Option<AdminConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

fn merge_section<T>(target: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	match (target.as_mut(), other) {
		(Some(current), Some(incoming)) => merge(current, incoming),
		(None, Some(incoming)) => *target = Some(incoming),
		(_, None) => {}
	}
}

impl ServerConfigLayer {
	/// Overlay `other` onto `self`, field by field.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.users, other.users, UsersConfigLayer::merge);
		merge_section(&mut self.admin, other.admin, AdminConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_keeps_fields_not_overridden() {
		let mut base = ServerConfigLayer {
			users: Some(UsersConfigLayer {
				auto_assign_org: Some(false),
				auto_assign_org_role: Some("Editor".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let overlay = ServerConfigLayer {
			users: Some(UsersConfigLayer {
				auto_assign_org: Some(true),
				..Default::default()
			}),
			..Default::default()
		};

		base.merge(overlay);

		let users = base.users.unwrap();
		assert_eq!(users.auto_assign_org, Some(true));
		assert_eq!(users.auto_assign_org_role.as_deref(), Some("Editor"));
	}

	#[test]
	fn test_merge_fills_missing_section() {
		let mut base = ServerConfigLayer::default();
		base.merge(ServerConfigLayer {
			database: Some(DatabaseConfigLayer {
				url: Some("sqlite::memory:".to_string()),
			}),
			..Default::default()
		});
		assert_eq!(
			base.database.and_then(|d| d.url).as_deref(),
			Some("sqlite::memory:")
		);
	}

	#[test]
	fn test_parse_from_toml() {
		let layer: ServerConfigLayer = toml::from_str(
			r#"
			[users]
			auto_assign_org_id = 7
			case_insensitive_login = true

			[admin]
			user = "root"
			"#,
		)
		.unwrap();

		let users = layer.users.unwrap();
		assert_eq!(users.auto_assign_org_id, Some(7));
		assert_eq!(users.case_insensitive_login, Some(true));
		assert_eq!(layer.admin.unwrap().user.as_deref(), Some("root"));
		assert!(layer.database.is_none());
	}
}
