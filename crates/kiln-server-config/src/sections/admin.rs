// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credentials for the well-known administrative account.

use kiln_server_auth::Password;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct AdminConfig {
	pub user: String,
	pub email: String,
	pub password: Password,
}

impl Default for AdminConfig {
	fn default() -> Self {
		Self {
			user: "admin".to_string(),
			email: "admin@localhost".to_string(),
			password: Password::new("admin"),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfigLayer {
	#[serde(default)]
	pub user: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub password: Option<Password>,
}

impl AdminConfigLayer {
	pub fn merge(&mut self, other: AdminConfigLayer) {
		if other.user.is_some() {
			self.user = other.user;
		}
		if other.email.is_some() {
			self.email = other.email;
		}
		if other.password.is_some() {
			self.password = other.password;
		}
	}

	pub fn finalize(self) -> AdminConfig {
		let defaults = AdminConfig::default();
		AdminConfig {
			user: self.user.unwrap_or(defaults.user),
			email: self.email.unwrap_or(defaults.email),
			password: self.password.unwrap_or(defaults.password),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = AdminConfigLayer::default().finalize();
		assert_eq!(config.user, "admin");
		assert_eq!(config.email, "admin@localhost");
		assert_eq!(config.password.expose(), "admin");
	}

	#[test]
	fn test_password_is_redacted_in_debug() {
		let config = AdminConfigLayer {
			password: Some(Password::new("hunter2")),
			..Default::default()
		}
		.finalize();
		assert!(!format!("{config:?}").contains("hunter2"));
	}
}
