// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Kiln server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`KILN_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use kiln_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("auto-assign org: {}", config.users.auto_assign_org_id);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{load_secret_env, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub database: DatabaseConfig,
	pub users: UsersConfig,
	pub admin: AdminConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`KILN_SERVER_*`)
/// 2. Config file (`/etc/kiln/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let database = layer.database.unwrap_or_default().finalize();
	let users = layer.users.unwrap_or_default().finalize();
	let admin = layer.admin.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&users, &admin)?;

	info!(
		database = %database.url,
		auto_assign_org = users.auto_assign_org,
		auto_assign_org_id = %users.auto_assign_org_id,
		auto_assign_org_role = %users.auto_assign_org_role,
		case_insensitive_login = users.case_insensitive_login,
		admin_user = %admin.user,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		database,
		users,
		admin,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(users: &UsersConfig, admin: &AdminConfig) -> Result<(), ConfigError> {
	if users.auto_assign_org_id.get() <= 0 {
		return Err(ConfigError::Validation(format!(
			"KILN_SERVER_AUTO_ASSIGN_ORG_ID must be positive, got {}",
			users.auto_assign_org_id
		)));
	}

	if users.auto_assign_org_role.as_str().trim().is_empty() {
		return Err(ConfigError::Validation(
			"KILN_SERVER_AUTO_ASSIGN_ORG_ROLE must not be empty".to_string(),
		));
	}

	if admin.user.trim().is_empty() {
		return Err(ConfigError::Validation(
			"KILN_SERVER_ADMIN_USER must not be empty".to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use kiln_server_auth::{OrgId, OrgRole};
	use proptest::prelude::*;
	use std::io::Write;

	#[test]
	fn test_defaults_validate() {
		let config = finalize(ServerConfigLayer::default()).unwrap();
		assert!(config.users.auto_assign_org);
		assert_eq!(config.users.auto_assign_org_id, OrgId::new(1));
		assert_eq!(config.logging.level, "info");
	}

	#[test]
	fn test_zero_org_id_rejected() {
		let users = UsersConfig {
			auto_assign_org_id: OrgId::new(0),
			..Default::default()
		};
		let result = validate_config(&users, &AdminConfig::default());
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_empty_role_rejected() {
		let users = UsersConfig {
			auto_assign_org_role: OrgRole::Custom(String::new()),
			..Default::default()
		};
		let result = validate_config(&users, &AdminConfig::default());
		assert!(result.unwrap_err().to_string().contains("ROLE"));
	}

	#[test]
	fn test_empty_admin_user_rejected() {
		let admin = AdminConfig {
			user: "  ".to_string(),
			..Default::default()
		};
		assert!(validate_config(&UsersConfig::default(), &admin).is_err());
	}

	#[test]
	fn test_load_config_with_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[users]\nauto_assign_org_role = \"Editor\"\n\n[admin]\nemail = \"ops@example.com\""
		)
		.unwrap();

		let config = load_config_with_file(file.path()).unwrap();
		assert_eq!(config.users.auto_assign_org_role, OrgRole::Editor);
		assert_eq!(config.admin.email, "ops@example.com");
	}

	proptest! {
		#[test]
		fn non_positive_org_ids_never_validate(id in i64::MIN..=0) {
			let users = UsersConfig {
				auto_assign_org_id: OrgId::new(id),
				..Default::default()
			};
			prop_assert!(validate_config(&users, &AdminConfig::default()).is_err());
		}
	}
}
