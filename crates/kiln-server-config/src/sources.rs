// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use kiln_server_auth::Password;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	AdminConfigLayer, DatabaseConfigLayer, LoggingConfigLayer, UsersConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/kiln/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: KILN_SERVER_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			database: Some(load_database_from_env()?),
			users: Some(load_users_from_env()?),
			admin: Some(load_admin_from_env()?),
			logging: Some(load_logging_from_env()?),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_i64(name: &str) -> Result<Option<i64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid i64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

/// Read a secret from `NAME`, or from the file named by `NAME_FILE`.
///
/// Setting both is an error. File contents have trailing newlines removed.
pub fn load_secret_env(name: &str) -> Result<Option<Password>, ConfigError> {
	let file_var = format!("{name}_FILE");
	match (env_var(name), env_var(&file_var)) {
		(Some(_), Some(_)) => Err(ConfigError::Secret(format!(
			"both {name} and {file_var} are set"
		))),
		(Some(value), None) => Ok(Some(Password::new(value))),
		(None, Some(path)) => {
			let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
				path: PathBuf::from(&path),
				source: e,
			})?;
			Ok(Some(Password::new(content.trim_end_matches(['\r', '\n']))))
		}
		(None, None) => Ok(None),
	}
}

fn load_database_from_env() -> Result<DatabaseConfigLayer, ConfigError> {
	Ok(DatabaseConfigLayer {
		url: env_var("KILN_SERVER_DATABASE_URL"),
	})
}

fn load_users_from_env() -> Result<UsersConfigLayer, ConfigError> {
	Ok(UsersConfigLayer {
		auto_assign_org: env_bool("KILN_SERVER_AUTO_ASSIGN_ORG"),
		auto_assign_org_id: env_i64("KILN_SERVER_AUTO_ASSIGN_ORG_ID")?,
		auto_assign_org_role: env_var("KILN_SERVER_AUTO_ASSIGN_ORG_ROLE"),
		case_insensitive_login: env_bool("KILN_SERVER_CASE_INSENSITIVE_LOGIN"),
	})
}

fn load_admin_from_env() -> Result<AdminConfigLayer, ConfigError> {
	Ok(AdminConfigLayer {
		user: env_var("KILN_SERVER_ADMIN_USER"),
		email: env_var("KILN_SERVER_ADMIN_EMAIL"),
		password: load_secret_env("KILN_SERVER_ADMIN_PASSWORD")?,
	})
}

fn load_logging_from_env() -> Result<LoggingConfigLayer, ConfigError> {
	Ok(LoggingConfigLayer {
		level: env_var("KILN_SERVER_LOG_LEVEL"),
	})
}
