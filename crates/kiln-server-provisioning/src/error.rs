// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use kiln_server_auth::{CredentialError, OrgId, UserId};
use kiln_server_db::DbError;

/// Errors that can occur during user provisioning.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("organization not found: {0}")]
	OrgNotFound(OrgId),

	#[error("user already exists")]
	UserAlreadyExists,

	#[error("configuration error: {0}")]
	Configuration(String),

	#[error("unable to find admin user with id {0}")]
	AdminNotFound(UserId),

	#[error("storage error: {0}")]
	Storage(#[from] DbError),

	#[error("credential error: {0}")]
	Credential(#[from] CredentialError),
}

impl ProvisioningError {
	/// True when the storage layer rejected a write on a uniqueness constraint.
	pub fn is_unique_violation(&self) -> bool {
		matches!(self, ProvisioningError::Storage(e) if e.is_unique_violation())
	}
}
