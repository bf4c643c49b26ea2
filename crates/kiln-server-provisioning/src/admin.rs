// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential reset for the well-known administrative account.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kiln_server_auth::{CredentialIssuer, Password, User, DEFAULT_ADMIN_USER_ID, TOKEN_LENGTH};
use kiln_server_db::{AccountFilter, TransactionContext};
use tracing::info;

use crate::error::ProvisioningError;

/// Replacement login, email and password for the admin account.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
	pub login: String,
	pub email: String,
	/// An empty password keeps the stored encoded password.
	pub password: Password,
}

/// Salt, secondary token and (optionally) encoded password issued for a reset.
struct IssuedCredentials {
	salt: String,
	rands: String,
	password: Option<String>,
}

impl AdminCredentials {
	/// Build the updated row from a freshly read one.
	fn apply(&self, current: &User, issued: IssuedCredentials, now: DateTime<Utc>) -> User {
		User {
			login: self.login.clone(),
			email: self.email.clone(),
			is_admin: true,
			salt: issued.salt,
			rands: issued.rands,
			password: issued.password.unwrap_or_else(|| current.password.clone()),
			updated: now,
			..current.clone()
		}
	}
}

pub struct AdminResetter {
	issuer: Arc<dyn CredentialIssuer>,
}

impl AdminResetter {
	pub fn new(issuer: Arc<dyn CredentialIssuer>) -> Self {
		Self { issuer }
	}

	/// Overwrite the admin account's login, email and credentials.
	///
	/// The salt and secondary token are always reissued. The password is
	/// re-encoded with the new salt only when `credentials.password` is
	/// non-empty; otherwise the stored encoded password is kept as is, which
	/// leaves it unverifiable against the new salt.
	///
	/// # Errors
	/// - `AdminNotFound` if row [`DEFAULT_ADMIN_USER_ID`] is missing or is a
	///   service account
	#[tracing::instrument(skip(self, ctx, credentials), fields(login = %credentials.login))]
	pub async fn reset_admin_credentials<C>(
		&self,
		ctx: &mut C,
		credentials: &AdminCredentials,
	) -> Result<User, ProvisioningError>
	where
		C: TransactionContext,
	{
		let current = ctx
			.get_user_by_id(DEFAULT_ADMIN_USER_ID, AccountFilter::ExcludeServiceAccounts)
			.await?
			.ok_or(ProvisioningError::AdminNotFound(DEFAULT_ADMIN_USER_ID))?;

		let issued = self.issue(&credentials.password)?;
		let updated = credentials.apply(&current, issued, Utc::now());

		ctx.update_user(&updated, AccountFilter::ExcludeServiceAccounts)
			.await?;
		info!(user_id = %updated.id, "admin credentials reset");
		Ok(updated)
	}

	fn issue(&self, password: &Password) -> Result<IssuedCredentials, ProvisioningError> {
		let salt = self.issuer.random_token(TOKEN_LENGTH)?;
		let rands = self.issuer.random_token(TOKEN_LENGTH)?;
		let password = if password.is_empty() {
			None
		} else {
			Some(self.issuer.encode_password(password.expose(), &salt)?)
		};
		Ok(IssuedCredentials {
			salt,
			rands,
			password,
		})
	}
}
