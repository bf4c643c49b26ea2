// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use kiln_server_auth::{User, DEFAULT_ADMIN_USER_ID};
use kiln_server_config::AdminConfig;
use kiln_server_db::{AccountFilter, TransactionContext};
use tracing::{info, warn};

use crate::admin::{AdminCredentials, AdminResetter};
use crate::error::ProvisioningError;
use crate::normalize::NormalizedIdentity;
use crate::provisioner::UserProvisioner;
use crate::CreateUserRequest;

/// Make sure the well-known admin account exists with the configured credentials.
///
/// Resets the account when row [`DEFAULT_ADMIN_USER_ID`] exists. Otherwise the
/// admin is created as a global admin pinned to that id, unless an account
/// with the configured login or email already holds another id; that account
/// is returned untouched. Runs on the caller's transaction.
#[tracing::instrument(skip_all, fields(login = %admin.user))]
pub async fn ensure_admin<C>(
	ctx: &mut C,
	provisioner: &UserProvisioner,
	resetter: &AdminResetter,
	admin: &AdminConfig,
) -> Result<User, ProvisioningError>
where
	C: TransactionContext,
{
	let existing = ctx
		.get_user_by_id(DEFAULT_ADMIN_USER_ID, AccountFilter::Any)
		.await?;

	if existing.is_some() {
		let credentials = AdminCredentials {
			login: admin.user.clone(),
			email: admin.email.clone(),
			password: admin.password.clone(),
		};
		return resetter.reset_admin_credentials(ctx, &credentials).await;
	}

	let identity = NormalizedIdentity::new(
		&admin.user,
		&admin.email,
		provisioner.config().case_insensitive_login,
	);
	if let Some(user) = ctx.find_user_by_identity(identity.as_lookup()).await? {
		warn!(
			user_id = %user.id,
			"admin login or email belongs to another account, not resetting it"
		);
		return Ok(user);
	}

	info!("admin account missing, creating it");
	let request = CreateUserRequest {
		user_id: Some(DEFAULT_ADMIN_USER_ID),
		password: admin.password.clone(),
		is_admin: true,
		..CreateUserRequest::new(admin.user.clone(), admin.email.clone())
	};
	provisioner.create_user(ctx, request).await
}
