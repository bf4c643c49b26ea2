// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transactional user creation.

use std::sync::Arc;

use chrono::Utc;
use kiln_server_auth::{
	never_seen, CredentialIssuer, NewUser, OrgMembership, OrgRole, User, TOKEN_LENGTH,
};
use kiln_server_config::UsersConfig;
use kiln_server_db::TransactionContext;
use kiln_server_events::{EventBus, ProvisioningEvent};
use tracing::{debug, info};

use crate::error::ProvisioningError;
use crate::normalize::{fallback_org_name, NormalizedIdentity};
use crate::org_resolver::{OrgRequest, OrgResolver};
use crate::CreateUserRequest;

/// Creates user accounts together with their organization membership.
///
/// All writes happen on the caller's transaction. Nothing is rolled back here:
/// if a later step fails, the caller decides whether to roll back.
pub struct UserProvisioner {
	config: UsersConfig,
	issuer: Arc<dyn CredentialIssuer>,
	org_resolver: OrgResolver,
	events: EventBus,
}

impl UserProvisioner {
	pub fn new(config: UsersConfig, issuer: Arc<dyn CredentialIssuer>, events: EventBus) -> Self {
		Self {
			config,
			issuer,
			org_resolver: OrgResolver::new(events.clone()),
			events,
		}
	}

	pub fn config(&self) -> &UsersConfig {
		&self.config
	}

	/// Create a user, resolving or creating its organization first.
	///
	/// Registers `UserCreated` (and `OrgCreated` when an organization was
	/// created) to be published after the transaction commits.
	///
	/// # Errors
	/// - `UserAlreadyExists` if a user with the same login or email exists; no
	///   user or membership row is written
	/// - Any error from [`OrgResolver::resolve_or_create_org`], unchanged
	/// - `Storage` if the user or membership insert fails
	/// - `Credential` if salt generation or password encoding fails
	#[tracing::instrument(
		skip(self, ctx, request),
		fields(login = %request.login, is_admin = request.is_admin)
	)]
	pub async fn create_user<C>(
		&self,
		ctx: &mut C,
		request: CreateUserRequest,
	) -> Result<User, ProvisioningError>
	where
		C: TransactionContext,
	{
		let org_id = self
			.org_resolver
			.resolve_or_create_org(
				ctx,
				OrgRequest {
					requested_org_id: request.org_id,
					requested_org_name: request.org_name.as_deref(),
					auto_assign: self.config.auto_assign_org,
					auto_assign_org_id: self.config.auto_assign_org_id,
					fallback_name: fallback_org_name(&request.email, &request.login),
				},
			)
			.await?;

		let identity = NormalizedIdentity::new(
			&request.login,
			&request.email,
			self.config.case_insensitive_login,
		);

		if ctx.find_user_by_identity(identity.as_lookup()).await?.is_some() {
			debug!(login = %identity.login, "user already exists");
			return Err(ProvisioningError::UserAlreadyExists);
		}

		let now = Utc::now();
		let salt = self.issuer.random_token(TOKEN_LENGTH)?;
		let rands = self.issuer.random_token(TOKEN_LENGTH)?;
		let password = if request.password.is_empty() {
			String::new()
		} else {
			self.issuer.encode_password(request.password.expose(), &salt)?
		};

		let user = ctx
			.insert_user(NewUser {
				id: request.user_id,
				name: request.name.clone().unwrap_or_default(),
				login: identity.login,
				email: identity.email,
				is_admin: request.is_admin,
				org_id,
				salt,
				rands,
				password,
				created: now,
				updated: now,
				last_seen_at: never_seen(now),
			})
			.await?;
		info!(user_id = %user.id, org_id = %org_id, "user created");

		let event = ProvisioningEvent::user_created(&user);
		let events = self.events.clone();
		ctx.on_commit(Box::new(move || events.publish(event)));

		let role = self.membership_role(&request, user.is_admin);
		ctx.insert_membership(&OrgMembership::new(org_id, user.id, role.clone()))
			.await?;
		debug!(user_id = %user.id, org_id = %org_id, role = %role, "membership created");

		Ok(user)
	}

	/// Admin by default; auto-assigned non-admins get the request's role or the
	/// configured one.
	fn membership_role(&self, request: &CreateUserRequest, is_admin: bool) -> OrgRole {
		if !self.config.auto_assign_org || is_admin {
			return OrgRole::Admin;
		}

		match request.default_org_role.as_deref() {
			Some(role) if !role.is_empty() => OrgRole::from(role),
			_ => self.config.auto_assign_org_role.clone(),
		}
	}
}
