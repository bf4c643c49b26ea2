// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use kiln_server_auth::{
	Argon2CredentialIssuer, CredentialIssuer, NewOrganization, NewUser, OrgId, OrgMembership,
	Organization, User, UserId,
};
use kiln_server_config::UsersConfig;
use kiln_server_db::{
	AccountFilter, CommitHook, CommitHooks, DbError, MembershipStore, OrgStore, UserIdentity,
	UserStore,
};
use kiln_server_events::{EventBus, ProvisioningEvent};
use kiln_server_provisioning::{AdminResetter, UserProvisioner};
use tokio::sync::broadcast;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.try_init();
}

pub struct Harness {
	pub provisioner: UserProvisioner,
	pub resetter: AdminResetter,
	pub issuer: Arc<dyn CredentialIssuer>,
	pub events: broadcast::Receiver<ProvisioningEvent>,
}

pub fn harness(config: UsersConfig) -> Harness {
	init_tracing();
	let bus = EventBus::default();
	let events = bus.subscribe();
	let issuer: Arc<dyn CredentialIssuer> = Arc::new(Argon2CredentialIssuer::new());
	Harness {
		provisioner: UserProvisioner::new(config, issuer.clone(), bus),
		resetter: AdminResetter::new(issuer.clone()),
		issuer,
		events,
	}
}

/// Everything published so far, without waiting.
pub fn drain(rx: &mut broadcast::Receiver<ProvisioningEvent>) -> Vec<ProvisioningEvent> {
	let mut events = Vec::new();
	while let Ok(event) = rx.try_recv() {
		events.push(event);
	}
	events
}

/// Delegates to the wrapped context but reports `hidden` as missing on its first
/// lookup, the way a read that raced a concurrent peer's commit would.
pub struct StaleRead<'a, C> {
	inner: &'a mut C,
	hidden: Option<OrgId>,
}

impl<'a, C> StaleRead<'a, C> {
	pub fn new(inner: &'a mut C, hidden: OrgId) -> Self {
		Self {
			inner,
			hidden: Some(hidden),
		}
	}
}

#[async_trait]
impl<'a, C> OrgStore for StaleRead<'a, C>
where
	C: OrgStore + Send,
{
	async fn get_org_by_id(&mut self, id: OrgId) -> Result<Option<Organization>, DbError> {
		if self.hidden == Some(id) {
			self.hidden = None;
			return Ok(None);
		}
		self.inner.get_org_by_id(id).await
	}

	async fn insert_org(&mut self, org: NewOrganization) -> Result<Organization, DbError> {
		self.inner.insert_org(org).await
	}

	async fn insert_org_with_id(
		&mut self,
		id: OrgId,
		org: NewOrganization,
	) -> Result<Organization, DbError> {
		self.inner.insert_org_with_id(id, org).await
	}
}

#[async_trait]
impl<'a, C> UserStore for StaleRead<'a, C>
where
	C: UserStore + Send,
{
	async fn find_user_by_identity(
		&mut self,
		identity: UserIdentity<'_>,
	) -> Result<Option<User>, DbError> {
		self.inner.find_user_by_identity(identity).await
	}

	async fn insert_user(&mut self, user: NewUser) -> Result<User, DbError> {
		self.inner.insert_user(user).await
	}

	async fn get_user_by_id(
		&mut self,
		id: UserId,
		filter: AccountFilter,
	) -> Result<Option<User>, DbError> {
		self.inner.get_user_by_id(id, filter).await
	}

	async fn update_user(&mut self, user: &User, filter: AccountFilter) -> Result<(), DbError> {
		self.inner.update_user(user, filter).await
	}
}

#[async_trait]
impl<'a, C> MembershipStore for StaleRead<'a, C>
where
	C: MembershipStore + Send,
{
	async fn insert_membership(&mut self, membership: &OrgMembership) -> Result<(), DbError> {
		self.inner.insert_membership(membership).await
	}

	async fn get_membership(
		&mut self,
		org_id: OrgId,
		user_id: UserId,
	) -> Result<Option<OrgMembership>, DbError> {
		self.inner.get_membership(org_id, user_id).await
	}
}

impl<'a, C: CommitHooks> CommitHooks for StaleRead<'a, C> {
	fn on_commit(&mut self, hook: CommitHook) {
		self.inner.on_commit(hook);
	}
}

/// Delegates to the wrapped context but fails every membership insert.
pub struct FailingMembership<'a, C> {
	pub inner: &'a mut C,
}

#[async_trait]
impl<'a, C> OrgStore for FailingMembership<'a, C>
where
	C: OrgStore + Send,
{
	async fn get_org_by_id(&mut self, id: OrgId) -> Result<Option<Organization>, DbError> {
		self.inner.get_org_by_id(id).await
	}

	async fn insert_org(&mut self, org: NewOrganization) -> Result<Organization, DbError> {
		self.inner.insert_org(org).await
	}

	async fn insert_org_with_id(
		&mut self,
		id: OrgId,
		org: NewOrganization,
	) -> Result<Organization, DbError> {
		self.inner.insert_org_with_id(id, org).await
	}
}

#[async_trait]
impl<'a, C> UserStore for FailingMembership<'a, C>
where
	C: UserStore + Send,
{
	async fn find_user_by_identity(
		&mut self,
		identity: UserIdentity<'_>,
	) -> Result<Option<User>, DbError> {
		self.inner.find_user_by_identity(identity).await
	}

	async fn insert_user(&mut self, user: NewUser) -> Result<User, DbError> {
		self.inner.insert_user(user).await
	}

	async fn get_user_by_id(
		&mut self,
		id: UserId,
		filter: AccountFilter,
	) -> Result<Option<User>, DbError> {
		self.inner.get_user_by_id(id, filter).await
	}

	async fn update_user(&mut self, user: &User, filter: AccountFilter) -> Result<(), DbError> {
		self.inner.update_user(user, filter).await
	}
}

#[async_trait]
impl<'a, C> MembershipStore for FailingMembership<'a, C>
where
	C: MembershipStore + Send,
{
	async fn insert_membership(&mut self, _membership: &OrgMembership) -> Result<(), DbError> {
		Err(DbError::Internal("membership insert failed".to_string()))
	}

	async fn get_membership(
		&mut self,
		org_id: OrgId,
		user_id: UserId,
	) -> Result<Option<OrgMembership>, DbError> {
		self.inner.get_membership(org_id, user_id).await
	}
}

impl<'a, C: CommitHooks> CommitHooks for FailingMembership<'a, C> {
	fn on_commit(&mut self, hook: CommitHook) {
		self.inner.on_commit(hook);
	}
}
