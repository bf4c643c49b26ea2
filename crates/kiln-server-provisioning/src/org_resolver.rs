// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolution of the organization a new user joins.
//!
//! With auto-assignment enabled, new users land in one well-known organization.
//! When that organization is the main org and does not exist yet, it is created
//! with its fixed id. A transaction whose lookup missed a peer's committed row
//! sees a unique violation on that insert; it re-reads the row and uses it.

use kiln_server_auth::{NewOrganization, OrgId, Organization, MAIN_ORG_ID, MAIN_ORG_NAME};
use kiln_server_db::TransactionContext;
use kiln_server_events::{EventBus, ProvisioningEvent};
use tracing::{debug, error, info};

use crate::error::ProvisioningError;

/// Inputs to [`OrgResolver::resolve_or_create_org`].
#[derive(Debug, Clone, Copy)]
pub struct OrgRequest<'a> {
	/// Organization explicitly requested by the caller.
	pub requested_org_id: Option<OrgId>,
	pub requested_org_name: Option<&'a str>,
	pub auto_assign: bool,
	pub auto_assign_org_id: OrgId,
	/// Name used for a per-user organization when no name was requested.
	pub fallback_name: &'a str,
}

impl OrgRequest<'_> {
	fn org_name(&self) -> &str {
		self.requested_org_name
			.filter(|name| !name.is_empty())
			.unwrap_or(self.fallback_name)
	}
}

#[derive(Debug, Clone)]
pub struct OrgResolver {
	events: EventBus,
}

impl OrgResolver {
	pub fn new(events: EventBus) -> Self {
		Self { events }
	}

	/// Resolve the organization id for a new user, creating the organization if
	/// policy calls for it.
	///
	/// # Arguments
	/// * `ctx` - The caller's open transaction
	/// * `request` - Requested org fields and the auto-assignment policy
	///
	/// # Errors
	/// - `OrgNotFound` if an explicitly requested organization does not exist
	/// - `Configuration` if the auto-assign organization is missing and is not
	///   the main org
	/// - `Storage` for any other storage failure, including a name collision
	///   when auto-assignment is disabled
	#[tracing::instrument(
		skip(self, ctx, request),
		fields(auto_assign = request.auto_assign, requested_org_id = ?request.requested_org_id)
	)]
	pub async fn resolve_or_create_org<C>(
		&self,
		ctx: &mut C,
		request: OrgRequest<'_>,
	) -> Result<OrgId, ProvisioningError>
	where
		C: TransactionContext,
	{
		if !request.auto_assign {
			let org = ctx.insert_org(NewOrganization::new(request.org_name())).await?;
			info!(org_id = %org.id, name = %org.name, "organization created");
			self.publish_on_commit(ctx, &org);
			return Ok(org.id);
		}

		if let Some(org_id) = request.requested_org_id {
			return match ctx.get_org_by_id(org_id).await? {
				Some(org) => Ok(org.id),
				None => Err(ProvisioningError::OrgNotFound(org_id)),
			};
		}

		let target = request.auto_assign_org_id;
		if let Some(org) = ctx.get_org_by_id(target).await? {
			return Ok(org.id);
		}
		debug!(org_id = %target, "auto-assign organization not found");

		if target != MAIN_ORG_ID {
			error!(org_id = %target, "auto-assign organization does not exist");
			return Err(ProvisioningError::Configuration(format!(
				"auto-assign organization {target} does not exist"
			)));
		}

		match ctx
			.insert_org_with_id(target, NewOrganization::new(MAIN_ORG_NAME))
			.await
		{
			Ok(org) => {
				info!(org_id = %org.id, name = %org.name, "main organization created");
				self.publish_on_commit(ctx, &org);
				Ok(org.id)
			}
			Err(e) if e.is_unique_violation() => match ctx.get_org_by_id(target).await? {
				Some(org) => {
					info!(org_id = %org.id, "main organization created concurrently, using existing row");
					Ok(org.id)
				}
				None => Err(e.into()),
			},
			Err(e) => Err(e.into()),
		}
	}

	fn publish_on_commit<C: TransactionContext>(&self, ctx: &mut C, org: &Organization) {
		let event = ProvisioningEvent::org_created(org);
		let events = self.events.clone();
		ctx.on_commit(Box::new(move || events.publish(event)));
	}
}
