// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event payloads.

use chrono::{DateTime, Utc};
use kiln_server_auth::{OrgId, Organization, User, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity-created notifications, published once per committed creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProvisioningEvent {
	OrgCreated {
		id: OrgId,
		name: String,
		timestamp: DateTime<Utc>,
	},
	UserCreated {
		id: UserId,
		name: String,
		login: String,
		email: String,
		timestamp: DateTime<Utc>,
	},
}

/// Discriminant of a [`ProvisioningEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	OrgCreated,
	UserCreated,
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EventKind::OrgCreated => write!(f, "org_created"),
			EventKind::UserCreated => write!(f, "user_created"),
		}
	}
}

impl ProvisioningEvent {
	pub fn org_created(org: &Organization) -> Self {
		ProvisioningEvent::OrgCreated {
			id: org.id,
			name: org.name.clone(),
			timestamp: org.created,
		}
	}

	pub fn user_created(user: &User) -> Self {
		ProvisioningEvent::UserCreated {
			id: user.id,
			name: user.name.clone(),
			login: user.login.clone(),
			email: user.email.clone(),
			timestamp: user.created,
		}
	}

	pub fn kind(&self) -> EventKind {
		match self {
			ProvisioningEvent::OrgCreated { .. } => EventKind::OrgCreated,
			ProvisioningEvent::UserCreated { .. } => EventKind::UserCreated,
		}
	}

	pub fn timestamp(&self) -> DateTime<Utc> {
		match self {
			ProvisioningEvent::OrgCreated { timestamp, .. }
			| ProvisioningEvent::UserCreated { timestamp, .. } => *timestamp,
		}
	}
}
