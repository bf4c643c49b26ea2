// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User account entities.
//!
//! - [`User`] - a persisted account row
//! - [`NewUser`] - the row built by provisioning before the store assigns an id

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{OrgId, UserId};

/// Row id of the administrative account created when an installation is bootstrapped.
pub const DEFAULT_ADMIN_USER_ID: UserId = UserId::new(1);

/// How far back `last_seen_at` is placed for accounts that have never been seen.
const NEVER_SEEN_YEARS: u32 = 10;

/// A user account.
///
/// `salt`, `rands` and `password` are credential material and are skipped when
/// the user is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub name: String,
	pub login: String,
	pub email: String,
	pub is_admin: bool,
	pub is_service_account: bool,
	pub org_id: OrgId,
	#[serde(skip)]
	pub salt: String,
	#[serde(skip)]
	pub rands: String,
	#[serde(skip)]
	pub password: String,
	pub created: DateTime<Utc>,
	pub updated: DateTime<Utc>,
	pub last_seen_at: DateTime<Utc>,
}

/// User values prior to insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
	/// Row id to insert with; the store assigns one when `None`.
	pub id: Option<UserId>,
	pub name: String,
	pub login: String,
	pub email: String,
	pub is_admin: bool,
	pub org_id: OrgId,
	pub salt: String,
	pub rands: String,
	pub password: String,
	pub created: DateTime<Utc>,
	pub updated: DateTime<Utc>,
	pub last_seen_at: DateTime<Utc>,
}

impl NewUser {
	/// Attach the id assigned by the store.
	pub fn with_id(self, id: UserId) -> User {
		User {
			id,
			name: self.name,
			login: self.login,
			email: self.email,
			is_admin: self.is_admin,
			is_service_account: false,
			org_id: self.org_id,
			salt: self.salt,
			rands: self.rands,
			password: self.password,
			created: self.created,
			updated: self.updated,
			last_seen_at: self.last_seen_at,
		}
	}
}

/// Sentinel `last_seen_at` for an account created at `now`.
///
/// New accounts have not been seen yet; the column is not nullable, so they are
/// stamped ten years in the past instead.
pub fn never_seen(now: DateTime<Utc>) -> DateTime<Utc> {
	now.checked_sub_months(Months::new(NEVER_SEEN_YEARS * 12))
		.unwrap_or(DateTime::<Utc>::MIN_UTC)
}
