// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity types and credential issuance for Kiln.
//!
//! This crate holds the entities shared by the storage and provisioning layers:
//! - [`User`] and [`NewUser`] - user accounts and the row built before insert
//! - [`Organization`] and [`OrgMembership`] - organizations and role links
//! - [`OrgRole`] plus the `i64` id newtypes in [`types`]
//! - [`CredentialIssuer`] - salt/token generation and password encoding

pub(crate) mod argon2_config;
pub mod credentials;
pub mod org;
pub mod types;
pub mod user;

pub use credentials::{
	Argon2CredentialIssuer, CredentialError, CredentialIssuer, Password, TOKEN_LENGTH,
};
pub use org::{NewOrganization, OrgMembership, Organization, MAIN_ORG_ID, MAIN_ORG_NAME};
pub use types::{OrgId, OrgRole, UserId};
pub use user::{never_seen, NewUser, User, DEFAULT_ADMIN_USER_ID};
