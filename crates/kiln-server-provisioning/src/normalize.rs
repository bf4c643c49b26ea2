// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Login/email normalization applied before duplicate detection and insert.

use kiln_server_db::UserIdentity;

/// Login and email as they will be checked and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIdentity {
	pub login: String,
	pub email: String,
	pub case_insensitive: bool,
}

impl NormalizedIdentity {
	/// Email falls back to login when empty. In case-insensitive mode both values
	/// are lowercased, so the stored row is lowercase too.
	pub fn new(login: &str, email: &str, case_insensitive: bool) -> Self {
		let email = if email.is_empty() { login } else { email };
		if case_insensitive {
			Self {
				login: login.to_lowercase(),
				email: email.to_lowercase(),
				case_insensitive,
			}
		} else {
			Self {
				login: login.to_string(),
				email: email.to_string(),
				case_insensitive,
			}
		}
	}

	pub fn as_lookup(&self) -> UserIdentity<'_> {
		UserIdentity {
			login: &self.login,
			email: &self.email,
			case_insensitive: self.case_insensitive,
		}
	}
}

/// First non-empty of `email` and `login`.
pub fn fallback_org_name<'a>(email: &'a str, login: &'a str) -> &'a str {
	if email.is_empty() {
		login
	} else {
		email
	}
}
