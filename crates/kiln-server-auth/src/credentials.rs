// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential issuance: random salts/tokens and password encoding.
//!
//! Every account carries a `salt` and a secondary random token (`rands`). The
//! stored password is the Argon2id digest of the plaintext keyed by the salt, hex
//! encoded. Reissuing the salt therefore invalidates any previously encoded
//! password unless the password is re-encoded at the same time.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::argon2_config::argon2_instance;

/// Length of generated salts and secondary tokens.
pub const TOKEN_LENGTH: usize = 10;

const ENCODED_PASSWORD_BYTES: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
	#[error("password encoding failed: {0}")]
	Encoding(String),
}

/// Plaintext password supplied by a caller.
///
/// The value is zeroized on drop and never printed by `Debug`. It deserializes
/// from a plain string so configuration files can carry it.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
	pub fn new(password: impl Into<String>) -> Self {
		Self(password.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for Password {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Password([REDACTED])")
	}
}

impl From<&str> for Password {
	fn from(s: &str) -> Self {
		Self::new(s)
	}
}

impl From<String> for Password {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

/// Issues credential material for user accounts.
pub trait CredentialIssuer: Send + Sync {
	/// Generate a random alphanumeric token of `length` characters.
	fn random_token(&self, length: usize) -> Result<String, CredentialError>;

	/// Encode `password` with `salt` into the stored representation.
	fn encode_password(&self, password: &str, salt: &str) -> Result<String, CredentialError>;

	/// Check `password` against an encoded value produced with `salt`.
	fn verify_password(
		&self,
		password: &str,
		salt: &str,
		encoded: &str,
	) -> Result<bool, CredentialError> {
		let candidate = self.encode_password(password, salt)?;
		Ok(candidate.as_bytes().ct_eq(encoded.as_bytes()).into())
	}
}

/// Production [`CredentialIssuer`] backed by the OS random source and Argon2id.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialIssuer;

impl Argon2CredentialIssuer {
	pub fn new() -> Self {
		Self
	}
}

impl CredentialIssuer for Argon2CredentialIssuer {
	fn random_token(&self, length: usize) -> Result<String, CredentialError> {
		Ok(OsRng
			.sample_iter(&Alphanumeric)
			.take(length)
			.map(char::from)
			.collect())
	}

	#[tracing::instrument(skip_all)]
	fn encode_password(&self, password: &str, salt: &str) -> Result<String, CredentialError> {
		let mut out = [0u8; ENCODED_PASSWORD_BYTES];
		argon2_instance()
			.hash_password_into(password.as_bytes(), salt.as_bytes(), &mut out)
			.map_err(|e| CredentialError::Encoding(e.to_string()))?;
		Ok(hex::encode(out))
	}
}
