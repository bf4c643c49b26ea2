// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argon2 configuration for password encoding.
//!
//! Production builds use Argon2id with the crate defaults (19 MiB, 2 iterations,
//! parallelism 1). Unit tests of this crate use reduced parameters that MUST NOT
//! be used in production.

use argon2::Argon2;
#[cfg(test)]
use argon2::{Algorithm, Params, Version};

/// Returns an Argon2 instance configured appropriately for the build context.
#[inline]
pub(crate) fn argon2_instance() -> Argon2<'static> {
	#[cfg(test)]
	{
		// Memory: 1024 KiB vs ~19 MiB in production
		let params = Params::new(
			1024, // memory_kib: 1 MiB
			1,    // iterations
			1,    // parallelism
			None, // output length = default
		)
		.expect("valid Argon2 params for tests");
		Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
	}

	#[cfg(not(test))]
	{
		Argon2::default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_argon2_instance_returns_valid_hasher() {
		let argon2 = argon2_instance();
		let mut out = [0u8; 32];
		argon2
			.hash_password_into(b"password", b"saltsalt", &mut out)
			.unwrap();
		assert_ne!(out, [0u8; 32]);
	}
}
