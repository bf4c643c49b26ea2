// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod tracing;

pub use self::tracing::TracingEventSink;

use crate::error::EventSinkError;
use crate::event::ProvisioningEvent;

/// Destination for committed provisioning events.
///
/// `publish` is called synchronously from the commit path and must not block.
pub trait EventSink: Send + Sync {
	fn name(&self) -> &str;

	fn publish(&self, event: &ProvisioningEvent) -> Result<(), EventSinkError>;
}
