// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{instrument, warn};

use crate::event::ProvisioningEvent;
use crate::sink::EventSink;

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Fan-out for committed provisioning events.
///
/// Cloning is cheap; clones share sinks and subscribers.
#[derive(Clone)]
pub struct EventBus {
	tx: broadcast::Sender<ProvisioningEvent>,
	sinks: Arc<Vec<Arc<dyn EventSink>>>,
}

impl EventBus {
	pub fn new(sinks: Vec<Arc<dyn EventSink>>) -> Self {
		Self::with_capacity(sinks, DEFAULT_CHANNEL_CAPACITY)
	}

	pub fn with_capacity(sinks: Vec<Arc<dyn EventSink>>, capacity: usize) -> Self {
		let (tx, _) = broadcast::channel(capacity.max(1));
		Self {
			tx,
			sinks: Arc::new(sinks),
		}
	}

	/// Receive every event published after this call.
	pub fn subscribe(&self) -> broadcast::Receiver<ProvisioningEvent> {
		self.tx.subscribe()
	}

	pub fn sink_count(&self) -> usize {
		self.sinks.len()
	}

	/// Deliver `event` to every sink, then to subscribers.
	///
	/// Sink failures are logged and do not stop delivery to the remaining sinks.
	#[instrument(skip(self, event), fields(event_type = %event.kind()))]
	pub fn publish(&self, event: ProvisioningEvent) {
		for sink in self.sinks.iter() {
			if let Err(e) = sink.publish(&event) {
				warn!(sink = sink.name(), error = %e, "event sink publish failed");
			}
		}

		// No receivers is not an error.
		let _ = self.tx.send(event);
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(Vec::new())
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventBus")
			.field("sinks", &self.sinks.iter().map(|s| s.name()).collect::<Vec<_>>())
			.field("subscribers", &self.tx.receiver_count())
			.finish()
	}
}
