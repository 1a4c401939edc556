/********************************************************************************
 * Copyright (c) 2025 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Connectivity state and observer dispatch.
//!
//! Transports report through a [`ConnectivitySink`]; the hub updates the
//! availability map and then notifies registered listeners synchronously in
//! registration order. Availability reads are concurrent; updates come from a
//! single writer per transport (the connectivity-event path).

use crate::observability::events;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

/// Event kinds delivered to registered listeners.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClientEvent {
    ConnectivityChanged { transport: String, active: bool },
    TransportError { transport: String, message: String },
}

/// Observer callback registered on the client.
///
/// Delivery is synchronous and in registration order; implementations must not
/// block for long.
pub trait ClientEventListener: Send + Sync {
    fn on_event(&self, event: &ClientEvent);
}

/// Owner of the availability map and the listener registry.
pub(crate) struct EventHub {
    availability: RwLock<HashMap<String, bool>>,
    listeners: Mutex<Vec<Arc<dyn ClientEventListener>>>,
}

impl EventHub {
    pub(crate) fn new() -> Self {
        Self {
            availability: RwLock::new(HashMap::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Registers a transport name with availability `false`.
    pub(crate) fn register_transport(&self, transport: &str) {
        self.availability
            .write()
            .expect("availability map lock poisoned")
            .insert(transport.to_string(), false);
    }

    /// Reads one transport's availability; `None` when never registered.
    pub(crate) fn transport_active(&self, transport: &str) -> Option<bool> {
        self.availability
            .read()
            .expect("availability map lock poisoned")
            .get(transport)
            .copied()
    }

    /// `true` when any registered transport is active.
    pub(crate) fn any_active(&self) -> bool {
        self.availability
            .read()
            .expect("availability map lock poisoned")
            .values()
            .any(|active| *active)
    }

    pub(crate) fn add_listener(&self, listener: Arc<dyn ClientEventListener>) {
        self.listeners
            .lock()
            .expect("listener registry lock poisoned")
            .push(listener);
    }

    /// Creates the per-transport reporting handle.
    pub(crate) fn sink_for(self: &Arc<Self>, transport: &str) -> ConnectivitySink {
        ConnectivitySink {
            hub: self.clone(),
            transport: transport.to_string(),
        }
    }

    fn notify(&self, event: &ClientEvent) {
        let listeners = self
            .listeners
            .lock()
            .expect("listener registry lock poisoned")
            .clone();
        for listener in listeners {
            listener.on_event(event);
        }
    }
}

/// Per-transport handle through which a transport reports connectivity
/// transitions and errors upward.
///
/// Public so that additional [`Transport`][crate::Transport] implementations
/// can be wired in without touching the dispatcher.
#[derive(Clone)]
pub struct ConnectivitySink {
    hub: Arc<EventHub>,
    transport: String,
}

impl ConnectivitySink {
    /// Records an availability transition and notifies listeners.
    pub fn connectivity_changed(&self, active: bool) {
        self.hub
            .availability
            .write()
            .expect("availability map lock poisoned")
            .insert(self.transport.clone(), active);
        debug!(
            event = events::CONNECTIVITY_CHANGED,
            transport = %self.transport,
            active,
        );
        self.hub.notify(&ClientEvent::ConnectivityChanged {
            transport: self.transport.clone(),
            active,
        });
    }

    /// Forwards a transport error to registered listeners.
    pub fn transport_error(&self, message: &str) {
        self.hub.notify(&ClientEvent::TransportError {
            transport: self.transport.clone(),
            message: message.to_string(),
        });
    }

    pub fn transport(&self) -> &str {
        &self.transport
    }
}
