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

//! Shared mocks and helpers for `centrifugo-publisher` integration tests.

mod mock_queue;
pub use mock_queue::{MockQueueBackend, MockQueueConnector};

mod mock_transport;
pub use mock_transport::{MockTransport, ScriptedOutcome};

mod recording_listener;
pub use recording_listener::RecordingListener;

/// One-time tracing initialization for test binaries. Safe to call from every
/// test; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt::try_init();
}
