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

//! Canonical structured event names used across `centrifugo-publisher`.

// Publish-dispatch events.
pub const PUBLISH_SHORT_CIRCUIT_INACTIVE: &str = "publish_short_circuit_inactive";
pub const PUBLISH_ATTEMPT: &str = "publish_attempt";
pub const PUBLISH_DELIVERED: &str = "publish_delivered";
pub const PUBLISH_TRANSPORT_FAILED: &str = "publish_transport_failed";
pub const PUBLISH_EXHAUSTED: &str = "publish_exhausted";

// Channel-resolution events.
pub const CHANNEL_ID_DROPPED: &str = "channel_id_dropped";

// Transport and connectivity events.
pub const TRANSPORT_CONNECT_OK: &str = "transport_connect_ok";
pub const TRANSPORT_CONNECT_FAILED: &str = "transport_connect_failed";
pub const TRANSPORT_PUSH_REJECTED: &str = "transport_push_rejected";
pub const CONNECTIVITY_CHANGED: &str = "connectivity_changed";

// Construction events.
pub const HTTP_TRANSPORT_DISABLED: &str = "http_transport_disabled";
