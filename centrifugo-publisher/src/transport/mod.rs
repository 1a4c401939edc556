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

//! Transport capability layer.
//!
//! A transport knows how to serialize a [`Request`] and deliver it to the
//! broker. Transports never retry internally; failover across transports is
//! owned entirely by the [`Client`][crate::Client]. The broker connection
//! itself stays an external collaborator reached through the narrow
//! [`QueueBackend`]/[`QueueConnector`] seams.

use crate::config::RedisConfig;
use crate::error::TransportError;
use crate::events::ConnectivitySink;
use crate::request::Request;
use async_trait::async_trait;
use std::sync::Arc;

mod redis_queue;
pub use redis_queue::RedisQueueTransport;

/// Fixed, well-known queue key the broker consumes API requests from.
pub const API_QUEUE_KEY: &str = "centrifugo.api";

/// A pluggable delivery mechanism capable of sending a [`Request`] to the
/// broker.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Stable transport name used by availability queries and diagnostics.
    fn name(&self) -> &str;

    /// Delivers one request. Resolves fully (success or failure) before the
    /// dispatcher moves on to the next transport.
    async fn send_request(&self, request: &Request) -> Result<(), TransportError>;

    /// Establishes connectivity ahead of the first send so the transport can
    /// report itself active. Default: nothing to warm up.
    async fn connect(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Narrow enqueue capability of an established broker connection.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Appends `payload` to `queue_key` and returns the broker's
    /// acknowledgment (the resulting queue length). An acknowledgment of zero
    /// is a delivery failure.
    async fn push(&self, queue_key: &str, payload: String) -> Result<i64, TransportError>;
}

/// Connection factory for the queue backend.
///
/// Long-lived backends keep the [`ConnectivitySink`] they receive here and
/// report later disconnect/reconnect transitions through it.
#[async_trait]
pub trait QueueConnector: Send + Sync {
    async fn connect(
        &self,
        config: &RedisConfig,
        sink: ConnectivitySink,
    ) -> Result<Arc<dyn QueueBackend>, TransportError>;
}
