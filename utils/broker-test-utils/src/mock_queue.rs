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

use async_trait::async_trait;
use centrifugo_publisher::{
    ConnectivitySink, QueueBackend, QueueConnector, RedisConfig, TransportError,
};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory queue backend recording every push.
pub struct MockQueueBackend {
    ack: AtomicI64,
    pushes: Mutex<Vec<(String, String)>>,
}

impl MockQueueBackend {
    /// Backend acknowledging every push with `1`.
    pub fn acknowledging() -> Arc<Self> {
        Self::with_ack(1)
    }

    /// Backend acknowledging every push with `0` (a delivery failure).
    pub fn rejecting() -> Arc<Self> {
        Self::with_ack(0)
    }

    pub fn with_ack(ack: i64) -> Arc<Self> {
        Arc::new(Self {
            ack: AtomicI64::new(ack),
            pushes: Mutex::new(Vec::new()),
        })
    }

    pub fn set_ack(&self, ack: i64) {
        self.ack.store(ack, Ordering::SeqCst);
    }

    /// Snapshot of `(queue_key, payload)` pairs pushed so far.
    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueBackend for MockQueueBackend {
    async fn push(&self, queue_key: &str, payload: String) -> Result<i64, TransportError> {
        self.pushes
            .lock()
            .unwrap()
            .push((queue_key.to_string(), payload));
        Ok(self.ack.load(Ordering::SeqCst))
    }
}

/// Scripted connection factory counting connect attempts and exposing the
/// sink handed over by the transport, so tests can drive later connectivity
/// transitions.
pub struct MockQueueConnector {
    backend: Option<Arc<MockQueueBackend>>,
    unreachable_reason: Option<String>,
    connects: AtomicUsize,
    sink: Mutex<Option<ConnectivitySink>>,
}

impl MockQueueConnector {
    pub fn connecting_to(backend: Arc<MockQueueBackend>) -> Arc<Self> {
        Arc::new(Self {
            backend: Some(backend),
            unreachable_reason: None,
            connects: AtomicUsize::new(0),
            sink: Mutex::new(None),
        })
    }

    /// Connector whose every connect attempt fails as unreachable.
    pub fn unreachable(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            backend: None,
            unreachable_reason: Some(reason.to_string()),
            connects: AtomicUsize::new(0),
            sink: Mutex::new(None),
        })
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// The sink received on the last connect attempt, if any.
    pub fn sink(&self) -> Option<ConnectivitySink> {
        self.sink.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueConnector for MockQueueConnector {
    async fn connect(
        &self,
        _config: &RedisConfig,
        sink: ConnectivitySink,
    ) -> Result<Arc<dyn QueueBackend>, TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        *self.sink.lock().unwrap() = Some(sink);
        match (&self.backend, &self.unreachable_reason) {
            (Some(backend), _) => Ok(backend.clone()),
            (None, Some(reason)) => Err(TransportError::Unreachable {
                reason: reason.clone(),
            }),
            (None, None) => Err(TransportError::Unreachable {
                reason: "no backend scripted".to_string(),
            }),
        }
    }
}
