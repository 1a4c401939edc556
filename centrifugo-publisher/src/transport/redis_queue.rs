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

//! Queue-backed transport pushing serialized requests onto the broker's API
//! queue.

use crate::config::RedisConfig;
use crate::error::TransportError;
use crate::events::ConnectivitySink;
use crate::observability::events;
use crate::request::Request;
use crate::transport::{QueueBackend, QueueConnector, Transport, API_QUEUE_KEY};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, warn};

/// Transport that delivers requests by appending them to the broker's
/// `centrifugo.api` queue.
///
/// The connection is established lazily on first use and memoized at most
/// once; concurrent first sends race on a single connect attempt. A fatal
/// connect error makes every later send fail immediately without I/O.
/// Connectivity transitions after a successful connect are reported by the
/// backend itself through the [`ConnectivitySink`] it received.
pub struct RedisQueueTransport {
    name: String,
    config: RedisConfig,
    connector: Arc<dyn QueueConnector>,
    connection: OnceCell<Arc<dyn QueueBackend>>,
    connect_failed: AtomicBool,
    sink: ConnectivitySink,
}

impl RedisQueueTransport {
    /// A transport with empty/default config still constructs; its first use
    /// triggers connection and may then fail.
    pub fn new(config: RedisConfig, connector: Arc<dyn QueueConnector>, sink: ConnectivitySink) -> Self {
        Self {
            name: sink.transport().to_string(),
            config,
            connector,
            connection: OnceCell::new(),
            connect_failed: AtomicBool::new(false),
            sink,
        }
    }

    async fn connection(&self) -> Result<Arc<dyn QueueBackend>, TransportError> {
        if self.connect_failed.load(Ordering::Acquire) {
            return Err(TransportError::Inactive {
                transport: self.name.clone(),
            });
        }

        let connection = self
            .connection
            .get_or_try_init(|| async {
                match self.connector.connect(&self.config, self.sink.clone()).await {
                    Ok(connection) => {
                        debug!(
                            event = events::TRANSPORT_CONNECT_OK,
                            transport = %self.name,
                            host = %self.config.host,
                            port = self.config.port,
                        );
                        self.sink.connectivity_changed(true);
                        Ok(connection)
                    }
                    Err(err) => {
                        error!(
                            event = events::TRANSPORT_CONNECT_FAILED,
                            transport = %self.name,
                            error = %err,
                        );
                        self.connect_failed.store(true, Ordering::Release);
                        if matches!(err, TransportError::Unreachable { .. }) {
                            self.sink.connectivity_changed(false);
                        }
                        self.sink.transport_error(&err.to_string());
                        Err(err)
                    }
                }
            })
            .await?;

        Ok(connection.clone())
    }
}

#[async_trait]
impl Transport for RedisQueueTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn connect(&self) -> Result<(), TransportError> {
        self.connection().await.map(|_| ())
    }

    async fn send_request(&self, request: &Request) -> Result<(), TransportError> {
        let connection = self.connection().await?;
        let payload = request.to_wire_json()?;

        match connection.push(API_QUEUE_KEY, payload).await {
            Ok(ack) if ack > 0 => Ok(()),
            Ok(_) => {
                warn!(
                    event = events::TRANSPORT_PUSH_REJECTED,
                    transport = %self.name,
                    method = %request.method(),
                );
                Err(TransportError::Rejected)
            }
            Err(err) => {
                if matches!(err, TransportError::Unreachable { .. }) {
                    self.sink.connectivity_changed(false);
                }
                self.sink.transport_error(&err.to_string());
                Err(err)
            }
        }
    }
}
