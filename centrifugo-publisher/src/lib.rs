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

//! # centrifugo-publisher
//!
//! `centrifugo-publisher` is a client-side publishing adapter for the
//! Centrifugo broker: it canonicalizes channel names, wraps payloads into API
//! requests, and delivers them through an ordered list of transports with
//! sequential failover. The broker connection itself stays external and is
//! reached only through the narrow [`QueueBackend`]/[`QueueConnector`] seams.
//!
//! Typical usage is API-first and centered on [`Client`] and [`Request`].
//!
//! ```
//! use centrifugo_publisher::{Client, ClientConfig, Request, UserId};
//! # use async_trait::async_trait;
//! # use centrifugo_publisher::{ConnectivitySink, QueueBackend, QueueConnector, RedisConfig, TransportError};
//! # use std::sync::Arc;
//! #
//! # struct InMemoryQueue;
//! #
//! # #[async_trait]
//! # impl QueueBackend for InMemoryQueue {
//! #     async fn push(&self, _queue_key: &str, _payload: String) -> Result<i64, TransportError> {
//! #         Ok(1)
//! #     }
//! # }
//! #
//! # struct InMemoryConnector;
//! #
//! # #[async_trait]
//! # impl QueueConnector for InMemoryConnector {
//! #     async fn connect(
//! #         &self,
//! #         _config: &RedisConfig,
//! #         _sink: ConnectivitySink,
//! #     ) -> Result<Arc<dyn QueueBackend>, TransportError> {
//! #         Ok(Arc::new(InMemoryQueue))
//! #     }
//! # }
//! #
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = ClientConfig::from_json5(
//!     r#"{
//!         namespace: "app",
//!         secret: "secret",
//!         redis: { host: "localhost", port: 6379 },
//!     }"#,
//! )
//! .unwrap();
//!
//! let client = Client::new(config, Arc::new(InMemoryConnector)).unwrap();
//! client.connect().await;
//!
//! // Channel resolution merges inline and explicit user ids.
//! let delivered = client
//!     .publish_data(serde_json::json!({"text": "hi"}), Some("news#1,2"), &[UserId::Int(3)])
//!     .await
//!     .unwrap();
//! assert!(delivered);
//!
//! // Pre-built requests dispatch unchanged.
//! let request = Request::new("publish", serde_json::json!({"channel": "app:news", "data": 1}));
//! assert!(client.publish(request).await.unwrap());
//!
//! // Token derivation is deterministic and keyed by the configured secret.
//! let token = client.generate_client_token("42", Some(1000), "").unwrap();
//! assert_eq!(token, client.generate_client_token("42", Some(1000), "").unwrap());
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - Client facade: transport-registry ownership, sequential failover,
//!   availability accessors, token derivation
//! - Channel resolution: pure canonicalization of namespace + raw channel +
//!   user ids
//! - Transport layer: the [`Transport`] capability and the queue-backed
//!   implementation
//! - Events: availability map plus registration-order synchronous observer
//!   dispatch
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits events and
//! does not unconditionally initialize a global subscriber. Binaries and tests
//! are responsible for one-time `tracing_subscriber` initialization at process
//! boundaries.

mod channel;
pub use channel::{resolve_channel, UserId};

mod client;
pub use client::{Client, ClientBuilder};

mod config;
pub use config::{ClientConfig, HttpConfig, RedisConfig};

mod error;
pub use error::{ClientError, FailedAttempt, TransportError};

mod events;
pub use events::{ClientEvent, ClientEventListener, ConnectivitySink};

#[doc(hidden)]
pub mod observability;

mod request;
pub use request::Request;

mod token;
pub use token::generate_token;

mod transport;
pub use transport::{
    QueueBackend, QueueConnector, RedisQueueTransport, Transport, API_QUEUE_KEY,
};
