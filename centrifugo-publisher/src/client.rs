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

//! Client facade: transport-registry ownership and sequential failover.

use crate::channel::{resolve_channel, UserId};
use crate::config::ClientConfig;
use crate::error::{ClientError, FailedAttempt};
use crate::events::{ClientEventListener, ConnectivitySink, EventHub};
use crate::observability::events;
use crate::request::Request;
use crate::token;
use crate::transport::{QueueConnector, RedisQueueTransport, Transport};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

const REDIS_TRANSPORT: &str = "redis";
/// Canonical transport names recognized by availability queries, registered
/// or not.
const RECOGNIZED_TRANSPORTS: &[&str] = &[REDIS_TRANSPORT, "http"];

const HTTP_NOT_IMPLEMENTED: &str = "Http transport is not implemented yet";

type TransportBuild = Box<dyn FnOnce(ConnectivitySink) -> Arc<dyn Transport>>;

/// Builder assembling a [`Client`] from configuration plus optional extra
/// transports.
///
/// Extra transports are the extension seam: a new [`Transport`] capability is
/// appended to the registry (after the queue transport, in registration
/// order) without touching dispatch.
pub struct ClientBuilder {
    config: ClientConfig,
    connector: Option<Arc<dyn QueueConnector>>,
    extra_transports: Vec<(String, TransportBuild)>,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            connector: None,
            extra_transports: Vec::new(),
        }
    }

    /// Supplies the queue-backend connection factory used by the redis
    /// transport.
    pub fn with_queue_connector(mut self, connector: Arc<dyn QueueConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Appends a custom transport. `build` receives the per-transport
    /// [`ConnectivitySink`] through which the transport reports availability.
    pub fn with_transport<F>(mut self, name: &str, build: F) -> Self
    where
        F: FnOnce(ConnectivitySink) -> Arc<dyn Transport> + 'static,
    {
        self.extra_transports
            .push((name.to_string(), Box::new(build)));
        self
    }

    /// Validates the configuration and builds the transport registry.
    ///
    /// An `http` section without a `redis` section is a fatal configuration
    /// error; alongside a `redis` section it is accepted and silently
    /// disabled.
    pub fn build(self) -> Result<Client, ClientError> {
        let ClientConfig {
            namespace,
            secret,
            redis,
            http,
        } = self.config;

        if http.is_some() {
            if redis.is_none() {
                error!("{HTTP_NOT_IMPLEMENTED}");
                return Err(ClientError::config(HTTP_NOT_IMPLEMENTED));
            }
            warn!(event = events::HTTP_TRANSPORT_DISABLED, "{HTTP_NOT_IMPLEMENTED}");
        }

        let hub = Arc::new(EventHub::new());
        let mut transports: Vec<Arc<dyn Transport>> = Vec::new();

        if let Some(redis_config) = redis {
            let connector = self.connector.ok_or_else(|| {
                ClientError::config("queue connector required for the redis transport")
            })?;
            hub.register_transport(REDIS_TRANSPORT);
            transports.push(Arc::new(RedisQueueTransport::new(
                redis_config,
                connector,
                hub.sink_for(REDIS_TRANSPORT),
            )));
        }

        for (name, build) in self.extra_transports {
            hub.register_transport(&name);
            transports.push(build(hub.sink_for(&name)));
        }

        Ok(Client {
            namespace,
            secret,
            transports,
            events: hub,
        })
    }
}

/// Publishing client owning the ordered transport registry.
///
/// `publish`/`publish_data` try transports strictly in configured order until
/// one succeeds or all are exhausted. Availability state is read-only here;
/// it transitions exclusively through connectivity notifications from the
/// transports.
///
/// # Examples
///
/// ```
/// use centrifugo_publisher::{Client, ClientConfig, UserId};
/// # use async_trait::async_trait;
/// # use centrifugo_publisher::{ConnectivitySink, QueueBackend, QueueConnector, RedisConfig, TransportError};
/// # use std::sync::Arc;
/// #
/// # struct InMemoryQueue;
/// #
/// # #[async_trait]
/// # impl QueueBackend for InMemoryQueue {
/// #     async fn push(&self, _queue_key: &str, _payload: String) -> Result<i64, TransportError> {
/// #         Ok(1)
/// #     }
/// # }
/// #
/// # struct InMemoryConnector;
/// #
/// # #[async_trait]
/// # impl QueueConnector for InMemoryConnector {
/// #     async fn connect(
/// #         &self,
/// #         _config: &RedisConfig,
/// #         _sink: ConnectivitySink,
/// #     ) -> Result<Arc<dyn QueueBackend>, TransportError> {
/// #         Ok(Arc::new(InMemoryQueue))
/// #     }
/// # }
/// #
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let config = ClientConfig::from_json5(r#"{ namespace: "ns", redis: {} }"#).unwrap();
/// let client = Client::new(config, Arc::new(InMemoryConnector)).unwrap();
///
/// // Availability starts false; publishing before connectivity is a no-op.
/// assert!(!client.is_active());
///
/// client.connect().await;
/// let delivered = client
///     .publish_data(serde_json::json!({"text": "hi"}), Some("news"), &[UserId::Int(7)])
///     .await
///     .unwrap();
/// assert!(delivered);
/// # });
/// ```
pub struct Client {
    namespace: Option<String>,
    secret: Option<String>,
    transports: Vec<Arc<dyn Transport>>,
    events: Arc<EventHub>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("namespace", &self.namespace)
            .field("transports", &self.transports.len())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Builds a client whose only transport is the queue-backed one.
    pub fn new(
        config: ClientConfig,
        connector: Arc<dyn QueueConnector>,
    ) -> Result<Self, ClientError> {
        ClientBuilder::new(config)
            .with_queue_connector(connector)
            .build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Warms up every transport so availability can transition before the
    /// first publish. Per-transport failures are reported through the
    /// connectivity path, not surfaced here.
    pub async fn connect(&self) {
        for transport in &self.transports {
            if let Err(err) = transport.connect().await {
                debug!(
                    event = events::TRANSPORT_CONNECT_FAILED,
                    transport = %transport.name(),
                    error = %err,
                );
            }
        }
    }

    /// Publishes an already-built request.
    ///
    /// Resolves `Ok(true)` when a transport delivered it, `Ok(false)` when no
    /// transport is currently active (deliberately non-exceptional), and
    /// `Err(ClientError::AllTransportsFailed)` when every transport was
    /// attempted and failed.
    pub async fn publish(&self, request: Request) -> Result<bool, ClientError> {
        if !self.is_active() {
            debug!(
                event = events::PUBLISH_SHORT_CIRCUIT_INACTIVE,
                method = %request.method(),
            );
            return Ok(false);
        }
        self.dispatch(request).await
    }

    /// Resolves the channel name, wraps `{channel, data}` into a `publish`
    /// request, and dispatches it.
    pub async fn publish_data(
        &self,
        data: Value,
        channel: Option<&str>,
        user_ids: &[UserId],
    ) -> Result<bool, ClientError> {
        if !self.is_active() {
            debug!(
                event = events::PUBLISH_SHORT_CIRCUIT_INACTIVE,
                channel = channel.unwrap_or_default(),
            );
            return Ok(false);
        }
        let channel_name = resolve_channel(self.namespace.as_deref(), channel, user_ids);
        self.dispatch(Request::publish(&channel_name, data)).await
    }

    /// Tries transports in configured order, index 0 first, accumulating
    /// per-transport error context.
    async fn dispatch(&self, request: Request) -> Result<bool, ClientError> {
        let mut attempts: Vec<FailedAttempt> = Vec::with_capacity(self.transports.len());

        for transport in &self.transports {
            debug!(
                event = events::PUBLISH_ATTEMPT,
                transport = %transport.name(),
                method = %request.method(),
            );
            match transport.send_request(&request).await {
                Ok(()) => {
                    debug!(
                        event = events::PUBLISH_DELIVERED,
                        transport = %transport.name(),
                    );
                    return Ok(true);
                }
                Err(err) => {
                    warn!(
                        event = events::PUBLISH_TRANSPORT_FAILED,
                        transport = %transport.name(),
                        error = %err,
                    );
                    attempts.push(FailedAttempt {
                        transport: transport.name().to_string(),
                        error: err,
                    });
                }
            }
        }

        error!(event = events::PUBLISH_EXHAUSTED, attempts = attempts.len());
        Err(ClientError::AllTransportsFailed { attempts })
    }

    /// Derives a client token over `(user, timestamp, info)`; the timestamp
    /// defaults to current unix seconds.
    pub fn generate_client_token(
        &self,
        user: &str,
        timestamp: Option<u64>,
        info: &str,
    ) -> Result<String, ClientError> {
        let secret = self.secret.as_deref().ok_or_else(|| {
            ClientError::config("\"secret\" configuration parameter needed to generate client token")
        })?;
        let timestamp = timestamp.unwrap_or_else(token::unix_timestamp_now).to_string();
        Ok(token::generate_token(secret, user, &timestamp, info))
    }

    /// `true` when any configured transport is active.
    pub fn is_active(&self) -> bool {
        self.events.any_active()
    }

    /// Reads one transport's availability. Canonical names are recognized
    /// even when not registered (and then read `false`); anything else fails
    /// with [`ClientError::UnknownTransport`].
    pub fn is_active_transport(&self, name: &str) -> Result<bool, ClientError> {
        match self.events.transport_active(name) {
            Some(active) => Ok(active),
            None if RECOGNIZED_TRANSPORTS.contains(&name) => Ok(false),
            None => Err(ClientError::UnknownTransport {
                name: name.to_string(),
            }),
        }
    }

    /// Registers an observer for connectivity and transport-error events.
    pub fn add_listener(&self, listener: Arc<dyn ClientEventListener>) {
        self.events.add_listener(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::Client;
    use crate::config::ClientConfig;
    use crate::error::ClientError;

    fn config(json5: &str) -> ClientConfig {
        ClientConfig::from_json5(json5).expect("test config should parse")
    }

    #[test]
    fn http_without_redis_is_a_construction_error() {
        let err = Client::builder(config(r#"{ http: {} }"#)).build().unwrap_err();
        assert!(matches!(err, ClientError::Config { .. }));
        assert!(err.to_string().contains("Http transport is not implemented yet"));
    }

    #[test]
    fn no_transport_sections_still_construct() {
        let client = Client::builder(config("{}")).build().expect("empty config");
        assert!(!client.is_active());
    }

    #[test]
    fn token_generation_requires_secret() {
        let client = Client::builder(config("{}")).build().expect("empty config");
        let err = client.generate_client_token("42", Some(1000), "").unwrap_err();
        assert!(matches!(err, ClientError::Config { .. }));
    }

    #[test]
    fn token_generation_uses_configured_secret() {
        let client = Client::builder(config(r#"{ secret: "secret" }"#))
            .build()
            .expect("config with secret");
        let token = client
            .generate_client_token("user1", Some(1000), "info")
            .expect("token");
        assert_eq!(token, crate::token::generate_token("secret", "user1", "1000", "info"));
    }

    #[test]
    fn unknown_transport_name_is_rejected() {
        let client = Client::builder(config("{}")).build().expect("empty config");
        let err = client.is_active_transport("carrier-pigeon").unwrap_err();
        assert_eq!(err.to_string(), "Unknown transport 'carrier-pigeon'");
    }

    #[test]
    fn canonical_names_read_false_when_unregistered() {
        let client = Client::builder(config("{}")).build().expect("empty config");
        assert_eq!(client.is_active_transport("redis").unwrap(), false);
        assert_eq!(client.is_active_transport("http").unwrap(), false);
    }
}
