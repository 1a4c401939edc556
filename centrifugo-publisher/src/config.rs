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

use crate::error::ClientError;
use serde::{Deserialize, Serialize};

/// Recognized client configuration surface.
///
/// Presence of a section decides which transports the client constructs:
/// a `redis` section yields the queue-backed transport; an `http` section is
/// accepted only alongside a `redis` section and is then silently disabled
/// (the HTTP transport is not implemented).
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Prefix segment enforced as the first colon-delimited component of
    /// every resolved channel.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Key for client-token derivation. Required only for token generation.
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl ClientConfig {
    /// Parses a json5 configuration document.
    pub fn from_json5(contents: &str) -> Result<Self, ClientError> {
        json5::from_str(contents).map_err(|e| ClientError::Config {
            reason: format!("unable to parse config: {e}"),
        })
    }
}

/// Queue-transport (broker) connection parameters.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RedisConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub db: u32,
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db: 0,
            password: None,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    6379
}

/// Placeholder for the unimplemented HTTP transport configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {}
