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

//! Error taxonomy shared by the client facade and the transport layer.

use thiserror::Error;

/// Failure of one delivery attempt on one transport.
///
/// Recovered locally by the client through failover; only surfaced to the
/// caller when every configured transport has been exhausted.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TransportError {
    /// The transport has no established connection and a prior connect
    /// attempt failed fatally; no I/O was attempted.
    #[error("transport '{transport}' is not connected")]
    Inactive { transport: String },

    /// The broker host could not be reached (DNS/host-not-found class).
    /// Also flips the transport's availability to inactive.
    #[error("broker unreachable: {reason}")]
    Unreachable { reason: String },

    /// The broker acknowledged the push with a falsy result.
    #[error("Unknown error during message sending")]
    Rejected,

    /// The request could not be serialized into its wire form.
    #[error("unable to serialize request payload: {reason}")]
    Payload { reason: String },
}

/// One entry of the accumulated failover context.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailedAttempt {
    pub transport: String,
    pub error: TransportError,
}

/// Errors surfaced to callers of the client facade.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Fatal at construction or token-generation time.
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    /// An availability query named a transport outside the recognized set.
    #[error("Unknown transport '{name}'")]
    UnknownTransport { name: String },

    /// Every configured transport was attempted in order and failed.
    #[error("Can't send message by any transport")]
    AllTransportsFailed { attempts: Vec<FailedAttempt> },
}

impl ClientError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
