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

use crate::error::TransportError;
use serde::Serialize;
use serde_json::{json, Value};

///
/// [`Request`] is an immutable pairing of a broker API method name and its
/// method-specific payload. It is created once per publish call (or supplied
/// directly by the caller) and consumed by exactly one transport.
///
/// # Examples
///
/// ```
/// use centrifugo_publisher::Request;
/// use serde_json::json;
///
/// let request = Request::new("publish", json!({"channel": "news", "data": {"text": "hi"}}));
/// assert_eq!(request.method(), "publish");
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct Request {
    method: String,
    params: Value,
}

impl Request {
    /// Creates a request for an arbitrary broker API method.
    ///
    /// `method` must be non-empty; there is no default method.
    pub fn new(method: &str, params: Value) -> Self {
        Self {
            method: method.to_string(),
            params,
        }
    }

    /// Creates a `publish` request for an already-canonicalized channel.
    pub fn publish(channel: &str, data: Value) -> Self {
        Self::new(
            "publish",
            json!({
                "channel": channel,
                "data": data,
            }),
        )
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &Value {
        &self.params
    }

    /// Serializes the request into its `{"method", "params"}` wire form.
    pub(crate) fn to_wire_json(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(|e| TransportError::Payload {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Request;
    use serde_json::json;

    #[test]
    fn wire_form_carries_method_and_params() {
        let request = Request::publish("news#5", json!({"text": "hello"}));
        let wire = request.to_wire_json().expect("wire serialization");
        let parsed: serde_json::Value = serde_json::from_str(&wire).expect("valid json");

        assert_eq!(parsed["method"], "publish");
        assert_eq!(parsed["params"]["channel"], "news#5");
        assert_eq!(parsed["params"]["data"]["text"], "hello");
    }
}
