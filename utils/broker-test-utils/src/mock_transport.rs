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
use centrifugo_publisher::{ConnectivitySink, Request, Transport, TransportError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

/// What a [`MockTransport`] does with each send.
#[derive(Clone, Debug)]
pub enum ScriptedOutcome {
    Deliver,
    Fail(TransportError),
}

/// Scripted transport counting invocations and recording requests.
///
/// Built without a sink; the sink arrives when the transport is registered on
/// the client builder (`attach_sink`), after which tests drive availability
/// through `mark_active`.
pub struct MockTransport {
    name: String,
    outcome: Mutex<ScriptedOutcome>,
    sends: AtomicUsize,
    requests: Mutex<Vec<Request>>,
    sink: OnceLock<ConnectivitySink>,
}

impl MockTransport {
    pub fn new(name: &str, outcome: ScriptedOutcome) -> Self {
        Self {
            name: name.to_string(),
            outcome: Mutex::new(outcome),
            sends: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            sink: OnceLock::new(),
        }
    }

    pub fn delivering(name: &str) -> Self {
        Self::new(name, ScriptedOutcome::Deliver)
    }

    pub fn failing(name: &str, error: TransportError) -> Self {
        Self::new(name, ScriptedOutcome::Fail(error))
    }

    pub fn attach_sink(&self, sink: ConnectivitySink) {
        let _ = self.sink.set(sink);
    }

    /// Reports an availability transition through the attached sink.
    pub fn mark_active(&self, active: bool) {
        self.sink
            .get()
            .expect("sink attached during client build")
            .connectivity_changed(active);
    }

    pub fn set_outcome(&self, outcome: ScriptedOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    /// Snapshot of the requests this transport was asked to deliver.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_request(&self, request: &Request) -> Result<(), TransportError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match self.outcome.lock().unwrap().clone() {
            ScriptedOutcome::Deliver => Ok(()),
            ScriptedOutcome::Fail(error) => Err(error),
        }
    }
}
