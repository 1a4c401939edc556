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

use broker_test_utils::MockTransport;
use centrifugo_publisher::{Client, ClientConfig, Transport};
use std::sync::Arc;

/// Builds a client whose registry is exactly the given mocks, in order.
pub(crate) fn client_with_transports(
    config: ClientConfig,
    transports: &[Arc<MockTransport>],
) -> Client {
    let mut builder = Client::builder(config);
    for transport in transports {
        let handle = transport.clone();
        builder = builder.with_transport(transport.name(), move |sink| {
            handle.attach_sink(sink);
            handle
        });
    }
    builder.build().expect("client construction should succeed")
}

pub(crate) fn mark_all_active(transports: &[Arc<MockTransport>]) {
    for transport in transports {
        transport.mark_active(true);
    }
}
