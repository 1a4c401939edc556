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

use broker_test_utils::{init_logging, MockQueueBackend, MockQueueConnector, RecordingListener};
use centrifugo_publisher::{Client, ClientConfig, ClientError, ClientEvent, API_QUEUE_KEY};
use serde_json::json;
use std::sync::Arc;

fn queue_config() -> ClientConfig {
    ClientConfig::from_json5(r#"{ redis: {} }"#).expect("config")
}

#[tokio::test]
async fn http_without_queue_config_is_fatal() {
    init_logging();
    let config = ClientConfig::from_json5(r#"{ http: {} }"#).expect("config");
    let backend = MockQueueBackend::acknowledging();
    let err = Client::new(config, MockQueueConnector::connecting_to(backend)).unwrap_err();

    assert!(matches!(err, ClientError::Config { .. }));
}

#[tokio::test]
async fn http_alongside_queue_config_is_stripped() {
    init_logging();
    let config = ClientConfig::from_json5(r#"{ redis: {}, http: {} }"#).expect("config");
    let backend = MockQueueBackend::acknowledging();
    let client = Client::new(config, MockQueueConnector::connecting_to(backend))
        .expect("http downgrades silently");

    // "http" stays a recognized name but was never registered.
    assert!(!client.is_active_transport("http").expect("recognized name"));
    assert!(!client.is_active_transport("redis").expect("recognized name"));
    assert!(client.is_active_transport("smoke-signal").is_err());
}

#[tokio::test]
async fn queue_config_without_connector_is_fatal() {
    init_logging();
    let err = Client::builder(queue_config()).build().unwrap_err();
    assert!(matches!(err, ClientError::Config { .. }));
}

#[tokio::test]
async fn connect_activates_the_queue_transport_and_memoizes() {
    init_logging();
    let backend = MockQueueBackend::acknowledging();
    let connector = MockQueueConnector::connecting_to(backend.clone());
    let client = Client::new(queue_config(), connector.clone()).expect("client");

    assert!(!client.is_active());
    client.connect().await;
    assert!(client.is_active());
    assert!(client.is_active_transport("redis").expect("recognized name"));

    assert!(client
        .publish_data(json!({"text": "hi"}), Some("news"), &[])
        .await
        .expect("publish succeeds"));
    assert!(client
        .publish_data(json!({"text": "again"}), Some("news"), &[])
        .await
        .expect("publish succeeds"));

    // Lazy connection established exactly once.
    assert_eq!(connector.connect_count(), 1);

    let pushes = backend.pushes();
    assert_eq!(pushes.len(), 2);
    assert_eq!(pushes[0].0, API_QUEUE_KEY);
    let wire: serde_json::Value = serde_json::from_str(&pushes[0].1).expect("wire json");
    assert_eq!(wire["method"], "publish");
    assert_eq!(wire["params"]["channel"], "news");
}

#[tokio::test]
async fn unreachable_broker_reports_through_listeners() {
    init_logging();
    let connector = MockQueueConnector::unreachable("getaddrinfo ENOTFOUND");
    let client = Client::new(queue_config(), connector.clone()).expect("client");
    let listener = Arc::new(RecordingListener::new());
    client.add_listener(listener.clone());

    client.connect().await;

    assert!(!client.is_active());
    let events = listener.events();
    assert_eq!(
        events[0],
        ClientEvent::ConnectivityChanged {
            transport: "redis".to_string(),
            active: false,
        }
    );
    assert!(matches!(
        &events[1],
        ClientEvent::TransportError { transport, message }
            if transport == "redis" && message.contains("ENOTFOUND")
    ));

    // Still inactive, so publish short-circuits without I/O.
    let delivered = client
        .publish_data(json!(1), Some("news"), &[])
        .await
        .expect("short-circuit");
    assert!(!delivered);
    assert_eq!(connector.connect_count(), 1);
}

#[tokio::test]
async fn successful_connect_notifies_listeners_in_order() {
    init_logging();
    let backend = MockQueueBackend::acknowledging();
    let client = Client::new(queue_config(), MockQueueConnector::connecting_to(backend))
        .expect("client");
    let first = Arc::new(RecordingListener::new());
    let second = Arc::new(RecordingListener::new());
    client.add_listener(first.clone());
    client.add_listener(second.clone());

    client.connect().await;

    let expected = ClientEvent::ConnectivityChanged {
        transport: "redis".to_string(),
        active: true,
    };
    assert_eq!(first.events(), vec![expected.clone()]);
    assert_eq!(second.events(), vec![expected]);
}

#[tokio::test]
async fn falsy_acknowledgment_exhausts_a_single_transport_registry() {
    init_logging();
    let backend = MockQueueBackend::rejecting();
    let client = Client::new(queue_config(), MockQueueConnector::connecting_to(backend))
        .expect("client");

    client.connect().await;
    let err = client
        .publish_data(json!(1), Some("news"), &[])
        .await
        .expect_err("rejected push exhausts the registry");

    match err {
        ClientError::AllTransportsFailed { attempts } => {
            assert_eq!(attempts.len(), 1);
            assert_eq!(attempts[0].transport, "redis");
            assert_eq!(
                attempts[0].error.to_string(),
                "Unknown error during message sending"
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn backend_driven_disconnect_deactivates_the_client() {
    init_logging();
    let backend = MockQueueBackend::acknowledging();
    let connector = MockQueueConnector::connecting_to(backend);
    let client = Client::new(queue_config(), connector.clone()).expect("client");

    client.connect().await;
    assert!(client.is_active());

    // A long-lived backend reports unreachability through the sink it kept.
    let sink = connector.sink().expect("sink captured at connect time");
    sink.connectivity_changed(false);
    assert!(!client.is_active());

    sink.connectivity_changed(true);
    assert!(client.is_active());
}
