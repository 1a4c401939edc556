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

mod support;

use broker_test_utils::{init_logging, MockTransport, ScriptedOutcome};
use centrifugo_publisher::{ClientConfig, ClientError, Request, TransportError, UserId};
use serde_json::json;
use std::sync::Arc;

fn failing(name: &str) -> Arc<MockTransport> {
    Arc::new(MockTransport::failing(
        name,
        TransportError::Unreachable {
            reason: "scripted failure".to_string(),
        },
    ))
}

fn delivering(name: &str) -> Arc<MockTransport> {
    Arc::new(MockTransport::delivering(name))
}

#[tokio::test]
async fn failover_reaches_the_first_succeeding_transport() {
    init_logging();
    let transports = [failing("t0"), failing("t1"), delivering("t2")];
    let client = support::client_with_transports(ClientConfig::default(), &transports);
    support::mark_all_active(&transports);

    let delivered = client
        .publish_data(json!({"text": "hi"}), Some("news"), &[])
        .await
        .expect("publish should fail over");

    assert!(delivered);
    assert_eq!(transports[0].send_count(), 1);
    assert_eq!(transports[1].send_count(), 1);
    assert_eq!(transports[2].send_count(), 1);
}

#[tokio::test]
async fn later_transports_are_not_tried_after_a_success() {
    init_logging();
    let transports = [delivering("t0"), delivering("t1")];
    let client = support::client_with_transports(ClientConfig::default(), &transports);
    support::mark_all_active(&transports);

    assert!(client
        .publish_data(json!(1), Some("news"), &[])
        .await
        .expect("publish should succeed"));

    assert_eq!(transports[0].send_count(), 1);
    assert_eq!(transports[1].send_count(), 0);
}

#[tokio::test]
async fn exhaustion_rejects_with_accumulated_context() {
    init_logging();
    let transports = [failing("t0"), failing("t1"), failing("t2")];
    let client = support::client_with_transports(ClientConfig::default(), &transports);
    support::mark_all_active(&transports);

    let err = client
        .publish_data(json!(1), Some("news"), &[])
        .await
        .expect_err("all transports fail");

    assert_eq!(err.to_string(), "Can't send message by any transport");
    match err {
        ClientError::AllTransportsFailed { attempts } => {
            let order: Vec<&str> = attempts.iter().map(|a| a.transport.as_str()).collect();
            assert_eq!(order, vec!["t0", "t1", "t2"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn inactive_client_short_circuits_without_sending() {
    init_logging();
    let transports = [failing("t0"), delivering("t1")];
    let client = support::client_with_transports(ClientConfig::default(), &transports);
    // No transport reports active.

    let delivered = client
        .publish_data(json!(1), Some("news"), &[])
        .await
        .expect("short-circuit is non-exceptional");

    assert!(!delivered);
    assert_eq!(transports[0].send_count(), 0);
    assert_eq!(transports[1].send_count(), 0);
}

#[tokio::test]
async fn prebuilt_requests_dispatch_unchanged() {
    init_logging();
    let transports = [delivering("t0")];
    let client = support::client_with_transports(ClientConfig::default(), &transports);
    support::mark_all_active(&transports);

    let request = Request::new("broadcast", json!({"channels": ["a", "b"], "data": 1}));
    assert!(client.publish(request).await.expect("publish succeeds"));

    let seen = transports[0].requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method(), "broadcast");
    assert_eq!(seen[0].params()["channels"][0], "a");
}

#[tokio::test]
async fn publish_data_resolves_namespace_and_merges_ids() {
    init_logging();
    let config = ClientConfig::from_json5(r#"{ namespace: "ns" }"#).expect("config");
    let transports = [delivering("t0")];
    let client = support::client_with_transports(config, &transports);
    support::mark_all_active(&transports);

    assert!(client
        .publish_data(json!({"text": "hi"}), Some("news#1,2"), &[UserId::Int(3)])
        .await
        .expect("publish succeeds"));

    let seen = transports[0].requests();
    assert_eq!(seen[0].method(), "publish");
    assert_eq!(seen[0].params()["channel"], "ns:news#1,2,3");
    assert_eq!(seen[0].params()["data"]["text"], "hi");
}

#[tokio::test]
async fn single_transport_recovers_on_rescripted_outcome() {
    init_logging();
    let transports = [failing("t0")];
    let client = support::client_with_transports(ClientConfig::default(), &transports);
    support::mark_all_active(&transports);

    assert!(client
        .publish_data(json!(1), Some("news"), &[])
        .await
        .is_err());

    transports[0].set_outcome(ScriptedOutcome::Deliver);
    assert!(client
        .publish_data(json!(1), Some("news"), &[])
        .await
        .expect("publish succeeds after recovery"));
    assert_eq!(transports[0].send_count(), 2);
}
