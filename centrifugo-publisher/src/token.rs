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

//! Client-token derivation.
//!
//! A client token is a keyed digest a relying party validates out of band.
//! Derivation is deterministic: the same `(secret, user, timestamp, info)`
//! always yields the same token.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Computes the HMAC-SHA256 of `user`, `timestamp`, `info` (in that order,
/// UTF-8 encoded) keyed by `secret`. Output is lowercase hex.
pub fn generate_token(secret: &str, user: &str, timestamp: &str, info: &str) -> String {
    // HMAC accepts keys of any length, so construction cannot fail.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(user.as_bytes());
    mac.update(timestamp.as_bytes());
    mac.update(info.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Current unix time in seconds, the default token timestamp.
pub(crate) fn unix_timestamp_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
