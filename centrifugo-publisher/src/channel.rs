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

//! Channel-name canonicalization.
//!
//! Merges a raw channel string, an optional configured namespace, and explicit
//! user identifiers into one wire-format channel key of the shape
//! `[namespace:]segment[:segment...]#id1,id2,...`. Resolution never fails:
//! invalid identifiers degrade to omission with a `warn` diagnostic.

use crate::observability::events;
use std::fmt::{Display, Formatter};
use tracing::warn;

/// A user identifier supplied with a publish call.
///
/// Identifiers arrive either as numbers or as numeric text; non-numeric text
/// is tolerated on input and dropped during canonicalization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UserId {
    Int(i64),
    Text(String),
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

/// Canonicalizes `namespace` + `raw_channel` + `user_ids` into one channel key.
///
/// Inline identifiers embedded in the raw channel (`#`-groups, comma-separated)
/// come first, explicit identifiers after, order preserved and without
/// de-duplication. The `#`-suffix is present only when at least one valid
/// numeric identifier survives.
pub fn resolve_channel(
    namespace: Option<&str>,
    raw_channel: Option<&str>,
    user_ids: &[UserId],
) -> String {
    let mut segments: Vec<&str> = match raw_channel {
        Some(raw) if !raw.is_empty() => raw.split(':').collect(),
        _ => Vec::new(),
    };
    if let Some(ns) = namespace {
        if segments.first().map_or(true, |first| *first != ns) {
            segments.insert(0, ns);
        }
    }
    let base = segments.join(":");

    let mut pieces = base.split('#');
    let body = pieces.next().unwrap_or_default().to_string();
    let inline_ids: Vec<&str> = pieces.flat_map(|group| group.split(',')).collect();

    let mut ids: Vec<i64> = Vec::with_capacity(inline_ids.len() + user_ids.len());
    for inline in inline_ids {
        if let Some(id) = parse_numeric(inline) {
            ids.push(id);
        } else {
            drop_non_numeric(inline);
        }
    }
    for user_id in user_ids {
        match user_id {
            UserId::Int(id) => ids.push(*id),
            UserId::Text(text) => {
                if let Some(id) = parse_numeric(text) {
                    ids.push(id);
                } else {
                    drop_non_numeric(text);
                }
            }
        }
    }

    if ids.is_empty() {
        body
    } else {
        let joined = ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!("{body}#{joined}")
    }
}

/// Numeric-ness test: trimmed text must parse as a finite float. Numeric text
/// is carried as an integer, truncating any fractional part.
fn parse_numeric(text: &str) -> Option<i64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.trunc() as i64)
}

fn drop_non_numeric(id: &str) {
    warn!(event = events::CHANNEL_ID_DROPPED, "'{id}' is not numeric ID");
}
