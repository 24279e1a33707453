// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Name extraction from identity service responses
//!
//! Each rule is a pure function over the raw JSON body. Rules are tried in
//! [`USERNAME_RULES`] order and the first non-empty trimmed string wins.

use serde_json::Value;

use super::ParsedIdentity;

/// A single shape probe: raw body in, candidate name out
pub type ExtractionRule = fn(&Value) -> Option<String>;

/// Probes in priority order: flat fields first, then the same under `user`
pub const USERNAME_RULES: &[ExtractionRule] =
    &[flat_username, flat_handle, nested_username, nested_handle];

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    let trimmed = value?.as_str()?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `{ "username": "..." }`
pub fn flat_username(body: &Value) -> Option<String> {
    non_empty_string(body.get("username"))
}

/// `{ "handle": "..." }`
pub fn flat_handle(body: &Value) -> Option<String> {
    non_empty_string(body.get("handle"))
}

/// `{ "user": { "username": "..." } }`
pub fn nested_username(body: &Value) -> Option<String> {
    non_empty_string(body.get("user")?.get("username"))
}

/// `{ "user": { "handle": "..." } }`
pub fn nested_handle(body: &Value) -> Option<String> {
    non_empty_string(body.get("user")?.get("handle"))
}

fn flag_set(body: &Value, key: &str) -> bool {
    body.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Interpret a response body
///
/// Anything but a JSON object is [`ParsedIdentity::Unrecognized`].
pub fn parse_identity(body: &Value) -> ParsedIdentity {
    if !body.is_object() {
        return ParsedIdentity::Unrecognized;
    }

    let username = USERNAME_RULES.iter().find_map(|rule| rule(body));
    let flagged = flag_set(body, "hasUsername") || flag_set(body, "exists");

    ParsedIdentity::Recognized { username, flagged }
}
