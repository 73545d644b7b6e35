//! Request signing.
//!
//! The server recomputes the digest from the headers it receives and the raw
//! body, so the canonical form below has to match byte for byte.

use std::collections::BTreeMap;

use md5::{Digest, Md5};

use crate::headers::{HEADER_AUTH_TOKEN, HEADER_REQUEST_ID, HEADER_SESSION_ID};

/// Headers with this prefix take part in the fingerprint.
pub const ENV_HEADER_PREFIX: &str = "X-Env-";

/// Sorted `NAME=value` rendering of every `X-Env-*` header, concatenated.
pub fn fingerprint(headers: &BTreeMap<String, String>) -> String {
    let mut fragments = headers
        .iter()
        .filter_map(|(name, value)| {
            name.strip_prefix(ENV_HEADER_PREFIX)
                .map(|suffix| format!("{}={value}", suffix.to_ascii_uppercase()))
        })
        .collect::<Vec<_>>();
    fragments.sort();
    fragments.concat()
}

/// Lower-case hex MD5 over `request-id:auth-token:session-id:body:fingerprint`.
pub fn sign(headers: &BTreeMap<String, String>, body: &str) -> String {
    let header = |name: &str| headers.get(name).map(String::as_str).unwrap_or("");
    let fingerprint = fingerprint(headers);
    let material = [
        header(HEADER_REQUEST_ID),
        header(HEADER_AUTH_TOKEN),
        header(HEADER_SESSION_ID),
        body,
        fingerprint.as_str(),
    ]
    .join(":");

    hex::encode(Md5::digest(material.as_bytes()))
}
