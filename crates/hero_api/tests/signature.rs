use std::collections::BTreeMap;

use hero_api::signature::{fingerprint, sign};

fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect()
}

fn first_request_headers() -> BTreeMap<String, String> {
    headers(&[
        ("X-Auth-Application-Id", "3"),
        ("X-Auth-Session-Id", "abcdef01234567"),
        ("X-Auth-Token", "tok"),
        ("X-Env-Library-Version", "1"),
        ("X-Env-Referrer", ""),
        ("X-Request-Id", "1"),
    ])
}

fn corpus() -> Vec<(BTreeMap<String, String>, String)> {
    vec![
        (first_request_headers(), r#"{"calls":[]}"#.to_owned()),
        (
            headers(&[
                ("X-Auth-Session-Id", "00ff00ff00ff00"),
                ("X-Auth-Token", "t0k3n"),
                ("X-Env-Library-Version", "1"),
                ("X-Request-Id", "42"),
            ]),
            r#"{"calls":[{"name":"questFarm","args":{"questId":7},"ident":"questFarm"}]}"#
                .to_owned(),
        ),
        (
            headers(&[
                ("X-Auth-Session-Id", "1234abcd1234ab"),
                ("X-Auth-Token", "z"),
                ("X-Env-Alpha", "a"),
                ("X-Env-Beta", "bb"),
                ("X-Request-Id", "9"),
            ]),
            r#"{"calls":[{"name":"mailGetAll","args":{},"ident":"mailGetAll"}]}"#.to_owned(),
        ),
    ]
}

#[test]
fn fingerprint_sorts_and_upper_cases_env_headers() {
    let headers = headers(&[
        ("X-Env-Referrer", ""),
        ("X-Env-Library-Version", "1"),
        ("X-Auth-Token", "ignored"),
        ("x-env-lowercase", "ignored"),
    ]);

    assert_eq!(fingerprint(&headers), "LIBRARY-VERSION=1REFERRER=");
}

#[test]
fn fingerprint_is_empty_without_env_headers() {
    let headers = headers(&[("X-Request-Id", "1")]);
    assert_eq!(fingerprint(&headers), "");
}

#[test]
fn signature_matches_known_md5_vectors() {
    assert_eq!(
        sign(&first_request_headers(), r#"{"calls":[]}"#),
        "e908b97c0778b07c7b1e6807064b4fdc"
    );

    let second = headers(&[
        ("X-Auth-Session-Id", "abcdef01234567"),
        ("X-Auth-Token", "tok"),
        ("X-Env-Library-Version", "1"),
        ("X-Request-Id", "2"),
    ]);
    assert_eq!(
        sign(
            &second,
            r#"{"calls":[{"name":"getTime","args":{},"ident":"getTime"}]}"#
        ),
        "0fc80e44eaf26090a6c86ff0f06b59dd"
    );
}

#[test]
fn signature_treats_missing_headers_as_empty() {
    assert_eq!(sign(&BTreeMap::new(), ""), "d77c7b5170e1933fc856d49a4ccbed9e");
}

#[test]
fn signature_is_deterministic() {
    for (headers, body) in corpus() {
        let first = sign(&headers, &body);
        assert_eq!(first, sign(&headers, &body));
        assert_eq!(first, sign(&headers.clone(), &body.clone()));
        assert_eq!(first.len(), 32);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

#[test]
fn signature_changes_with_any_body_character() {
    for (headers, body) in corpus() {
        let original = sign(&headers, &body);
        for (index, ch) in body.char_indices() {
            let replacement = if ch == 'x' { 'y' } else { 'x' };
            let mut mutated = body.clone();
            mutated.replace_range(index..index + ch.len_utf8(), &replacement.to_string());
            assert_ne!(
                original,
                sign(&headers, &mutated),
                "mutating body index {index} must change the digest"
            );
        }
    }
}

#[test]
fn signature_changes_with_any_env_header_character() {
    for (headers, body) in corpus() {
        let original = sign(&headers, &body);
        let env_names = headers
            .keys()
            .filter(|name| name.starts_with("X-Env-"))
            .cloned()
            .collect::<Vec<_>>();

        for name in env_names {
            let value = headers[&name].clone();
            let mut variants = vec![format!("{value}x")];
            for (index, ch) in value.char_indices() {
                let replacement = if ch == 'x' { 'y' } else { 'x' };
                let mut mutated = value.clone();
                mutated.replace_range(index..index + ch.len_utf8(), &replacement.to_string());
                variants.push(mutated);
            }

            for variant in variants {
                let mut mutated_headers = headers.clone();
                mutated_headers.insert(name.clone(), variant.clone());
                assert_ne!(
                    original,
                    sign(&mutated_headers, &body),
                    "changing {name} to {variant:?} must change the digest"
                );
            }
        }
    }
}

#[test]
fn signature_ignores_unsigned_headers() {
    let mut headers = first_request_headers();
    let original = sign(&headers, "{}");
    headers.insert("X-Auth-Application-Id".to_owned(), "99".to_owned());
    headers.insert("X-Server-Time".to_owned(), "123".to_owned());

    assert_eq!(original, sign(&headers, "{}"));
}
