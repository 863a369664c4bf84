//! Shared proptest generators for vault-client tests.

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Generate valid secret paths.
pub fn secret_path_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}(/[a-z][a-z0-9-]{0,20}){0,3}"
}

/// Generate path segments containing characters that need percent-encoding.
pub fn awkward_segment_strategy() -> impl Strategy<Value = String> {
    "[a-z ?#%&=+;:@]{1,16}".prop_filter("segment must not be blank", |s| !s.trim().is_empty())
}

/// Generate paths that carry at least one control character.
pub fn control_char_path_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,10}",
        prop_oneof![Just('\n'), Just('\r'), Just('\t'), Just('\0'), Just('\u{7f}')],
        "[a-z]{0,10}",
    )
        .prop_map(|(head, c, tail)| format!("{head}{c}{tail}"))
}

/// Generate Vault-style service tokens.
pub fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "s\\.[A-Za-z0-9]{24}",
        "hvs\\.[A-Za-z0-9_-]{24,90}",
    ]
}

/// Generate valid namespace names.
pub fn namespace_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{2,20}(/[a-z][a-z0-9-]{2,20}){0,2}"
}

/// Generate parameter key/value pairs, possibly with repeated keys.
pub fn parameter_pairs_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z_]{1,8}", "[ -~]{0,32}"), 0..12)
}

/// Generate a parameter map with unique keys.
pub fn parameter_map_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z_]{1,8}", "[ -~]{0,32}", 0..12)
}

/// Generate valid HTTP status codes.
pub fn http_status_code_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![
        Just(200u16),
        Just(204u16),
        Just(400u16),
        Just(403u16),
        Just(404u16),
        Just(429u16),
        Just(500u16),
        Just(503u16),
    ]
}
