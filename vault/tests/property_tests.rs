//! Property-based tests for the Vault client value types.

use proptest::prelude::*;
use std::collections::BTreeMap;
use vault_client::{
    Config, HttpResponse, HttpResult, Parameters, Path, SecretId, Token, TransportError,
    VaultError, is_success,
};
use vault_test_utils::{
    awkward_segment_strategy, control_char_path_strategy, http_status_code_strategy,
    namespace_strategy, parameter_map_strategy, parameter_pairs_strategy, secret_path_strategy,
    token_strategy,
};

fn config() -> Config {
    Config::builder().build().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_token_debug_never_exposes_value(raw in token_strategy()) {
        let token = Token::new(raw.clone());
        let debug = format!("{token:?}");

        prop_assert!(!debug.contains(&raw));
        prop_assert!(debug.contains("REDACTED"));
        prop_assert_eq!(token.expose(), raw.as_str());
    }

    #[test]
    fn prop_secret_id_debug_never_exposes_value(raw in "[a-f0-9-]{8,40}") {
        let secret = SecretId::new(raw.clone());
        let debug = format!("{secret:?}");
        prop_assert!(!debug.contains(&raw));
    }

    #[test]
    fn prop_control_characters_rejected(raw in control_char_path_strategy()) {
        prop_assert!(matches!(Path::new(&raw), Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn prop_dot_segments_rejected(
        head in secret_path_strategy(),
        dot in prop_oneof![Just("."), Just("..")],
        tail in secret_path_strategy(),
    ) {
        let raw = format!("{head}/{dot}/{tail}");
        prop_assert!(matches!(Path::new(&raw), Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn prop_clean_paths_map_under_v1(raw in secret_path_strategy()) {
        let path = Path::new(&raw).unwrap();
        let url = config().url(&path).unwrap();

        let expected = format!("/v1/{raw}");
        prop_assert_eq!(url.path(), expected.as_str());
        prop_assert_eq!(url.host_str(), Some("localhost"));
        prop_assert_eq!(url.port_or_known_default(), Some(8200));
    }

    #[test]
    fn prop_awkward_segments_stay_inside_path(segment in awkward_segment_strategy()) {
        let path = Path::root().child(&segment).unwrap();
        let url = config().url(&path).unwrap();

        prop_assert!(url.query().is_none());
        prop_assert!(url.fragment().is_none());
        let last = url.path_segments().unwrap().next_back().unwrap().to_string();
        prop_assert!(!last.contains(' '));
        prop_assert!(!last.contains('?'));
        prop_assert!(!last.contains('#'));
    }

    #[test]
    fn prop_namespaced_config_keeps_namespace(ns in namespace_strategy()) {
        let config = Config::builder().with_namespace(ns.as_str()).build().unwrap();
        prop_assert_eq!(config.namespace().as_str(), ns.as_str());
    }

    #[test]
    fn prop_parameters_last_write_wins(pairs in parameter_pairs_strategy()) {
        let params: Parameters = pairs.iter().cloned().collect();

        let mut expected = BTreeMap::new();
        for (key, value) in &pairs {
            expected.insert(key.clone(), value.clone());
        }

        prop_assert_eq!(params.len(), expected.len());
        for (key, value) in &expected {
            prop_assert_eq!(params.get(key), Some(value.as_str()));
        }
    }

    #[test]
    fn prop_parameters_serialize_as_flat_object(map in parameter_map_strategy()) {
        let forward: Parameters = map.clone().into_iter().collect();
        let backward: Parameters = map.clone().into_iter().rev().collect();

        let json = forward.to_json().unwrap();
        prop_assert_eq!(&json, &backward.to_json().unwrap());

        let decoded: BTreeMap<String, String> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, map);
    }

    #[test]
    fn prop_only_status_200_is_success(status in http_status_code_strategy()) {
        let result: HttpResult = Ok(HttpResponse { status_code: status, body: String::new() });
        prop_assert_eq!(is_success(&result), status == 200);
    }

    #[test]
    fn prop_transport_failure_is_never_success(message in "[ -~]{1,40}") {
        let result: HttpResult = Err(TransportError::Connect(message));
        prop_assert!(!is_success(&result));
    }
}
