//! Login strategies and client construction against a mock Vault server.

use vault_client::{
    AppRoleStrategy, AuthStrategy, Client, Config, HttpExecutor, RoleId, SecretId, Token,
    TokenStrategy, VaultError,
};
use vault_test_utils::fixtures::{
    approle_login_response, error_response, login_response_without_token,
};
use vault_test_utils::{ErrorLog, MockVault, unused_local_port};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn approle() -> AppRoleStrategy {
    AppRoleStrategy::new(RoleId::new("test-role-id"), SecretId::new("test-secret-id"))
}

fn mount_login(vault: &MockVault, response: ResponseTemplate) {
    vault.mount(
        Mock::given(method("POST"))
            .and(path("/v1/auth/approle/login"))
            .and(body_json(serde_json::json!({
                "role_id": "test-role-id",
                "secret_id": "test-secret-id"
            })))
            .respond_with(response)
            .expect(1),
    );
}

#[test]
fn test_approle_login_yields_client_token() {
    let vault = MockVault::start();
    mount_login(
        &vault,
        ResponseTemplate::new(200).set_body_json(approle_login_response("t1")),
    );

    let config = vault.config();
    let executor = HttpExecutor::new(&config);
    let token = approle().login(&config, &executor).unwrap();

    assert_eq!(token.expose(), "t1");
    vault.verify();
}

#[test]
fn test_approle_login_sends_no_token_or_namespace() {
    let vault = MockVault::start();
    mount_login(
        &vault,
        ResponseTemplate::new(200).set_body_json(approle_login_response("t1")),
    );

    let config = vault.config_builder().with_namespace("team-a").build().unwrap();
    let client = Client::new(config, &approle()).unwrap();
    assert_eq!(client.token().expose(), "t1");
    assert_eq!(client.namespace().as_str(), "team-a");

    let requests = vault.received_requests();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("x-vault-token"));
    assert!(!requests[0].headers.contains_key("x-vault-namespace"));
}

#[test]
fn test_approle_login_forbidden_is_auth_failure() {
    let vault = MockVault::start();
    mount_login(
        &vault,
        ResponseTemplate::new(403).set_body_json(error_response("permission denied")),
    );

    let config = vault.config();
    let executor = HttpExecutor::new(&config);
    let err = approle().login(&config, &executor).unwrap_err();

    match err {
        VaultError::Authentication(reason) => assert!(reason.contains("403")),
        other => panic!("expected authentication failure, got {other:?}"),
    }
}

#[test]
fn test_approle_login_missing_token_is_auth_failure() {
    let vault = MockVault::start();
    mount_login(
        &vault,
        ResponseTemplate::new(200).set_body_json(login_response_without_token()),
    );

    let config = vault.config();
    let executor = HttpExecutor::new(&config);
    let result = approle().login(&config, &executor);

    assert!(matches!(result, Err(VaultError::Authentication(_))));
}

#[test]
fn test_approle_login_unparseable_body_is_auth_failure() {
    let vault = MockVault::start();
    mount_login(
        &vault,
        ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"),
    );

    let config = vault.config();
    let executor = HttpExecutor::new(&config);
    let result = approle().login(&config, &executor);

    assert!(matches!(result, Err(VaultError::Authentication(_))));
}

#[test]
fn test_approle_login_unreachable_is_auth_failure() {
    let config = Config::builder()
        .with_host("127.0.0.1")
        .with_port(unused_local_port())
        .with_tls_enabled(false)
        .with_connect_timeout(2)
        .build()
        .unwrap();
    let errors = ErrorLog::new();

    let result = Client::with_error_callback(config, &approle(), errors.recorder());

    assert!(matches!(result, Err(VaultError::Authentication(_))));
    assert_eq!(errors.count(), 1);
}

#[test]
fn test_token_strategy_never_contacts_server() {
    let vault = MockVault::start();
    vault.mount(
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0),
    );

    let config = vault.config();
    let strategy = TokenStrategy::new(Token::new("s.preissued")).unwrap();
    let client = Client::new(config, &strategy).unwrap();

    assert_eq!(client.token().expose(), "s.preissued");
    assert!(vault.received_requests().is_empty());
    vault.verify();
}

#[test]
fn test_token_strategy_rejects_empty_token_at_construction() {
    assert!(matches!(
        TokenStrategy::new(Token::empty()),
        Err(VaultError::InvalidInput(_))
    ));
}

#[test]
fn test_client_construction_fails_when_login_fails() {
    let vault = MockVault::start();
    mount_login(
        &vault,
        ResponseTemplate::new(400).set_body_json(error_response("invalid role ID")),
    );

    let result = Client::new(vault.config(), &approle());

    assert!(matches!(result, Err(VaultError::Authentication(_))));
}
