//! Vault response bodies for mock servers.

use serde_json::{Value, json};

/// Successful AppRole login carrying `client_token`.
#[must_use]
pub fn approle_login_response(client_token: &str) -> Value {
    json!({
        "request_id": "5b9f3c1e-8a0d-4c62-9d3e-0f6a2b7c1d44",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 0,
        "data": null,
        "wrap_info": null,
        "warnings": null,
        "auth": {
            "client_token": client_token,
            "accessor": "hmac-accessor",
            "policies": ["default", "example"],
            "token_policies": ["default", "example"],
            "metadata": { "role_name": "example" },
            "lease_duration": 3600,
            "renewable": true,
            "entity_id": "7d2e5f0a-1b3c-4d6e-8f9a-0b1c2d3e4f5a",
            "token_type": "service",
            "orphan": true
        }
    })
}

/// Login response with an `auth` object but no token.
#[must_use]
pub fn login_response_without_token() -> Value {
    json!({ "auth": {} })
}

/// Vault error envelope.
#[must_use]
pub fn error_response(message: &str) -> Value {
    json!({ "errors": [message] })
}

/// KV version 2 read response.
#[must_use]
pub fn kv_v2_read_response(data: Value, version: u64) -> Value {
    json!({
        "request_id": "1c7a9e2d-3b4f-4a6c-8d0e-2f4a6b8c0d1e",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 0,
        "data": {
            "data": data,
            "metadata": {
                "created_time": "2024-01-01T00:00:00Z",
                "deletion_time": "",
                "destroyed": false,
                "version": version
            }
        },
        "wrap_info": null,
        "warnings": null,
        "auth": null
    })
}

/// LIST response with the given keys.
#[must_use]
pub fn list_response(keys: &[&str]) -> Value {
    json!({ "data": { "keys": keys } })
}

/// `role-id` endpoint response.
#[must_use]
pub fn role_id_response(role_id: &str) -> Value {
    json!({ "data": { "role_id": role_id } })
}

/// `secret-id` endpoint response.
#[must_use]
pub fn secret_id_response(secret_id: &str) -> Value {
    json!({
        "data": {
            "secret_id": secret_id,
            "secret_id_accessor": "84896a0c-1347-aa90-a4f6-aca8b7558780",
            "secret_id_ttl": 0
        }
    })
}
