//! Shared helpers for the mock server tests.

#![allow(dead_code)]

use directus::DirectusClient;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "password";

/// A client authenticated with the static token `admin`.
pub async fn static_client(server: &MockServer) -> DirectusClient {
    DirectusClient::builder(server.uri())
        .static_token("admin")
        .build()
        .await
        .unwrap()
}

/// `{"data": ...}`
pub fn envelope(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

pub fn token_pair(access: &str, refresh: &str) -> ResponseTemplate {
    envelope(json!({
        "access_token": access,
        "refresh_token": refresh,
        "expires": 900000
    }))
}

/// Accept the test credentials at `/auth/login` and hand out
/// `access-1`/`refresh-1`.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": EMAIL, "password": PASSWORD})))
        .respond_with(token_pair("access-1", "refresh-1"))
        .mount(server)
        .await;
}

/// Requests the server saw for `method` + `path`, in arrival order.
pub async fn requests_to(server: &MockServer, verb: &str, route: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == route)
        .collect()
}

/// JSON bodies of the requests the server saw for `method` + `path`.
pub async fn bodies_to(server: &MockServer, verb: &str, route: &str) -> Vec<Value> {
    requests_to(server, verb, route)
        .await
        .iter()
        .map(|r| r.body_json::<Value>().unwrap())
        .collect()
}

/// A field descriptor the way `/fields/{collection}` reports it.
pub fn field(collection: &str, name: &str, meta_id: u64, primary_key: bool) -> Value {
    json!({
        "collection": collection,
        "field": name,
        "type": if primary_key { "integer" } else { "string" },
        "schema": {
            "name": name,
            "table": collection,
            "is_primary_key": primary_key,
            "foreign_key_table": null
        },
        "meta": {
            "id": meta_id,
            "collection": collection,
            "field": name,
            "interface": "input"
        }
    })
}
