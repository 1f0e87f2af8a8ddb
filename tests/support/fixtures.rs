//! Test fixtures and mock CMS setup.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `.env` with the settings most tests rely on.
pub const SAMPLE_ENV: &str = "\
# application settings
SRC_PATH=app
SPA_PATH=Spa
EPI_MODEL_PATH=app/Models/Episerver
";

/// A path mapping file declaring two aliases.
pub const SAMPLE_TSCONFIG: &str = r#"{
    "compilerOptions": {
        "baseUrl": ".",
        "paths": {
            "app/*": ["src/*"],
            "shared/*": ["lib/shared/*"]
        }
    }
}"#;

/// Base URL of a mock server, with its trailing slash.
pub fn base_url(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

/// Mount a token endpoint that accepts `username`/`password` only.
pub async fn mount_token_endpoint(server: &MockServer, username: &str, password: &str) {
    use wiremock::matchers::body_string_contains;

    Mock::given(method("POST"))
        .and(path("/api/episerver/auth/token"))
        .and(body_string_contains(format!("username={}", username)))
        .and(body_string_contains(format!("password={}", password)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "client_id": "Default",
        })))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/episerver/auth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .with_priority(2)
        .mount(server)
        .await;
}

/// Mount a model service knowing a start page and a teaser block.
pub async fn mount_model_service(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/episerver/v3/model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Name": "StartPage", "DisplayName": "Start page", "Description": "Site root", "GUID": "g-start"},
            {"Name": "TeaserBlock", "DisplayName": "Teaser", "GUID": "g-teaser"}
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/episerver/v3/model/g-start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Name": "StartPage", "DisplayName": "Start page", "GUID": "g-start",
            "Properties": [
                {"Name": "Heading", "DisplayName": "Heading", "Type": "String"},
                {"Name": "Teaser", "DisplayName": "Teaser", "Type": "TeaserBlock"}
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/episerver/v3/model/g-teaser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Name": "TeaserBlock", "DisplayName": "Teaser", "GUID": "g-teaser",
            "Properties": [{"Name": "Text", "Type": "XhtmlString"}]
        })))
        .mount(server)
        .await;
}
