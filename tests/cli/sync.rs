//! Tests for `epikit sync`.

use crate::support::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_generates_models_mapper_and_schema() {
    let server = MockServer::start().await;
    mount_model_service(&server).await;
    let url = base_url(&server);
    let t = Test::with_env(SAMPLE_ENV);
    t.store_token(&url, "editor");

    let output = t.against(&url, &["sync"]);
    assert_success(&output);
    assert_stdout_contains(&output, "2 content types, 4 files written");
    assert_stdout_contains(&output, "editor");

    let start = t.read("app/Models/Episerver/StartPageData.ts");
    assert!(start.contains("export default interface StartPageData"));
    assert!(start.contains("import TeaserBlockData from './TeaserBlockData'"));
    assert!(t.read("app/Models/Episerver/TypeMapper.ts").contains("StartPage"));

    let schema: serde_json::Value =
        serde_json::from_str(&t.read("app/Models/Episerver/schema.json")).unwrap();
    assert!(schema["StartPage"]["properties"].get("heading").is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_removes_stale_models() {
    let server = MockServer::start().await;
    mount_model_service(&server).await;
    let url = base_url(&server);
    let t = Test::with_env(SAMPLE_ENV);
    t.write("app/Models/Episerver/OldPageData.ts", "// stale");
    t.write("app/Models/Episerver/StartPageData.ts", "// outdated");

    let output = t.against(&url, &["sync", "--no-schema"]);
    assert_success(&output);
    assert_stdout_contains(&output, "removed");

    let dir = t.dir.path().join("app/Models/Episerver");
    assert!(!dir.join("OldPageData.ts").exists());
    assert!(!dir.join("schema.json").exists());
    assert!(t.read("app/Models/Episerver/StartPageData.ts").contains("StartPageData"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_output_flag() {
    let server = MockServer::start().await;
    mount_model_service(&server).await;
    let url = base_url(&server);
    let t = Test::new();

    let output = t.against(&url, &["sync", "--output", "generated", "--concurrency", "1"]);
    assert_success(&output);
    assert!(t.dir.path().join("generated/TeaserBlockData.ts").is_file());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_aborts_without_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let url = base_url(&server);
    let t = Test::with_env(SAMPLE_ENV);
    t.write("app/Models/Episerver/KeepMeData.ts", "// untouched");

    let output = t.against(&url, &["sync"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "unable to retrieve content types");
    assert_eq!(t.read("app/Models/Episerver/KeepMeData.ts"), "// untouched");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_reports_skipped_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/episerver/v3/model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Name": "GonePage", "GUID": "g-gone"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/episerver/v3/model/g-gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let url = base_url(&server);
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.against(&url, &["sync"]);
    assert_success(&output);
    assert_stderr_contains(&output, "no details for GonePage, model file skipped");
    let dir = t.dir.path().join("app/Models/Episerver");
    assert!(!dir.join("GonePageData.ts").exists());
    assert!(t.read("app/Models/Episerver/TypeMapper.ts").contains("GonePage"));
}
