use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use batch_locator::Application;
use locator_config::{AppConfig, CanonicalIdPolicy};
use locator_core::ErrorCode;
use locator_testing_utils::StaticCanonicalizer;

const CONFIG: &str = r#"
[client]
default_server = "clusterA"
canonical_id_policy = "literal"

[server]
server_name = "clusterA"
tracking_capacity = 8

[logging]
level = "debug"
format = "json"
"#;

const SNAPSHOT: &str = r#"{
    "jobs": [
        {"job_id": "42.clusterA", "state": "RUNNING"},
        {"job_id": "43.clusterA", "state": "MOVED"},
        {"job_id": "44.clusterA", "state": "FINISHED", "archived": true}
    ],
    "tracking": [
        {"job_id": "43.clusterA", "location": "clusterB", "last_modified": 1717243200},
        {"job_id": "7[].clusterA", "location": "clusterC", "last_modified": 1717243260}
    ]
}"#;

fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn application() -> (Application, NamedTempFile) {
    let config_file = write_temp(CONFIG, ".toml");
    let config = AppConfig::load(config_file.path().to_str()).unwrap();
    let app = Application::with_canonicalizer(config, Arc::new(StaticCanonicalizer::identity()));
    (app, config_file)
}

#[test]
fn test_config_file_is_loaded() {
    let (app, _file) = application();
    let config = app.config();
    assert_eq!(config.client.default_server.as_deref(), Some("clusterA"));
    assert_eq!(config.client.canonical_id_policy, CanonicalIdPolicy::Literal);
    assert_eq!(config.server.tracking_capacity, 8);
}

#[test]
fn test_resolve_through_application() {
    let (app, _file) = application();
    let resolution = app.resolve("42.clusterA@clusterB").unwrap();
    assert_eq!(resolution.canonical_id(), "42.clusterA");
    assert_eq!(resolution.destination(), "clusterB");

    let json = serde_json::to_value(&resolution).unwrap();
    assert_eq!(json["canonical_id"], "42.clusterA");
    assert_eq!(json["destination"], "clusterB");

    assert!(app.resolve("not-a-job").is_err());
}

#[test]
fn test_starting_server_from_configured_instances() {
    let config_file = write_temp(
        r#"
[client]
default_server = "clusterA"
batch_service_port = 15001
servers = [
    { name = "clusterA", port = 15001 },
    { name = "clusterB", port = 15001 },
    { name = "clusterB", port = 15002 },
]
"#,
        ".toml",
    );
    let config = AppConfig::load(config_file.path().to_str()).unwrap();
    let app = Application::with_canonicalizer(config, Arc::new(StaticCanonicalizer::identity()));

    let first = |job_id: &str| {
        app.starting_server(job_id)
            .unwrap()
            .map(|s| (s.name.clone(), s.port))
    };
    assert_eq!(first("42"), Some(("clusterA".to_string(), 15001)));
    assert_eq!(first("42.clusterB"), Some(("clusterB".to_string(), 15001)));
    assert_eq!(first("42@clusterB:15002"), Some(("clusterB".to_string(), 15002)));
    assert_eq!(first("42.elsewhere"), None);
}

#[test]
fn test_starting_server_without_instances() {
    let (app, _file) = application();
    assert!(app.starting_server("42").unwrap().is_none());
}

#[tokio::test]
async fn test_locate_against_snapshot() {
    let (app, _file) = application();
    let snapshot = write_temp(SNAPSHOT, ".json");

    let reply = app.locate("42", snapshot.path()).await.unwrap();
    assert_eq!(reply.location(), Some("clusterA"));

    let reply = app.locate("43.clusterA@clusterA", snapshot.path()).await.unwrap();
    assert_eq!(reply.location(), Some("clusterB"));

    let reply = app.locate("7[12].clusterA", snapshot.path()).await.unwrap();
    assert_eq!(reply.location(), Some("clusterC"));

    let reply = app.locate("44.clusterA", snapshot.path()).await.unwrap();
    assert_eq!(reply.error_code(), Some(ErrorCode::HistoryJobId));

    let reply = app.locate("45.clusterA", snapshot.path()).await.unwrap();
    assert_eq!(reply.error_code(), Some(ErrorCode::UnknownJobId));
}

#[tokio::test]
async fn test_missing_snapshot_is_an_error() {
    let (app, _file) = application();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(app.locate("42", &missing).await.is_err());
}
