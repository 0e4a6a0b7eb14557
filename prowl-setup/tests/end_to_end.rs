//! Full setup runs against the stub target API

use prowl_core::domain::call::CallSite;
use prowl_mock::{API_PREFIX, MockOptions, MockStore, spawn};
use prowl_setup::{Config, SetupError, run_from_config};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const KEY: &str = "0123456789abcdef0123456789abcdef";

const INDEXERS: &str = r#"[
    {"name": "A", "implementation": "Cardigann", "fields": [{"name": "definitionFile", "value": "a"}]},
    {"name": "B", "implementation": "Cardigann", "fields": [{"name": "cardigannCaptcha", "value": ""}]},
    {"name": "C", "implementation": "Torznab"}
]"#;

const PROXY: &str = r#"{
    "name": "FlareSolverr",
    "implementation": "FlareSolverr",
    "fields": [{"name": "host", "value": "${FLARESOLVERR_HOST}"}],
    "tags": [${TAG_ID}]
}"#;

struct Harness {
    _dir: TempDir,
    config: Config,
    store: Arc<MockStore>,
}

async fn harness(options: MockOptions) -> Harness {
    let (addr, store) = spawn("127.0.0.1:0", options).await.unwrap();

    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    let indexers_file = dir.path().join("indexers.json");
    let proxy_template_file = dir.path().join("proxy.json");
    std::fs::write(&env_file, format!("PROWLARR_API_KEY={}\n", KEY)).unwrap();
    std::fs::write(&indexers_file, INDEXERS).unwrap();
    std::fs::write(&proxy_template_file, PROXY).unwrap();

    let config = Config {
        target_url: format!("http://{}{}", addr, API_PREFIX),
        env_file,
        indexers_file,
        proxy_template_file,
        poll_interval: Duration::from_millis(10),
        ready_timeout: Some(Duration::from_secs(5)),
        request_timeout: Duration::from_secs(5),
        ..Config::default()
    };

    Harness {
        _dir: dir,
        config,
        store,
    }
}

fn sequence(store: &MockStore) -> Vec<String> {
    store
        .calls()
        .into_iter()
        .map(|call| {
            let name = call
                .body
                .as_ref()
                .and_then(|b| b.get("name"))
                .and_then(|n| n.as_str())
                .map(|n| format!("({})", n))
                .unwrap_or_default();
            format!("{} {}{}", call.method, call.path, name)
        })
        .collect()
}

#[tokio::test]
async fn test_full_run_against_mock() {
    let h = harness(MockOptions {
        unhealthy_probes: 2,
        ..MockOptions::new(KEY)
    })
    .await;

    let summary = run_from_config(&h.config).await.unwrap();

    assert_eq!(summary.ready.attempts, 3);
    assert_eq!(summary.tag_id, Some(1));
    assert_eq!(
        sequence(&h.store),
        vec![
            "GET /health",
            "GET /health",
            "GET /health",
            "POST /tag",
            "POST /indexerProxy(FlareSolverr)",
            "POST /indexer(A)",
            "POST /indexer(B)",
            "POST /indexer/action/checkCaptcha(B)",
            "POST /indexer(B)",
            "POST /indexer(C)",
        ]
    );

    // Second create of B collides with the first
    assert_eq!(
        summary.report.tally(),
        vec![
            (1, 0, "A".to_string()),
            (2, 1, "B".to_string()),
            (1, 0, "C".to_string()),
        ]
    );

    let proxy = &h.store.proxies()[0];
    assert_eq!(proxy["tags"][0], 1);
    assert_eq!(proxy["fields"][0]["value"], "http://flaresolverr:8191/");
    assert_eq!(h.store.indexer_names(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_indexer_payload_is_sent_verbatim() {
    let h = harness(MockOptions::new(KEY)).await;
    run_from_config(&h.config).await.unwrap();

    let sent = h
        .store
        .calls()
        .into_iter()
        .find(|c| c.path == CallSite::CreateIndexer.path())
        .and_then(|c| c.body)
        .unwrap();
    let original: serde_json::Value = serde_json::from_str(INDEXERS).unwrap();
    assert_eq!(sent, original[0]);
}

#[tokio::test]
async fn test_tag_failure_is_fatal() {
    let h = harness(MockOptions {
        fail_tag: true,
        ..MockOptions::new(KEY)
    })
    .await;

    let err = run_from_config(&h.config).await.unwrap_err();
    assert!(matches!(
        err,
        SetupError::FatalStage {
            site: CallSite::CreateTag,
            status: Some(400),
            ..
        }
    ));
    assert_eq!(sequence(&h.store), vec!["GET /health", "POST /tag"]);
}

#[tokio::test]
async fn test_proxy_failure_is_fatal() {
    let h = harness(MockOptions {
        fail_proxy: true,
        ..MockOptions::new(KEY)
    })
    .await;

    let err = run_from_config(&h.config).await.unwrap_err();
    assert!(matches!(
        err,
        SetupError::FatalStage {
            site: CallSite::RegisterProxy,
            ..
        }
    ));
    assert!(h.store.indexers().is_empty());
    assert!(
        h.store
            .calls()
            .iter()
            .all(|c| !c.path.starts_with("/indexer/") && c.path != "/indexer")
    );
}

#[tokio::test]
async fn test_rejected_indexer_does_not_stop_the_rest() {
    let mut options = MockOptions::new(KEY);
    options.fail_indexers.insert("A".to_string());
    let h = harness(options).await;

    let summary = run_from_config(&h.config).await.unwrap();

    assert_eq!(summary.report.indexers.len(), 3);
    assert_eq!(summary.report.indexers[0].failed(), 1);
    assert_eq!(h.store.indexer_names(), vec!["B", "C"]);
}

#[tokio::test]
async fn test_wrong_key_never_becomes_ready() {
    let mut h = harness(MockOptions::new("another-key")).await;
    h.config.ready_timeout = Some(Duration::from_millis(100));

    let err = run_from_config(&h.config).await.unwrap_err();
    assert!(matches!(err, SetupError::Readiness(_)));
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn test_rerun_sends_the_same_sequence() {
    let h = harness(MockOptions::new(KEY)).await;

    run_from_config(&h.config).await.unwrap();
    let first = sequence(&h.store);

    run_from_config(&h.config).await.unwrap();
    let all = sequence(&h.store);

    assert_eq!(&all[first.len()..], first.as_slice());
}

#[tokio::test]
async fn test_malformed_record_is_rejected_alone() {
    let h = harness(MockOptions::new(KEY)).await;
    std::fs::write(
        &h.config.indexers_file,
        r#"[{"name": "A"}, {"implementation": "Torznab"}, {"name": "C"}]"#,
    )
    .unwrap();

    let summary = run_from_config(&h.config).await.unwrap();

    assert_eq!(
        summary.report.tally(),
        vec![
            (1, 0, "A".to_string()),
            (0, 1, "#1".to_string()),
            (1, 0, "C".to_string()),
        ]
    );
    assert_eq!(h.store.indexer_names(), vec!["A", "C"]);
}
