//! SDK against a live JSON-RPC server backed by SQLite

use std::sync::Arc;

use disposal_api_rpc::{RpcServer, RpcServerConfig, ServerHandle};
use disposal_core::application::DisposalClient;
use disposal_core::domain::{DisposalMethod, JobDescriptor};
use disposal_infra_sqlite::{create_pool, run_migrations, SqliteMarkerStore};
use disposal_sdk::{DisposalAdminClient, TargetRequest};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::ClientError;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::HttpClientBuilder;
use sqlx::SqlitePool;

struct Daemon {
    pool: SqlitePool,
    client: DisposalClient,
    handle: ServerHandle,
    url: String,
    sdk: DisposalAdminClient,
}

impl Daemon {
    async fn start() -> Self {
        let pool = create_pool(":memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        let client = DisposalClient::new(Arc::new(SqliteMarkerStore::new(pool.clone())));

        let config = RpcServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let (addr, handle) = RpcServer::new(config, client.clone()).start().await.unwrap();
        let url = format!("http://{}", addr);
        let sdk = DisposalAdminClient::connect(&url).await.unwrap();

        Self {
            pool,
            client,
            handle,
            url,
            sdk,
        }
    }

    async fn stop(self) {
        self.handle.stop().unwrap();
        self.handle.stopped().await;
        self.pool.close().await;
    }
}

fn target(jid: &str, bid: Option<&str>, class: Option<&str>) -> TargetRequest {
    TargetRequest {
        jid: Some(jid.to_string()),
        bid: bid.map(str::to_string),
        class: class.map(str::to_string),
    }
}

#[tokio::test]
async fn test_mark_then_target() {
    let daemon = Daemon::start().await;

    let marked = daemon.sdk.mark("kill", "jid", "a1b2c3").await.unwrap();
    assert!(marked.marked);
    assert_eq!(marked.method, "kill");
    assert_eq!(marked.marker.as_deref(), Some("jid:a1b2c3"));

    let hit = daemon.sdk.target(&target("a1b2c3", None, None)).await.unwrap();
    assert_eq!(hit.disposal_method.as_deref(), Some("kill"));

    let miss = daemon.sdk.target(&target("zzz", None, None)).await.unwrap();
    assert_eq!(miss.disposal_method, None);

    daemon.stop().await;
}

#[tokio::test]
async fn test_admin_writes_are_visible_to_the_runtime() {
    let daemon = Daemon::start().await;

    daemon
        .sdk
        .mark("discard", "class", "NightlyReportJob")
        .await
        .unwrap();

    let job = JobDescriptor::new("n1").with_class("NightlyReportJob");
    assert_eq!(
        daemon.client.target_disposal_method(&job).await.unwrap(),
        Some(DisposalMethod::Discard)
    );

    daemon.stop().await;
}

#[tokio::test]
async fn test_kill_wins_over_the_wire() {
    let daemon = Daemon::start().await;

    daemon.sdk.mark("discard", "bid", "batch42").await.unwrap();
    daemon.sdk.mark("kill", "class", "ImportJob").await.unwrap();

    let both = daemon
        .sdk
        .target(&target("j1", Some("batch42"), Some("ImportJob")))
        .await
        .unwrap();
    assert_eq!(both.disposal_method.as_deref(), Some("kill"));

    daemon.stop().await;
}

#[tokio::test]
async fn test_markers_listing_and_unmark_all() {
    let daemon = Daemon::start().await;

    daemon.sdk.mark("kill", "jid", "a").await.unwrap();
    daemon.sdk.mark("kill", "class", "Reports::Weekly").await.unwrap();
    daemon.sdk.mark("discard", "jid", "b").await.unwrap();

    let mut listed = daemon.sdk.markers("kill").await.unwrap().markers;
    listed.sort_by(|a, b| a.marker.cmp(&b.marker));
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].marker, "class:Reports::Weekly");
    assert_eq!(listed[0].marker_type.as_deref(), Some("class"));
    assert_eq!(listed[0].value.as_deref(), Some("Reports::Weekly"));
    assert_eq!(listed[1].marker, "jid:a");

    let cleared = daemon.sdk.unmark_all("kill").await.unwrap();
    assert!(cleared.cleared);
    assert!(daemon.sdk.markers("kill").await.unwrap().markers.is_empty());
    assert_eq!(daemon.sdk.markers("discard").await.unwrap().markers.len(), 1);

    daemon.stop().await;
}

#[tokio::test]
async fn test_unmark_and_empty_value() {
    let daemon = Daemon::start().await;

    daemon.sdk.mark("discard", "jid", "x").await.unwrap();
    let unmarked = daemon.sdk.unmark("discard", "jid", "x").await.unwrap();
    assert!(unmarked.unmarked);
    assert!(daemon.sdk.markers("discard").await.unwrap().markers.is_empty());

    let empty = daemon.sdk.mark("discard", "jid", "").await.unwrap();
    assert!(!empty.marked);
    assert_eq!(empty.marker, None);
    assert!(daemon.sdk.markers("discard").await.unwrap().markers.is_empty());

    daemon.stop().await;
}

#[tokio::test]
async fn test_invalid_names_are_validation_errors() {
    let daemon = Daemon::start().await;

    let bad_method = daemon.sdk.mark("drop", "jid", "a").await.unwrap_err();
    assert!(bad_method.is_validation(), "got {:?}", bad_method);

    let bad_type = daemon.sdk.mark("kill", "queue", "a").await.unwrap_err();
    assert!(bad_type.is_validation(), "got {:?}", bad_type);

    let bad_listing = daemon.sdk.markers("delete").await.unwrap_err();
    assert!(bad_listing.is_validation());

    assert!(daemon.sdk.markers("kill").await.unwrap().markers.is_empty());

    daemon.stop().await;
}

#[tokio::test]
async fn test_store_outage_is_reported() {
    let daemon = Daemon::start().await;
    daemon.pool.close().await;

    let err = daemon.sdk.mark("kill", "jid", "a").await.unwrap_err();
    assert!(err.is_store_unavailable(), "got {:?}", err);

    let err = daemon
        .sdk
        .target(&target("a", None, None))
        .await
        .unwrap_err();
    assert!(err.is_store_unavailable());

    daemon.handle.stop().unwrap();
    daemon.handle.stopped().await;
}

#[tokio::test]
async fn test_malformed_params_are_validation_errors() {
    let daemon = Daemon::start().await;
    let raw = HttpClientBuilder::default().build(&daemon.url).unwrap();

    // No "method" field at all
    let err = raw
        .request::<serde_json::Value, _>("disposal.markers.v1", ObjectParams::new())
        .await
        .unwrap_err();
    match err {
        ClientError::Call(call) => assert_eq!(call.code(), 4000),
        other => panic!("expected a call error, got {:?}", other),
    }

    daemon.stop().await;
}
