//! Offline unit tests for ambassador-db pool configuration and row types.
//! These tests do not require a live database connection.

use ambassador_core::{AppConfig, Environment, HealthStatus};
use ambassador_db::{DbError, DiagnosisSnapshotRow, PoolConfig};
use chrono::Utc;
use uuid::Uuid;

fn app_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        database_url: Some("postgres://example".to_string()),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        search_base_url: "https://openapi.naver.com".to_string(),
        search_client_id: None,
        search_client_secret: None,
        scraper_request_timeout_secs: 30,
        scraper_user_agent: "ua".to_string(),
        scraper_max_retries: 2,
        scraper_retry_backoff_base_secs: 1,
        page_max_retries: 0,
        politeness_min_ms: 1_000,
        politeness_max_ms: 3_000,
        competitor_top_n: 3,
        analysis_cache_ttl_secs: 3_600,
        history_retention: 30,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn connect_without_database_url_is_missing_url() {
    let mut config = app_config();
    config.database_url = None;
    let err = ambassador_db::connect_pool_from_config(&config)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::MissingDatabaseUrl));
}

/// Compile-time smoke test: confirm that [`DiagnosisSnapshotRow`] has all
/// expected fields with the correct types. No database required.
#[test]
fn diagnosis_snapshot_row_has_expected_fields() {
    let now = Utc::now();
    let row = DiagnosisSnapshotRow {
        seq: 1_i64,
        id: Uuid::new_v4(),
        blog_id: "clinic_a".to_string(),
        diagnosed_at: now,
        status: "GREEN".to_string(),
        score: 88_i16,
        recent_post_count: 12_i64,
        index_error_rate: 1.5_f64,
        keyword_exposure_rate: 81.0_f64,
        facts: serde_json::json!([]),
        solution: serde_json::json!(["keep posting"]),
        comment: String::new(),
        created_at: now,
    };

    let snapshot = row.into_snapshot().expect("valid row converts");
    assert_eq!(snapshot.status, HealthStatus::Green);
    assert!(snapshot.facts.is_empty());
    assert_eq!(snapshot.date, now);
}
