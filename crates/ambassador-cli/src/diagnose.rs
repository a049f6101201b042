//! `diagnose` command: classify a blog and record the snapshot.

use ambassador_core::{
    AccountMetricsSource, AppConfig, CoreError, DiagnosisSnapshot, SimulatedMetricsSource,
    SnapshotHistory,
};
use chrono::{DateTime, Utc};

/// Diagnose `blog_id` and print the snapshot.
///
/// With a configured database the snapshot is persisted under the history
/// retention cap, and an existing snapshot from today is reused unless
/// `force` is set. Without one the run is in-memory only.
///
/// # Errors
///
/// Returns an error for a blank blog id, or if any database call fails.
pub(crate) async fn run_diagnose(
    config: &AppConfig,
    blog_id: &str,
    force: bool,
    json: bool,
) -> anyhow::Result<()> {
    let blog_id = blog_id.trim();
    if blog_id.is_empty() {
        return Err(CoreError::InvalidBlogId.into());
    }

    let source = SimulatedMetricsSource::default();
    let now = Utc::now();

    let snapshot = if config.database_url.is_some() {
        let pool = ambassador_db::connect_pool_from_config(config).await?;
        diagnose_persisted(&pool, &source, blog_id, force, now, config.history_retention).await?
    } else {
        tracing::info!("DATABASE_URL not set; snapshot will not be persisted");
        let mut history = SnapshotHistory::with_retention(config.history_retention);
        ambassador_core::run_diagnosis(&source, &mut history, blog_id, now).await?
    };

    print_snapshot(&snapshot, json)
}

async fn diagnose_persisted<S: AccountMetricsSource>(
    pool: &sqlx::PgPool,
    source: &S,
    blog_id: &str,
    force: bool,
    now: DateTime<Utc>,
    retention: usize,
) -> anyhow::Result<DiagnosisSnapshot> {
    if !force {
        if let Some(row) =
            ambassador_db::get_snapshot_for_day(pool, blog_id, now.date_naive()).await?
        {
            tracing::info!(
                blog = blog_id,
                "already diagnosed today; pass --force to diagnose again"
            );
            return Ok(row.into_snapshot()?);
        }
    }

    let snapshot = ambassador_core::diagnose(source, blog_id, now).await?;
    let evicted = ambassador_db::insert_diagnosis_snapshot(pool, &snapshot, retention).await?;
    tracing::info!(
        blog = blog_id,
        status = %snapshot.status,
        score = snapshot.score,
        evicted,
        "diagnosis snapshot recorded"
    );
    Ok(snapshot)
}

fn print_snapshot(snapshot: &DiagnosisSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    let m = &snapshot.metrics;
    println!("blog:    {}", snapshot.blog_id);
    println!("date:    {}", snapshot.date.format("%Y-%m-%d %H:%M UTC"));
    println!("status:  {}", snapshot.status);
    println!("score:   {}/100", snapshot.score);
    println!(
        "metrics: {} recent posts, {:.1}% index errors, {:.1}% keyword exposure",
        m.recent_post_count, m.index_error_rate, m.keyword_exposure_rate
    );
    println!("facts:");
    for fact in &snapshot.facts {
        println!("  - {fact}");
    }
    println!("solution:");
    for (i, step) in snapshot.solution.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    println!("{}", snapshot.comment);
    Ok(())
}
