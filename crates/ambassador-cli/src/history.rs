//! Read-only diagnosis history query.

/// Show recent diagnosis snapshots, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub(crate) async fn run_history(
    pool: &sqlx::PgPool,
    blog_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<()> {
    let rows = ambassador_db::list_diagnosis_snapshots(pool, blog_filter, limit.max(1)).await?;

    if rows.is_empty() {
        println!(
            "no diagnosis snapshots found{}; run `diagnose` first",
            blog_filter
                .map(|b| format!(" for blog '{b}'"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    println!("{:<22}{:<18}{:<9}{:<7}COMMENT", "BLOG", "DIAGNOSED", "STATUS", "SCORE");
    for row in rows {
        let snapshot = row.into_snapshot()?;
        let diagnosed = snapshot.date.format("%Y-%m-%d %H:%M").to_string();
        println!(
            "{:<22}{:<18}{:<9}{:<7}{}",
            snapshot.blog_id,
            diagnosed,
            snapshot.status.as_str(),
            snapshot.score,
            snapshot.comment
        );
    }

    Ok(())
}
