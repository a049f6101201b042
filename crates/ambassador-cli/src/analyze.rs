//! `analyze` command: competitor content analysis for one or more keywords.

use ambassador_core::{AppConfig, CompetitorAnalysisResult, ContentMetrics};
use ambassador_scraper::{
    AnalysisCache, BlogSearchClient, CompetitorAnalyzer, PageClient, PolitenessGate,
};
use chrono::Utc;
use tokio::sync::watch;

use crate::metrics::DraftArgs;

/// Analyze each keyword in turn, printing one result per keyword.
///
/// Ctrl-C stops the current analysis before its next page fetch and prints
/// what was gathered; remaining keywords are skipped. Per-keyword failures
/// are logged and the next keyword is tried.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built, or if every keyword
/// failed.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    keywords: &[String],
    draft: DraftArgs,
    json: bool,
) -> anyhow::Result<()> {
    let search = BlogSearchClient::new(
        &config.search_base_url,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )?
    .with_credentials(
        config.search_client_id.clone(),
        config.search_client_secret.clone(),
    );
    let pages = PageClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.page_max_retries,
        config.scraper_retry_backoff_base_secs,
    )?;
    let gate = PolitenessGate::new(config.politeness_min_ms, config.politeness_max_ms);
    let analyzer = CompetitorAnalyzer::new(search, pages, gate).with_top_n(config.competitor_top_n);
    let mut cache = AnalysisCache::new(config.analysis_cache_ttl_secs);

    let (cancel_tx, mut cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current page");
            cancel_tx.send_replace(true);
        }
    });

    let draft = draft.into_draft();
    let mut failed = 0usize;
    let mut results = Vec::with_capacity(keywords.len());

    for keyword in keywords {
        if *cancel_rx.borrow() {
            tracing::info!(keyword = %keyword, "skipping keyword after interrupt");
            continue;
        }

        match analyzer
            .analyze_cached_until(&mut cache, keyword, draft.clone(), Utc::now(), &mut cancel_rx)
            .await
        {
            Ok(result) => {
                if !json {
                    print_result(&result);
                }
                results.push(result);
            }
            Err(e) => {
                failed += 1;
                tracing::error!(keyword = %keyword, error = %e, "competitor analysis failed");
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    if results.is_empty() && failed > 0 {
        anyhow::bail!("competitor analysis failed for all {failed} keyword(s)");
    }
    Ok(())
}

fn print_result(result: &CompetitorAnalysisResult) {
    let avg = &result.top_average;
    println!("keyword: {}", result.keyword);
    println!(
        "{:<4}{:<8}{:<8}{:<7}{:<10}TITLE",
        "#", "WORDS", "IMAGES", "VIDEO", "KEYWORD"
    );
    for (rank, blog) in result.top_blogs.iter().enumerate() {
        print_row(&(rank + 1).to_string(), blog, &blog.title);
    }
    println!(
        "{:<4}{:<8}{:<8}{:<7}{:<10}score {}/100",
        "avg",
        avg.word_count,
        avg.image_count,
        yes_no(avg.has_video),
        avg.keyword_frequency,
        avg.score
    );
    print_row("me", &result.my_content, &format!("score {}/100", result.my_score));
    println!();
}

fn print_row(label: &str, m: &ContentMetrics, trailer: &str) {
    println!(
        "{:<4}{:<8}{:<8}{:<7}{:<10}{}",
        label,
        m.word_count,
        m.image_count,
        yes_no(m.has_video),
        m.keyword_frequency,
        trailer
    );
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
