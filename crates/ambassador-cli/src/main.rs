mod analyze;
mod diagnose;
mod history;
mod metrics;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ambassador-cli")]
#[command(about = "Blog health and competitor content tooling for clinic marketing")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diagnose a blog's health and record a snapshot
    Diagnose {
        /// Blog account identifier
        #[arg(long)]
        blog: String,

        /// Diagnose again even if today's snapshot exists
        #[arg(long)]
        force: bool,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two blogs given as `posts,index_error_rate,keyword_exposure_rate`
    Compare {
        /// Your blog's metrics
        #[arg(long, value_parser = metrics::parse_blog_metrics)]
        mine: ambassador_core::BlogMetrics,

        /// The competitor's metrics
        #[arg(long, value_parser = metrics::parse_blog_metrics)]
        other: ambassador_core::BlogMetrics,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score a draft's content attributes on the 0-100 scale
    ScoreContent {
        #[command(flatten)]
        draft: metrics::DraftArgs,
    },
    /// Analyze the top-ranking posts for one or more keywords against a draft
    Analyze {
        /// Search keyword; repeat to analyze several
        #[arg(long = "keyword", required = true)]
        keywords: Vec<String>,

        #[command(flatten)]
        draft: metrics::DraftArgs,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recent diagnosis snapshots
    History {
        /// Filter to one blog
        #[arg(long)]
        blog: Option<String>,

        /// Maximum number of snapshots to show
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify the database connection
    Ping,
    /// Apply pending migrations
    Migrate,
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ambassador_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(env = %config.env, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Diagnose { blog, force, json }) => {
            diagnose::run_diagnose(&config, &blog, force, json).await?;
        }
        Some(Commands::Compare { mine, other, json }) => {
            metrics::run_compare(&mine, &other, json)?;
        }
        Some(Commands::ScoreContent { draft }) => metrics::run_score_content(draft),
        Some(Commands::Analyze {
            keywords,
            draft,
            json,
        }) => {
            analyze::run_analyze(&config, &keywords, draft, json).await?;
        }
        Some(Commands::History { blog, limit }) => {
            let pool = ambassador_db::connect_pool_from_config(&config).await?;
            history::run_history(&pool, blog.as_deref(), limit).await?;
        }
        Some(Commands::Db { command }) => {
            let pool = ambassador_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    ambassador_db::ping(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = ambassador_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        None => {
            println!("ambassador-cli: run with --help to list commands");
        }
    }

    Ok(())
}
