use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};

use repopulse::aggregate::format_duration;
use repopulse::render::error_page;
use repopulse::{
    derive_available_months, load_datasets, CommitFilter, Dashboard, Datasets, FilterOptions,
    Metric, MonthFilter, Viewport,
};

#[derive(Parser)]
#[command(name = "repopulse", about = "Repository activity dashboard generator")]
struct Cli {
    /// Path to the issue dataset CSV
    #[arg(long, default_value = "data/issues.csv")]
    issues: PathBuf,

    /// Path to the commit dataset CSV
    #[arg(long, default_value = "data/commits.csv")]
    commits: PathBuf,

    /// Path to the pull request dataset CSV
    #[arg(long, default_value = "data/prs.csv")]
    prs: PathBuf,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard page to an HTML file
    Render {
        /// Output file path
        #[arg(long, default_value = "dashboard.html")]
        out: PathBuf,
        /// Page title
        #[arg(long, default_value = "Repository Activity Dashboard")]
        title: String,
        /// Filter issues by contributor (case-insensitive substring)
        #[arg(long)]
        developer: Option<String>,
        /// Filter issues by title (case-insensitive substring)
        #[arg(long)]
        task: Option<String>,
        /// Keep issues starting on or after this date (YYYY-MM-DD)
        #[arg(long)]
        start_after: Option<String>,
        /// Keep issues starting on or before this date (YYYY-MM-DD)
        #[arg(long)]
        start_before: Option<String>,
        /// Month filter for the commit scatter plot ('all' or YYYY-MM)
        #[arg(long, default_value = "all")]
        scatter_month: String,
        /// Month filter for the author bar chart ('all' or YYYY-MM)
        #[arg(long, default_value = "all")]
        bar_month: String,
        /// Bar chart metric: commits or lines
        #[arg(long, default_value = "commits")]
        metric: String,
        /// Seed for scatter jitter (omit for nondeterministic jitter)
        #[arg(long)]
        seed: Option<u64>,
        /// Chart width in pixels
        #[arg(long, default_value = "960")]
        width: f64,
    },
    /// List the months present in the commit dataset
    Months {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show per-author totals
    Authors {
        /// Metric: commits or lines
        #[arg(long, default_value = "commits")]
        metric: String,
        /// Restrict to one month ('all' or YYYY-MM)
        #[arg(long, default_value = "all")]
        month: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the pull request funnel stages
    Funnel {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show dataset counts and drop diagnostics
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let Cli { issues, commits, prs, command, .. } = cli;

    match command {
        Commands::Render {
            out,
            title,
            developer,
            task,
            start_after,
            start_before,
            scatter_month,
            bar_month,
            metric,
            seed,
            width,
        } => {
            let datasets =
                match load_datasets(&issues, &commits, &prs, Utc::now()).await {
                    Ok(datasets) => datasets,
                    Err(e) => {
                        // Keep the page valid even when loading fails: every
                        // chart region shows the error.
                        let page = error_page(&title, "Error loading data. Please check the data files.");
                        tokio::fs::write(&out, page).await?;
                        return Err(e.into());
                    }
                };

            let options = FilterOptions {
                developer,
                task,
                start_after: start_after
                    .as_deref()
                    .map(repopulse::date_util::parse_filter_date)
                    .transpose()?,
                start_before: start_before
                    .as_deref()
                    .map(repopulse::date_util::parse_filter_date)
                    .transpose()?,
                scatter_month: MonthFilter::parse(&scatter_month)?,
                bar_month: MonthFilter::parse(&bar_month)?,
                metric: metric.parse::<Metric>()?,
                seed,
            };

            let dashboard =
                Dashboard::new(datasets, options).with_viewport(Viewport { width });
            let page = dashboard.render_page(&title);
            tokio::fs::write(&out, page).await?;
            println!("Wrote {}", out.display());
        }
        Commands::Months { json } => {
            let datasets = load(&issues, &commits, &prs).await?;
            let months = derive_available_months(&datasets.commits);
            if json {
                println!("{}", serde_json::to_string_pretty(&months)?);
            } else if months.is_empty() {
                println!("No commit months found.");
            } else {
                for month in &months {
                    println!("{} {}", month.key, month.label);
                }
            }
        }
        Commands::Authors { metric, month, json } => {
            let datasets = load(&issues, &commits, &prs).await?;
            let metric = metric.parse::<Metric>()?;
            let filtered = CommitFilter::new()
                .month(MonthFilter::parse(&month)?)
                .apply(&datasets.commits);
            let totals = repopulse::aggregate::by_author(&filtered, metric);
            if json {
                println!("{}", serde_json::to_string_pretty(&totals)?);
            } else if totals.is_empty() {
                println!("No commits found.");
            } else {
                for total in &totals {
                    println!("{:>10}  {}", total.value, total.author);
                }
            }
        }
        Commands::Funnel { json } => {
            let datasets = load(&issues, &commits, &prs).await?;
            let stages = repopulse::aggregate::funnel(&datasets.prs);
            if json {
                println!("{}", serde_json::to_string_pretty(&stages)?);
            } else {
                for stage in &stages {
                    println!(
                        "{:<10} {:>6} PRs   avg: {}",
                        stage.stage.as_str(),
                        stage.count,
                        format_duration(stage.avg_duration_sec)
                    );
                }
            }
        }
        Commands::Status => {
            let datasets = load(&issues, &commits, &prs).await?;
            print_status(&datasets);
        }
    }

    Ok(())
}

async fn load(issues: &Path, commits: &Path, prs: &Path) -> anyhow::Result<Datasets> {
    Ok(load_datasets(issues, commits, prs, Utc::now()).await?)
}

fn print_status(datasets: &Datasets) {
    println!("Dataset Status");
    println!(
        "  Issues:  {} loaded, {} dropped",
        datasets.issue_report.kept, datasets.issue_report.dropped
    );
    println!(
        "  Commits: {} loaded, {} dropped",
        datasets.commit_report.kept, datasets.commit_report.dropped
    );
    println!("  PRs:     {} loaded", datasets.prs.len());
    let months = derive_available_months(&datasets.commits);
    match months.first().zip(months.last()) {
        Some((first, last)) if months.len() > 1 => {
            println!("  Months:  {} ({} to {})", months.len(), first.key, last.key);
        }
        Some((only, _)) => println!("  Months:  1 ({})", only.key),
        None => println!("  Months:  none"),
    }
}
