//! safemind - search-activity risk dashboard CLI
//!
//! Summarizes a child's search records into the dashboard views and lists
//! the records behind any single bucket.

use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use safemind_core::analytics::{
    newest_first, AggregateSnapshot, ClassifiedRecord, DrillDown, RiskEngine, TimeWindow,
    WindowAnchor,
};
use safemind_core::config::{AnalyticsConfig, MAX_WINDOW_DAYS};
use safemind_core::format::{day_name, format_duration_secs, hour_range_display};
use safemind_core::{Config, JsonFileSource, OwnerScope, RecordSource, SearchRecord};

#[derive(Parser, Debug)]
#[command(name = "safemind")]
#[command(about = "Risk dashboard over a child's search activity")]
#[command(version)]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/safemind/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every dashboard view for a time window
    Summary {
        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        window: WindowArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the searches behind one dashboard bucket
    Drill {
        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        window: WindowArgs,

        /// Bucket to open (e.g. harmful, category:anxiety, hour:2pm, weekday:0, date:2024-03-09)
        #[arg(long)]
        bucket: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(ClapArgs, Debug)]
struct ScopeArgs {
    /// JSON file holding an array of search records
    #[arg(long)]
    records: PathBuf,

    /// Parent account id
    #[arg(long)]
    user: String,

    /// Child profile name (all children when omitted)
    #[arg(long)]
    child: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct WindowArgs {
    /// Time window kind
    #[arg(long, value_enum, default_value_t = WindowKind::LastDays)]
    window: WindowKind,

    /// N for --window last-days (default from config)
    #[arg(long)]
    days: Option<u32>,

    /// Day for --window date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// First day for --window range (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day for --window range (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Last day of --window last-days: today or yesterday (default from config)
    #[arg(long)]
    anchor: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum WindowKind {
    Today,
    LastDays,
    ThisWeek,
    Date,
    Range,
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl WindowArgs {
    fn to_window(&self, config: &AnalyticsConfig) -> Result<TimeWindow> {
        if self.window != WindowKind::LastDays && (self.days.is_some() || self.anchor.is_some()) {
            anyhow::bail!("--days and --anchor only apply to --window last-days");
        }
        if self.window != WindowKind::Date && self.date.is_some() {
            anyhow::bail!("--date only applies to --window date");
        }
        if self.window != WindowKind::Range && (self.from.is_some() || self.to.is_some()) {
            anyhow::bail!("--from and --to only apply to --window range");
        }

        let window = match self.window {
            WindowKind::Today => TimeWindow::Today,
            WindowKind::LastDays => {
                let days = self.days.unwrap_or(config.default_window_days);
                if !(1..=MAX_WINDOW_DAYS).contains(&days) {
                    anyhow::bail!("--days must be between 1 and {}", MAX_WINDOW_DAYS);
                }
                let anchor = match self.anchor.as_deref() {
                    Some(raw) => raw
                        .parse::<WindowAnchor>()
                        .map_err(anyhow::Error::msg)
                        .context("invalid --anchor")?,
                    None => config.last_week_anchor,
                };
                TimeWindow::LastNDays { days, anchor }
            }
            WindowKind::ThisWeek => TimeWindow::ThisWeek,
            WindowKind::Date => {
                let Some(date) = self.date else {
                    anyhow::bail!("--window date requires --date YYYY-MM-DD");
                };
                TimeWindow::SpecificDate { date }
            }
            WindowKind::Range => TimeWindow::CustomRange {
                start: self.from,
                end: self.to,
            },
            WindowKind::All => TimeWindow::All,
        };
        Ok(window)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };
    config
        .analytics
        .validate()
        .context("invalid analytics configuration")?;

    // Initialize logging
    let _log_guard =
        safemind_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let offset = config
        .analytics
        .fixed_offset()
        .context("invalid analytics.utc_offset")?;
    match offset {
        Some(offset) => run(
            RiskEngine::new(offset).with_config(&config.analytics),
            &config.analytics,
            &args.command,
        ),
        None => run(
            RiskEngine::local().with_config(&config.analytics),
            &config.analytics,
            &args.command,
        ),
    }
}

fn run<Tz>(engine: RiskEngine<Tz>, config: &AnalyticsConfig, command: &Command) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match command {
        Command::Summary {
            scope,
            window,
            format,
        } => {
            let window = window.to_window(config)?;
            let records = fetch_records(scope)?;
            let snapshot = engine.snapshot(&records, &window);
            let description = window.describe(engine.now().date_naive());
            tracing::info!(
                records = records.len(),
                windowed = snapshot.total_records,
                "Built summary"
            );

            match format {
                OutputFormat::Json => print_summary_json(&snapshot, &description, scope)?,
                OutputFormat::Text => {
                    print_summary_terminal(&snapshot, &description, scope.child.as_deref())
                }
            }
        }
        Command::Drill {
            scope,
            window,
            bucket,
            format,
        } => {
            let window = window.to_window(config)?;
            let bucket: DrillDown = bucket
                .parse()
                .map_err(anyhow::Error::msg)
                .context("invalid --bucket")?;
            let records = fetch_records(scope)?;
            let mut rows = engine.resolve_detailed(&records, &window, &bucket);
            newest_first(&mut rows);
            let description = window.describe(engine.now().date_naive());
            tracing::info!(bucket = ?bucket, rows = rows.len(), "Resolved drill-down");

            let title = bucket.title(scope.child.as_deref());
            match format {
                OutputFormat::Json => print_drill_json(&title, &description, &bucket, &rows)?,
                OutputFormat::Text => print_drill_terminal(&title, &description, &rows),
            }
        }
    }
    Ok(())
}

fn fetch_records(scope: &ScopeArgs) -> Result<Vec<SearchRecord>> {
    let mut owner = OwnerScope::new(scope.user.clone());
    if let Some(child) = &scope.child {
        owner = owner.with_child(child.clone());
    }
    let source = JsonFileSource::new(&scope.records);
    source
        .fetch(&owner)
        .with_context(|| format!("failed to read records from {}", scope.records.display()))
}

// ============================================
// Summary output
// ============================================

fn print_summary_terminal(snapshot: &AggregateSnapshot, description: &str, child: Option<&str>) {
    let title = match child.map(str::trim).filter(|c| !c.is_empty()) {
        Some(name) => format!("{}'s Search Activity", name),
        None => "Search Activity".to_string(),
    };

    println!();
    println!("{}", title);
    println!("{}", description);
    println!();

    if snapshot.is_empty() {
        println!("  No searches found for this period.");
        println!();
        return;
    }

    let ratio = &snapshot.harmful_ratio;
    println!("SUMMARY");
    println!(
        "   Searches: {:<8} Harmful: {} ({:.0}%)",
        snapshot.total_records,
        ratio.harmful,
        ratio.harmful_percentage()
    );
    println!("   Not harmful: {}", ratio.non_harmful);
    println!();

    println!("CATEGORIES");
    for (category, count) in snapshot.category_counts.iter() {
        println!("   {:<12} {:>5}", category.label(), count);
    }
    println!();

    println!("TIME PATTERNS");
    match snapshot.hourly.peak_hour() {
        Some(hour) => println!(
            "   Peak hour:    {} ({})",
            hour_range_display(hour),
            snapshot.hourly.counts[usize::from(hour)]
        ),
        None => println!("   Peak hour:    -"),
    }
    match snapshot.weekday.busiest_day() {
        Some(day) => println!(
            "   Busiest day:  {} ({})",
            day_name(day),
            snapshot.weekday.counts[usize::from(day)]
        ),
        None => println!("   Busiest day:  -"),
    }
    println!();

    if !snapshot.sentiment_trend.is_empty() {
        println!("SENTIMENT TREND");
        for point in &snapshot.sentiment_trend {
            println!(
                "   {}  {:>6.2}  {}",
                point.date,
                point.mean,
                point.risk_level().label()
            );
        }
        println!();
    }

    if !snapshot.exposure_trend.is_empty() {
        println!("EXPOSURE");
        for point in &snapshot.exposure_trend {
            println!("   {}  {}", point.date, point.duration_display());
        }
        println!();
    }

    if let Some(dominant) = &snapshot.dominant_category {
        println!("LATEST DOMINANT CATEGORY");
        println!("   {}", dominant);
        println!();
    }

    if !snapshot.risk_categories.is_empty() {
        println!("RISK CATEGORIES");
        for (i, rank) in snapshot.risk_categories.iter().enumerate() {
            println!("   {}. {:<14} {:>5}", i + 1, rank.label, rank.count);
        }
        println!();
    }
}

fn print_summary_json(
    snapshot: &AggregateSnapshot,
    description: &str,
    scope: &ScopeArgs,
) -> Result<()> {
    let json = serde_json::json!({
        "user": scope.user,
        "child": scope.child,
        "description": description,
        "snapshot": snapshot,
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

// ============================================
// Drill-down output
// ============================================

fn print_drill_terminal<Tz>(title: &str, description: &str, rows: &[ClassifiedRecord<'_, Tz>])
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    println!();
    println!("{}", title);
    println!("{}", description);
    println!();

    if rows.is_empty() {
        println!("  No matching searches.");
        println!();
        return;
    }

    println!(
        "{} search{}",
        rows.len(),
        if rows.len() == 1 { "" } else { "es" }
    );
    for row in rows {
        let exposure = row
            .normalized
            .time_spent
            .value()
            .map(format_duration_secs)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {}  {:<10} {:>8}  {}",
            row.instant().format("%Y-%m-%d %H:%M"),
            row.category().label(),
            exposure,
            row.record().query
        );
    }
    println!();
}

fn print_drill_json<Tz>(
    title: &str,
    description: &str,
    bucket: &DrillDown,
    rows: &[ClassifiedRecord<'_, Tz>],
) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let json = serde_json::json!({
        "title": title,
        "description": description,
        "bucket": bucket,
        "count": rows.len(),
        "rows": rows.iter().map(|row| serde_json::json!({
            "timestamp": row.instant().to_rfc3339(),
            "query": row.record().query,
            "harmful": row.is_harmful(),
            "category": row.category(),
            "prediction": row.record().raw_prediction(),
            "sentiment": row.normalized.sentiment.value(),
            "time_spent_secs": row.normalized.time_spent.value(),
        })).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
