use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prophet_dashboard_core::models::forecast::{PredictionRequest, DEFAULT_FORECAST_DAYS};
use prophet_dashboard_core::models::news::NewsCategory;
use prophet_dashboard_core::models::settings::Settings;
use prophet_dashboard_core::views::Tab;
use prophet_dashboard_core::Dashboard;

mod report;

#[derive(Debug, Parser)]
#[command(name = "prophet-dashboard", about = "Stock forecasts, market overview, news and social sentiment")]
struct Args {
    /// JSON settings file. PROPHET_* environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use generated sample data instead of the backend.
    #[arg(long, global = true)]
    mock: bool,

    /// Seed for the sample data generator.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Forecast a ticker and print the chart payload and summary.
    Predict {
        ticker: String,

        /// Business days to forecast (1-30).
        #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS)]
        days: u32,

        /// Training window start (YYYY-MM-DD). Defaults to one year ago.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Training window end (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Aggregate social sentiment for a ticker.
    Social {
        /// Defaults to the configured ticker.
        ticker: Option<String>,
    },

    /// Print market indices and top movers.
    Market,

    /// Print headlines for the given categories.
    News {
        /// Repeatable; defaults to market, stocks and economy.
        #[arg(long = "category", value_parser = parse_category)]
        categories: Vec<NewsCategory>,
    },

    /// Keep polling market, news and social views until interrupted.
    Watch {
        ticker: Option<String>,
    },
}

fn parse_category(raw: &str) -> Result<NewsCategory, String> {
    raw.parse()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    if args.mock {
        settings.use_mock = true;
    }
    if args.seed.is_some() {
        settings.mock_seed = args.seed;
    }

    let mut dashboard = Dashboard::from_settings(settings);

    match args.command {
        Command::Predict { ticker, days, start, end } => {
            let today = Local::now().date_naive();
            let defaults = PredictionRequest::with_defaults(&ticker, today);
            let request = PredictionRequest::new(
                &ticker,
                days,
                start.unwrap_or(defaults.start_date),
                end.unwrap_or(defaults.end_date),
            );
            let view = dashboard
                .predict_at(request, today)
                .await
                .context("prediction failed")?;
            report::print_json(&report::prediction(view))?;
        }
        Command::Social { ticker } => {
            if let Some(ticker) = ticker {
                dashboard.social_mut().submit_ticker(&ticker);
            }
            dashboard
                .refresh_social(Utc::now())
                .await
                .context("social refresh failed")?;
            report::print_json(&report::social(&dashboard))?;
        }
        Command::Market => {
            let now = Utc::now();
            dashboard
                .refresh_market(now)
                .await
                .context("market refresh failed")?;
            report::print_json(&report::market(&dashboard, now))?;
        }
        Command::News { categories } => {
            if !categories.is_empty() {
                dashboard.news_mut().selected = categories;
            }
            dashboard
                .refresh_news(Utc::now())
                .await
                .context("news refresh failed")?;
            report::print_json(&dashboard.news().items)?;
        }
        Command::Watch { ticker } => {
            if let Some(ticker) = ticker {
                dashboard.social_mut().submit_ticker(&ticker);
            }
            watch(&mut dashboard).await?;
        }
    }

    Ok(())
}

async fn watch(dashboard: &mut Dashboard) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted; stopping watch");
                return Ok(());
            }
            _ = ticker.tick() => {
                let now = Utc::now();
                for tab in dashboard.poll(now).await {
                    tracing::info!(%tab, "refreshed");
                    let line = match tab {
                        Tab::Market => Some(serde_json::to_string(&report::market(dashboard, now))?),
                        Tab::News => Some(serde_json::to_string(&dashboard.news().items)?),
                        Tab::Social => Some(serde_json::to_string(&report::social(dashboard))?),
                        Tab::Prediction => None,
                    };
                    if let Some(line) = line {
                        println!("{line}");
                    }
                }
            }
        }
    }
}
