use anyhow::{anyhow, Context, Result};
use clap::Parser;
use sales_forecast::config::ForecastConfig;
use sales_forecast::ingest::{load_into_store, read_transactions_csv};
use sales_forecast::pipeline::ForecastPipeline;
use sales_forecast::store::CsvTableStore;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Forecast daily sales from the transactions in a table store
#[derive(Parser, Debug)]
#[command(name = "forecast_pipeline", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Table store directory (overrides store.data_dir)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Load this sales CSV into the store before running
    #[arg(long)]
    sales_csv: Option<PathBuf>,

    /// Number of days to forecast (overrides forecast.horizon)
    #[arg(long)]
    horizon: Option<usize>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut config = ForecastConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.store.data_dir = dir;
    }
    if let Some(horizon) = args.horizon {
        config.forecast.horizon = horizon;
    }

    let mut store = CsvTableStore::open(&config.store.data_dir)
        .with_context(|| format!("opening store at {}", config.store.data_dir.display()))?;

    if let Some(path) = &args.sales_csv {
        let transactions = read_transactions_csv(path)
            .with_context(|| format!("reading {}", path.display()))?;
        load_into_store(&mut store, &config.store.sales_table, &transactions)?;
    }

    let report = ForecastPipeline::new(store, config)?.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!(
            from = %report.forecast_start,
            to = %report.forecast_end,
            "forecast published"
        );
        match &report.metrics {
            Some(metrics) => println!("Hold-out: {}", metrics),
            None => println!("Hold-out: no evaluation performed"),
        }
        println!("{}", report.summary);
    }

    Ok(())
}
