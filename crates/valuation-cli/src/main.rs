//! Command-line interface for the property valuation engine

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};
use valuation_engine::{
    EngineConfig, LinearPriceModel, MarketFeatures, MarketTrend, PriceModel, PropertyDescription,
    SampleSummary, ValuationEngine, ValuationTables,
};

#[derive(Parser, Debug)]
#[command(name = "valuation-cli")]
#[command(about = "Estimate property values and returns", long_about = None)]
struct Cli {
    /// JSON file overriding the default valuation tables
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Value a single property and print the result as JSON
    Evaluate(PropertyArgs),
    /// Run many valuations and summarize their spread
    Sample {
        #[command(flatten)]
        property: PropertyArgs,
        /// Number of valuations to run
        #[arg(long, default_value_t = 1000)]
        count: usize,
        /// Number of parallel workers
        #[arg(long, default_value_t = 4)]
        workers: usize,
    },
    /// Print the health check payload
    Health,
    /// Score market indicators with a linear price model
    Price(PriceArgs),
}

#[derive(Args, Debug)]
struct PropertyArgs {
    /// Floor area
    #[arg(long, allow_negative_numbers = true, value_parser = finite_f64)]
    sqft: f64,
    /// residential, commercial or industrial
    #[arg(long)]
    property_type: String,
    /// prime, good, average or developing
    #[arg(long)]
    location_grade: String,
    /// Optional street address
    #[arg(long)]
    address: Option<String>,
}

/// Parse a float, rejecting NaN and infinities
fn finite_f64(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("`{raw}` is not a finite number"))
    }
}

impl PropertyArgs {
    fn to_request(&self) -> Value {
        let mut request = json!({
            "sqft": self.sqft,
            "property_type": self.property_type,
            "location_grade": self.location_grade,
        });
        if let Some(address) = &self.address {
            request["address"] = json!(address);
        }
        request
    }
}

#[derive(Args, Debug)]
struct PriceArgs {
    /// JSON file with `intercept` and `coefficients`
    #[arg(long)]
    model: PathBuf,
    #[arg(long, allow_negative_numbers = true, value_parser = finite_f64)]
    rental_yield: f64,
    #[arg(long, allow_negative_numbers = true, value_parser = finite_f64)]
    appreciation_rate: f64,
    #[arg(long, value_parser = finite_f64)]
    crime_rate: f64,
    #[arg(long, value_parser = finite_f64)]
    aqi: f64,
    #[arg(long, value_parser = finite_f64)]
    transport_score: f64,
    #[arg(long, value_parser = finite_f64)]
    school_rating: f64,
    #[arg(long, value_parser = finite_f64)]
    walkability: f64,
    /// One of the supported cities, e.g. "New York City"
    #[arg(long)]
    city: String,
}

fn build_engine(tables: Option<&PathBuf>) -> anyhow::Result<ValuationEngine> {
    let tables = match tables {
        Some(path) => ValuationTables::from_json_file(path)
            .with_context(|| format!("loading tables from {}", path.display()))?,
        None => ValuationTables::default(),
    };

    let config = EngineConfig::builder().with_env().tables(tables).build()?;
    Ok(ValuationEngine::with_config(config)?)
}

/// Split `count` valuations over `workers` blocking tasks and merge the results
async fn run_sample(
    engine: Arc<ValuationEngine>,
    description: PropertyDescription,
    count: usize,
    workers: usize,
) -> anyhow::Result<SampleSummary> {
    anyhow::ensure!(count > 0, "--count must be greater than zero");
    let workers = workers.clamp(1, count);
    let chunk = count / workers;
    let remainder = count % workers;

    let mut tasks = JoinSet::new();
    for worker in 0..workers {
        let share = chunk + usize::from(worker < remainder);
        let engine = Arc::clone(&engine);
        let description = description.clone();
        tasks.spawn_blocking(move || engine.sample(&description, share));
    }

    let mut summary = SampleSummary::new();
    while let Some(joined) = tasks.join_next().await {
        let partial = joined.context("sampling worker panicked")??;
        debug!(count = partial.count, "Worker finished");
        summary = summary.merge(&partial);
    }
    Ok(summary)
}

fn summary_table(summary: &SampleSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);

    table.add_row(vec!["Valuations".to_string(), summary.count.to_string()]);
    table.add_row(vec!["Min value".to_string(), format!("{:.2}", summary.min_value)]);
    table.add_row(vec!["Mean value".to_string(), format!("{:.2}", summary.mean_value)]);
    table.add_row(vec!["Max value".to_string(), format!("{:.2}", summary.max_value)]);
    table.add_row(vec![
        "ROI range".to_string(),
        format!("{:.2}% .. {:.2}%", summary.min_roi, summary.max_roi),
    ]);
    table.add_row(vec![
        "Mean confidence".to_string(),
        format!("{:.4}", summary.mean_confidence),
    ]);
    for trend in MarketTrend::all() {
        table.add_row(vec![
            format!("Trend: {trend}"),
            format!("{:.1}%", summary.trend_share(trend) * 100.0),
        ]);
    }
    table
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = valuation_utils::Config::from_env();
    valuation_utils::init_tracing_with(&app_config.log_filter);

    let cli = Cli::parse();
    info!(
        app = %app_config.app_name,
        environment = %app_config.environment,
        production = app_config.is_production(),
        "Starting valuation-cli"
    );

    let engine = Arc::new(build_engine(cli.tables.as_ref())?);

    match cli.command {
        Command::Evaluate(property) => {
            let result = engine.evaluate(&property.to_request())?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Sample {
            property,
            count,
            workers,
        } => {
            let description = valuation_engine::pipeline::normalize(&property.to_request())?;
            let summary = run_sample(Arc::clone(&engine), description, count, workers).await?;
            println!("{}", summary_table(&summary));
        }
        Command::Health => {
            println!("{}", serde_json::to_string_pretty(&engine.health())?);
        }
        Command::Price(args) => {
            let model = LinearPriceModel::from_json_file(&args.model)
                .with_context(|| format!("loading price model from {}", args.model.display()))?;
            let features = MarketFeatures {
                rental_yield: args.rental_yield,
                appreciation_rate: args.appreciation_rate,
                crime_rate: args.crime_rate,
                aqi: args.aqi,
                transport_score: args.transport_score,
                school_rating: args.school_rating,
                walkability: args.walkability,
                city: args.city.parse()?,
            };
            let price = model.predict_features(&features)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "city": features.city,
                    "predicted_price": (price * 100.0).round() / 100.0,
                }))?
            );
        }
    }

    Ok(())
}
