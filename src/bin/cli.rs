//! AirScope CLI
//!
//! Fetches one city's weather and air-quality payload through the live
//! provider and prints a card-style summary (or raw JSON).
//!
//! ```text
//! airscope-cli "Karachi"
//! airscope-cli --json "Lahore"
//! ```

use airscope::config::Config;
use airscope::payload::CityDataPayload;
use airscope::provider::{CityDataProvider, OpenMeteoProvider};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "airscope-cli", version, about = "Fetch weather and air quality for a city")]
struct Cli {
    /// City name to look up
    city: String,

    /// Print the raw JSON payload instead of a summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "airscope=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let provider = OpenMeteoProvider::new(&config.upstream)?;

    let payload = provider.fetch_city(&cli.city).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_summary(&payload);
    }

    Ok(())
}

fn print_summary(payload: &CityDataPayload) {
    println!("{}", payload.city);
    println!(
        "  Lat {:.3}, Lon {:.3}",
        payload.coords.lat, payload.coords.lon
    );
    println!("  Temperature: {}", fmt(payload.current.temperature_c, "°C"));
    println!("  Humidity:    {}", fmt(payload.current.humidity_pct, "%"));
    println!("  Wind:        {}", fmt(payload.current.wind_speed_kmh, " km/h"));
    println!("  PM2.5:       {}", fmt(payload.aq_now.pm2_5, " µg/m³"));
    println!("  PM10:        {}", fmt(payload.aq_now.pm10, " µg/m³"));
    println!("  CO:          {}", fmt(payload.aq_now.co, " µg/m³"));
    println!("  O₃:          {}", fmt(payload.aq_now.o3, " µg/m³"));
    println!("  NO₂:         {}", fmt(payload.aq_now.no2, " µg/m³"));
    println!("  SO₂:         {}", fmt(payload.aq_now.so2, " µg/m³"));
    println!("  Hourly samples: {}", payload.series.len());
}

fn fmt(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => "—".to_string(),
    }
}
