use std::env;
use weather_observed::{ImporterConfig, WeatherImporter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let api_key = env::var("AEMET_API_KEY")?;
    let location = env::args().nth(1).unwrap_or_else(|| "GRANADA".to_string());

    let config = ImporterConfig::builder()
        .api_key(api_key)
        .location_name(location)
        .build();
    let importer = WeatherImporter::new(config)?;

    let run = importer.run_detailed().await?;
    for entity in run.entities {
        println!("{}", serde_json::to_string_pretty(&entity.into_model())?);
    }
    for skipped in run.skipped {
        eprintln!("skipped {:?}: {}", skipped.station, skipped.error);
    }

    Ok(())
}
