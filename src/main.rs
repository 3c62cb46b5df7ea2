use commute_match::config::{LoggingSettings, Settings};
use commute_match::core::{MatchEngine, ProfileError, TransitGraph};
use commute_match::models::{CommuteProfile, WindowError};
use commute_match::services::{self, LoaderError, ProfileGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("Failed to generate profiles: {0}")]
    Generator(#[from] WindowError),
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration loaded successfully");

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

fn run(settings: &Settings) -> Result<(), AppError> {
    let network = services::load_network(&settings.network.path)?;
    let graph = Arc::new(TransitGraph::new(&network));

    let weights = settings.scoring_weights();
    let mut engine = MatchEngine::with_weights(Arc::clone(&graph), weights);
    info!("Match engine initialized with weights: {:?}", weights);

    let profiles = commuter_profiles(settings, &graph)?;
    for profile in &profiles {
        engine.add_user(profile.clone())?;
    }
    info!("Registered {} commuters", engine.len());

    for profile in &profiles {
        let path = graph.find_shortest_path(&profile.home_station, &profile.work_station);
        println!("{}", services::format_commute(profile, &path));
    }

    let Some(target) = profiles.first() else {
        info!("No commuters registered, nothing to match");
        return Ok(());
    };

    let matching = &settings.matching;
    println!("\nMatches for {}:", target.name);
    let matches = engine.find_matches(&target.user_id, matching.min_score, matching.max_matches);
    for line in services::format_matches(&matches) {
        println!("{}", line);
    }

    let all = engine.find_all_matches(matching.min_score);
    let total: usize = all.values().map(Vec::len).sum();
    println!(
        "\nBatch matching: {} users, {} matches, {:.1} per user",
        all.len(),
        total,
        total as f64 / all.len() as f64
    );

    Ok(())
}

/// Profiles from the configured file, or seeded synthetic ones
fn commuter_profiles(settings: &Settings, graph: &TransitGraph) -> Result<Vec<CommuteProfile>, AppError> {
    if let Some(path) = &settings.network.profiles_path {
        return Ok(services::load_profiles(path)?);
    }

    let mut rng = match settings.generator.seed {
        Some(seed) => {
            info!("Generating {} commuters with seed {}", settings.generator.count, seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_rng(&mut rand::rng()),
    };

    Ok(ProfileGenerator::new(graph).generate(settings.generator.count, &mut rng)?)
}
