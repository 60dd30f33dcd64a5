use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use routequiz::{FeaturePool, Game, Guess, RawFeature, RoundPrompt, RoundStart};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod extent;

#[derive(Parser)]
struct Args {
    /// Path to a GeoJSON FeatureCollection of named line shapes
    geojson: PathBuf,

    /// RNG seed, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

/// The slice of GeoJSON this program cares about. Everything else in
/// the file is ignored.
#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<GeoFeature>,
}

#[derive(Deserialize)]
struct GeoFeature {
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
    #[serde(default)]
    geometry: Value,
}

fn load_raw_features(path: &Path) -> anyhow::Result<Vec<RawFeature>> {
    let file =
        File::open(path).with_context(|| format!("Could not open '{}'", path.display()))?;
    let collection: FeatureCollection = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("'{}' is not a GeoJSON feature collection", path.display()))?;
    Ok(collection
        .features
        .into_iter()
        .map(|feature| RawFeature {
            label: feature
                .properties
                .get("Name")
                .and_then(Value::as_str)
                .map(String::from),
            geometry: feature.geometry,
        })
        .collect())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let raw = load_raw_features(&args.geojson)?;
    debug!(num_records = raw.len());
    let pool = FeaturePool::load(raw).context("Failed to load route data")?;
    info!(num_routes = pool.len());

    println!("Guess the route! Enter the number of your answer, or q to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    'game: loop {
        let mut game = Game::new(&pool, &mut rng);
        loop {
            match game.start_round(&pool, &mut rng) {
                RoundStart::Round(prompt) => {
                    if !play_round(&mut game, &pool, &prompt, &mut lines)? {
                        break 'game;
                    }
                    game.advance();
                }
                RoundStart::GameComplete => {
                    let final_score = game.final_score();
                    println!();
                    println!(
                        "Game over! Final score: {} out of {}",
                        final_score.score, final_score.max
                    );
                    if !prompt_restart(&mut lines)? {
                        break 'game;
                    }
                    break; // fresh Game
                }
            }
        }
    }

    Ok(())
}

/// Plays one round to resolution.
///
/// Returns `false` if input ran out or the player quit mid-round.
fn play_round(
    game: &mut Game,
    pool: &FeaturePool,
    prompt: &RoundPrompt,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<bool> {
    println!();
    println!(
        "Round {} / {} (score {})",
        game.round_number(),
        game.rounds_total(),
        game.score()
    );
    let feature = pool.get(prompt.feature);
    if let Some(extent) = extent::of(&feature.geometry) {
        println!("The highlighted shape spans {}", extent);
    }
    for (slot, choice) in prompt.choices.iter().enumerate() {
        println!("  {}. Route {}", slot + 1, choice.label);
    }

    // Tracks which buttons the original page would have disabled
    let mut eliminated = vec![false; prompt.choices.len()];
    loop {
        print!("> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(false),
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(false);
        }
        let slot = match input.parse::<usize>() {
            Ok(n) if (1..=prompt.choices.len()).contains(&n) => n - 1,
            _ => {
                println!(
                    "Enter a number from 1 to {}, or q to quit.",
                    prompt.choices.len()
                );
                continue;
            }
        };
        if eliminated[slot] {
            println!("Route {} is already ruled out.", prompt.choices[slot].label);
            continue;
        }
        match game.submit_guess(prompt.choices[slot].id)? {
            Guess::Correct {
                points,
                score,
                more_rounds,
            } => {
                println!(
                    "Correct! It was Route {}. +{} points (score {})",
                    feature.label, points, score
                );
                if !more_rounds {
                    println!("That was the last route.");
                }
                return Ok(true);
            }
            Guess::Wrong { attempts_left, .. } => {
                eliminated[slot] = true;
                println!(
                    "Not this one. {} attempt{} left.",
                    attempts_left,
                    if attempts_left == 1 { "" } else { "s" }
                );
            }
            Guess::AlreadyEliminated => {
                println!("Route {} is already ruled out.", prompt.choices[slot].label);
            }
        }
    }
}

fn prompt_restart(lines: &mut impl Iterator<Item = io::Result<String>>) -> anyhow::Result<bool> {
    println!("Play again? [y/N]");
    match lines.next() {
        Some(line) => Ok(line?.trim().eq_ignore_ascii_case("y")),
        None => Ok(false),
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
