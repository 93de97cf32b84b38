//! Studbook CLI
//!
//! The `studbook` command assigns epigenetic traits to a foal from a JSON
//! studbook fixture.
//!
//! ```text
//! studbook --fixture stud.json --sire 1 --dam 2 --mare-stress 15 --feed-quality 85
//! ```
//!
//! The result is printed as pretty JSON on stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use studbook_epigenetics::config::DEFAULT_MAX_DEPTH;
use studbook_epigenetics::{
    BirthTraits, BreedingData, DrawSource, EngineConfig, EpigeneticEngine, RngDraws,
};
use studbook_state::MemoryStudbook;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "studbook")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Assign epigenetic traits to a foal at birth", long_about = None)]
struct Cli {
    /// Studbook fixture (JSON with `horses` and `results`)
    #[arg(short, long)]
    fixture: PathBuf,

    /// Sire id
    #[arg(long)]
    sire: u64,

    /// Dam id
    #[arg(long)]
    dam: u64,

    /// Mare stress during gestation, 0-100 (derived from the dam if omitted)
    #[arg(long)]
    mare_stress: Option<f64>,

    /// Feed quality during gestation, 0-100 (derived from the dam if omitted)
    #[arg(long)]
    feed_quality: Option<f64>,

    /// Generations to walk on each side
    #[arg(long, env = "STUDBOOK_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Seed for reproducible trait draws
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn breeding_data(&self) -> BreedingData {
        BreedingData {
            mare_stress: self.mare_stress,
            feed_quality: self.feed_quality,
            ..BreedingData::new(self.sire, self.dam)
        }
    }

    fn draws(&self) -> Box<dyn DrawSource> {
        match self.seed {
            Some(seed) => Box::new(RngDraws::seeded(seed)),
            None => Box::new(RngDraws::from_entropy()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    studbook_epigenetics::init_tracing(cli.json, level);

    let birth = run(&cli).await?;
    print_json(&birth)
}

async fn run(cli: &Cli) -> Result<BirthTraits> {
    let studbook = MemoryStudbook::load(&cli.fixture)
        .with_context(|| format!("Failed to load studbook fixture {:?}", cli.fixture))?;
    info!(
        horses = studbook.horse_count(),
        max_depth = cli.max_depth,
        "Loaded studbook"
    );

    let studbook = Arc::new(studbook);
    let config = EngineConfig::default().with_max_depth(cli.max_depth);
    let engine = EpigeneticEngine::with_config(studbook.clone(), studbook, config);

    let mut draws = cli.draws();
    let birth = engine
        .apply_epigenetic_traits_at_birth(&cli.breeding_data(), draws.as_mut())
        .await
        .with_context(|| format!("Failed to evaluate birth of {} x {}", cli.sire, cli.dam))?;
    Ok(birth)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
