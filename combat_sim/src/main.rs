//! Headless encounter runner
//!
//! Fights a player loadout against an enemy template and prints the result
//! as text or JSON.

use clap::{Parser, ValueEnum};
use combat_core::prelude::*;
use combat_sim::simulation::{self, SimError, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Wasteland combat simulator
#[derive(Parser, Debug)]
#[command(name = "combat_sim")]
#[command(about = "Simulate encounters against the combat engine and report the outcome")]
struct Args {
    /// Enemy template name
    #[arg(long, default_value = "Raider")]
    enemy: String,

    /// Weapon the player wields
    #[arg(long, default_value = "10mm Pistol")]
    weapon: String,

    /// Armor the player wears
    #[arg(long)]
    armor: Option<String>,

    /// Skill level for the weapon's skill (0-100)
    #[arg(long, default_value_t = 50)]
    skill: u8,

    /// Starting rounds of the weapon's ammo type
    #[arg(long, default_value_t = 60)]
    ammo: u32,

    /// Player max health
    #[arg(long, default_value_t = 100)]
    health: u32,

    /// Number of encounters to fight in a row
    #[arg(long, default_value_t = 1)]
    encounters: u32,

    /// Turn cap per encounter
    #[arg(long, default_value_t = 100)]
    max_turns: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Directory with weapons.toml, armor.toml, enemies.toml and optionally
    /// constants.toml; the bundled data is used when omitted
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn load_data(config_dir: Option<&PathBuf>) -> Result<(Catalog, GameConstants), SimError> {
    match config_dir {
        Some(dir) => {
            let catalog = Catalog::load_from_dir(dir)?;
            let constants_path = dir.join("constants.toml");
            let constants = if constants_path.exists() {
                GameConstants::load(&constants_path)?
            } else {
                GameConstants::default()
            };
            Ok((catalog, constants))
        }
        None => Ok((Catalog::bundled()?, GameConstants::bundled()?)),
    }
}

fn run(args: Args) -> Result<(), SimError> {
    let (catalog, constants) = load_data(args.config_dir.as_ref())?;
    let engine = CombatEngine::from_constants(Arc::new(catalog), &constants);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut dice = RngDice::new(ChaCha8Rng::seed_from_u64(seed));
    info!(seed, enemy = %args.enemy, weapon = %args.weapon, "starting simulation");

    let config = SimulationConfig {
        enemy: args.enemy,
        weapon: args.weapon,
        armor: args.armor,
        skill: args.skill,
        ammo: args.ammo,
        max_health: args.health,
        encounters: args.encounters,
        max_turns: args.max_turns,
    };
    let report = simulation::run(&engine, &config, seed, &mut dice)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", report.render_text()),
    }
    Ok(())
}
