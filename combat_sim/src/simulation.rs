//! Encounter simulation

use combat_core::prelude::*;
use combat_core::{ConfigError, EncounterStats, PlayerError};
use serde::Serialize;
use std::fmt::Write as _;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error("Unknown enemy template: {0}")]
    UnknownEnemy(String),
    #[error("Unknown weapon: {0}")]
    UnknownWeapon(String),
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to simulate
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub enemy: String,
    pub weapon: String,
    pub armor: Option<String>,
    /// Skill level for the weapon's skill
    pub skill: u8,
    /// Starting rounds of the weapon's ammo type
    pub ammo: u32,
    pub max_health: u32,
    pub encounters: u32,
    /// Turn cap per encounter
    pub max_turns: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            enemy: "Raider".to_string(),
            weapon: "10mm Pistol".to_string(),
            armor: None,
            skill: 50,
            ammo: 60,
            max_health: 100,
            encounters: 1,
            max_turns: 100,
        }
    }
}

/// Outcome of one encounter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterReport {
    pub enemy: String,
    pub spawned: usize,
    pub kills: u32,
    pub fled: bool,
    pub survived: bool,
    pub experience_gained: u64,
    pub levels_gained: u32,
    pub ammo_spent: u32,
    pub elapsed_ms: u64,
    pub stats: EncounterStats,
    pub log: Vec<String>,
}

/// Outcome of a whole run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub weapon: String,
    pub enemy: String,
    pub encounters: Vec<EncounterReport>,
    pub final_level: u32,
    pub final_experience: u64,
    pub final_health: u32,
    pub ammo_left: u32,
}

impl SimulationReport {
    pub fn kills(&self) -> u32 {
        self.encounters.iter().map(|e| e.kills).sum()
    }

    pub fn attacks_made(&self) -> u32 {
        self.encounters.iter().map(|e| e.stats.attacks_made).sum()
    }

    pub fn attacks_hit(&self) -> u32 {
        self.encounters.iter().map(|e| e.stats.attacks_hit).sum()
    }

    pub fn criticals(&self) -> u32 {
        self.encounters.iter().map(|e| e.stats.criticals).sum()
    }

    pub fn damage_dealt(&self) -> u64 {
        self.encounters.iter().map(|e| e.stats.damage_dealt).sum()
    }

    pub fn damage_taken(&self) -> u64 {
        self.encounters.iter().map(|e| e.stats.damage_taken).sum()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.encounters.iter().map(|e| e.elapsed_ms).sum()
    }

    /// Hit rate as a percentage
    pub fn accuracy(&self) -> f64 {
        let made = self.attacks_made();
        if made > 0 {
            self.attacks_hit() as f64 / made as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== {} vs {} (seed {}) ===", self.weapon, self.enemy, self.seed);
        for (index, encounter) in self.encounters.iter().enumerate() {
            let _ = writeln!(
                out,
                "-- Encounter {}: {} x{} --",
                index + 1,
                encounter.enemy,
                encounter.spawned
            );
            for line in &encounter.log {
                let _ = writeln!(out, "  {}", line);
            }
            let status = if !encounter.survived {
                "killed"
            } else if encounter.fled {
                "fled"
            } else {
                "cleared"
            };
            let _ = writeln!(
                out,
                "  {} after {} turns, {} kills, +{} xp",
                status, encounter.stats.turns, encounter.kills, encounter.experience_gained
            );
        }
        let _ = writeln!(out, "Kills:        {}", self.kills());
        let _ = writeln!(
            out,
            "Attacks:      {} made, {} hit ({:.1}%)",
            self.attacks_made(),
            self.attacks_hit(),
            self.accuracy()
        );
        let _ = writeln!(out, "Criticals:    {}", self.criticals());
        let _ = writeln!(out, "Damage:       {} dealt, {} taken", self.damage_dealt(), self.damage_taken());
        let _ = writeln!(out, "Level:        {} ({} xp)", self.final_level, self.final_experience);
        let _ = writeln!(out, "Health:       {}", self.final_health);
        let _ = writeln!(out, "Ammo left:    {}", self.ammo_left);
        let _ = writeln!(out, "Elapsed:      {:.1}s", self.elapsed_ms() as f64 / 1000.0);
        out
    }
}

/// Build the simulated player from the run settings
pub fn build_player(config: &SimulationConfig, catalog: &Catalog) -> Result<Player, SimError> {
    let weapon = catalog
        .weapon(&config.weapon)
        .ok_or_else(|| SimError::UnknownWeapon(config.weapon.clone()))?;

    let mut player = Player::new("Wanderer", config.max_health, weapon.name.clone())
        .with_skill(weapon.skill, config.skill)
        .with_ammo(weapon.ammo, config.ammo);
    player.equip_armor(config.armor.as_deref(), &catalog.armor)?;
    Ok(player)
}

/// Run every encounter in order until they are done or the player dies
pub fn run(
    engine: &CombatEngine,
    config: &SimulationConfig,
    seed: u64,
    dice: &mut impl Dice,
) -> Result<SimulationReport, SimError> {
    let template = engine
        .catalog()
        .enemy(&config.enemy)
        .ok_or_else(|| SimError::UnknownEnemy(config.enemy.clone()))?
        .clone();
    let mut player = build_player(config, engine.catalog())?;

    let mut encounters = Vec::new();
    for _ in 0..config.encounters {
        if !player.is_alive() {
            break;
        }
        let report = run_encounter(engine, &mut player, &template, config.max_turns, dice);
        let fled = report.fled;
        encounters.push(report);
        if fled {
            break;
        }
    }

    let ammo_left = engine
        .catalog()
        .weapon(&player.current_weapon)
        .map(|weapon| player.ammo_count(weapon.ammo))
        .unwrap_or(0);

    Ok(SimulationReport {
        seed,
        weapon: config.weapon.clone(),
        enemy: config.enemy.clone(),
        encounters,
        final_level: player.level,
        final_experience: player.experience,
        final_health: player.health,
        ammo_left,
    })
}

/// Fight one spawned group
///
/// Each turn the player attacks the first living enemy, then every living
/// enemy attacks the player. Running out of ammo ends the encounter.
pub fn run_encounter(
    engine: &CombatEngine,
    player: &mut Player,
    template: &EnemyTemplate,
    max_turns: u32,
    dice: &mut impl Dice,
) -> EncounterReport {
    let mut encounter = Encounter::spawn(template, dice);
    let speed_kill_turns = engine.experience().speed_kill_turns();
    let cooldown_ms = engine
        .catalog()
        .weapon(&player.current_weapon)
        .map(|weapon| weapon.cooldown_ms)
        .unwrap_or(0);

    let mut report = EncounterReport {
        enemy: template.name.clone(),
        spawned: encounter.enemies.len(),
        kills: 0,
        fled: false,
        survived: true,
        experience_gained: 0,
        levels_gained: 0,
        ammo_spent: 0,
        elapsed_ms: 0,
        stats: EncounterStats::default(),
        log: Vec::new(),
    };

    while player.is_alive() && !encounter.is_cleared() && encounter.stats.turns < max_turns {
        let turn = encounter.begin_turn();
        let Some(target) = encounter.first_living_index() else {
            break;
        };

        let result = match encounter.enemy_mut(target) {
            Some(enemy) => engine.resolve_attack(Exchange::PlayerAttacks { player: &mut *player, enemy }, dice),
            None => break,
        };
        encounter.record(&result);
        report.ammo_spent += result.ammo_spent;
        report.elapsed_ms += cooldown_ms;
        report.log.push(result.message.clone());
        debug!(turn, outcome = ?result.outcome, damage = result.damage, "player turn");

        if result.outcome == AttackOutcome::OutOfAmmo || result.outcome == AttackOutcome::UnknownWeapon {
            report.fled = true;
            break;
        }

        if result.is_killing_blow {
            let conditions = encounter.bonus_conditions(&result, speed_kill_turns);
            if let Some(enemy) = encounter.enemy(target) {
                let award = engine.award_kill(player, enemy, &conditions);
                report.kills += 1;
                report.experience_gained += award.awarded as u64;
                report.levels_gained += award.level_up.levels_gained;
                report.log.push(award.message);
            }
        }

        for index in 0..encounter.enemies.len() {
            if !player.is_alive() {
                break;
            }
            let result = match encounter.enemy(index) {
                Some(enemy) if enemy.is_alive() => {
                    engine.resolve_attack(Exchange::EnemyAttacks { enemy, player: &mut *player }, dice)
                }
                _ => continue,
            };
            encounter.record(&result);
            report.log.push(result.message);
        }
    }

    report.survived = player.is_alive();
    report.stats = encounter.stats;

    info!(
        enemy = %report.enemy,
        spawned = report.spawned,
        kills = report.kills,
        turns = report.stats.turns,
        survived = report.survived,
        fled = report.fled,
        "encounter finished"
    );

    report
}
