//! End-to-end scenarios against the public combat_core API

use combat_core::prelude::*;
use combat_core::{AttackDirection, ExperienceResolver};
use combat_sim::simulation::{self, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

fn engine() -> CombatEngine {
    CombatEngine::from_constants(Arc::new(Catalog::bundled().unwrap()), &GameConstants::default())
}

#[test]
fn skilled_shot_through_threshold_and_resistance() {
    let engine = engine();
    let weapon = Weapon::new("Test Rifle", SkillType::SmallGuns, AmmoType::FiveFiftySix, RollRange::fixed(10));
    let attacker = Player::new("Wanderer", 50, "Test Rifle").with_skill(SkillType::SmallGuns, 75);
    // damage roll, then a critical roll that cannot succeed at 0% chance
    let mut dice = ScriptedDice::new([10, 1]);

    let calc = engine.calculate_damage(&weapon, &Defense::new(0, 3, 0.2), Some(&attacker), &mut dice);

    assert_eq!(calc.skill_bonus, 2);
    assert_eq!(calc.pre_mitigation, 12);
    assert_eq!(calc.after_threshold, 9);
    assert_eq!(calc.final_damage, 7);
    assert!(!calc.is_critical);
}

#[test]
fn threshold_applies_before_resistance() {
    let engine = engine();
    let weapon = Weapon::new("Test Rifle", SkillType::SmallGuns, AmmoType::FiveFiftySix, RollRange::fixed(20));
    let mut dice = ScriptedDice::new([20, 100]);

    let calc = engine.calculate_damage(&weapon, &Defense::new(0, 5, 0.5), None, &mut dice);
    assert_eq!(calc.after_threshold, 15);
    assert_eq!(calc.final_damage, 7);
}

#[test]
fn overwhelming_armor_still_takes_one() {
    let engine = engine();
    let weapon = Weapon::new("Pea Shooter", SkillType::SmallGuns, AmmoType::NineMm, RollRange::fixed(2));
    let mut dice = ScriptedDice::new([2, 100]);

    let calc = engine.calculate_damage(&weapon, &Defense::new(0, 40, 0.9), None, &mut dice);
    assert_eq!(calc.final_damage, 1);
}

#[test]
fn last_round_then_empty() {
    let engine = engine();
    let pistol = engine.catalog().weapon("10mm Pistol").unwrap().clone();
    let mut player = Player::new("Wanderer", 50, "10mm Pistol").with_ammo(AmmoType::TenMm, 1);

    assert!(engine.can_use_weapon(&player, &pistol));
    assert!(engine.consume_ammo(&mut player, &pistol));
    assert_eq!(player.ammo_count(AmmoType::TenMm), 0);
    assert!(!engine.can_use_weapon(&player, &pistol));
    assert!(!engine.consume_ammo(&mut player, &pistol));
    assert_eq!(player.ammo_count(AmmoType::TenMm), 0);
}

#[test]
fn experience_scaling_by_level_gap() {
    let engine = engine();
    let template = engine.catalog().enemy("Raider").unwrap();

    let even = engine.calculate_experience_gain(template, template.max_level);
    assert_eq!(even.final_experience, 50);

    let trivial = engine.calculate_experience_gain(template, template.max_level + 10);
    assert!(trivial.level_modifier.abs() < 1e-9);
    assert_eq!(trivial.final_experience, 1);
}

#[test]
fn single_award_jumps_two_levels() {
    let resolver = ExperienceResolver::default();
    let mut player = Player::new("Wanderer", 50, "Combat Knife");

    let level_up = player.award_experience(2500, &resolver);
    assert_eq!(level_up.levels_gained, 2);
    assert_eq!(player.level, 3);
}

#[test]
fn full_fight_until_one_side_falls() {
    let engine = engine();
    let template = engine.catalog().enemy("Mole Rat").unwrap().clone();
    let mut player = Player::new("Wanderer", 100, "Combat Knife").with_skill(SkillType::MeleeWeapons, 80);
    let mut dice = RngDice::new(ChaCha8Rng::seed_from_u64(2024));
    let mut rat = Enemy::spawn(&template, &mut dice);

    let mut turns = 0;
    while player.is_alive() && rat.is_alive() && turns < 200 {
        turns += 1;
        let before = rat.health;
        let attack = engine.resolve_attack(
            Exchange::PlayerAttacks {
                player: &mut player,
                enemy: &mut rat,
            },
            &mut dice,
        );
        assert_eq!(attack.direction, AttackDirection::PlayerToEnemy);
        assert_eq!(attack.remaining_health, rat.health);
        if attack.is_hit {
            assert!(attack.damage >= 1);
            assert_eq!(rat.health, before.saturating_sub(attack.damage));
        } else {
            assert_eq!(rat.health, before);
        }
        if !rat.is_alive() {
            assert!(attack.is_killing_blow);
            break;
        }

        let response = engine.resolve_attack(
            Exchange::EnemyAttacks {
                enemy: &rat,
                player: &mut player,
            },
            &mut dice,
        );
        assert!(!response.is_critical);
    }

    assert!(!rat.is_alive() || !player.is_alive());
}

#[test]
fn simulation_is_reproducible() {
    let engine = engine();
    let config = SimulationConfig {
        enemy: "Feral Ghoul".to_string(),
        weapon: "Hunting Rifle".to_string(),
        armor: Some("Leather Armor".to_string()),
        skill: 70,
        ammo: 40,
        encounters: 2,
        ..Default::default()
    };

    let first = simulation::run(&engine, &config, 99, &mut RngDice::new(ChaCha8Rng::seed_from_u64(99))).unwrap();
    let second = simulation::run(&engine, &config, 99, &mut RngDice::new(ChaCha8Rng::seed_from_u64(99))).unwrap();

    assert_eq!(first, second);
    assert!(first.ammo_left <= 40);
    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["seed"], 99);
}
