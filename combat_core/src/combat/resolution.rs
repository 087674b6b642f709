//! Attack resolution - the orchestrator tying the resolvers together
//!
//! Player attack: ammo gate, hit roll, damage, target health.
//! Enemy attack: flat hit roll per shot, damage, player armor, player health.
//!
//! Precondition for every attack: both sides are alive. Liveness is the
//! battle loop's job and is not re-checked here.

use super::hit::{HitCalculation, HitResolver};
use super::messages;
use super::result::{AttackDirection, AttackOutcome, CombatResult};
use crate::ammo::AmmoGate;
use crate::catalog::{AttackProfile, Catalog, Weapon};
use crate::combatant::{Combatant, Enemy, Player};
use crate::config::GameConstants;
use crate::damage::{CriticalResolver, DamageCalculation, DamageResolver};
use crate::dice::Dice;
use crate::experience::{BonusConditions, ExperienceCalculation, ExperienceResolver, ExperienceSource, LevelUp};
use crate::types::{Defense, RollRange};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// One attack, with the attacker first
pub enum Exchange<'a> {
    PlayerAttacks {
        player: &'a mut Player,
        enemy: &'a mut Enemy,
    },
    EnemyAttacks {
        enemy: &'a Enemy,
        player: &'a mut Player,
    },
}

/// Experience handed out for one kill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAward {
    pub calculation: ExperienceCalculation,
    pub bonus_multiplier: f64,
    /// Experience actually added to the player
    pub awarded: u32,
    pub level_up: LevelUp,
    pub message: String,
}

/// Combat engine with its resolvers injected
#[derive(Debug, Clone)]
pub struct CombatEngine {
    catalog: Arc<Catalog>,
    hit: HitResolver,
    damage: DamageResolver,
    ammo: AmmoGate,
    experience: ExperienceResolver,
}

impl CombatEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        hit: HitResolver,
        damage: DamageResolver,
        ammo: AmmoGate,
        experience: ExperienceResolver,
    ) -> Self {
        CombatEngine {
            catalog,
            hit,
            damage,
            ammo,
            experience,
        }
    }

    /// Engine with every resolver built from one set of constants
    pub fn from_constants(catalog: Arc<Catalog>, constants: &GameConstants) -> Self {
        let critical = CriticalResolver::new(&constants.critical);
        Self::new(
            catalog,
            HitResolver::new(&constants.hit),
            DamageResolver::new(&constants.damage, critical),
            AmmoGate::new(),
            ExperienceResolver::new(&constants.experience),
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn experience(&self) -> &ExperienceResolver {
        &self.experience
    }

    /// Resolve one attack in either direction
    pub fn resolve_attack(&self, exchange: Exchange<'_>, dice: &mut impl Dice) -> CombatResult {
        match exchange {
            Exchange::PlayerAttacks { player, enemy } => self.resolve_player_attack(player, enemy, dice),
            Exchange::EnemyAttacks { enemy, player } => self.resolve_enemy_attack(enemy, player, dice),
        }
    }

    /// Player attacks with the currently wielded weapon
    pub fn resolve_player_attack(&self, player: &mut Player, enemy: &mut Enemy, dice: &mut impl Dice) -> CombatResult {
        let Some(weapon) = self.catalog.weapons.get(&player.current_weapon) else {
            warn!(weapon = %player.current_weapon, "player attack with unknown weapon");
            return CombatResult::new(AttackDirection::PlayerToEnemy, AttackOutcome::UnknownWeapon, enemy.health)
                .with_message(messages::unknown_weapon(&player.current_weapon));
        };
        self.resolve_player_attack_with(player, enemy, weapon, dice)
    }

    /// Player attacks with an explicit weapon
    ///
    /// Dice draws: hit, then on a hit damage and critical. Nothing is drawn
    /// when the ammo gate refuses the attack.
    pub fn resolve_player_attack_with(
        &self,
        player: &mut Player,
        enemy: &mut Enemy,
        weapon: &Weapon,
        dice: &mut impl Dice,
    ) -> CombatResult {
        if !self.ammo.consume_ammo(player, weapon) {
            return CombatResult::new(AttackDirection::PlayerToEnemy, AttackOutcome::OutOfAmmo, enemy.health)
                .with_message(messages::out_of_ammo(&weapon.name, weapon.ammo));
        }
        let ammo_spent = if weapon.uses_ammo() { weapon.shots_per_attack } else { 0 };

        let hit = self.hit.calculate_hit_chance(player, weapon, &enemy.defense, dice);
        if !hit.is_hit {
            let mut result = CombatResult::new(AttackDirection::PlayerToEnemy, AttackOutcome::Miss, enemy.health)
                .with_message(messages::player_miss(&enemy.name));
            result.ammo_spent = ammo_spent;
            result.hits.push(hit);
            return result;
        }

        let damage = self.damage.calculate_damage(weapon, &enemy.defense, Some(&*player), dice);
        let was_alive = enemy.is_alive();
        let remaining_health = enemy.take_damage(damage.final_damage);

        let outcome = if damage.is_critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        };
        let mut message = if damage.is_critical {
            messages::player_critical(&enemy.name, damage.final_damage)
        } else {
            messages::player_hit(&enemy.name, damage.final_damage)
        };
        let is_killing_blow = was_alive && remaining_health == 0;
        if is_killing_blow {
            message = messages::killed(&message, &enemy.name);
        }

        debug!(
            enemy = %enemy.name,
            damage = damage.final_damage,
            remaining_health,
            is_killing_blow,
            "player attack resolved"
        );

        let mut result = CombatResult::new(AttackDirection::PlayerToEnemy, outcome, remaining_health)
            .with_message(message);
        result.is_hit = true;
        result.damage = damage.final_damage;
        result.is_critical = damage.is_critical;
        result.is_killing_blow = is_killing_blow;
        result.ammo_spent = ammo_spent;
        result.hits_landed = 1;
        result.hits.push(hit);
        result.damage_rolls.push(damage);
        result
    }

    /// Enemy attacks the player with its fixed profile
    ///
    /// Enemies never score critical hits and spend no ammo. Each shot is a
    /// hit draw followed, on a hit, by a damage draw. Shots stop once the
    /// player is dead.
    pub fn resolve_enemy_attack(&self, enemy: &Enemy, player: &mut Player, dice: &mut impl Dice) -> CombatResult {
        let damage_range = match self.enemy_damage_range(&enemy.attack) {
            Some(range) => range,
            None => {
                let weapon = match &enemy.attack {
                    AttackProfile::EquippedWeapon { weapon, .. } => weapon.as_str(),
                    _ => "weapon",
                };
                return CombatResult::new(AttackDirection::EnemyToPlayer, AttackOutcome::UnknownWeapon, player.health)
                    .with_message(messages::enemy_unknown_weapon(&enemy.name, weapon));
            }
        };

        let defense = player.defense(&self.catalog.armor);
        let shots = enemy.attack.shots();
        let was_alive = player.is_alive();

        let mut hits: Vec<HitCalculation> = Vec::with_capacity(shots as usize);
        let mut damage_rolls: Vec<DamageCalculation> = Vec::new();
        let mut total_damage = 0u32;

        for _ in 0..shots {
            if !player.is_alive() {
                break;
            }
            let hit = self.hit.roll_flat(enemy.attack.hit_chance(), dice);
            hits.push(hit);
            if !hit.is_hit {
                continue;
            }
            let damage = self.damage.calculate_flat_damage(damage_range, &defense, dice);
            player.take_damage(damage.final_damage);
            total_damage = total_damage.saturating_add(damage.final_damage);
            damage_rolls.push(damage);
        }

        let hits_landed = damage_rolls.len() as u32;
        let is_killing_blow = was_alive && !player.is_alive();
        let (outcome, mut message) = if hits_landed > 0 {
            (
                AttackOutcome::Hit,
                messages::enemy_hit(&enemy.name, total_damage, hits_landed, shots),
            )
        } else {
            (AttackOutcome::Miss, messages::enemy_miss(&enemy.name))
        };
        if is_killing_blow {
            message = messages::player_died(&message);
        }

        debug!(
            enemy = %enemy.name,
            shots,
            hits_landed,
            damage = total_damage,
            remaining_health = player.health,
            "enemy attack resolved"
        );

        let mut result = CombatResult::new(AttackDirection::EnemyToPlayer, outcome, player.health)
            .with_message(message);
        result.is_hit = hits_landed > 0;
        result.damage = total_damage;
        result.is_killing_blow = is_killing_blow;
        result.hits_landed = hits_landed;
        result.hits = hits;
        result.damage_rolls = damage_rolls;
        result
    }

    fn enemy_damage_range(&self, attack: &AttackProfile) -> Option<RollRange> {
        match attack {
            AttackProfile::Natural { damage, .. } | AttackProfile::RangedSquad { damage, .. } => Some(*damage),
            AttackProfile::EquippedWeapon { weapon, .. } => match self.catalog.weapons.get(weapon) {
                Some(weapon) => Some(weapon.damage),
                None => {
                    warn!(weapon = %weapon, "enemy attack with unknown weapon");
                    None
                }
            },
        }
    }

    /// Pay out experience for a kill and resolve level-ups
    pub fn award_kill(&self, player: &mut Player, enemy: &Enemy, conditions: &BonusConditions) -> ExperienceAward {
        let calculation = self.experience.calculate_experience_gain(enemy, player.level);
        let bonus_multiplier = self.experience.bonus_multiplier(conditions);
        let awarded = self.experience.apply_bonus(calculation.final_experience, conditions);
        let level_up = player.award_experience(awarded, &self.experience);

        let mut message = messages::experience_gained(awarded);
        if level_up.leveled() {
            message = messages::level_up(&message, level_up.new_level);
        }

        debug!(
            enemy = %enemy.name,
            base = calculation.final_experience,
            bonus_multiplier,
            awarded,
            total = player.experience,
            "kill rewarded"
        );

        ExperienceAward {
            calculation,
            bonus_multiplier,
            awarded,
            level_up,
            message,
        }
    }

    // === Individual resolvers ===

    pub fn calculate_hit_chance(
        &self,
        attacker: &Player,
        weapon: &Weapon,
        target: &Defense,
        dice: &mut impl Dice,
    ) -> HitCalculation {
        self.hit.calculate_hit_chance(attacker, weapon, target, dice)
    }

    pub fn calculate_damage(
        &self,
        weapon: &Weapon,
        target: &Defense,
        attacker: Option<&Player>,
        dice: &mut impl Dice,
    ) -> DamageCalculation {
        self.damage.calculate_damage(weapon, target, attacker, dice)
    }

    pub fn calculate_experience_gain(&self, enemy: &impl ExperienceSource, player_level: u32) -> ExperienceCalculation {
        self.experience.calculate_experience_gain(enemy, player_level)
    }

    pub fn check_level_up(&self, current_level: u32, total_experience: u64) -> LevelUp {
        self.experience.check_level_up(current_level, total_experience)
    }

    pub fn can_use_weapon(&self, combatant: &Player, weapon: &Weapon) -> bool {
        self.ammo.can_use_weapon(combatant, weapon)
    }

    pub fn consume_ammo(&self, combatant: &mut Player, weapon: &Weapon) -> bool {
        self.ammo.consume_ammo(combatant, weapon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::types::{AmmoType, SkillType};

    fn engine() -> CombatEngine {
        let catalog = Catalog::bundled().unwrap();
        CombatEngine::from_constants(Arc::new(catalog), &GameConstants::default())
    }

    fn spawn(engine: &CombatEngine, name: &str) -> Enemy {
        Enemy::from_template(engine.catalog().enemy(name).unwrap(), None)
    }

    fn gunner() -> Player {
        Player::new("Wanderer", 60, "10mm Pistol")
            .with_skill(SkillType::SmallGuns, 75)
            .with_ammo(AmmoType::TenMm, 3)
    }

    #[test]
    fn test_player_hit() {
        let engine = engine();
        let mut player = gunner();
        let mut raider = spawn(&engine, "Raider");
        // hit roll, damage roll, critical roll
        let mut dice = ScriptedDice::new([10, 12, 100]);

        let result = engine.resolve_attack(
            Exchange::PlayerAttacks {
                player: &mut player,
                enemy: &mut raider,
            },
            &mut dice,
        );

        // (12 + 2 - 1) * 0.9 = 11.7
        assert_eq!(result.outcome, AttackOutcome::Hit);
        assert!(result.is_hit);
        assert_eq!(result.damage, 11);
        assert_eq!(result.remaining_health, 19);
        assert_eq!(raider.health, 19);
        assert_eq!(result.ammo_spent, 1);
        assert_eq!(player.ammo_count(AmmoType::TenMm), 2);
        assert_eq!(result.message, "You hit the Raider for 11 damage.");
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_player_miss_spends_ammo_only() {
        let engine = engine();
        let mut player = gunner();
        let mut raider = spawn(&engine, "Raider");
        let mut dice = ScriptedDice::new([100]);

        let result = engine.resolve_player_attack(&mut player, &mut raider, &mut dice);
        assert_eq!(result.outcome, AttackOutcome::Miss);
        assert_eq!(result.damage, 0);
        assert_eq!(raider.health, 30);
        assert_eq!(player.ammo_count(AmmoType::TenMm), 2);
        assert_eq!(dice.consumed(), 1);
    }

    #[test]
    fn test_out_of_ammo_rolls_nothing() {
        let engine = engine();
        let mut player = Player::new("Wanderer", 60, "10mm Pistol");
        let mut raider = spawn(&engine, "Raider");
        let mut dice = ScriptedDice::new([1, 12, 1]);

        let result = engine.resolve_player_attack(&mut player, &mut raider, &mut dice);
        assert_eq!(result.outcome, AttackOutcome::OutOfAmmo);
        assert!(!result.is_hit);
        assert!(!result.attempted());
        assert_eq!(raider.health, 30);
        assert_eq!(dice.consumed(), 0);
        assert_eq!(player.ammo_count(AmmoType::TenMm), 0);
    }

    #[test]
    fn test_unknown_weapon_is_neutral() {
        let engine = engine();
        let mut player = Player::new("Wanderer", 60, "Fat Man");
        let mut raider = spawn(&engine, "Raider");
        let mut dice = ScriptedDice::new([1]);

        let result = engine.resolve_player_attack(&mut player, &mut raider, &mut dice);
        assert_eq!(result.outcome, AttackOutcome::UnknownWeapon);
        assert_eq!(result.damage, 0);
        assert_eq!(raider.health, 30);
        assert_eq!(dice.consumed(), 0);
    }

    #[test]
    fn test_critical_killing_blow() {
        let engine = engine();
        let mut player = gunner();
        let mut raider = spawn(&engine, "Raider");
        raider.health = 5;
        let mut dice = ScriptedDice::new([1, 5, 1]);

        let result = engine.resolve_player_attack(&mut player, &mut raider, &mut dice);
        assert_eq!(result.outcome, AttackOutcome::Critical);
        assert!(result.is_critical);
        assert!(result.is_killing_blow);
        assert_eq!(result.remaining_health, 0);
        assert!(result.message.ends_with("The Raider is dead."));
    }

    #[test]
    fn test_melee_spends_nothing() {
        let engine = engine();
        let mut player = Player::new("Wanderer", 60, "Combat Knife").with_ammo(AmmoType::TenMm, 4);
        let mut rat = spawn(&engine, "Mole Rat");
        let mut dice = ScriptedDice::new([1, 3, 100]);

        let result = engine.resolve_player_attack(&mut player, &mut rat, &mut dice);
        assert!(result.is_hit);
        assert_eq!(result.ammo_spent, 0);
        assert_eq!(player.ammo_count(AmmoType::TenMm), 4);
    }

    #[test]
    fn test_enemy_natural_attack_through_armor() {
        let engine = engine();
        let mut player = Player::new("Wanderer", 40, "Combat Knife").with_armor("Leather Armor");
        let scorpion = spawn(&engine, "Radscorpion");
        let mut dice = ScriptedDice::new([10, 10]);

        let result = engine.resolve_enemy_attack(&scorpion, &mut player, &mut dice);
        // (10 - 2) * 0.8 = 6.4
        assert_eq!(result.direction, AttackDirection::EnemyToPlayer);
        assert_eq!(result.damage, 6);
        assert!(!result.is_critical);
        assert_eq!(player.health, 34);
        assert_eq!(result.message, "The Radscorpion hits you for 6 damage.");
    }

    #[test]
    fn test_enemy_never_crits() {
        let engine = engine();
        let mut player = Player::new("Wanderer", 40, "Combat Knife");
        let mutant = spawn(&engine, "Super Mutant");
        let mut dice = ScriptedDice::new([1, 24]).with_fallback(1);

        let result = engine.resolve_enemy_attack(&mutant, &mut player, &mut dice);
        assert_eq!(result.damage, 24);
        assert!(!result.is_critical);
        assert_eq!(result.outcome, AttackOutcome::Hit);
        assert_eq!(dice.consumed(), 2);
    }

    #[test]
    fn test_enemy_miss_leaves_player_untouched() {
        let engine = engine();
        let mut player = Player::new("Wanderer", 40, "Combat Knife");
        let raider = spawn(&engine, "Raider");
        let mut dice = ScriptedDice::new([51]);

        let result = engine.resolve_enemy_attack(&raider, &mut player, &mut dice);
        assert_eq!(result.outcome, AttackOutcome::Miss);
        assert_eq!(player.health, 40);
        assert_eq!(result.message, "The Raider misses you.");
    }

    #[test]
    fn test_enemy_unknown_weapon_is_neutral() {
        let engine = engine();
        let mut player = Player::new("Wanderer", 40, "Combat Knife");
        let mut raider = spawn(&engine, "Raider");
        raider.attack = AttackProfile::EquippedWeapon {
            hit_chance: 50,
            weapon: "Fat Man".to_string(),
        };
        let mut dice = ScriptedDice::new([1, 10]);

        let result = engine.resolve_enemy_attack(&raider, &mut player, &mut dice);
        assert_eq!(result.outcome, AttackOutcome::UnknownWeapon);
        assert!(!result.is_hit);
        assert!(!result.attempted());
        assert_eq!(player.health, 40);
        assert_eq!(dice.consumed(), 0);
        assert_eq!(result.message, "The Raider reaches for a Fat Man it does not have.");
    }

    #[test]
    fn test_ranged_squad_rolls_each_shot() {
        let engine = engine();
        let mut player = Player::new("Wanderer", 40, "Combat Knife");
        let gang = spawn(&engine, "Raider Gang");
        // hit 5, miss, hit 8
        let mut dice = ScriptedDice::new([10, 5, 90, 20, 8]);

        let result = engine.resolve_enemy_attack(&gang, &mut player, &mut dice);
        assert_eq!(result.hits.len(), 3);
        assert_eq!(result.hits_landed, 2);
        assert_eq!(result.damage, 13);
        assert_eq!(player.health, 27);
        assert_eq!(result.message, "The Raider Gang hits you 2 of 3 times for 13 damage.");
    }

    #[test]
    fn test_squad_stops_when_player_dies() {
        let engine = engine();
        let mut player = Player::new("Wanderer", 4, "Combat Knife");
        let gang = spawn(&engine, "Raider Gang");
        let mut dice = ScriptedDice::new([1, 8, 1, 8, 1, 8]);

        let result = engine.resolve_enemy_attack(&gang, &mut player, &mut dice);
        assert_eq!(result.hits.len(), 1);
        assert!(result.is_killing_blow);
        assert_eq!(player.health, 0);
        assert!(result.message.ends_with("You are dead."));
    }

    #[test]
    fn test_award_kill_with_bonuses() {
        let engine = engine();
        let mut player = gunner();
        let raider = spawn(&engine, "Raider");
        let conditions = BonusConditions {
            critical_finish: true,
            speed_kill: true,
            ..Default::default()
        };

        // player level 1 vs max level 3: modifier 1.2, 60 xp, x1.35
        let award = engine.award_kill(&mut player, &raider, &conditions);
        assert_eq!(award.calculation.final_experience, 60);
        assert_eq!(award.awarded, 81);
        assert_eq!(player.experience, 81);
        assert!(!award.level_up.leveled());
        assert_eq!(award.message, "You gain 81 experience.");
    }

    #[test]
    fn test_award_kill_levels_up() {
        let engine = engine();
        let mut player = gunner();
        player.experience = 990;
        let rat = spawn(&engine, "Mole Rat");

        let award = engine.award_kill(&mut player, &rat, &BonusConditions::default());
        assert_eq!(award.awarded, 15);
        assert_eq!(player.level, 2);
        assert_eq!(award.message, "You gain 15 experience. You reached level 2!");
    }
}
