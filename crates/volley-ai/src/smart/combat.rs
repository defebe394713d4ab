//! Threat assessment, retreat, and the per-behaviour combat moves.

use volley_core::{Action, BehaviorTag, Direction};

use rand::Rng;

use crate::observation::{EnemyView, Observation};

use super::SmartPolicy;

/// Manhattan range inside which a retreating tank still returns fire.
const RETURN_FIRE_RANGE: i32 = 5;
/// Kiting band: back off inside this range.
const KITE_NEAR: i32 = 3;
/// Kiting band: close in beyond this range.
const KITE_FAR: i32 = 5;
/// Corridor length worth a speculative shot.
const STRATEGIC_CORRIDOR: u32 = 5;

impl SmartPolicy {
    // ── Threat assessment ──────────────────────────────────────────

    /// The most threatening visible enemy: closer is worse, an aligned
    /// enemy (a live firing lane) is half again worse. Ties keep the
    /// earliest, which is the lowest id.
    pub(super) fn primary_threat(&self, obs: &Observation) -> Option<EnemyView> {
        let mut best: Option<(f64, EnemyView)> = None;
        for enemy in &obs.enemies {
            let dist = obs.you.pos.manhattan(enemy.pos);
            let mut threat = 100.0 / (dist as f64 + 1.0);
            if obs.you.pos.aligned_with(enemy.pos) {
                threat *= 1.5;
            }
            if best.map_or(true, |(b, _)| threat > b) {
                best = Some((threat, *enemy));
            }
        }
        best.map(|(_, enemy)| enemy)
    }

    /// Whether health is low enough to disengage. Defensive profiles
    /// also break off early when pressed at close range.
    pub(super) fn should_retreat(&self, obs: &Observation, threat_dist: i32) -> bool {
        let hp = obs.you.hp_ratio();
        if hp < self.profile.retreat_threshold {
            return true;
        }
        self.profile.behavior == BehaviorTag::Defensive && hp < 0.6 && threat_dist <= KITE_NEAR
    }

    // ── Retreat ────────────────────────────────────────────────────

    /// Move that maximizes projected distance from every visible enemy,
    /// with a bonus for ending in cover. Returns fire over the shoulder
    /// when an enemy is close, the gun is ready, and the profile is
    /// willing to shoot at all.
    pub(super) fn retreat(&mut self, obs: &Observation) -> Action {
        let pos = obs.you.pos;
        let mut best: Option<(f64, Direction)> = None;

        for dir in Direction::ALL {
            if !obs.maze.is_walkable(pos.step(dir)) {
                continue;
            }
            let mut dest = pos;
            for _ in 0..3 {
                let next = dest.step(dir);
                if !obs.maze.is_walkable(next) {
                    break;
                }
                dest = next;
            }
            let mut score: f64 = obs
                .enemies
                .iter()
                .map(|e| dest.manhattan(e.pos) as f64)
                .sum();
            if obs.maze.is_choke_point(dest) {
                score += 5.0;
            }
            if best.map_or(true, |(b, _)| score > b) {
                best = Some((score, dir));
            }
        }

        let mut action = match best {
            Some((_, dir)) => Action::drive(dir),
            None => Action::default(),
        };

        if self.profile.behavior != BehaviorTag::Passive && obs.you.cooldown == 0 {
            if let Some(enemy) = obs.nearest_enemy() {
                if pos.manhattan(enemy.pos) <= RETURN_FIRE_RANGE {
                    action.fire = self.shot_direction(obs, enemy);
                }
            }
        }
        action
    }

    // ── Engagement ─────────────────────────────────────────────────

    /// The combat decision against the primary threat.
    pub(super) fn combat(&mut self, obs: &Observation, enemy: &EnemyView) -> Action {
        if let Some(action) = self.elite_tactics(obs, enemy) {
            return action;
        }
        match self.profile.behavior {
            BehaviorTag::Aggressive => self.aggressive_combat(obs, enemy),
            BehaviorTag::Defensive => self.defensive_combat(obs, enemy),
            BehaviorTag::Opportunistic if enemy.hp <= 20.0 => self.press_attack(obs, enemy),
            BehaviorTag::Passive => self.flee(obs, enemy),
            BehaviorTag::Random => self.random_combat(obs, enemy),
            _ => self.default_combat(obs, enemy),
        }
    }

    /// Advanced tactics, tried in priority order. `None` falls through
    /// to the plain behaviour moves.
    fn elite_tactics(&mut self, obs: &Observation, enemy: &EnemyView) -> Option<Action> {
        let dist = obs.you.pos.manhattan(enemy.pos);

        if self.profile.tactics.finish_him && enemy.hp / obs.you.max_hp <= 0.25 {
            return Some(self.press_attack(obs, enemy));
        }

        if self.profile.tactics.kiting {
            if dist < KITE_NEAR {
                let mut action = self.flee(obs, enemy);
                if obs.you.cooldown == 0 {
                    action.fire = self.shot_direction(obs, enemy);
                }
                return Some(action);
            }
            if dist > KITE_FAR {
                if let Some(dir) = self.step_towards(obs, enemy.pos) {
                    return Some(Action::drive(dir));
                }
            } else {
                let mut action = self.strafe(obs, enemy);
                if obs.you.cooldown == 0 {
                    action.fire = self.shot_direction(obs, enemy);
                }
                return Some(action);
            }
        }

        if self.profile.tactics.ambush {
            if let Some(dir) = self.shot_direction(obs, enemy) {
                if obs.you.cooldown == 0 {
                    return Some(Action {
                        fire: Some(dir),
                        ..Action::default()
                    });
                }
            }
            // Hold fire and keep closing while out of the firing lane.
            if let Some(dir) = self.step_towards(obs, enemy.pos) {
                return Some(Action::drive(dir));
            }
        }
        None
    }

    fn aggressive_combat(&mut self, obs: &Observation, enemy: &EnemyView) -> Action {
        if obs.you.cooldown == 0 {
            if let Some(dir) = self.shot_direction(obs, enemy) {
                return Action {
                    fire: Some(dir),
                    ..Action::default()
                };
            }
        }
        let dist = obs.you.pos.manhattan(enemy.pos);
        if dist > self.profile.combat_distance {
            if let Some(dir) = self.step_towards(obs, enemy.pos) {
                return Action::drive(dir);
            }
        }
        self.alignment_move(obs, enemy)
    }

    /// Hold a distance band around the preferred range; fire reluctantly.
    fn defensive_combat(&mut self, obs: &Observation, enemy: &EnemyView) -> Action {
        let dist = obs.you.pos.manhattan(enemy.pos);
        let band = self.profile.combat_distance;
        if dist < band - 1 {
            return self.flee(obs, enemy);
        }
        if dist > band + 1 {
            if let Some(dir) = self.step_towards(obs, enemy.pos) {
                return Action::drive(dir);
            }
        }
        if obs.you.cooldown == 0 {
            if let Some(dir) = self.shot_direction(obs, enemy) {
                if self.rng.random_bool(self.profile.aggression) {
                    return Action {
                        fire: Some(dir),
                        ..Action::default()
                    };
                }
            }
        }
        Action::default()
    }

    fn random_combat(&mut self, obs: &Observation, enemy: &EnemyView) -> Action {
        if self.rng.random_bool(0.3) {
            if let Some(dir) = self.random_open_direction(obs) {
                return Action::drive(dir);
            }
        }
        if obs.you.cooldown == 0 && self.rng.random_bool(0.2) {
            let dir = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
            return Action {
                fire: Some(dir),
                ..Action::default()
            };
        }
        self.default_combat(obs, enemy)
    }

    fn default_combat(&mut self, obs: &Observation, enemy: &EnemyView) -> Action {
        let dist = obs.you.pos.manhattan(enemy.pos);
        if dist > self.profile.combat_distance {
            if let Some(dir) = self.step_towards(obs, enemy.pos) {
                return Action::drive(dir);
            }
        }
        if dist < 2 && obs.you.hp_ratio() < 0.5 {
            return self.flee(obs, enemy);
        }
        if obs.you.cooldown == 0 {
            if let Some(dir) = self.shot_direction(obs, enemy) {
                return Action {
                    fire: Some(dir),
                    ..Action::default()
                };
            }
        }
        self.alignment_move(obs, enemy)
    }

    /// Close and fire with no restraint.
    fn press_attack(&mut self, obs: &Observation, enemy: &EnemyView) -> Action {
        if obs.you.cooldown == 0 {
            if let Some(dir) = self.shot_direction(obs, enemy) {
                return Action {
                    fire: Some(dir),
                    ..Action::default()
                };
            }
        }
        match self.step_towards(obs, enemy.pos) {
            Some(dir) => Action::drive(dir),
            None => self.alignment_move(obs, enemy),
        }
    }

    /// Step directly away from the enemy, never firing.
    fn flee(&mut self, obs: &Observation, enemy: &EnemyView) -> Action {
        let dx = enemy.pos.x - obs.you.pos.x;
        let dy = enemy.pos.y - obs.you.pos.y;
        self.drive_or_fallback(obs, Direction::away_from(dx, dy))
    }

    /// Sidestep perpendicular to the enemy axis.
    fn strafe(&mut self, obs: &Observation, enemy: &EnemyView) -> Action {
        let dx = enemy.pos.x - obs.you.pos.x;
        let dy = enemy.pos.y - obs.you.pos.y;
        let axis = Direction::towards(dx, dy);
        let options = match axis {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        };
        for dir in options {
            if obs.maze.is_walkable(obs.you.pos.step(dir)) {
                return Action::drive(dir);
            }
        }
        self.drive_or_fallback(obs, axis)
    }

    /// Move to get on the enemy's row or column, closing whichever axis
    /// offset is smaller.
    fn alignment_move(&mut self, obs: &Observation, enemy: &EnemyView) -> Action {
        let dx = enemy.pos.x - obs.you.pos.x;
        let dy = enemy.pos.y - obs.you.pos.y;
        let dir = if dx != 0 && (dx.abs() <= dy.abs() || dy == 0) {
            Direction::towards(dx, 0)
        } else if dy != 0 {
            Direction::towards(0, dy)
        } else {
            // Already on the same cell axis-wise; keep the pressure on.
            return match self.step_towards(obs, enemy.pos) {
                Some(dir) => Action::drive(dir),
                None => Action::default(),
            };
        };
        self.drive_or_fallback(obs, dir)
    }

    /// The firing direction if an unobstructed axis shot exists.
    pub(super) fn shot_direction(&self, obs: &Observation, enemy: &EnemyView) -> Option<Direction> {
        if !obs.you.pos.aligned_with(enemy.pos) || obs.you.pos == enemy.pos {
            return None;
        }
        let dx = enemy.pos.x - obs.you.pos.x;
        let dy = enemy.pos.y - obs.you.pos.y;
        let dir = Direction::towards(dx, dy);
        let dist = obs.you.pos.manhattan(enemy.pos);
        obs.maze
            .clear_lane(obs.you.pos, dir, (dist - 1).max(0) as u32)
            .then_some(dir)
    }

    // ── Speculative fire ───────────────────────────────────────────

    /// A chance-gated shot down any long open corridor; worthwhile when
    /// enemies tend to travel lanes. Never for passive profiles.
    pub(super) fn strategic_shot(&mut self, obs: &Observation) -> Option<Action> {
        if obs.you.cooldown != 0 || self.profile.behavior == BehaviorTag::Passive {
            return None;
        }
        let chance = match self.profile.behavior {
            BehaviorTag::Aggressive => 1.0,
            BehaviorTag::Opportunistic => 0.5,
            _ => 0.4,
        };
        if !self.rng.random_bool(chance) {
            return None;
        }
        for dir in Direction::ALL {
            if obs.maze.corridor_length(obs.you.pos, dir, STRATEGIC_CORRIDOR + 3)
                >= STRATEGIC_CORRIDOR
            {
                return Some(Action {
                    fire: Some(dir),
                    ..Action::default()
                });
            }
        }
        None
    }
}
