//! Upgrade selection once a coin stockpile is worth spending.

use volley_core::{BehaviorTag, UpgradeKind};

use crate::observation::Observation;

use super::SmartPolicy;

impl SmartPolicy {
    /// The stat this profile wants next.
    pub(super) fn pick_upgrade(&mut self, obs: &Observation) -> UpgradeKind {
        let hp_ratio = obs.you.hp_ratio();
        match self.profile.behavior {
            BehaviorTag::Aggressive => {
                if obs.you.atk < 25.0 {
                    UpgradeKind::Attack
                } else if obs.you.speed < 1.5 {
                    UpgradeKind::Speed
                } else {
                    UpgradeKind::Health
                }
            }
            BehaviorTag::Defensive => {
                if hp_ratio < 0.7 {
                    UpgradeKind::Health
                } else if obs.you.def < 0.5 {
                    UpgradeKind::Defense
                } else {
                    UpgradeKind::Speed
                }
            }
            BehaviorTag::Opportunistic => {
                if hp_ratio < 0.5 {
                    UpgradeKind::Health
                } else if obs.you.coins >= 20 && obs.you.atk < 20.0 {
                    UpgradeKind::Attack
                } else {
                    UpgradeKind::Speed
                }
            }
            _ => {
                if hp_ratio <= 0.3 {
                    return UpgradeKind::Health;
                }
                let enemy_near = obs
                    .enemies
                    .iter()
                    .any(|e| obs.you.pos.manhattan(e.pos) <= 6);
                if enemy_near {
                    if obs.you.atk < 15.0 {
                        return UpgradeKind::Attack;
                    }
                    if obs.you.def < 0.5 {
                        return UpgradeKind::Defense;
                    }
                }
                if obs.you.speed < 1.2 {
                    UpgradeKind::Speed
                } else {
                    UpgradeKind::Health
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{observation, open_arena};
    use super::*;
    use volley_core::{Direction, GridPos, PolicyPayload, TankId};

    use crate::observation::EnemyView;

    fn policy(behavior: BehaviorTag) -> SmartPolicy {
        SmartPolicy::new(
            &PolicyPayload {
                behavior,
                ..PolicyPayload::default()
            },
            2,
        )
    }

    #[test]
    fn defensive_heals_first_then_armours() {
        let mut p = policy(BehaviorTag::Defensive);
        let mut obs = observation(open_arena(), GridPos::new(3, 3));
        obs.you.hp = 50.0;
        assert_eq!(p.pick_upgrade(&obs), UpgradeKind::Health);
        obs.you.hp = 100.0;
        assert_eq!(p.pick_upgrade(&obs), UpgradeKind::Defense);
        obs.you.def = 0.6;
        assert_eq!(p.pick_upgrade(&obs), UpgradeKind::Speed);
    }

    #[test]
    fn balanced_arms_up_under_pressure() {
        let mut p = policy(BehaviorTag::Balanced);
        let mut obs = observation(open_arena(), GridPos::new(3, 3));
        obs.enemies.push(EnemyView {
            id: TankId(2),
            pos: GridPos::new(6, 3),
            hp: 100.0,
            direction: Direction::Left,
        });
        assert_eq!(p.pick_upgrade(&obs), UpgradeKind::Attack);
        obs.you.atk = 20.0;
        assert_eq!(p.pick_upgrade(&obs), UpgradeKind::Defense);
    }

    #[test]
    fn opportunistic_banks_coins_for_attack() {
        let mut p = policy(BehaviorTag::Opportunistic);
        let mut obs = observation(open_arena(), GridPos::new(3, 3));
        obs.you.coins = 12;
        assert_eq!(p.pick_upgrade(&obs), UpgradeKind::Speed);
        obs.you.coins = 20;
        assert_eq!(p.pick_upgrade(&obs), UpgradeKind::Attack);
    }
}
