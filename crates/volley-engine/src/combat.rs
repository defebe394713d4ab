//! Damage and pickup rules, kept as pure functions.

use rand::Rng;
use volley_core::{BoostKind, CoinKind};

use crate::config::TankConfig;
use crate::entity::Tank;

// Normal-coin boosts are modest; the dedicated speed and bullet coins
// hit harder. Caps are against base stats.
const NORMAL_SPEED_BOOST: f64 = 1.1;
const NORMAL_SPEED_CAP: f64 = 2.0;
const NORMAL_ATTACK_BOOST: f64 = 1.15;
const NORMAL_DEFENSE_STEP: f64 = 0.1;
// Defence can never reach total immunity.
const DEFENSE_CAP: f64 = 0.7;
const SPEED_COIN_BOOST: f64 = 1.3;
const SPEED_COIN_CAP: f64 = 3.0;
const BULLET_COIN_BOOST: f64 = 1.5;

/// Damage actually applied by a hit.
///
/// Defence reduces first, spawn protection halves the remainder, and
/// the floor comes last: even a fully shielded fresh spawn loses at
/// least one hit point per hit.
pub fn hit_damage(raw: f64, def: f64, protected: bool) -> f64 {
    let mut damage = raw * (1.0 - def);
    if protected {
        damage *= 0.5;
    }
    damage.max(1.0)
}

/// Collision radius contribution of a bullet, scaled by how far the
/// shooter's attack has grown past base.
pub fn bullet_size(atk: f64, base_atk: f64) -> f64 {
    4.0 * (atk / base_atk).min(3.0)
}

/// Apply a coin's stat effect to `tank`, returning the boost granted.
///
/// Speed coins boost speed hard with a high cap; bullet coins boost
/// attack; normal coins grant one of three modest boosts at random.
pub fn apply_coin_boost<R: Rng>(
    tank: &mut Tank,
    kind: CoinKind,
    base: &TankConfig,
    rng: &mut R,
) -> BoostKind {
    match kind {
        CoinKind::Speed => {
            tank.speed = (tank.speed * SPEED_COIN_BOOST).min(base.speed * SPEED_COIN_CAP);
            BoostKind::Speed
        }
        CoinKind::Bullet => {
            tank.atk *= BULLET_COIN_BOOST;
            BoostKind::Attack
        }
        CoinKind::Normal => match rng.random_range(0..3u32) {
            0 => {
                tank.speed =
                    (tank.speed * NORMAL_SPEED_BOOST).min(base.speed * NORMAL_SPEED_CAP);
                BoostKind::Speed
            }
            1 => {
                tank.atk *= NORMAL_ATTACK_BOOST;
                BoostKind::Attack
            }
            _ => {
                tank.def = (tank.def + NORMAL_DEFENSE_STEP).min(DEFENSE_CAP);
                BoostKind::Defense
            }
        },
    }
}

/// Weighted coin kind draw: 70% normal, 20% speed, 10% bullet.
pub fn draw_coin_kind<R: Rng>(rng: &mut R) -> CoinKind {
    let roll = rng.random::<f64>();
    if roll < 0.7 {
        CoinKind::Normal
    } else if roll < 0.9 {
        CoinKind::Speed
    } else {
        CoinKind::Bullet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use volley_core::{Color, TankId, Vec2};

    fn tank() -> Tank {
        Tank::spawn(
            TankId(1),
            "t".to_owned(),
            "T".to_owned(),
            Color(0),
            Vec2::default(),
            &TankConfig::default(),
        )
    }

    #[test]
    fn defence_reduces_before_the_floor() {
        assert_eq!(hit_damage(10.0, 0.0, false), 10.0);
        assert_eq!(hit_damage(10.0, 0.5, false), 5.0);
        // Protection halves after defence, then the floor applies.
        assert_eq!(hit_damage(10.0, 0.5, true), 2.5);
        assert_eq!(hit_damage(2.0, 0.7, true), 1.0);
    }

    #[test]
    fn bullet_size_caps_at_triple_attack() {
        assert_eq!(bullet_size(10.0, 10.0), 4.0);
        assert_eq!(bullet_size(20.0, 10.0), 8.0);
        assert_eq!(bullet_size(100.0, 10.0), 12.0);
    }

    #[test]
    fn speed_coin_boosts_and_caps() {
        let base = TankConfig::default();
        let mut t = tank();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let boost = apply_coin_boost(&mut t, CoinKind::Speed, &base, &mut rng);
        assert_eq!(boost, BoostKind::Speed);
        assert!((t.speed - 1.3).abs() < 1e-12);
        for _ in 0..20 {
            apply_coin_boost(&mut t, CoinKind::Speed, &base, &mut rng);
        }
        assert!((t.speed - 3.0).abs() < 1e-12);
    }

    #[test]
    fn bullet_coin_scales_attack() {
        let base = TankConfig::default();
        let mut t = tank();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let boost = apply_coin_boost(&mut t, CoinKind::Bullet, &base, &mut rng);
        assert_eq!(boost, BoostKind::Attack);
        assert!((t.atk - 15.0).abs() < 1e-12);
    }

    #[test]
    fn normal_coins_never_break_the_defence_cap() {
        let base = TankConfig::default();
        let mut t = tank();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            apply_coin_boost(&mut t, CoinKind::Normal, &base, &mut rng);
        }
        assert!(t.def <= 0.7 + 1e-12);
        assert!(t.speed <= 2.0 + 1e-12);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn damage_stays_between_floor_and_raw(
                raw in 1.0f64..1000.0,
                def in 0.0f64..0.7,
                protected: bool,
            ) {
                let damage = hit_damage(raw, def, protected);
                prop_assert!(damage >= 1.0);
                prop_assert!(damage <= raw);
            }
        }
    }

    #[test]
    fn coin_kind_draw_covers_all_kinds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut saw = [false; 3];
        for _ in 0..500 {
            match draw_coin_kind(&mut rng) {
                CoinKind::Normal => saw[0] = true,
                CoinKind::Speed => saw[1] = true,
                CoinKind::Bullet => saw[2] = true,
            }
        }
        assert_eq!(saw, [true; 3]);
    }
}
