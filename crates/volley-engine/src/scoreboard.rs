//! Final and running standings.

use volley_core::TankId;

use crate::entity::Tank;

/// Score weights: a kill outweighs everything else, coins matter, raw
/// damage and longevity break ties.
const KILL_WEIGHT: f64 = 100.0;
const DAMAGE_WEIGHT: f64 = 1.0;
const COIN_WEIGHT: f64 = 10.0;
const SURVIVAL_WEIGHT: f64 = 0.1;

/// One tank's line on the scoreboard.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRow {
    /// The tank.
    pub tank: TankId,
    /// Registered team name.
    pub team_name: String,
    /// Display name.
    pub display_name: String,
    /// Kills credited.
    pub kills: u32,
    /// Damage dealt.
    pub damage: f64,
    /// Coins collected over the match.
    pub coins: u32,
    /// Seconds survived.
    pub survival_secs: f64,
    /// Weighted total.
    pub score: f64,
    /// Whether the tank was still alive at the end.
    pub alive: bool,
}

/// The weighted score total.
pub fn score(kills: u32, damage: f64, coins: u32, survival_secs: f64) -> f64 {
    kills as f64 * KILL_WEIGHT
        + damage * DAMAGE_WEIGHT
        + coins as f64 * COIN_WEIGHT
        + survival_secs * SURVIVAL_WEIGHT
}

/// Standings for the given tanks, highest score first. Equal scores
/// order by id, so the board is stable across runs.
pub fn standings<'a, I>(tanks: I) -> Vec<ScoreRow>
where
    I: IntoIterator<Item = &'a Tank>,
{
    let mut rows: Vec<ScoreRow> = tanks
        .into_iter()
        .map(|t| ScoreRow {
            tank: t.id,
            team_name: t.team_name.clone(),
            display_name: t.display_name.clone(),
            kills: t.kills,
            damage: t.damage_dealt,
            coins: t.coins_collected,
            survival_secs: t.survival_secs,
            score: score(t.kills, t.damage_dealt, t.coins_collected, t.survival_secs),
            alive: t.alive,
        })
        .collect();
    rows.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.tank.0.cmp(&b.tank.0)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use volley_core::{Color, Vec2};

    use crate::config::TankConfig;
    use crate::entity::Tank;

    fn tank(id: u32) -> Tank {
        Tank::spawn(
            TankId(id),
            format!("team-{id}"),
            format!("Team {id}"),
            Color(0),
            Vec2::default(),
            &TankConfig::default(),
        )
    }

    #[test]
    fn weights_match_the_rulebook() {
        assert_eq!(score(2, 35.0, 4, 120.0), 200.0 + 35.0 + 40.0 + 12.0);
        assert_eq!(score(0, 0.0, 0, 0.0), 0.0);
    }

    #[test]
    fn standings_sort_descending_with_stable_ties() {
        let mut a = tank(1);
        a.kills = 1;
        let mut b = tank(2);
        b.coins_collected = 12;
        let c = tank(3);
        let rows = standings([&a, &b, &c]);
        assert_eq!(
            rows.iter().map(|r| r.tank).collect::<Vec<_>>(),
            vec![TankId(2), TankId(1), TankId(3)]
        );
        // 120 for the coins beats 100 for the kill.
        assert_eq!(rows[0].score, 120.0);
    }

    #[test]
    fn equal_scores_order_by_id() {
        let a = tank(2);
        let b = tank(1);
        let rows = standings([&a, &b]);
        assert_eq!(rows[0].tank, TankId(1));
    }
}
