//! End-to-end match behaviour through the public API.

use volley_ai::{Observation, Policy};
use volley_core::{
    Action, BehaviorTag, Color, EventKind, PolicyKind, PolicyPayload, PolicySpec, TeamDescriptor,
};
use volley_engine::{score, MatchConfig, MatchStatus, SimulationWorld};

fn descriptor(name: &str, behavior: BehaviorTag) -> TeamDescriptor {
    TeamDescriptor {
        team_name: name.to_owned(),
        display_name: format!("Team {name}"),
        color: Color(0x3366cc),
        api_version: "1.0".to_owned(),
        policy: PolicySpec {
            kind: PolicyKind::RuleSet,
            payload: PolicyPayload {
                behavior,
                ..PolicyPayload::default()
            },
        },
    }
}

fn config(duration_secs: f64) -> MatchConfig {
    let mut config = MatchConfig::default();
    config.maze.width = 10;
    config.maze.height = 10;
    config.maze.seed = "t1".to_owned();
    config.clock.duration_secs = duration_secs;
    config
}

struct Hang;
impl Policy for Hang {
    fn decide(&mut self, _obs: &Observation) -> Action {
        loop {
            std::thread::sleep(std::time::Duration::from_secs(60));
        }
    }
}

struct Blowup;
impl Policy for Blowup {
    fn decide(&mut self, _obs: &Observation) -> Action {
        panic!("scripted driver failure");
    }
}

#[test]
fn full_match_runs_and_reports_standings() {
    let roster = vec![
        descriptor("alpha", BehaviorTag::Aggressive),
        descriptor("bravo", BehaviorTag::Defensive),
        descriptor("charlie", BehaviorTag::Elite),
    ];
    let mut world = SimulationWorld::new(config(10.0), roster).unwrap();
    let rows = world.run();

    assert_eq!(world.status(), MatchStatus::Finished);
    assert_eq!(rows.len(), 3);

    // Standings are sorted and every total matches the formula.
    for pair in rows.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for row in &rows {
        let expected = score(row.kills, row.damage, row.coins, row.survival_secs);
        assert!((row.score - expected).abs() < 1e-9);
    }

    // The log is bracketed by the start and end markers, with
    // nondecreasing ticks in between, and frozen.
    let events = world.events().events();
    assert_eq!(events.first().map(|e| e.kind), Some(EventKind::MatchStart));
    assert_eq!(events.last().map(|e| e.kind), Some(EventKind::MatchEnd));
    for pair in events.windows(2) {
        assert!(pair[0].tick.0 <= pair[1].tick.0);
    }
    assert!(world.events().is_frozen());
}

#[test]
fn hanging_drivers_cannot_stall_the_clock() {
    let mut world = SimulationWorld::with_policies(
        config(2.0),
        vec![
            (
                descriptor("stuck-a", BehaviorTag::Balanced),
                Box::new(Hang) as Box<dyn Policy>,
            ),
            (descriptor("stuck-b", BehaviorTag::Balanced), Box::new(Hang)),
        ],
    )
    .unwrap();

    let rows = world.run();
    assert_eq!(world.status(), MatchStatus::Finished);
    // Both tanks idled through the whole two seconds.
    for row in &rows {
        assert!(row.alive);
        assert!((row.survival_secs - 2.0).abs() < 1e-9);
        assert_eq!(row.kills, 0);
    }
    // Every decision round was a budget overrun.
    assert!(world.metrics().driver_faults >= 2);
}

#[test]
fn panicking_driver_forfeits_its_turns_only() {
    let mut world = SimulationWorld::with_policies(
        config(2.0),
        vec![
            (
                descriptor("bomb", BehaviorTag::Balanced),
                Box::new(Blowup) as Box<dyn Policy>,
            ),
            (
                descriptor("bystander", BehaviorTag::Balanced),
                Box::new(Hang),
            ),
        ],
    )
    .unwrap();

    world.run();
    assert_eq!(world.status(), MatchStatus::Finished);
    assert!(world.metrics().driver_faults >= 1);
    assert_eq!(world.metrics().ticks, 40);
}
