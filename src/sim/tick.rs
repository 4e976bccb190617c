//! Session controller and per-tick simulation step
//!
//! Outside `Playing` a tick only processes UI intents. Inside `Playing` it
//! runs the fixed pipeline: player, camera, spawner, pool movement,
//! collisions, coin pickups, recycling, distance score, then the outcome.

use super::autopilot;
use super::collision::resolve_collisions;
use super::spawner::SpawnKind;
use super::state::{GameEvent, MenuIntent, Outcome, SessionPhase, Steer, WorldState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lateral movement while playing
    pub steer: Steer,
    /// One-shot UI intent (play/replay/menu/scores)
    pub intent: Option<MenuIntent>,
    /// Idle/demo mode - the autopilot steers instead of `steer`
    pub autopilot: bool,
}

impl TickInput {
    pub fn steer(steer: Steer) -> Self {
        Self {
            steer,
            ..Default::default()
        }
    }

    pub fn intent(intent: MenuIntent) -> Self {
        Self {
            intent: Some(intent),
            ..Default::default()
        }
    }
}

/// Advance the world by `dt` seconds. Returns what happened.
pub fn tick(world: &mut WorldState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    match world.session.phase {
        SessionPhase::Playing => step_playing(world, input, dt, &mut events),
        _ => {
            if let Some(intent) = input.intent {
                apply_intent(world, intent, &mut events);
            }
        }
    }

    events
}

/// Apply a UI intent. Intents that don't fit the current phase are ignored.
pub fn apply_intent(world: &mut WorldState, intent: MenuIntent, events: &mut Vec<GameEvent>) -> bool {
    let from = world.session.phase;
    let Some(to) = from.after_intent(intent) else {
        log::debug!("Ignoring {:?} in {:?}", intent, from);
        return false;
    };

    if to == SessionPhase::Playing {
        world.reset_run();
        log::info!("Run started (seed {}, best {})", world.seed, world.session.best_score());
        events.push(GameEvent::RunStarted);
    }
    world.session.phase = to;
    events.push(GameEvent::PhaseChanged { from, to });
    true
}

fn step_playing(world: &mut WorldState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    world.time_ticks += 1;

    let steer = if input.autopilot {
        autopilot::steer(world)
    } else {
        input.steer
    };
    world.player.advance(steer, dt);
    world.camera.follow(&world.player);

    let report = world.spawner.tick(
        dt,
        &mut world.rng,
        &world.player,
        &world.arena,
        &mut world.obstacles,
        &mut world.coins,
    );
    for (kind, slot, dropped) in [
        (SpawnKind::Obstacle, report.obstacle, report.obstacle_dropped),
        (SpawnKind::Coin, report.coin, report.coin_dropped),
    ] {
        if let Some(slot) = slot {
            events.push(GameEvent::Spawned { kind, slot });
        } else if dropped {
            events.push(GameEvent::SpawnDropped { kind });
        }
    }

    // Entities close in on the player at the player's own speed
    let dz = world.player.speed * dt;
    world.obstacles.advance(dz);
    world.coins.advance(dz);

    let collisions = resolve_collisions(&world.player, &world.arena, &world.obstacles, &world.coins);

    let park = world.player.parking_spot();
    for slot in collisions.coins {
        let score = world.session.tracker.add_coin();
        world.coins.deactivate(slot, park);
        events.push(GameEvent::CoinCollected { slot, score });
    }

    let margin = world.tuning.recycle_margin;
    let player_z = world.player.position.z;
    world.obstacles.recycle_passed(player_z, margin, park);
    world.coins.recycle_passed(player_z, margin, park);

    if world.session.tracker.update_distance(player_z) > 0 {
        events.push(GameEvent::DistanceScored {
            score: world.session.score(),
        });
    }

    // Points earned on the final tick count toward the final score
    if let Some(contact) = collisions.contact {
        log::debug!("Contact: {:?}", contact);
        end_run(world, contact.outcome(), events);
    }
}

/// Playing -> Ended: record the outcome and offer the score to the best
fn end_run(world: &mut WorldState, outcome: Outcome, events: &mut Vec<GameEvent>) {
    let session = &mut world.session;
    let score = session.score();
    let new_best = session.best.record(score);

    session.outcome = Some(outcome);
    session.runs += 1;
    session.phase = SessionPhase::Ended;

    log::info!(
        "{} Score {} (best {}{}) after {} ticks",
        outcome.text(),
        score,
        session.best_score(),
        if new_best { ", new record" } else { "" },
        world.time_ticks
    );

    events.push(GameEvent::RunEnded {
        outcome,
        score,
        new_best,
    });
    events.push(GameEvent::PhaseChanged {
        from: SessionPhase::Playing,
        to: SessionPhase::Ended,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::highscores::BestScore;
    use crate::sim::state::{Coin, Obstacle, ObstacleVariant};
    use crate::tuning::{SpawnInterval, Tuning};
    use glam::Vec3;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    /// Tuning with spawning pushed far into the future
    fn quiet_tuning() -> Tuning {
        Tuning {
            obstacle_interval: SpawnInterval::new(1.0e6, 1.0e6, 1.0e6),
            coin_interval: SpawnInterval::new(1.0e6, 1.0e6, 1.0e6),
            ..Default::default()
        }
    }

    fn playing_world(tuning: Tuning) -> WorldState {
        let mut world = WorldState::new(12345, tuning);
        tick(&mut world, &TickInput::intent(MenuIntent::Play), DT);
        assert_eq!(world.session.phase, SessionPhase::Playing);
        world
    }

    fn run_until_ended(world: &mut WorldState, input: &TickInput, max_ticks: usize) -> Vec<GameEvent> {
        let mut all = Vec::new();
        for _ in 0..max_ticks {
            all.extend(tick(world, input, DT));
            if world.session.phase == SessionPhase::Ended {
                break;
            }
        }
        all
    }

    fn assert_fresh_run(world: &WorldState) {
        assert_eq!(world.session.phase, SessionPhase::Playing);
        assert_eq!(world.player.position, PLAYER_ORIGIN);
        assert_eq!(world.session.score(), 0);
        assert_eq!(world.session.tracker.marker(), PLAYER_ORIGIN.z);
        assert_eq!(world.session.outcome, None);
        assert_eq!(world.obstacles.active_count(), 0);
        assert_eq!(world.coins.active_count(), 0);
    }

    #[test]
    fn test_menu_ignores_time() {
        let mut world = WorldState::new(1, Tuning::default());
        for _ in 0..600 {
            tick(&mut world, &TickInput::steer(Steer::Left), DT);
        }
        assert_eq!(world.session.phase, SessionPhase::Menu);
        assert_eq!(world.player.position, PLAYER_ORIGIN);
        assert_eq!(world.obstacles.active_count(), 0);
    }

    #[test]
    fn test_menu_scores_round_trip() {
        let mut world = WorldState::new(1, Tuning::default());
        tick(&mut world, &TickInput::intent(MenuIntent::Scores), DT);
        assert_eq!(world.session.phase, SessionPhase::ScoreView);

        // Play is not valid from the score screen
        let events = tick(&mut world, &TickInput::intent(MenuIntent::Play), DT);
        assert!(events.is_empty());
        assert_eq!(world.session.phase, SessionPhase::ScoreView);

        tick(&mut world, &TickInput::intent(MenuIntent::Menu), DT);
        assert_eq!(world.session.phase, SessionPhase::Menu);
    }

    #[test]
    fn test_play_resets_world() {
        let world = playing_world(Tuning::default());
        assert_fresh_run(&world);
    }

    #[test]
    fn test_intents_ignored_while_playing() {
        let mut world = playing_world(quiet_tuning());
        tick(&mut world, &TickInput::intent(MenuIntent::Menu), DT);
        assert_eq!(world.session.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_player_runs_forward_and_steers() {
        let mut world = playing_world(quiet_tuning());
        tick(&mut world, &TickInput::steer(Steer::Right), 0.1);
        assert!((world.player.position.z - (PLAYER_ORIGIN.z - 1.0)).abs() < 1e-4);
        assert!((world.player.position.x - 1.0).abs() < 1e-4);
        assert_eq!(world.camera.target.z, world.player.position.z);
    }

    #[test]
    fn test_scenario_a_reaching_win_wall_wins() {
        let mut world = playing_world(quiet_tuning());
        world.session.best = BestScore::new(3);

        let events = run_until_ended(&mut world, &TickInput::default(), 60 * 60);

        assert_eq!(world.session.phase, SessionPhase::Ended);
        assert_eq!(world.session.outcome, Some(Outcome::Win));
        assert_eq!(world.session.outcome_text(), "You win.");
        // ~215 units at one point per 10
        assert_eq!(world.session.score(), 21);
        assert_eq!(world.session.best_score(), 21);
        assert!(events.contains(&GameEvent::RunEnded {
            outcome: Outcome::Win,
            score: 21,
            new_best: true,
        }));
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let mut world = playing_world(quiet_tuning());
        world.session.best = BestScore::new(500);
        run_until_ended(&mut world, &TickInput::default(), 60 * 60);
        assert_eq!(world.session.outcome, Some(Outcome::Win));
        assert_eq!(world.session.best_score(), 500);
    }

    #[test]
    fn test_steering_into_wall_loses() {
        let mut world = playing_world(quiet_tuning());
        run_until_ended(&mut world, &TickInput::steer(Steer::Left), 60 * 10);
        assert_eq!(world.session.outcome, Some(Outcome::Lose));
        assert_eq!(world.session.outcome_text(), "You lose.");
        assert!(world.player.position.x <= -9.25);
    }

    #[test]
    fn test_scenario_b_obstacle_at_player() {
        let mut world = playing_world(quiet_tuning());
        world
            .obstacles
            .try_activate(Obstacle {
                position: world.player.position,
                size: OBSTACLE_SIZES[0],
                variant: ObstacleVariant::Blue,
            })
            .unwrap();

        let events = tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.session.phase, SessionPhase::Ended);
        assert_eq!(world.session.outcome, Some(Outcome::Lose));
        assert!(matches!(events[0], GameEvent::RunEnded { outcome: Outcome::Lose, .. }));
        assert_eq!(world.time_ticks, 1);
    }

    #[test]
    fn test_final_tick_points_count_toward_best() {
        let mut world = playing_world(quiet_tuning());
        // Next tick crosses the first distance threshold at z = 6
        world.player.position.z = 6.05;
        let here = world.player.position;
        world
            .obstacles
            .try_activate(Obstacle {
                position: here,
                size: OBSTACLE_SIZES[0],
                variant: ObstacleVariant::Blue,
            })
            .unwrap();
        let slot = world
            .coins
            .try_activate(Coin {
                position: here,
                radius: COIN_RADIUS,
            })
            .unwrap();

        let events = tick(&mut world, &TickInput::default(), DT);

        let final_score = COIN_SCORE + DISTANCE_SCORE;
        assert_eq!(world.session.phase, SessionPhase::Ended);
        assert_eq!(world.session.outcome, Some(Outcome::Lose));
        assert_eq!(world.session.score(), final_score);
        assert_eq!(world.session.best_score(), final_score);
        assert_eq!(
            events,
            vec![
                GameEvent::CoinCollected { slot, score: COIN_SCORE },
                GameEvent::DistanceScored { score: final_score },
                GameEvent::RunEnded {
                    outcome: Outcome::Lose,
                    score: final_score,
                    new_best: true,
                },
                GameEvent::PhaseChanged {
                    from: SessionPhase::Playing,
                    to: SessionPhase::Ended,
                },
            ]
        );
    }

    #[test]
    fn test_scenario_c_coin_collected_once() {
        let mut world = playing_world(quiet_tuning());
        let slot = world
            .coins
            .try_activate(Coin {
                position: world.player.position,
                radius: COIN_RADIUS,
            })
            .unwrap();

        let events = tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.session.score(), COIN_SCORE);
        assert!(!world.coins.is_active(slot));
        assert_eq!(events, vec![GameEvent::CoinCollected { slot, score: COIN_SCORE }]);

        tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.session.score(), COIN_SCORE);
        assert_eq!(world.session.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_passed_entities_are_recycled() {
        let mut world = playing_world(quiet_tuning());
        let near = world.player.position - Vec3::new(6.0, 0.0, 0.1);
        let slot = world
            .coins
            .try_activate(Coin {
                position: near,
                radius: COIN_RADIUS,
            })
            .unwrap();

        tick(&mut world, &TickInput::default(), DT);
        assert!(!world.coins.is_active(slot));
        let parked = world.coins.slots()[slot.index()].entity.position;
        assert!(parked.z > world.player.position.z);
        assert_eq!(world.session.score(), 0);
    }

    #[test]
    fn test_replay_after_loss_resets() {
        let mut world = playing_world(Tuning::default());
        run_until_ended(&mut world, &TickInput::steer(Steer::Right), 60 * 10);
        assert_eq!(world.session.phase, SessionPhase::Ended);

        // Menu intents that don't apply here are no-ops
        tick(&mut world, &TickInput::intent(MenuIntent::Play), DT);
        assert_eq!(world.session.phase, SessionPhase::Ended);

        tick(&mut world, &TickInput::intent(MenuIntent::Replay), DT);
        assert_fresh_run(&world);
        assert_eq!(world.spawner.obstacles.elapsed, 0.0);
        assert_eq!(world.time_ticks, 0);
    }

    #[test]
    fn test_ended_to_menu() {
        let mut world = playing_world(quiet_tuning());
        run_until_ended(&mut world, &TickInput::steer(Steer::Left), 60 * 10);
        tick(&mut world, &TickInput::intent(MenuIntent::Menu), DT);
        assert_eq!(world.session.phase, SessionPhase::Menu);
        assert_eq!(world.session.outcome, Some(Outcome::Lose));
    }

    #[test]
    fn test_spawns_appear_ahead() {
        let mut world = playing_world(Tuning::default());
        let mut spawned = 0;
        for _ in 0..(60 * 3) {
            for event in tick(&mut world, &TickInput::default(), DT) {
                if matches!(event, GameEvent::Spawned { kind: SpawnKind::Obstacle, .. }) {
                    spawned += 1;
                }
            }
        }
        assert_eq!(spawned, 1);
        let (_, obstacle) = world.obstacles.iter_active().next().unwrap();
        assert!(obstacle.position.z < world.player.position.z);
    }

    #[test]
    fn test_autopilot_run_ends_with_points() {
        let mut world = playing_world(Tuning::default());
        let autopilot = TickInput {
            autopilot: true,
            ..Default::default()
        };
        run_until_ended(&mut world, &autopilot, 60 * 60);
        assert_eq!(world.session.phase, SessionPhase::Ended);
        assert!(world.session.score() >= 10);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_world(Tuning::default());
        let mut b = playing_world(Tuning::default());
        let inputs = [Steer::Left, Steer::None, Steer::Right, Steer::Right];

        for i in 0..600 {
            let input = TickInput::steer(inputs[i % inputs.len()]);
            assert_eq!(tick(&mut a, &input, DT), tick(&mut b, &input, DT));
        }
        assert_eq!(a.player.position, b.player.position);
        assert_eq!(a.session.score(), b.session.score());
    }

    fn steer_strategy() -> impl Strategy<Value = Steer> {
        prop_oneof![Just(Steer::None), Just(Steer::Left), Just(Steer::Right)]
    }

    fn intent_strategy() -> impl Strategy<Value = Option<MenuIntent>> {
        prop_oneof![
            4 => Just(None),
            1 => Just(Some(MenuIntent::Play)),
            1 => Just(Some(MenuIntent::Replay)),
            1 => Just(Some(MenuIntent::Menu)),
            1 => Just(Some(MenuIntent::Scores)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_score_and_best_are_monotonic(
            seed in any::<u64>(),
            steps in proptest::collection::vec((steer_strategy(), intent_strategy(), 0.0f32..0.25), 1..400),
        ) {
            let mut world = WorldState::new(seed, Tuning::default());
            let mut last_score = 0;
            let mut last_best = world.session.best_score();

            for (steer, intent, dt) in steps {
                let was_playing = world.session.phase == SessionPhase::Playing;
                let events = tick(&mut world, &TickInput { steer, intent, autopilot: false }, dt);

                if events.contains(&GameEvent::RunStarted) {
                    prop_assert_eq!(world.session.score(), 0);
                    prop_assert_eq!(world.player.position, PLAYER_ORIGIN);
                    prop_assert_eq!(world.obstacles.active_count(), 0);
                    prop_assert_eq!(world.coins.active_count(), 0);
                } else if was_playing {
                    prop_assert!(world.session.score() >= last_score);
                }

                let ended: Vec<_> = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::RunEnded { .. }))
                    .collect();
                prop_assert!(ended.len() <= 1);

                prop_assert!(world.session.best_score() >= last_best);
                prop_assert!(world.obstacles.active_count() <= world.obstacles.capacity());
                prop_assert!(world.coins.active_count() <= world.coins.capacity());

                last_score = world.session.score();
                last_best = world.session.best_score();
            }
        }
    }
}
