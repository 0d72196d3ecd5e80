//! Per-frame simulation tick
//!
//! Order within a frame: the click is resolved first, then the spawn timer
//! runs, every duck is updated and finally removed ducks are reaped. Resolving
//! the click first means it is tested against the ducks the player actually
//! saw when clicking.

use glam::Vec2;

use super::state::{GameEvent, RoundPhase, RoundState};
use crate::settings::MissPolicy;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// World position of a fresh primary press this frame
    pub click: Option<Vec2>,
    /// Window close or quit key; the host stops after this frame
    pub close_requested: bool,
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Hit { id: u32 },
    Miss,
    /// The round is over; clicks no longer count
    Ignored,
}

/// Advance the round by one frame
pub fn tick(state: &mut RoundState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.close_requested {
        return;
    }

    if let Some(point) = input.click {
        resolve_click(state, point);
    }

    advance(state, dt);
}

/// Shoot the first flying duck under `point`, or count a miss
pub fn resolve_click(state: &mut RoundState, point: Vec2) -> ClickOutcome {
    if state.phase == RoundPhase::Over {
        return ClickOutcome::Ignored;
    }

    // Ammo is spent on every shot, hit or not
    if state.miss_policy == MissPolicy::AmmoPerClick {
        state.lives = state.lives.saturating_sub(1);
    }

    // Earliest spawn wins when ducks overlap
    let target = state
        .ducks
        .iter_mut()
        .find(|d| d.is_flying() && d.bounds().contains(point));

    if let Some(duck) = target {
        duck.shoot();
        state.score += state.hit_bonus;
        state.events.push(GameEvent::DuckShot {
            id: duck.id,
            pos: duck.pos,
        });
        log::debug!("Duck {} shot, score {}", duck.id, state.score);
        return ClickOutcome::Hit { id: duck.id };
    }

    state.events.push(GameEvent::Missed { pos: point });
    log::trace!("Missed at ({:.0}, {:.0})", point.x, point.y);

    if state.miss_policy.ends_round() {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.phase = RoundPhase::Over;
            state.events.push(GameEvent::RoundOver { score: state.score });
            log::info!("Round over, final score {}", state.score);
        }
    }

    ClickOutcome::Miss
}

/// Run the spawn timer, move every duck and reap the ones that fell off-screen
pub fn advance(state: &mut RoundState, dt: f32) {
    debug_assert!(dt >= 0.0, "negative frame time {dt}");

    if state.phase == RoundPhase::Over {
        return;
    }

    state.elapsed += dt;

    // Reset rather than subtract: a long hitch still spawns only one duck
    state.spawn_timer += dt;
    if state.spawn_timer >= state.spawn_interval {
        state.spawn_timer = 0.0;
        state.spawn_duck();
    }

    for duck in &mut state.ducks {
        duck.update(dt);
    }

    let events = &mut state.events;
    state.ducks.retain(|duck| {
        if duck.is_alive() {
            true
        } else {
            events.push(GameEvent::DuckRemoved { id: duck.id });
            false
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::consts::*;
    use crate::sim::duck::{DuckState, MotionParams};

    const FRAME: f32 = 1.0 / 60.0;

    fn quiet_settings() -> Settings {
        Settings {
            seed_spawns: 0,
            ..Settings::default()
        }
    }

    fn hover() -> MotionParams {
        MotionParams {
            speed: 100.0,
            amplitude: 10.0,
            frequency: 1.0,
        }
    }

    fn click_at(point: Vec2) -> TickInput {
        TickInput {
            click: Some(point),
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_timer_resets() {
        let mut state = RoundState::new(1, &quiet_settings());

        // A huge hitch spawns exactly one duck and zeroes the timer
        advance(&mut state, 10.0);
        assert_eq!(state.ducks().len(), 1);
        assert_eq!(state.spawn_timer, 0.0);

        advance(&mut state, 1.0);
        assert_eq!(state.ducks().len(), 1);
        advance(&mut state, 1.5);
        assert_eq!(state.ducks().len(), 2);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_regular_spawning() {
        let mut state = RoundState::new(5, &quiet_settings());
        // Just under 11 seconds at 60 fps: one spawn every 2.5 s
        for _ in 0..650 {
            tick(&mut state, &TickInput::default(), FRAME);
        }
        assert_eq!(state.ducks().len(), 4);
    }

    #[test]
    fn test_click_hits_earliest_overlapping_duck() {
        let mut state = RoundState::new(1, &quiet_settings());
        let point = Vec2::new(400.0, 300.0);
        let first = state.spawn_duck_with(point, hover());
        let second = state.spawn_duck_with(point, hover());

        let outcome = resolve_click(&mut state, point);
        assert_eq!(outcome, ClickOutcome::Hit { id: first });
        assert_eq!(state.score(), 100);
        assert_eq!(state.ducks()[0].state(), DuckState::Falling);
        assert_eq!(state.ducks()[1].state(), DuckState::Flying);

        // The next click takes the other one
        let outcome = resolve_click(&mut state, point);
        assert_eq!(outcome, ClickOutcome::Hit { id: second });
        assert_eq!(state.score(), 200);
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_click_resolves_before_motion() {
        let mut state = RoundState::new(1, &quiet_settings());
        let point = Vec2::new(400.0, 300.0);
        let id = state.spawn_duck_with(point, hover());

        // The duck moves 50 px this frame, but the click sees it where it was
        tick(&mut state, &click_at(point), 0.5);
        assert_eq!(state.events[0], GameEvent::DuckShot { id, pos: point });
        assert_eq!(state.score(), 100);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut state = RoundState::new(1, &quiet_settings());
        let motion = MotionParams {
            speed: 120.0,
            amplitude: 20.0,
            frequency: 2.0,
        };
        let id = state.spawn_duck_with(Vec2::new(-60.0, 300.0), motion);

        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), FRAME);
        }

        let duck = &state.ducks()[0];
        assert!((duck.elapsed() - 1.0).abs() < 1e-4);
        assert!((duck.pos.y - 318.19).abs() < 0.01);

        let target = duck.pos;
        tick(&mut state, &click_at(target), FRAME);
        assert_eq!(state.ducks()[0].state(), DuckState::Falling);
        assert_eq!(state.score(), 100);
        assert!(state.events.contains(&GameEvent::DuckShot { id, pos: target }));

        // Same spot again: the duck is falling, so no more points
        resolve_click(&mut state, target);
        assert_eq!(state.score(), 100);
    }

    #[test]
    fn test_misses_end_round() {
        let mut state = RoundState::new(1, &quiet_settings());
        let empty = Vec2::new(10.0, 590.0);

        assert_eq!(resolve_click(&mut state, empty), ClickOutcome::Miss);
        assert_eq!(state.lives(), 2);
        assert_eq!(resolve_click(&mut state, empty), ClickOutcome::Miss);
        assert_eq!(state.lives(), 1);
        assert!(!state.is_over());

        tick(&mut state, &click_at(empty), FRAME);
        assert_eq!(state.lives(), 0);
        assert_eq!(state.phase(), RoundPhase::Over);
        assert!(state.events.contains(&GameEvent::RoundOver { score: 0 }));

        assert_eq!(resolve_click(&mut state, empty), ClickOutcome::Ignored);
        assert_eq!(state.lives(), 0);
        assert!(state.hud().round_over);
    }

    #[test]
    fn test_round_over_freezes_everything() {
        let mut state = RoundState::new(1, &Settings {
            starting_lives: 1,
            ..quiet_settings()
        });
        let point = Vec2::new(400.0, 300.0);
        state.spawn_duck_with(point, hover());

        resolve_click(&mut state, Vec2::new(10.0, 590.0));
        assert!(state.is_over());

        let ducks = state.ducks().to_vec();
        let timer = state.spawn_timer;
        for _ in 0..600 {
            tick(&mut state, &click_at(point), FRAME);
        }

        assert_eq!(state.ducks(), ducks.as_slice());
        assert_eq!(state.spawn_timer, timer);
        assert_eq!(state.score(), 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_ammo_spent_on_every_click() {
        let mut state = RoundState::new(1, &Settings {
            miss_policy: MissPolicy::AmmoPerClick,
            ..quiet_settings()
        });
        let point = Vec2::new(400.0, 300.0);
        state.spawn_duck_with(point, hover());

        assert!(matches!(resolve_click(&mut state, point), ClickOutcome::Hit { .. }));
        assert_eq!(state.lives(), 2);

        let empty = Vec2::new(10.0, 590.0);
        for _ in 0..5 {
            assert_eq!(resolve_click(&mut state, empty), ClickOutcome::Miss);
        }
        // Out of ammo never ends the round
        assert_eq!(state.lives(), 0);
        assert!(!state.is_over());
        assert_eq!(state.score(), 100);
    }

    #[test]
    fn test_empty_round_is_well_defined() {
        let mut state = RoundState::new(1, &quiet_settings());
        advance(&mut state, FRAME);
        assert!(state.ducks().is_empty());
        assert_eq!(resolve_click(&mut state, Vec2::new(400.0, 300.0)), ClickOutcome::Miss);
    }

    #[test]
    fn test_fallen_ducks_are_reaped_in_order() {
        let mut state = RoundState::new(1, &quiet_settings());
        let a = state.spawn_duck_with(Vec2::new(200.0, 300.0), hover());
        let b = state.spawn_duck_with(Vec2::new(400.0, 300.0), hover());
        let c = state.spawn_duck_with(Vec2::new(600.0, 300.0), hover());

        resolve_click(&mut state, Vec2::new(400.0, 300.0));

        let mut removed = None;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), FRAME);
            if state.events.contains(&GameEvent::DuckRemoved { id: b }) {
                removed = Some(state.elapsed);
                break;
            }
        }

        assert!(removed.is_some(), "falling duck was never reaped");
        let ids: Vec<u32> = state.ducks().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(state
            .ducks()
            .iter()
            .all(|d| d.pos.y <= state.area.y + OFFSCREEN_MARGIN));
    }

    #[test]
    fn test_close_request_leaves_state_untouched() {
        let mut state = RoundState::new(1, &Settings::default());
        let before = state.ducks().to_vec();
        let input = TickInput {
            click: Some(Vec2::new(10.0, 590.0)),
            close_requested: true,
        };
        tick(&mut state, &input, FRAME);
        assert_eq!(state.ducks(), before.as_slice());
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = RoundState::new(99999, &Settings::default());
        let mut state2 = RoundState::new(99999, &Settings::default());

        let inputs = [
            TickInput::default(),
            click_at(Vec2::new(100.0, 200.0)),
            TickInput::default(),
            click_at(Vec2::new(700.0, 150.0)),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input, FRAME);
                tick(&mut state2, input, FRAME);
            }
        }

        assert_eq!(state1.ducks(), state2.ducks());
        assert_eq!(state1.hud(), state2.hud());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn one_click_hits_at_most_one_duck(
                spots in prop::collection::vec((0.0f32..800.0, 80.0f32..400.0), 0..12),
                click in (0.0f32..800.0, 80.0f32..400.0),
            ) {
                let mut state = RoundState::new(1, &quiet_settings());
                for (x, y) in &spots {
                    state.spawn_duck_with(Vec2::new(*x, *y), hover());
                }

                let outcome = resolve_click(&mut state, Vec2::new(click.0, click.1));
                let falling = state.ducks().iter().filter(|d| d.is_falling()).count();

                match outcome {
                    ClickOutcome::Hit { .. } => {
                        prop_assert_eq!(falling, 1);
                        prop_assert_eq!(state.score(), 100);
                    }
                    _ => {
                        prop_assert_eq!(falling, 0);
                        prop_assert_eq!(state.score(), 0);
                    }
                }
            }
        }
    }
}
