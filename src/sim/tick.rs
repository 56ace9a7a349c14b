//! Fixed timestep simulation step
//!
//! One call advances the world by exactly one nominal frame. Phase order is
//! fixed: player, particles, obstacles and collisions, spawning, milestone.

use super::collision::player_hits;
use super::difficulty::Difficulty;
use super::particle;
use super::random::RandomSource;
use super::spawn::{create_obstacle, should_spawn};
use super::state::{GameEvent, SessionPhase, World};
use crate::consts::*;

/// Advance the world by one step, returning the side effects it raised.
///
/// Does nothing unless the session is playing.
pub fn tick<R: RandomSource + ?Sized>(world: &mut World, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.phase != SessionPhase::Playing {
        return events;
    }
    world.steps += 1;

    let difficulty = Difficulty::for_score(world.score, &world.profile);
    world.scroll = (world.scroll + difficulty.movement_speed) % CANVAS_WIDTH;

    update_player(world, &difficulty, rng);
    particle::update_all(&mut world.particles);
    update_obstacles(world, &difficulty, &mut events);

    if should_spawn(world, &difficulty, rng) {
        let obstacle = create_obstacle(world, rng);
        world.obstacles.push(obstacle);
    }

    if world.score >= UNLOCK_SCORE && !world.all_unlocked {
        world.all_unlocked = true;
        log::info!("Score {} reached, all vehicles unlocked", world.score);
        events.push(GameEvent::VehiclesUnlocked);
    }

    events
}

/// Vertical dynamics, tilt and exhaust
fn update_player<R: RandomSource + ?Sized>(world: &mut World, difficulty: &Difficulty, rng: &mut R) {
    let player = &mut world.player;

    if player.sliding {
        player.velocity_y = (player.velocity_y - SMOOTH_ACCELERATION).max(SLIDE_FORCE);
        player.rotation = (player.rotation - UPWARD_ROTATION_SPEED).max(-UPWARD_MAX_ROTATION);
        particle::emit(&mut world.particles, player, PARTICLES_PER_SLIDE_STEP, rng);
    } else {
        let max_fall = difficulty.max_fall_speed;
        player.velocity_y =
            (player.velocity_y + GRAVITY + difficulty.downward_slide_force).min(max_fall);

        let fall_ratio = player.velocity_y.abs() / max_fall;
        let target = MAX_ROTATION * fall_ratio;
        player.rotation = (player.rotation + ROTATION_SPEED * fall_ratio).min(target);

        if world.particles.len() < MAX_PARTICLES && rng.chance(FALLING_PARTICLE_CHANCE) {
            particle::emit(&mut world.particles, player, 1, rng);
        }
    }

    player.y += player.velocity_y;
    player.clamp_to_bounds(&world.profile);
}

/// Scroll obstacles, detect hits and score the ones that left the field
fn update_obstacles(world: &mut World, difficulty: &Difficulty, events: &mut Vec<GameEvent>) {
    let mut hit = false;
    let mut passed = 0;
    let player = &world.player;

    world.obstacles.retain_mut(|obstacle| {
        obstacle.x -= difficulty.obstacle_speed;
        hit |= player_hits(player, obstacle);
        if obstacle.trailing_edge() < 0.0 {
            passed += 1;
            false
        } else {
            true
        }
    });
    world.score += passed;

    if hit {
        world.phase = SessionPhase::GameOver;
        world.player.sliding = false;
        log::info!("Game over at score {}", world.score);
        events.push(GameEvent::GameOver { score: world.score });

        if world.score > world.personal_best {
            world.personal_best = world.score;
            events.push(GameEvent::PersonalBest(world.score));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use crate::sim::random::{Scripted, seeded};
    use crate::sim::state::{Lane, Obstacle, Player};
    use proptest::prelude::*;

    fn playing_world() -> World {
        let mut w = World::new(Profile::desktop(), Player::new(90.0, 60.0), 0, false);
        w.start();
        w
    }

    /// Obstacle far outside the player's rows, so it only scrolls
    fn harmless(x: f32) -> Obstacle {
        Obstacle {
            x,
            y: 40.0,
            width: 60.0,
            height: 70.0,
            variant: 0,
            lane: Lane::Top,
        }
    }

    /// Source that keeps spacing wide and never puffs while falling
    fn quiet() -> Scripted {
        Scripted::constant(0.999)
    }

    #[test]
    fn test_no_step_unless_playing() {
        let mut w = World::new(Profile::desktop(), Player::new(90.0, 60.0), 0, false);
        let mut rng = seeded(1);
        for phase in [SessionPhase::StartScreen, SessionPhase::Paused, SessionPhase::GameOver] {
            w.phase = phase;
            let y = w.player.y;
            assert!(tick(&mut w, &mut rng).is_empty());
            assert_eq!(w.player.y, y);
            assert_eq!(w.steps, 0);
            assert!(w.obstacles.is_empty());
        }
    }

    #[test]
    fn test_sliding_velocity_decreases_to_floor() {
        let mut w = playing_world();
        w.player.sliding = true;
        let mut rng = quiet();
        let mut prev = w.player.velocity_y;
        let mut reached_floor = false;
        for _ in 0..30 {
            tick(&mut w, &mut rng);
            let v = w.player.velocity_y;
            if reached_floor {
                assert_eq!(v, SLIDE_FORCE);
            } else {
                assert!(v < prev, "{v} !< {prev}");
                assert!(v >= SLIDE_FORCE);
                reached_floor = v == SLIDE_FORCE;
            }
            prev = v;
        }
        assert!(reached_floor);
        assert_eq!(w.player.rotation, -UPWARD_MAX_ROTATION);
    }

    #[test]
    fn test_falling_velocity_clamps_at_ceiling() {
        let mut w = playing_world();
        w.player.y = CORNER_PADDING;
        let mut rng = quiet();
        tick(&mut w, &mut rng);
        // 0 + 1 + 0.5 = 1.5, under the 2.5 ceiling
        assert_eq!(w.player.velocity_y, 1.5);
        tick(&mut w, &mut rng);
        assert_eq!(w.player.velocity_y, 2.5);
        tick(&mut w, &mut rng);
        assert_eq!(w.player.velocity_y, 2.5);
        assert!(w.player.rotation > 0.0 && w.player.rotation <= MAX_ROTATION);
    }

    #[test]
    fn test_fall_ceiling_scales_with_speed() {
        // Score 250 saturates the speed multiplier at 2.0: force 1.0, ceiling 5.0
        let mut w = playing_world();
        w.all_unlocked = true;
        w.score = 250;
        w.player.y = CORNER_PADDING;
        let mut rng = quiet();
        tick(&mut w, &mut rng);
        assert_eq!(w.player.velocity_y, 2.0);
        tick(&mut w, &mut rng);
        assert_eq!(w.player.velocity_y, 4.0);
        tick(&mut w, &mut rng);
        assert_eq!(w.player.velocity_y, 5.0);
        tick(&mut w, &mut rng);
        assert_eq!(w.player.velocity_y, 5.0);
        assert!(w.player.velocity_y > BASE_MAX_FALL_SPEED);
    }

    #[test]
    fn test_bottom_contact_zeroes_velocity() {
        let mut w = playing_world();
        let floor = w.profile.max_y(w.player.height);
        w.player.y = floor - 1.0;
        w.player.velocity_y = 2.5;
        tick(&mut w, &mut quiet());
        assert_eq!(w.player.y, floor);
        assert_eq!(w.player.velocity_y, 0.0);
    }

    #[test]
    fn test_score_counts_each_passed_obstacle_once() {
        let mut w = playing_world();
        w.obstacles = vec![harmless(-55.0), harmless(-50.0), harmless(400.0)];
        tick(&mut w, &mut quiet());
        // Both trailing edges cross zero after an 11-unit scroll
        assert_eq!(w.score, 2);
        assert!(w.obstacles.iter().all(|o| o.trailing_edge() >= 0.0));
        tick(&mut w, &mut quiet());
        assert_eq!(w.score, 2);
    }

    #[test]
    fn test_collision_ends_run_and_records_best() {
        let mut w = playing_world();
        w.score = 7;
        w.personal_best = 5;
        w.player.y = 215.0;
        w.obstacles.push(Obstacle {
            x: w.player.x + 20.0 + BASE_OBSTACLE_SPEED,
            y: 215.0,
            width: 60.0,
            height: 70.0,
            variant: 1,
            lane: Lane::Middle,
        });
        w.player.sliding = true;

        let events = tick(&mut w, &mut quiet());
        assert_eq!(w.phase, SessionPhase::GameOver);
        assert!(!w.player.sliding);
        assert_eq!(
            events,
            vec![GameEvent::GameOver { score: 7 }, GameEvent::PersonalBest(7)]
        );
        assert_eq!(w.personal_best, 7);

        // Frozen afterwards
        let x = w.obstacles[0].x;
        assert!(tick(&mut w, &mut quiet()).is_empty());
        assert_eq!(w.obstacles[0].x, x);
    }

    #[test]
    fn test_collision_below_best_keeps_best() {
        let mut w = playing_world();
        w.score = 3;
        w.personal_best = 10;
        w.player.y = 215.0;
        w.obstacles.push(Obstacle {
            x: w.player.x + BASE_OBSTACLE_SPEED,
            y: 215.0,
            width: 60.0,
            height: 70.0,
            variant: 0,
            lane: Lane::Middle,
        });
        let events = tick(&mut w, &mut quiet());
        assert_eq!(events, vec![GameEvent::GameOver { score: 3 }]);
        assert_eq!(w.personal_best, 10);
    }

    #[test]
    fn test_first_step_spawns_at_right_edge() {
        let mut w = playing_world();
        // Puff check (0.2: no puff), spacing gate, lane, jitter; variant wraps to 0.2
        let mut rng = Scripted::new(vec![0.2, 0.0, 0.5, 0.0]);
        tick(&mut w, &mut rng);
        assert_eq!(rng.drawn(), 5);
        assert!(w.particles.is_empty());
        assert_eq!(w.obstacles.len(), 1);
        assert_eq!(w.obstacles[0].x, CANVAS_WIDTH);
        assert_eq!(w.last_lane, Some(w.obstacles[0].lane));
    }

    #[test]
    fn test_unlock_fires_once() {
        let mut w = playing_world();
        w.score = UNLOCK_SCORE - 1;
        let mut rng = quiet();
        assert!(tick(&mut w, &mut rng).is_empty());

        w.score = UNLOCK_SCORE;
        assert_eq!(tick(&mut w, &mut rng), vec![GameEvent::VehiclesUnlocked]);
        assert!(w.all_unlocked);
        for _ in 0..20 {
            w.score += 1;
            assert!(!tick(&mut w, &mut rng).contains(&GameEvent::VehiclesUnlocked));
        }
    }

    #[test]
    fn test_unlock_skipped_when_already_unlocked() {
        let mut w = World::new(Profile::desktop(), Player::new(90.0, 60.0), 0, true);
        w.start();
        w.score = 150;
        assert!(tick(&mut w, &mut quiet()).is_empty());
    }

    #[test]
    fn test_slide_particles_never_exceed_cap() {
        let mut w = playing_world();
        let mut rng = seeded(3);
        particle::emit(&mut w.particles, &w.player.clone(), MAX_PARTICLES - 2, &mut rng);
        assert_eq!(w.particles.len(), MAX_PARTICLES - 2);
        w.player.sliding = true;

        let mut added = 0;
        for _ in 0..10 {
            let before = w.particles.len();
            tick(&mut w, &mut rng);
            assert!(w.particles.len() <= MAX_PARTICLES);
            // Fresh particles cannot expire within ten steps
            added += w.particles.len() - before;
        }
        assert!(added <= 2, "added {added}");
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut w = playing_world();
            let mut rng = seeded(seed);
            for i in 0..600 {
                w.set_sliding(i % 40 < 18);
                tick(&mut w, &mut rng);
            }
            (w.score, w.phase, w.player.y, w.obstacles.len(), w.particles.len())
        };
        assert_eq!(run(42), run(42));
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(seed in any::<u64>(), inputs in proptest::collection::vec(any::<bool>(), 1..300)) {
            let mut w = playing_world();
            let mut rng = seeded(seed);
            let min_y = w.profile.top_padding;
            let max_y = w.profile.max_y(w.player.height);
            for sliding in inputs {
                w.set_sliding(sliding);
                tick(&mut w, &mut rng);
                prop_assert!(w.player.y >= min_y && w.player.y <= max_y);
            }
        }

        #[test]
        fn prop_rotation_stays_bounded(
            seed in any::<u64>(),
            score in 0u32..300,
            inputs in proptest::collection::vec(any::<bool>(), 1..300),
        ) {
            let mut w = playing_world();
            w.score = score;
            let mut rng = seeded(seed);
            for sliding in inputs {
                w.set_sliding(sliding);
                tick(&mut w, &mut rng);
                prop_assert!(w.player.rotation >= -UPWARD_MAX_ROTATION);
                prop_assert!(w.player.rotation <= MAX_ROTATION);
            }
        }

        #[test]
        fn prop_score_never_decreases(seed in any::<u64>(), steps in 1usize..800) {
            let mut w = playing_world();
            let mut rng = seeded(seed);
            let mut last = 0;
            for i in 0..steps {
                w.set_sliding((i / 25) % 2 == 0);
                tick(&mut w, &mut rng);
                prop_assert!(w.score >= last);
                last = w.score;
            }
        }
    }
}
