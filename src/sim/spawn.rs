//! Procedural obstacle placement
//!
//! Lanes never repeat back to back, vertical jitter and spacing both widen
//! with score, and the minimum gap is scaled by the difficulty multiplier.

use super::difficulty::{Difficulty, randomness_multiplier};
use super::random::RandomSource;
use super::state::{Lane, Obstacle, World};
use crate::consts::*;

/// Create the next obstacle at the right edge of the field and remember its lane.
///
/// Draws three samples in order: lane, jitter, sprite variant.
pub fn create_obstacle<R: RandomSource + ?Sized>(world: &mut World, rng: &mut R) -> Obstacle {
    let profile = &world.profile;
    let (width, height) = profile.obstacle_size();
    let randomness = randomness_multiplier(world.score);

    let mut lanes = [Lane::Top; 3];
    let mut count = 0;
    for lane in Lane::ALL {
        if Some(lane) != world.last_lane {
            lanes[count] = lane;
            count += 1;
        }
    }
    let lane = lanes[rng.index(count)];

    let jitter = (rng.next_unit() - 0.5) * profile.lane_jitter * randomness;
    let min_y = profile.top_padding;
    let max_y = profile.max_y(height);
    let y = (lane.base_y(height, profile) + jitter).clamp(min_y, max_y);

    let variant = rng.index(OBSTACLE_VARIANTS);
    world.last_lane = Some(lane);

    Obstacle {
        x: CANVAS_WIDTH,
        y,
        width,
        height,
        variant,
        lane,
    }
}

/// Whether the field has room for another obstacle.
///
/// Always draws one spacing sample so the random stream does not depend on
/// whether obstacles are on screen.
pub fn should_spawn<R: RandomSource + ?Sized>(
    world: &World,
    difficulty: &Difficulty,
    rng: &mut R,
) -> bool {
    let extra = rng.next_unit() * SPACING_JITTER * difficulty.randomness;
    match world.obstacles.last() {
        None => true,
        Some(last) => CANVAS_WIDTH - last.trailing_edge() >= difficulty.min_distance + extra,
    }
}
