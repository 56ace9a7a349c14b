//! Score-driven difficulty curve
//!
//! Recomputed every step from the score alone; never stored.

use serde::Serialize;

use crate::consts::*;
use crate::profile::Profile;
use crate::ramp;

/// Multipliers and the speeds derived from them for one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    /// Scales scrolling and fall speeds
    pub speed: f32,
    /// Scales the minimum obstacle spacing
    pub difficulty: f32,
    /// Scales lane jitter and random spacing (uncapped)
    pub randomness: f32,
    pub obstacle_speed: f32,
    pub movement_speed: f32,
    pub downward_slide_force: f32,
    pub max_fall_speed: f32,
    pub min_distance: f32,
}

impl Difficulty {
    pub fn for_score(score: u32, profile: &Profile) -> Self {
        let speed = speed_multiplier(score);
        let difficulty = difficulty_multiplier(score);
        Self {
            speed,
            difficulty,
            randomness: randomness_multiplier(score),
            obstacle_speed: BASE_OBSTACLE_SPEED * speed * profile.speed_derate,
            movement_speed: BASE_MOVEMENT_SPEED * speed * profile.speed_derate,
            downward_slide_force: BASE_DOWNWARD_SLIDE_FORCE * speed,
            max_fall_speed: BASE_MAX_FALL_SPEED * speed,
            min_distance: BASE_MIN_OBSTACLE_DISTANCE * difficulty,
        }
    }
}

pub fn speed_multiplier(score: u32) -> f32 {
    ramp(score, SPEED_RAMP_SCORE_STEP, SPEED_RAMP_INCREMENT).min(MAX_SPEED_MULTIPLIER)
}

pub fn difficulty_multiplier(score: u32) -> f32 {
    ramp(score, DIFFICULTY_RAMP_SCORE_STEP, DIFFICULTY_RAMP_INCREMENT)
        .min(MAX_DIFFICULTY_MULTIPLIER)
}

pub fn randomness_multiplier(score: u32) -> f32 {
    ramp(score, RANDOMNESS_RAMP_SCORE_STEP, RANDOMNESS_RAMP_INCREMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_base_values_at_zero() {
        let d = Difficulty::for_score(0, &Profile::desktop());
        assert_eq!((d.speed, d.difficulty, d.randomness), (1.0, 1.0, 1.0));
        assert_eq!(d.obstacle_speed, BASE_OBSTACLE_SPEED);
        assert_eq!(d.max_fall_speed, 2.5);
        assert_eq!(d.min_distance, 250.0);
    }

    #[test]
    fn test_step_ramps() {
        assert!(close(speed_multiplier(24), 1.0));
        assert!(close(speed_multiplier(25), 1.1));
        assert!(close(speed_multiplier(150), 1.6));
        assert!(close(difficulty_multiplier(39), 1.0));
        assert!(close(difficulty_multiplier(40), 1.15));
        assert!(close(difficulty_multiplier(150), 1.45));
        assert!(close(randomness_multiplier(60), 1.4));
    }

    #[test]
    fn test_multipliers_saturate_at_configured_maxima() {
        // Speed saturates at 250, difficulty once 1 + k * 0.15 passes 2.0 (k = 7)
        for score in [280, 300, 1_000, 100_000] {
            assert_eq!(speed_multiplier(score), MAX_SPEED_MULTIPLIER);
            assert_eq!(difficulty_multiplier(score), MAX_DIFFICULTY_MULTIPLIER);
        }
        assert!(close(speed_multiplier(250), 2.0));
        // Randomness keeps growing
        assert!(randomness_multiplier(1_000) > 2.0);
    }

    #[test]
    fn test_mobile_derates_scroll_but_not_fall() {
        let desktop = Difficulty::for_score(50, &Profile::desktop());
        let mobile = Difficulty::for_score(50, &Profile::mobile());
        assert!(mobile.obstacle_speed < desktop.obstacle_speed);
        assert!(mobile.movement_speed < desktop.movement_speed);
        assert_eq!(mobile.max_fall_speed, desktop.max_fall_speed);
    }
}
