//! Auto Rush - An endless-runner vehicle game
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (physics, obstacle generation, collisions)
//! - `renderer`: Backend-agnostic drawing of the world onto a 2D surface
//! - `platform`: Browser adapters (input mapping, storage, toast, assets, canvas)
//! - `prefs`: Persisted key-value preferences (best score, unlocks, vehicle)
//! - `session`: Ties the clock, world, preferences and notifications together

pub mod error;
pub mod platform;
pub mod prefs;
pub mod profile;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod vehicles;

pub use error::{PlatformError, SelectionError};
pub use prefs::{KeyValueStore, MemoryStore, Preferences};
pub use profile::{DeviceClass, Profile};
pub use session::{Notifier, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation steps per second
    pub const STEPS_PER_SECOND: f64 = 60.0;
    /// Fixed simulation timestep in milliseconds
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / STEPS_PER_SECOND;
    /// Largest wall-clock delta accepted per display callback (caps catch-up bursts)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Logical field dimensions
    pub const CANVAS_WIDTH: f32 = 900.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;
    /// Backing store resolution multiplier for sharp rendering
    pub const RENDER_SCALE: f64 = 2.0;

    /// Player horizontal position (fixed per session)
    pub const PLAYER_X: f32 = 100.0;

    /// Vertical physics
    pub const GRAVITY: f32 = 1.0;
    /// Most negative (upward) velocity reachable while sliding
    pub const SLIDE_FORCE: f32 = -10.0;
    pub const BASE_DOWNWARD_SLIDE_FORCE: f32 = 0.5;
    /// Velocity change per step while sliding
    pub const SMOOTH_ACCELERATION: f32 = 0.45;
    /// Fall speed ceiling before speed scaling
    pub const BASE_MAX_FALL_SPEED: f32 = 2.5;

    /// Rotation (degrees)
    pub const MAX_ROTATION: f32 = 5.0;
    pub const ROTATION_SPEED: f32 = 0.3;
    pub const UPWARD_ROTATION_SPEED: f32 = 0.8;
    pub const UPWARD_MAX_ROTATION: f32 = 15.0;

    /// Obstacles
    pub const BASE_OBSTACLE_WIDTH: f32 = 60.0;
    pub const BASE_OBSTACLE_HEIGHT: f32 = 70.0;
    pub const BASE_OBSTACLE_SPEED: f32 = 11.0;
    pub const BASE_MIN_OBSTACLE_DISTANCE: f32 = 250.0;
    /// Upper bound of the random extra spacing before scaling
    pub const SPACING_JITTER: f32 = 100.0;
    /// Number of obstacle sprite variants
    pub const OBSTACLE_VARIANTS: usize = 4;
    pub const CORNER_PADDING: f32 = 40.0;

    /// Horizontal movement speed before scaling (drives the scrolling backdrop)
    pub const BASE_MOVEMENT_SPEED: f32 = 7.0;

    /// Difficulty ramps
    pub const SPEED_RAMP_SCORE_STEP: u32 = 25;
    pub const SPEED_RAMP_INCREMENT: f32 = 0.1;
    pub const MAX_SPEED_MULTIPLIER: f32 = 2.0;
    pub const DIFFICULTY_RAMP_SCORE_STEP: u32 = 40;
    pub const DIFFICULTY_RAMP_INCREMENT: f32 = 0.15;
    pub const MAX_DIFFICULTY_MULTIPLIER: f32 = 2.0;
    pub const RANDOMNESS_RAMP_SCORE_STEP: u32 = 30;
    pub const RANDOMNESS_RAMP_INCREMENT: f32 = 0.2;

    /// Particles
    pub const MAX_PARTICLES: usize = 150;
    pub const PARTICLE_LIFETIME: u32 = 40;
    pub const PARTICLES_PER_SLIDE_STEP: usize = 3;
    /// Chance per step of a single exhaust puff while falling
    pub const FALLING_PARTICLE_CHANCE: f32 = 0.1;

    /// Score that unlocks every vehicle
    pub const UNLOCK_SCORE: u32 = 100;
    /// How long a toast stays visible
    pub const TOAST_DURATION_MS: i32 = 3000;
}

/// Score-derived step multiplier: `1 + floor(score / step) * increment`
#[inline]
pub fn ramp(score: u32, step: u32, increment: f32) -> f32 {
    1.0 + (score / step) as f32 * increment
}
