//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Every random draw goes through `RandomSource`
//! - No rendering or platform dependencies

pub mod camera;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod particle;
pub mod random;
pub mod spawn;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use clock::FixedStep;
pub use collision::{Rect, player_hits, sprites_collide};
pub use difficulty::Difficulty;
pub use particle::{Particle, ParticleShape};
pub use random::{RandomSource, Scripted, seeded};
pub use spawn::{create_obstacle, should_spawn};
pub use state::{GameEvent, Lane, Obstacle, Player, SessionPhase, World};
pub use tick::tick;
