//! Exhaust smoke particles
//!
//! Purely cosmetic: particles never affect collisions or score.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::state::Player;
use crate::consts::{BASE_OBSTACLE_SPEED, MAX_PARTICLES, PARTICLE_LIFETIME};

/// Per-step shrink factor for particle sizes
const SIZE_DECAY: f32 = 0.98;
/// Per-step shrink factor for the blur radius
const BLUR_DECAY: f32 = 0.99;

/// Particle outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleShape {
    Circle,
    Ellipse,
}

/// A single smoke puff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ellipse radii
    pub width: f32,
    pub height: f32,
    /// Radius when drawn as a circle
    pub radius: f32,
    /// Steps left before removal
    pub lifetime: i32,
    pub opacity: f32,
    /// Radians
    pub rotation: f32,
    pub rotation_speed: f32,
    pub blur: f32,
    pub shape: ParticleShape,
}

impl Particle {
    /// Spawn a puff behind the player's exhaust
    pub fn spawn<R: RandomSource + ?Sized>(player: &Player, rng: &mut R) -> Self {
        let pos = Vec2::new(
            player.x + player.width * 0.2,
            player.y + player.height * 0.7,
        );
        let width = rng.range(3.0, 7.0);
        let height = rng.range(6.0, 14.0);
        let vy = rng.range(-0.75, 0.75);
        let opacity = rng.range(0.1, 0.4);
        let rotation = rng.range(0.0, std::f32::consts::PI);
        let rotation_speed = rng.range(-0.05, 0.05);
        let blur = rng.range(1.0, 3.0);
        let shape = if rng.next_unit() > 0.5 {
            ParticleShape::Circle
        } else {
            ParticleShape::Ellipse
        };
        let radius = rng.range(2.0, 5.0);

        Self {
            pos,
            vel: Vec2::new(-BASE_OBSTACLE_SPEED * 0.4, vy),
            width,
            height,
            radius,
            lifetime: PARTICLE_LIFETIME as i32,
            opacity,
            rotation,
            rotation_speed,
            blur,
            shape,
        }
    }

    /// Advance one step
    pub fn update(&mut self) {
        self.lifetime -= 1;
        self.pos += self.vel;
        self.width = (self.width * SIZE_DECAY).max(0.0);
        self.height = (self.height * SIZE_DECAY).max(0.0);
        self.radius = (self.radius * SIZE_DECAY).max(0.0);
        self.rotation += self.rotation_speed;
        // Compounds with the previous opacity, so puffs fade faster near the end
        self.opacity *= self.lifetime.max(0) as f32 / PARTICLE_LIFETIME as f32;
        self.blur = (self.blur * BLUR_DECAY).max(0.0);
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0
    }
}

/// Spawn up to `count` particles, dropping any beyond the live cap.
/// Returns how many were added.
pub fn emit<R: RandomSource + ?Sized>(
    particles: &mut Vec<Particle>,
    player: &Player,
    count: usize,
    rng: &mut R,
) -> usize {
    let room = MAX_PARTICLES.saturating_sub(particles.len());
    let n = count.min(room);
    for _ in 0..n {
        particles.push(Particle::spawn(player, rng));
    }
    n
}

/// Advance every particle and drop the expired ones
pub fn update_all(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.update();
        p.is_alive()
    });
}
