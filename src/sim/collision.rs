//! Player/obstacle collision
//!
//! Both sprites are tested with a forgiving hitbox: the inner 60% of each
//! axis, so grazing a transparent sprite corner is not a crash.

use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};

/// Fraction trimmed from each side of a sprite
pub const HITBOX_INSET: f32 = 0.2;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Inner rectangle `[x+0.2w, x+0.8w] × [y+0.2h, y+0.8h]`
    pub fn hitbox(&self) -> Rect {
        Rect {
            x: self.x + self.w * HITBOX_INSET,
            y: self.y + self.h * HITBOX_INSET,
            w: self.w * (1.0 - 2.0 * HITBOX_INSET),
            h: self.h * (1.0 - 2.0 * HITBOX_INSET),
        }
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

impl From<&Player> for Rect {
    fn from(p: &Player) -> Self {
        Rect::new(p.x, p.y, p.width, p.height)
    }
}

impl From<&Obstacle> for Rect {
    fn from(o: &Obstacle) -> Self {
        Rect::new(o.x, o.y, o.width, o.height)
    }
}

/// Hitbox overlap between two sprite rectangles
pub fn sprites_collide(a: &Rect, b: &Rect) -> bool {
    a.hitbox().overlaps(&b.hitbox())
}

/// Whether the player has hit the obstacle
pub fn player_hits(player: &Player, obstacle: &Obstacle) -> bool {
    sprites_collide(&Rect::from(player), &Rect::from(obstacle))
}
