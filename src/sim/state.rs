//! Game state and core simulation types
//!
//! Everything the update engine mutates lives in `World`; the renderer only
//! ever borrows it immutably.

use serde::{Deserialize, Serialize};

use super::particle::Particle;
use crate::consts::*;
use crate::profile::Profile;
use crate::vehicles::Vehicle;

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title overlay, waiting for the first press
    StartScreen,
    /// Active gameplay
    Playing,
    /// Simulation frozen, overlay shown
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// Side effects raised by a simulation step, applied by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player hit an obstacle
    GameOver { score: u32 },
    /// Score beat the stored personal best
    PersonalBest(u32),
    /// Score milestone reached for the first time
    VehiclesUnlocked,
}

/// The player's vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub width: f32,
    pub height: f32,
    /// Thrust input held
    pub sliding: bool,
    /// Degrees, positive tilts the nose down
    pub rotation: f32,
}

impl Player {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: PLAYER_X,
            y: CANVAS_HEIGHT / 2.0,
            velocity_y: 0.0,
            width,
            height,
            sliding: false,
            rotation: 0.0,
        }
    }

    /// Player sized for a vehicle under a profile
    pub fn for_vehicle(vehicle: &Vehicle, profile: &Profile) -> Self {
        Self::new(
            vehicle.width * profile.size_scale,
            vehicle.height * profile.size_scale,
        )
    }

    /// Back to the starting position, keeping the vehicle size
    pub fn recenter(&mut self) {
        *self = Self::new(self.width, self.height);
    }

    /// Clamp into the vertical play band, stopping on contact
    pub fn clamp_to_bounds(&mut self, profile: &Profile) {
        let min_y = profile.top_padding;
        let max_y = profile.max_y(self.height);
        if self.y < min_y {
            self.y = min_y;
            self.velocity_y = 0.0;
        }
        if self.y > max_y {
            self.y = max_y;
            self.velocity_y = 0.0;
        }
    }
}

/// Vertical spawn band for obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Top,
    Bottom,
    Middle,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Top, Lane::Bottom, Lane::Middle];

    /// Unjittered y for an obstacle of `height` in this lane
    pub fn base_y(&self, height: f32, profile: &Profile) -> f32 {
        match self {
            Lane::Top => profile.top_padding,
            Lane::Bottom => CANVAS_HEIGHT - profile.bottom_padding - height,
            Lane::Middle => CANVAS_HEIGHT / 2.0 - height / 2.0,
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Sprite variant, `0..OBSTACLE_VARIANTS`
    pub variant: usize,
    pub lane: Lane,
}

impl Obstacle {
    /// Right edge
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub profile: Profile,
    pub phase: SessionPhase,
    pub score: u32,
    /// Best score known to this session (mirrors persisted value)
    pub personal_best: u32,
    /// Milestone already reached (this session or a previous one)
    pub all_unlocked: bool,
    pub player: Player,
    /// Oldest first; the last entry is the most recently spawned
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    /// Lane of the previous obstacle, cleared on restart
    pub last_lane: Option<Lane>,
    /// Simulation steps executed while playing
    pub steps: u64,
    /// Horizontal scroll of the backdrop
    pub scroll: f32,
}

impl World {
    pub fn new(profile: Profile, player: Player, personal_best: u32, all_unlocked: bool) -> Self {
        Self {
            profile,
            phase: SessionPhase::StartScreen,
            score: 0,
            personal_best,
            all_unlocked,
            player,
            obstacles: Vec::new(),
            particles: Vec::new(),
            last_lane: None,
            steps: 0,
            scroll: 0.0,
        }
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.phase == SessionPhase::StartScreen {
            self.phase = SessionPhase::Playing;
            log::info!("Run started");
        }
    }

    /// Flip between playing and paused; ignored in other phases
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            SessionPhase::Playing => {
                self.player.sliding = false;
                SessionPhase::Paused
            }
            SessionPhase::Paused => SessionPhase::Playing,
            other => other,
        };
    }

    /// Full reset after a game over
    pub fn restart(&mut self) {
        if self.phase != SessionPhase::GameOver {
            return;
        }
        self.score = 0;
        self.obstacles.clear();
        self.particles.clear();
        self.last_lane = None;
        self.player.recenter();
        self.steps = 0;
        self.phase = SessionPhase::Playing;
        log::info!("Run restarted");
    }

    pub fn set_sliding(&mut self, sliding: bool) {
        // Presses only count while the run is live; releases always land
        if !sliding || self.phase == SessionPhase::Playing {
            self.player.sliding = sliding;
        }
    }
}
