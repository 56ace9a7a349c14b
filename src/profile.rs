//! Device-class tuning
//!
//! Desktop and small-screen play share one simulation; everything that
//! differs between them lives in a `Profile` resolved once per session.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Broad device class, detected from the host at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Desktop => "desktop",
            DeviceClass::Mobile => "mobile",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(DeviceClass::Desktop),
            "mobile" | "phone" => Some(DeviceClass::Mobile),
            _ => None,
        }
    }

    /// Guess the class from a browser user agent string
    pub fn from_user_agent(ua: &str) -> Self {
        const MARKERS: [&str; 5] = ["Android", "iPhone", "iPad", "iPod", "Mobile"];
        if MARKERS.iter().any(|m| ua.contains(m)) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Viewport that follows the player on small screens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFollow {
    /// Visible logical height around the player
    pub view_height: f32,
}

/// Per-session tuning derived from the device class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub class: DeviceClass,
    /// Clearance above the player and obstacles
    pub top_padding: f32,
    /// Clearance below the player and obstacles
    pub bottom_padding: f32,
    /// Scale applied to vehicle and obstacle sprites
    pub size_scale: f32,
    /// Multiplier on scrolling speeds (1.0 = full speed)
    pub speed_derate: f32,
    /// Span of the vertical lane jitter before score scaling
    pub lane_jitter: f32,
    /// Vertical follow camera, if any
    pub camera: Option<CameraFollow>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::desktop()
    }
}

impl Profile {
    pub fn desktop() -> Self {
        Self {
            class: DeviceClass::Desktop,
            top_padding: CORNER_PADDING,
            bottom_padding: CORNER_PADDING,
            size_scale: 1.0,
            speed_derate: 1.0,
            lane_jitter: 50.0,
            camera: None,
        }
    }

    pub fn mobile() -> Self {
        Self {
            class: DeviceClass::Mobile,
            top_padding: CORNER_PADDING,
            bottom_padding: CORNER_PADDING,
            size_scale: 0.85,
            speed_derate: 0.85,
            lane_jitter: 80.0,
            camera: Some(CameraFollow { view_height: 400.0 }),
        }
    }

    pub fn for_class(class: DeviceClass) -> Self {
        match class {
            DeviceClass::Desktop => Self::desktop(),
            DeviceClass::Mobile => Self::mobile(),
        }
    }

    /// Obstacle size for this profile
    pub fn obstacle_size(&self) -> (f32, f32) {
        (
            BASE_OBSTACLE_WIDTH * self.size_scale,
            BASE_OBSTACLE_HEIGHT * self.size_scale,
        )
    }

    /// Lowest allowed y for an entity of the given height
    pub fn max_y(&self, height: f32) -> f32 {
        CANVAS_HEIGHT - height - self.bottom_padding
    }
}
