//! Page control visibility
//!
//! The pause, play and pick-a-ride buttons live in the host page. Their state
//! is a pure function of the phase so every frame can sync the DOM cheaply.

use crate::sim::SessionPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub pause_visible: bool,
    /// Pause button shows the resume icon
    pub paused: bool,
    pub play_visible: bool,
    pub play_label: &'static str,
    pub pick_ride_visible: bool,
}

impl Controls {
    pub fn for_phase(phase: SessionPhase) -> Self {
        match phase {
            SessionPhase::StartScreen => Self {
                pause_visible: false,
                paused: false,
                play_visible: true,
                play_label: "Play",
                pick_ride_visible: true,
            },
            SessionPhase::Playing | SessionPhase::Paused => Self {
                pause_visible: true,
                paused: phase == SessionPhase::Paused,
                play_visible: false,
                play_label: "Play",
                pick_ride_visible: false,
            },
            SessionPhase::GameOver => Self {
                pause_visible: false,
                paused: false,
                play_visible: true,
                play_label: "Play Again",
                pick_ride_visible: true,
            },
        }
    }
}
