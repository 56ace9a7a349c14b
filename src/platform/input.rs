//! Input mapping
//!
//! Raw device events become semantic game inputs depending on the phase.
//! Kept free of browser types so the mapping is testable natively.

use crate::sim::SessionPhase;

/// Key code that slides, starts and restarts
pub const SLIDE_KEY: &str = "Space";
/// Key code that toggles pause
pub const PAUSE_KEY: &str = "KeyP";

/// Device-level event as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    KeyDown { code: String, repeat: bool },
    KeyUp { code: String },
    /// Pointer down or touch start on the canvas
    PressStart,
    /// Pointer up, touch end or touch cancel
    PressEnd,
    PauseButton,
    PlayButton,
}

/// Semantic game input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Start,
    SlideStart,
    SlideEnd,
    TogglePause,
    Restart,
}

/// Map a raw event to a game input for the current phase
pub fn translate(raw: &RawInput, phase: SessionPhase) -> Option<InputEvent> {
    match raw {
        // Held keys auto-repeat; only the first press acts
        RawInput::KeyDown { repeat: true, .. } => None,
        RawInput::KeyDown { code, .. } if code == SLIDE_KEY => press(phase),
        RawInput::KeyDown { code, .. } if code == PAUSE_KEY => pause(phase),
        RawInput::KeyDown { .. } => None,
        RawInput::KeyUp { code } if code == SLIDE_KEY => Some(InputEvent::SlideEnd),
        RawInput::KeyUp { .. } => None,
        RawInput::PressStart => press(phase),
        RawInput::PressEnd => Some(InputEvent::SlideEnd),
        RawInput::PauseButton => pause(phase),
        RawInput::PlayButton => match phase {
            SessionPhase::StartScreen => Some(InputEvent::Start),
            SessionPhase::GameOver => Some(InputEvent::Restart),
            SessionPhase::Playing | SessionPhase::Paused => None,
        },
    }
}

fn press(phase: SessionPhase) -> Option<InputEvent> {
    match phase {
        SessionPhase::StartScreen => Some(InputEvent::Start),
        SessionPhase::GameOver => Some(InputEvent::Restart),
        SessionPhase::Playing => Some(InputEvent::SlideStart),
        SessionPhase::Paused => None,
    }
}

fn pause(phase: SessionPhase) -> Option<InputEvent> {
    match phase {
        SessionPhase::Playing | SessionPhase::Paused => Some(InputEvent::TogglePause),
        SessionPhase::StartScreen | SessionPhase::GameOver => None,
    }
}
