//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pure mapping, shared by all targets)
//! - Page control visibility
//! - Storage (LocalStorage on web)
//! - Toast notifications (DOM on web)
//! - Image assets (HtmlImageElement on web)

pub mod assets;
pub mod controls;
pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod toast;

use std::fmt::Display;

use crate::session::Notifier;

pub use controls::Controls;
pub use input::{InputEvent, RawInput, translate};

/// Notifier that only logs; used by native runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&mut self, message: &str) {
        log::info!("[toast] {}", message);
    }
}

/// Page notifier, or the log when the page offers none
#[derive(Debug)]
pub enum PageNotifier<T> {
    Page(T),
    Log(LogNotifier),
}

impl<T: Notifier> PageNotifier<T> {
    /// Use the attached notifier, falling back to the log if attaching failed
    pub fn or_log<E: Display>(attached: Result<T, E>) -> Self {
        match attached {
            Ok(notifier) => PageNotifier::Page(notifier),
            Err(e) => {
                log::warn!("Notifications go to the log only: {}", e);
                PageNotifier::Log(LogNotifier)
            }
        }
    }
}

impl<T: Notifier> Notifier for PageNotifier<T> {
    fn show(&mut self, message: &str) {
        match self {
            PageNotifier::Page(notifier) => notifier.show(message),
            PageNotifier::Log(notifier) => notifier.show(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformError;

    #[derive(Debug, Default)]
    struct Recorder {
        messages: Vec<String>,
    }

    impl Notifier for Recorder {
        fn show(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    #[test]
    fn test_missing_toast_element_falls_back_to_log() {
        let attached: Result<Recorder, PlatformError> = Err(PlatformError::MissingElement("toast"));
        let mut notifier = PageNotifier::or_log(attached);
        assert!(matches!(notifier, PageNotifier::Log(_)));
        // Still usable as a sink
        notifier.show("All vehicles unlocked!");
    }

    #[test]
    fn test_attached_notifier_receives_messages() {
        let mut notifier = PageNotifier::or_log(Ok::<_, PlatformError>(Recorder::default()));
        notifier.show("first");
        notifier.show("second");
        match notifier {
            PageNotifier::Page(recorder) => assert_eq!(recorder.messages, vec!["first", "second"]),
            PageNotifier::Log(_) => panic!("expected the page notifier"),
        }
    }
}
