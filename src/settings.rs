//! Launch settings
//!
//! Read once at boot from the page URL and the browser user agent.

use serde::{Deserialize, Serialize};

use crate::profile::{DeviceClass, Profile};

/// Launch options for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Skip the start screen (`?start=true`)
    pub start_immediately: bool,
    /// Device class, detected or overridden with `?profile=`
    pub device: DeviceClass,
}

impl Settings {
    /// Build settings from the relevant URL parameters and user agent
    pub fn from_params(start: Option<&str>, profile: Option<&str>, user_agent: &str) -> Self {
        let device = match profile.and_then(DeviceClass::parse) {
            Some(class) => class,
            None => DeviceClass::from_user_agent(user_agent),
        };
        Self {
            start_immediately: start == Some("true"),
            device,
        }
    }

    /// Tuning profile for the detected device
    pub fn profile(&self) -> Profile {
        Profile::for_class(self.device)
    }

    /// Load settings from the current page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let search = window.location().search().unwrap_or_default();
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok();
        let start = params.as_ref().and_then(|p| p.get("start"));
        let profile = params.as_ref().and_then(|p| p.get("profile"));
        let user_agent = window.navigator().user_agent().unwrap_or_default();

        let settings = Self::from_params(start.as_deref(), profile.as_deref(), &user_agent);
        log::info!(
            "Settings: {}",
            serde_json::to_string(&settings).unwrap_or_default()
        );
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
