//! Image assets
//!
//! Paths are plain functions; loading uses `HtmlImageElement` on the web.
//! Failures are logged and never abort the session.

use crate::consts::OBSTACLE_VARIANTS;

/// URL of an obstacle sprite; `variant` is zero-based
pub fn obstacle_asset_path(variant: usize) -> String {
    format!("assets/Obstacle%20{}.svg", variant + 1)
}

/// All obstacle sprite URLs in variant order
pub fn obstacle_asset_paths() -> impl Iterator<Item = String> {
    (0..OBSTACLE_VARIANTS).map(obstacle_asset_path)
}

#[cfg(target_arch = "wasm32")]
pub use web::{load_image, load_obstacles};

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlImageElement;

    use crate::error::PlatformError;

    /// Start loading `path`; `on_error` runs if the browser rejects it
    pub fn load_image(
        path: &str,
        mut on_error: impl FnMut() + 'static,
    ) -> Result<HtmlImageElement, PlatformError> {
        let image = HtmlImageElement::new()?;

        let loaded = path.to_string();
        let onload = Closure::<dyn FnMut()>::new(move || {
            log::info!("Loaded {}", loaded);
        });
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let failed = path.to_string();
        let onerror = Closure::<dyn FnMut()>::new(move || {
            log::error!("Failed to load {}", failed);
            on_error();
        });
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        image.set_src(path);
        Ok(image)
    }

    /// Obstacle sprites; failed ones stay unready and draw as placeholders
    pub fn load_obstacles() -> Result<Vec<HtmlImageElement>, PlatformError> {
        super::obstacle_asset_paths()
            .map(|path| load_image(&path, || {}))
            .collect()
    }
}
