//! DOM toast notifications (WASM only)
//!
//! A new message replaces the visible one and restarts the hide timer.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use crate::consts::TOAST_DURATION_MS;
use crate::error::PlatformError;
use crate::session::Notifier;

const TOAST_ID: &str = "toast";

pub struct Toast {
    window: Window,
    element: Element,
    timer: Option<i32>,
    hide: Closure<dyn FnMut()>,
}

impl Toast {
    pub fn attach() -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let document = window.document().ok_or(PlatformError::NoDocument)?;
        let element = document
            .get_element_by_id(TOAST_ID)
            .ok_or(PlatformError::MissingElement(TOAST_ID))?;

        let target = element.clone();
        let hide = Closure::<dyn FnMut()>::new(move || {
            let classes = target.class_list();
            let _ = classes.remove_1("show");
            let _ = classes.add_1("hide");
        });

        Ok(Self {
            window,
            element,
            timer: None,
            hide,
        })
    }
}

impl Notifier for Toast {
    fn show(&mut self, message: &str) {
        if let Some(handle) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        self.element.set_text_content(Some(message));
        let classes = self.element.class_list();
        let _ = classes.remove_1("hide");
        let _ = classes.add_1("show");

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.hide.as_ref().unchecked_ref(),
                TOAST_DURATION_MS,
            ) {
            Ok(handle) => self.timer = Some(handle),
            Err(e) => log::warn!("Toast timer failed: {:?}", e),
        }
        log::info!("Toast: {}", message);
    }
}
