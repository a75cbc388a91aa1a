//! Browser-backed implementations of the preference traits.

use std::time::Duration;

use leptos::prelude::*;
use preferences::{
    CODE_THEME_ATTRIBUTE, CONFIG_CARRIER_ID, DARK_CLASS, Effect, HIDDEN_CLASS, HUE_PROPERTY,
    WALLPAPER_ID,
};
use web_sys::wasm_bindgen::{JsCast, JsValue};

use crate::AppError;

/// `window.localStorage`. Reads behave as empty and writes are dropped when
/// storage is unavailable.
#[derive(Clone, Copy, Default)]
pub(crate) struct BrowserStorage;

impl preferences::Storage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        get_storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let stored = get_storage().and_then(|s| s.set_item(key, value).map_err(AppError::from));
        if let Err(e) = stored {
            leptos::logging::warn!("Dropping preference {}: {}", key, e);
        }
    }
}

fn get_storage() -> Result<web_sys::Storage, AppError> {
    let window = web_sys::window().ok_or_else(|| AppError::Browser("Window unavailable".into()))?;
    window
        .local_storage()
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::Browser("Local storage unavailable".into()))
}

/// The live DOM. Effects aimed at elements that are not on the page do nothing.
#[derive(Clone, Copy)]
pub(crate) struct WebDocument {
    prefers_dark: Signal<bool>,
}

impl WebDocument {
    pub(crate) fn new() -> Self {
        Self {
            prefers_dark: leptos_use::use_preferred_dark(),
        }
    }
}

impl preferences::Document for WebDocument {
    fn apply(&self, effect: &Effect) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Err(e) = apply_to(&document, effect) {
            leptos::logging::warn!("Failed to apply {:?}: {}", effect, AppError::from(e));
        }
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.prefers_dark.get_untracked()
    }
}

fn apply_to(document: &web_sys::Document, effect: &Effect) -> Result<(), JsValue> {
    match effect {
        Effect::Hue(hue) => {
            if let Some(root) = root_element(document) {
                root.style().set_property(HUE_PROPERTY, &hue.to_string())?;
            }
        }
        Effect::Theme { dark, code_theme } => {
            if let Some(root) = document.document_element() {
                root.class_list().toggle_with_force(DARK_CLASS, *dark)?;
                root.set_attribute(CODE_THEME_ATTRIBUTE, code_theme)?;
            }
        }
        Effect::BackgroundVisible(visible) => {
            if let Some(wallpaper) = document.get_element_by_id(WALLPAPER_ID) {
                wallpaper
                    .class_list()
                    .toggle_with_force(HIDDEN_CLASS, !visible)?;
            }
        }
        Effect::BackgroundBlur(radius) => {
            if let Some(wallpaper) = document
                .get_element_by_id(WALLPAPER_ID)
                .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
            {
                wallpaper
                    .style()
                    .set_property("filter", &Effect::blur_filter(*radius))?;
            }
        }
    }
    Ok(())
}

fn root_element(document: &web_sys::Document) -> Option<web_sys::HtmlElement> {
    document.document_element()?.dyn_into().ok()
}

/// The site's configured hue, carried as `data-hue` on the config element.
pub(crate) fn configured_hue() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_CARRIER_ID)?
        .get_attribute("data-hue")
}

pub(crate) struct BrowserInterval;

impl preferences::Interval for BrowserInterval {
    type Handle = IntervalHandle;

    fn start(&mut self, period: Duration, tick: Box<dyn Fn()>) -> Option<IntervalHandle> {
        match set_interval_with_handle(tick, period) {
            Ok(handle) => Some(handle),
            Err(e) => {
                leptos::logging::error!("Failed to start rainbow timer: {}", AppError::from(e));
                None
            }
        }
    }

    fn clear(&mut self, handle: IntervalHandle) {
        handle.clear();
    }
}
