/// CSS custom property carrying the accent hue on the root element.
pub const HUE_PROPERTY: &str = "--hue";
/// Class on the root element that switches the page to dark mode.
pub const DARK_CLASS: &str = "dark";
/// Attribute on the root element naming the code block theme.
pub const CODE_THEME_ATTRIBUTE: &str = "data-theme";
/// Id of the background image element.
pub const WALLPAPER_ID: &str = "wallpaper";
/// Class hiding the background image element.
pub const HIDDEN_CLASS: &str = "hidden";
/// Id of the element whose `data-hue` carries the site's configured hue.
pub const CONFIG_CARRIER_ID: &str = "config-carrier";

/// A change the page should make after a preference has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Set [`HUE_PROPERTY`] on the root element.
    Hue(u16),
    /// Add or remove [`DARK_CLASS`] and set [`CODE_THEME_ATTRIBUTE`].
    Theme { dark: bool, code_theme: String },
    /// Remove or add [`HIDDEN_CLASS`] on the wallpaper.
    BackgroundVisible(bool),
    /// Inline blur filter radius in pixels on the wallpaper.
    BackgroundBlur(u32),
}

impl Effect {
    pub fn blur_filter(radius: u32) -> String {
        format!("blur({radius}px)")
    }
}

/// The rendering side of the preference store.
///
/// Implementations must treat missing target elements as a no-op.
pub trait Document {
    fn apply(&self, effect: &Effect);

    /// Whether the host currently prefers a dark color scheme.
    fn prefers_dark_scheme(&self) -> bool;
}

impl<D: Document + ?Sized> Document for &D {
    fn apply(&self, effect: &Effect) {
        (**self).apply(effect)
    }

    fn prefers_dark_scheme(&self) -> bool {
        (**self).prefers_dark_scheme()
    }
}
