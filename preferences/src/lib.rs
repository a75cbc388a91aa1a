//! Reader-facing display preferences: accent hue, rainbow cycling, light/dark
//! theme and the background wallpaper.
//!
//! [`Preferences`] only reads and writes a [`Storage`]. Every setter hands
//! back the [`Effect`] the page should show, and the caller passes it on to a
//! [`Document`]. [`Rainbow`] owns the one repeating timer used for hue
//! cycling.

use std::str::FromStr;

mod effect;
mod rainbow;
mod storage;
mod theme;

pub use effect::{
    CODE_THEME_ATTRIBUTE, CONFIG_CARRIER_ID, DARK_CLASS, Document, Effect, HIDDEN_CLASS,
    HUE_PROPERTY, WALLPAPER_ID,
};
pub use rainbow::{HUE_STEP, Interval, Rainbow, next_hue};
pub use storage::{MemoryStorage, Storage};
pub use theme::{Theme, UnknownTheme};

pub mod keys {
    pub const HUE: &str = "hue";
    pub const RAINBOW_MODE: &str = "rainbowMode";
    pub const RAINBOW_SPEED: &str = "rainbowSpeed";
    pub const THEME: &str = "theme";
    pub const BACKGROUND_ENABLED: &str = "backgroundEnabled";
    pub const BACKGROUND_BLUR: &str = "backgroundBlur";
}

pub const FALLBACK_HUE: u16 = 250;
pub const DEFAULT_RAINBOW_SPEED_MS: u32 = 30;
pub const DEFAULT_BACKGROUND_BLUR: u32 = 0;
pub const DEFAULT_CODE_THEME: &str = "github-dark";

/// Site-level values used when nothing has been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub hue: u16,
    pub theme: Theme,
    pub code_theme: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            hue: FALLBACK_HUE,
            theme: Theme::default(),
            code_theme: DEFAULT_CODE_THEME.to_owned(),
        }
    }
}

impl Defaults {
    /// Take the default hue from the page's configured `data-hue`, falling back
    /// to [`FALLBACK_HUE`] when it is missing or not a number.
    pub fn with_configured_hue(mut self, configured: Option<&str>) -> Self {
        self.hue = configured.and_then(read_hue).unwrap_or(FALLBACK_HUE);
        self
    }
}

pub struct Preferences<S> {
    storage: S,
    defaults: Defaults,
}

impl<S: Storage> Preferences<S> {
    pub fn new(storage: S, defaults: Defaults) -> Self {
        Self { storage, defaults }
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn hue(&self) -> u16 {
        self.read(keys::HUE, read_hue).unwrap_or(self.defaults.hue)
    }

    pub fn set_hue(&mut self, hue: u16) -> Effect {
        self.storage.set(keys::HUE, &hue.to_string());
        Effect::Hue(hue)
    }

    pub fn rainbow_mode(&self) -> bool {
        self.flag(keys::RAINBOW_MODE)
    }

    pub fn set_rainbow_mode(&mut self, enabled: bool) {
        self.storage.set(keys::RAINBOW_MODE, &enabled.to_string());
    }

    /// Milliseconds between rainbow ticks. A stored zero counts as unset.
    pub fn rainbow_speed(&self) -> u32 {
        self.parsed::<u32>(keys::RAINBOW_SPEED)
            .filter(|speed| *speed > 0)
            .unwrap_or(DEFAULT_RAINBOW_SPEED_MS)
    }

    /// Only persists the speed; a running [`Rainbow`] picks it up through
    /// [`Rainbow::update_speed`].
    pub fn set_rainbow_speed(&mut self, speed_ms: u32) {
        self.storage.set(keys::RAINBOW_SPEED, &speed_ms.to_string());
    }

    pub fn theme(&self) -> Theme {
        self.parsed(keys::THEME).unwrap_or(self.defaults.theme)
    }

    pub fn set_theme(
        &mut self,
        theme: Theme,
        system_prefers_dark: impl FnOnce() -> bool,
    ) -> Effect {
        self.storage.set(keys::THEME, theme.as_str());
        self.theme_effect(theme, system_prefers_dark)
    }

    pub fn background_enabled(&self) -> bool {
        self.flag(keys::BACKGROUND_ENABLED)
    }

    pub fn set_background_enabled(&mut self, enabled: bool) -> Effect {
        self.storage
            .set(keys::BACKGROUND_ENABLED, &enabled.to_string());
        Effect::BackgroundVisible(enabled)
    }

    pub fn background_blur(&self) -> u32 {
        self.read(keys::BACKGROUND_BLUR, read_blur)
            .unwrap_or(DEFAULT_BACKGROUND_BLUR)
    }

    pub fn set_background_blur(&mut self, blur: u32) -> Effect {
        self.storage.set(keys::BACKGROUND_BLUR, &blur.to_string());
        Effect::BackgroundBlur(blur)
    }

    /// Effects that bring a freshly loaded page in line with what is stored.
    pub fn restore(&self, system_prefers_dark: impl FnOnce() -> bool) -> Vec<Effect> {
        vec![
            Effect::Hue(self.hue()),
            self.theme_effect(self.theme(), system_prefers_dark),
            Effect::BackgroundVisible(self.background_enabled()),
            Effect::BackgroundBlur(self.background_blur()),
        ]
    }

    fn theme_effect(&self, theme: Theme, system_prefers_dark: impl FnOnce() -> bool) -> Effect {
        Effect::Theme {
            dark: theme.is_dark(system_prefers_dark),
            code_theme: self.defaults.code_theme.clone(),
        }
    }

    fn flag(&self, key: &str) -> bool {
        self.storage.get(key).as_deref() == Some("true")
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.read(key, |raw| raw.trim().parse().ok())
    }

    fn read<T>(&self, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        let raw = self.storage.get(key)?;
        let parsed = parse(&raw);
        if parsed.is_none() {
            tracing::debug!(key, value = %raw, "ignoring unparsable stored preference");
        }
        parsed
    }
}

/// Hue from its leading integer (`"120.5"` is 120). Negative angles are
/// wrapped into `0..360`.
fn read_hue(raw: &str) -> Option<u16> {
    let hue = leading_integer(raw)?;
    let hue = if hue < 0 { hue.rem_euclid(360) } else { hue };
    u16::try_from(hue).ok()
}

/// Any finite non-negative number of pixels, truncated to whole pixels.
fn read_blur(raw: &str) -> Option<u32> {
    let blur: f64 = raw.trim().parse().ok()?;
    (0.0..=f64::from(u32::MAX)).contains(&blur).then_some(blur as u32)
}

/// Optional sign followed by at least one digit, ignoring whatever trails it.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let digits = unsigned.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    raw[..raw.len() - unsigned.len() + digits].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> Preferences<MemoryStorage> {
        Preferences::new(MemoryStorage::new(), Defaults::default())
    }

    #[test]
    fn hue_round_trips_through_storage() {
        let mut prefs = prefs();
        assert_eq!(prefs.set_hue(120), Effect::Hue(120));
        assert_eq!(prefs.hue(), 120);
    }

    #[test]
    fn hue_defaults_to_configured_value() {
        let defaults = Defaults::default().with_configured_hue(Some("345"));
        let prefs = Preferences::new(MemoryStorage::new(), defaults);
        assert_eq!(prefs.hue(), 345);
    }

    #[test]
    fn unusable_configured_hue_falls_back() {
        assert_eq!(Defaults::default().with_configured_hue(None).hue, FALLBACK_HUE);
        assert_eq!(
            Defaults::default().with_configured_hue(Some("teal")).hue,
            FALLBACK_HUE
        );
    }

    #[test]
    fn garbage_in_storage_reads_as_default() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::HUE, "purple");
        storage.set(keys::RAINBOW_SPEED, "fast");
        storage.set(keys::BACKGROUND_BLUR, "-4");
        storage.set(keys::THEME, "sepia");
        storage.set(keys::RAINBOW_MODE, "yes");
        let prefs = Preferences::new(storage, Defaults::default());

        assert_eq!(prefs.hue(), FALLBACK_HUE);
        assert_eq!(prefs.rainbow_speed(), DEFAULT_RAINBOW_SPEED_MS);
        assert_eq!(prefs.background_blur(), DEFAULT_BACKGROUND_BLUR);
        assert_eq!(prefs.theme(), Theme::Auto);
        assert!(!prefs.rainbow_mode());
    }

    #[test]
    fn hue_reads_leading_integer() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::HUE, "120.5");
        assert_eq!(Preferences::new(&mut storage, Defaults::default()).hue(), 120);

        storage.set(keys::HUE, "-30");
        assert_eq!(Preferences::new(&mut storage, Defaults::default()).hue(), 330);

        storage.set(keys::HUE, "400deg");
        assert_eq!(Preferences::new(&mut storage, Defaults::default()).hue(), 400);

        assert_eq!(Defaults::default().with_configured_hue(Some(" 90.0")).hue, 90);
    }

    #[test]
    fn fractional_blur_is_truncated() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::BACKGROUND_BLUR, "1.5");
        assert_eq!(
            Preferences::new(&mut storage, Defaults::default()).background_blur(),
            1
        );

        storage.set(keys::BACKGROUND_BLUR, "2px");
        assert_eq!(
            Preferences::new(&mut storage, Defaults::default()).background_blur(),
            DEFAULT_BACKGROUND_BLUR
        );
    }

    #[test]
    fn zero_rainbow_speed_counts_as_unset() {
        let mut prefs = prefs();
        prefs.set_rainbow_speed(0);
        assert_eq!(prefs.rainbow_speed(), DEFAULT_RAINBOW_SPEED_MS);
        prefs.set_rainbow_speed(75);
        assert_eq!(prefs.rainbow_speed(), 75);
    }

    #[test]
    fn flags_are_stored_as_strings() {
        let mut storage = MemoryStorage::new();
        {
            let mut prefs = Preferences::new(&mut storage, Defaults::default());
            prefs.set_rainbow_mode(true);
            assert_eq!(prefs.set_background_enabled(false), Effect::BackgroundVisible(false));
        }
        assert_eq!(storage.get(keys::RAINBOW_MODE).as_deref(), Some("true"));
        assert_eq!(storage.get(keys::BACKGROUND_ENABLED).as_deref(), Some("false"));
    }

    #[test]
    fn background_blur_round_trips() {
        let mut prefs = prefs();
        assert!(!prefs.background_enabled());
        assert_eq!(prefs.set_background_blur(6), Effect::BackgroundBlur(6));
        assert_eq!(prefs.background_blur(), 6);
        prefs.set_background_enabled(true);
        assert!(prefs.background_enabled());
    }

    #[test]
    fn theme_defaults_to_site_default() {
        let defaults = Defaults {
            theme: Theme::Dark,
            ..Defaults::default()
        };
        let prefs = Preferences::new(MemoryStorage::new(), defaults);
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn set_theme_resolves_auto_at_call_time() {
        let mut prefs = prefs();

        let effect = prefs.set_theme(Theme::Auto, || true);
        assert_eq!(
            effect,
            Effect::Theme {
                dark: true,
                code_theme: DEFAULT_CODE_THEME.to_owned()
            }
        );

        let effect = prefs.set_theme(Theme::Auto, || false);
        assert!(matches!(effect, Effect::Theme { dark: false, .. }));
        assert_eq!(prefs.theme(), Theme::Auto);
    }

    #[test]
    fn auto_theme_is_not_kept_in_sync_with_system() {
        use crate::effect::testing::RecordingDocument;

        let mut prefs = prefs();
        let doc = RecordingDocument::default();
        doc.prefers_dark.set(true);

        let effect = prefs.set_theme(Theme::Auto, || doc.prefers_dark_scheme());
        doc.apply(&effect);
        doc.prefers_dark.set(false);

        assert_eq!(doc.scheme_queries.get(), 1);
        assert!(matches!(doc.last(), Some(Effect::Theme { dark: true, .. })));
    }

    #[test]
    fn set_theme_explicit_modes() {
        let mut prefs = prefs();
        assert!(matches!(
            prefs.set_theme(Theme::Dark, || false),
            Effect::Theme { dark: true, .. }
        ));
        assert!(matches!(
            prefs.set_theme(Theme::Light, || true),
            Effect::Theme { dark: false, .. }
        ));
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn restore_reflects_stored_state() {
        let mut prefs = prefs();
        prefs.set_hue(10);
        prefs.set_theme(Theme::Dark, || false);
        prefs.set_background_enabled(true);
        prefs.set_background_blur(3);

        assert_eq!(
            prefs.restore(|| false),
            vec![
                Effect::Hue(10),
                Effect::Theme {
                    dark: true,
                    code_theme: DEFAULT_CODE_THEME.to_owned()
                },
                Effect::BackgroundVisible(true),
                Effect::BackgroundBlur(3),
            ]
        );
    }
}
