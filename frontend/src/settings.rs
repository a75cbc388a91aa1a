use leptos::prelude::*;
use preferences::{Defaults, Document, Preferences, Rainbow, Theme};

use crate::browser::{self, BrowserInterval, BrowserStorage, WebDocument};

const MAX_BLUR: u32 = 20;
const MIN_RAINBOW_SPEED: u32 = 10;
const MAX_RAINBOW_SPEED: u32 = 200;

/// Display preferences shared by every control in the panel.
#[derive(Clone, Copy)]
struct Settings {
    prefs: StoredValue<Preferences<BrowserStorage>>,
    rainbow: StoredValue<Rainbow<BrowserInterval>>,
    document: WebDocument,
}

impl Settings {
    fn new() -> Self {
        let defaults =
            Defaults::default().with_configured_hue(browser::configured_hue().as_deref());
        Self {
            prefs: StoredValue::new(Preferences::new(BrowserStorage, defaults)),
            rainbow: StoredValue::new(Rainbow::new(BrowserInterval)),
            document: WebDocument::new(),
        }
    }

    fn restore(&self) {
        let document = self.document;
        for effect in self
            .prefs
            .with_value(|p| p.restore(|| document.prefers_dark_scheme()))
        {
            document.apply(&effect);
        }
        if self.prefs.with_value(|p| p.rainbow_mode()) {
            self.start_rainbow();
        }
    }

    fn start_rainbow(&self) {
        let document = self.document;
        self.prefs.with_value(|p| {
            self.rainbow
                .update_value(|rainbow| rainbow.start(p, &document))
        });
    }

    fn stop_rainbow(&self) {
        let document = self.document;
        self.prefs.with_value(|p| {
            self.rainbow
                .update_value(|rainbow| rainbow.stop(p, &document))
        });
    }

    fn update_rainbow_speed(&self) {
        let document = self.document;
        self.prefs.with_value(|p| {
            self.rainbow
                .update_value(|rainbow| rainbow.update_speed(p, &document))
        });
    }
}

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let settings = Settings::new();
    settings.restore();
    on_cleanup(move || settings.stop_rainbow());

    let Settings { prefs, document, .. } = settings;
    let (hue, set_hue) = signal(prefs.with_value(|p| p.hue()));
    let (rainbow_mode, set_rainbow_mode) = signal(prefs.with_value(|p| p.rainbow_mode()));
    let (rainbow_speed, set_rainbow_speed) = signal(prefs.with_value(|p| p.rainbow_speed()));
    let (theme, set_theme) = signal(prefs.with_value(|p| p.theme()));
    let (background, set_background) = signal(prefs.with_value(|p| p.background_enabled()));
    let (blur, set_blur) = signal(prefs.with_value(|p| p.background_blur()));

    let on_hue = move |ev: web_sys::Event| {
        let Ok(value) = event_target_value(&ev).parse::<u16>() else {
            return;
        };
        prefs.update_value(|p| document.apply(&p.set_hue(value)));
        set_hue.set(value);
    };

    let on_rainbow = move |ev: web_sys::Event| {
        let enabled = event_target_checked(&ev);
        prefs.update_value(|p| p.set_rainbow_mode(enabled));
        if enabled {
            settings.start_rainbow();
        } else {
            settings.stop_rainbow();
        }
        set_rainbow_mode.set(enabled);
    };

    let on_rainbow_speed = move |ev: web_sys::Event| {
        let Ok(value) = event_target_value(&ev).parse::<u32>() else {
            return;
        };
        prefs.update_value(|p| p.set_rainbow_speed(value));
        settings.update_rainbow_speed();
        set_rainbow_speed.set(value);
    };

    let choose_theme = move |choice: Theme| {
        prefs.update_value(|p| {
            document.apply(&p.set_theme(choice, || document.prefers_dark_scheme()))
        });
        set_theme.set(choice);
    };

    let on_background = move |ev: web_sys::Event| {
        let enabled = event_target_checked(&ev);
        prefs.update_value(|p| document.apply(&p.set_background_enabled(enabled)));
        set_background.set(enabled);
    };

    let on_blur = move |ev: web_sys::Event| {
        let Ok(value) = event_target_value(&ev).parse::<u32>() else {
            return;
        };
        prefs.update_value(|p| document.apply(&p.set_background_blur(value)));
        set_blur.set(value);
    };

    view! {
        <section id="display-settings" class="card card-border p-4 flex flex-col gap-3">
            <label class="flex flex-col gap-1">
                <span>"Theme color " {move || hue.get()}</span>
                <input
                    type="range"
                    class="range range-primary"
                    min=0
                    max=359
                    prop:value=move || hue.get().to_string()
                    disabled=move || rainbow_mode.get()
                    on:input=on_hue
                />
            </label>
            <label class="label">
                <input
                    type="checkbox"
                    class="toggle"
                    prop:checked=move || rainbow_mode.get()
                    on:change=on_rainbow
                />
                "Rainbow mode"
            </label>
            <Show when=move || rainbow_mode.get()>
                <label class="flex flex-col gap-1">
                    <span>"Rainbow speed " {move || rainbow_speed.get()} "ms"</span>
                    <input
                        type="range"
                        class="range"
                        min=MIN_RAINBOW_SPEED
                        max=MAX_RAINBOW_SPEED
                        prop:value=move || rainbow_speed.get().to_string()
                        on:change=on_rainbow_speed
                    />
                </label>
            </Show>
            <div class="join" role="radiogroup" aria-label="theme">
                <For each=|| Theme::ALL key=|t| *t let(choice)>
                    <button
                        type="button"
                        class="btn join-item"
                        class=("btn-active", move || theme.get() == choice)
                        on:click=move |_| choose_theme(choice)
                    >
                        {choice.as_str()}
                    </button>
                </For>
            </div>
            <label class="label">
                <input
                    type="checkbox"
                    class="toggle"
                    prop:checked=move || background.get()
                    on:change=on_background
                />
                "Background"
            </label>
            <label class="flex flex-col gap-1">
                <span>"Background blur " {move || blur.get()} "px"</span>
                <input
                    type="range"
                    class="range"
                    min=0
                    max=MAX_BLUR
                    prop:value=move || blur.get().to_string()
                    disabled=move || !background.get()
                    on:input=on_blur
                />
            </label>
        </section>
    }
}
