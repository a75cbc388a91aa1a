use leptos::prelude::*;

mod browser;
mod posts;
mod settings;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}

#[component]
fn App() -> impl IntoView {
    view! {
        <div class="container p-4 h-full flex flex-col gap-4">
            <settings::SettingsPanel />
            <div class="divider divider-secondary"></div>
            <posts::PostList />
        </div>
    }
}

#[derive(Debug, Clone)]
enum AppError {
    PostsLoad(String),
    Browser(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, w: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::PostsLoad(cause) => write!(w, "Failed to load posts due to: {}", cause),
            AppError::Browser(cause) => write!(w, "Browser API failed: {}", cause),
        }
    }
}

impl std::error::Error for AppError {}

impl From<web_sys::wasm_bindgen::JsValue> for AppError {
    fn from(js_val: web_sys::wasm_bindgen::JsValue) -> Self {
        let js_err = js_sys::Error::from(js_val);
        Self::Browser(
            js_err
                .message()
                .as_string()
                .unwrap_or_else(|| "unknown error".to_owned()),
        )
    }
}
