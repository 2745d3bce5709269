use wasm_bindgen::prelude::*;

pub mod app;
mod command_executors;
pub mod components;
pub mod constants;
pub mod conversation;
pub mod error;
mod logging;
pub mod messages;
pub mod models;
pub mod network;
pub mod reducers;
pub mod state;
mod toast;
pub mod update;

#[cfg(test)]
mod tests;

use crate::app::ChatApp;
use crate::components::BrowserHost;
use crate::network::ApiClient;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();
    logging::init();
    network::init_api_config();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    components::mount(&document)?;

    let app = ChatApp::new(ApiClient::new(), BrowserHost::new(document));
    app.render();
    state::install_app(app);

    log::info!("Chat widget mounted");
    Ok(())
}

/// Submit `text` as if the user had typed it.  Returns `false` when the
/// submission was rejected (blank text, a reply still pending, or the
/// widget not mounted).
#[wasm_bindgen]
pub fn submit_message(text: &str) -> bool {
    state::with_app(|app| app.submit_new_message(text).is_ok()).unwrap_or(false)
}

/// Current conversation as `{ turns, loading, last_uploaded }`.
#[wasm_bindgen]
pub fn conversation_snapshot() -> Result<JsValue, JsValue> {
    state::with_app(|app| serde_wasm_bindgen::to_value(&app.state().snapshot()))
        .unwrap_or(Ok(JsValue::NULL))
        .map_err(JsValue::from)
}
