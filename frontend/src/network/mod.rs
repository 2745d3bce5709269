pub mod api_client;
pub mod config;
pub mod session;
pub mod transport;

// Re-export commonly used items
pub use api_client::ApiClient;
pub use config::ApiConfig;
pub use session::SessionProvider;
pub use transport::{TransportClient, UploadSource};

use lazy_static::lazy_static;
use std::sync::{PoisonError, RwLock};
use wasm_bindgen::prelude::*;

lazy_static! {
    static ref API_CONFIG: RwLock<Option<ApiConfig>> = RwLock::new(None);
}

/// Initialize the API configuration from the build environment.  Keeps a
/// configuration already provided from JS.
pub fn init_api_config() {
    let mut guard = API_CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    if guard.is_none() {
        *guard = Some(ApiConfig::new());
    }
}

/// Initialize the API configuration from a JS-provided URL.
/// This allows runtime configuration of the API endpoints.
#[wasm_bindgen]
pub fn init_api_config_js(api_base_url: &str) -> Result<(), JsValue> {
    log::info!("Initializing API config from JS: {}", api_base_url);
    let config = ApiConfig::from_url(api_base_url);
    *API_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = Some(config);
    Ok(())
}

/// Current configuration, or the local-development default.
pub(crate) fn api_config() -> ApiConfig {
    API_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}
