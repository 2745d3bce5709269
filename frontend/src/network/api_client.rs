use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, RequestMode, Response};

use super::transport::TransportClient;
use crate::constants::SESSION_ID_PREFIX;
use crate::error::TransportError;
use crate::models::{ApiChatRequest, ApiChatResponse, ChatReply, SessionHandle, UploadReceipt};

// REST client for the chat proxy (`/chat`, `/upload`)
//
// The base URL is read from the global API config on every request so a
// late `init_api_config_js()` call still takes effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApiClient;

impl ApiClient {
    pub fn new() -> Self {
        Self
    }

    fn endpoint(path: &str) -> String {
        super::api_config().url(path)
    }

    // POST `body` and return the response text.  Non-2xx statuses become
    // `TransportError::Status` carrying the raw body for later inspection.
    async fn post(url: &str, body: &JsValue, content_type: Option<&str>) -> Result<String, TransportError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(body);

        if let Some(content_type) = content_type {
            let headers = Headers::new().map_err(unavailable)?;
            headers.append("Content-Type", content_type).map_err(unavailable)?;
            opts.set_headers(&headers);
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(unavailable)?;

        let window = web_sys::window()
            .ok_or_else(|| TransportError::Unavailable("no global `window` exists".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|v| TransportError::Malformed(describe(&v)))?;

        let text = JsFuture::from(resp.text().map_err(network)?)
            .await
            .map_err(network)?
            .as_string()
            .unwrap_or_default();

        classify(resp.status(), text)
    }
}

impl TransportClient for ApiClient {
    type File = web_sys::File;

    // The proxy keeps no server-side sessions, so the handle is minted
    // locally and forwarded with every message.
    async fn create_session(&self) -> Result<SessionHandle, TransportError> {
        Ok(SessionHandle::new(format!(
            "{}-{}",
            SESSION_ID_PREFIX,
            uuid::Uuid::new_v4()
        )))
    }

    async fn send_message(&self, session: &SessionHandle, text: &str) -> Result<ChatReply, TransportError> {
        let payload = serde_json::to_string(&ApiChatRequest {
            message: text,
            session_id: session.as_str(),
        })
        .map_err(|e| TransportError::Malformed(format!("could not encode request: {}", e)))?;

        let url = Self::endpoint("/chat");
        log::debug!("POST {} ({} chars)", url, text.len());
        let body = Self::post(&url, &JsValue::from_str(&payload), Some("application/json")).await?;

        decode_reply(&body)
    }

    async fn send_file(&self, file: &web_sys::File) -> Result<UploadReceipt, TransportError> {
        let form = FormData::new().map_err(unavailable)?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(unavailable)?;

        let url = Self::endpoint("/upload");
        log::debug!("POST {} ({}, {} bytes)", url, file.name(), file.size());
        // No Content-Type: the browser sets the multipart boundary itself.
        let body = Self::post(&url, &JsValue::from(form), None).await?;

        decode_receipt(&body)
    }
}

// Body text of a 2xx response; anything else keeps status and raw body.
fn classify(status: u16, body: String) -> Result<String, TransportError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(TransportError::Status { status, body })
    }
}

fn decode_reply(body: &str) -> Result<ChatReply, TransportError> {
    serde_json::from_str::<ApiChatResponse>(body)
        .map(ChatReply::from)
        .map_err(|e| TransportError::Malformed(e.to_string()))
}

fn decode_receipt(body: &str) -> Result<UploadReceipt, TransportError> {
    serde_json::from_str::<UploadReceipt>(body).map_err(|e| TransportError::Malformed(e.to_string()))
}

fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

fn network(value: JsValue) -> TransportError {
    TransportError::Network(describe(&value))
}

fn unavailable(value: JsValue) -> TransportError {
    TransportError::Unavailable(describe(&value))
}
