//! DOM side of the widget: builds the layout once, wires the input events
//! to `dispatch_global_message` and re-renders from `ChatState`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    KeyboardEvent,
};

use crate::app::Host;
use crate::constants::{INPUT_PLACEHOLDER, PDF_MEDIA_TYPE, WELCOME_BODY, WELCOME_TITLE};
use crate::messages::Message;
use crate::models::Role;
use crate::state::{dispatch_global_message, ChatState, Settlement};
use crate::toast::{self, ToastKind};

const ROOT_ID: &str = "chat-widget";
const MOUNT_POINT_ID: &str = "chat-widget-root";
const UPLOAD_BUTTON_ID: &str = "chat-upload-btn";
const FILE_INPUT_ID: &str = "chat-file-input";
const LAST_UPLOAD_ID: &str = "chat-last-upload";
const WELCOME_ID: &str = "chat-welcome";
const MESSAGES_ID: &str = "chat-messages";
const INPUT_ID: &str = "chat-input";
const SEND_BUTTON_ID: &str = "chat-send-btn";
const STYLE_ID: &str = "chat-widget-styles";

/// Host backed by the real page.
pub struct BrowserHost {
    document: Document,
}

impl BrowserHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Host for BrowserHost {
    fn spawn(&self, task: futures::future::LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn notify(&self, kind: ToastKind, message: &str) {
        toast::show(message, kind);
    }

    fn render(&self, state: &ChatState) {
        if let Err(e) = render(&self.document, state) {
            log::error!("Failed to render chat widget: {:?}", e);
        }
    }
}

/// Build the widget inside `#chat-widget-root` (or `<body>`).  Mounting
/// twice is a no-op.
pub fn mount(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(ROOT_ID).is_some() {
        return Ok(());
    }
    ensure_styles(document)?;

    let root = document.create_element("div")?;
    root.set_id(ROOT_ID);
    root.set_class_name("chat-widget");
    root.set_inner_html(
        r#"
        <div class="chat-toolbar">
            <button id="chat-upload-btn" class="upload-button" type="button">Upload PDF</button>
            <input id="chat-file-input" type="file" style="display: none;">
            <div id="chat-last-upload" class="last-upload"></div>
        </div>
        <div id="chat-welcome" class="chat-welcome">
            <h3></h3>
            <p></p>
        </div>
        <div id="chat-messages" class="chat-messages"></div>
        <div class="chat-input-area">
            <textarea id="chat-input" class="chat-input" rows="1"></textarea>
            <button id="chat-send-btn" class="send-button" type="button">Send</button>
        </div>
    "#,
    );

    let mount_point: Element = match document.get_element_by_id(MOUNT_POINT_ID) {
        Some(el) => el,
        None => document
            .body()
            .ok_or_else(|| JsValue::from_str("Document has no body"))?
            .into(),
    };
    mount_point.append_child(&root)?;

    if let Some(title) = document.query_selector("#chat-welcome h3")? {
        title.set_text_content(Some(WELCOME_TITLE));
    }
    if let Some(body) = document.query_selector("#chat-welcome p")? {
        body.set_text_content(Some(WELCOME_BODY));
    }
    by_id::<HtmlInputElement>(document, FILE_INPUT_ID)?.set_accept(PDF_MEDIA_TYPE);
    by_id::<HtmlTextAreaElement>(document, INPUT_ID)?.set_placeholder(INPUT_PLACEHOLDER);

    setup_event_handlers(document)
}

fn setup_event_handlers(document: &Document) -> Result<(), JsValue> {
    let file_input = by_id::<HtmlInputElement>(document, FILE_INPUT_ID)?;
    let textarea = by_id::<HtmlTextAreaElement>(document, INPUT_ID)?;

    // Upload button opens the hidden picker
    {
        let file_input = file_input.clone();
        let click_handler = Closure::wrap(Box::new(move |_: Event| {
            file_input.click();
        }) as Box<dyn FnMut(_)>);
        by_id::<HtmlButtonElement>(document, UPLOAD_BUTTON_ID)?
            .add_event_listener_with_callback("click", click_handler.as_ref().unchecked_ref())?;
        click_handler.forget();
    }

    // File picked
    {
        let input = file_input.clone();
        let change_handler = Closure::wrap(Box::new(move |_: Event| {
            let file = input.files().and_then(|files| files.get(0));
            // Rejections are already reported through a toast.
            let _ = dispatch_global_message(Message::SubmitFile(file));
            // Allow picking the same file again
            input.set_value("");
        }) as Box<dyn FnMut(_)>);
        file_input.add_event_listener_with_callback("change", change_handler.as_ref().unchecked_ref())?;
        change_handler.forget();
    }

    // Mirror the field into the state
    {
        let input = textarea.clone();
        let input_handler = Closure::wrap(Box::new(move |_: Event| {
            let _ = dispatch_global_message(Message::UpdateInputText(input.value()));
        }) as Box<dyn FnMut(_)>);
        textarea.add_event_listener_with_callback("input", input_handler.as_ref().unchecked_ref())?;
        input_handler.forget();
    }

    // Enter submits, Shift+Enter inserts a newline
    {
        let input = textarea.clone();
        let keydown_handler = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() && !e.is_composing() {
                e.prevent_default();
                submit_from(&input);
            }
        }) as Box<dyn FnMut(_)>);
        textarea.add_event_listener_with_callback("keydown", keydown_handler.as_ref().unchecked_ref())?;
        keydown_handler.forget();
    }

    // Send button
    {
        let input = textarea.clone();
        let send_handler = Closure::wrap(Box::new(move |_: Event| {
            submit_from(&input);
        }) as Box<dyn FnMut(_)>);
        by_id::<HtmlButtonElement>(document, SEND_BUTTON_ID)?
            .add_event_listener_with_callback("click", send_handler.as_ref().unchecked_ref())?;
        send_handler.forget();
    }

    Ok(())
}

fn submit_from(input: &HtmlTextAreaElement) {
    if let Err(e) = dispatch_global_message(Message::SubmitNewMessage(input.value())) {
        log::debug!("Submission ignored: {}", e);
    }
}

/// Bring the DOM in line with `state`.
pub fn render(document: &Document, state: &ChatState) -> Result<(), JsValue> {
    by_id::<Element>(document, ROOT_ID)?.set_class_name(root_class(state));

    let welcome = by_id::<HtmlElement>(document, WELCOME_ID)?;
    set_visible(&welcome, state.show_welcome())?;

    let last_upload = by_id::<HtmlElement>(document, LAST_UPLOAD_ID)?;
    match state.last_uploaded_filename() {
        Some(name) => {
            last_upload.set_text_content(Some(&format!("Last uploaded: {}", name)));
            set_visible(&last_upload, true)?;
        }
        None => set_visible(&last_upload, false)?,
    }

    let upload_button = by_id::<HtmlButtonElement>(document, UPLOAD_BUTTON_ID)?;
    upload_button.set_text_content(Some(if state.is_uploading() {
        "Uploading..."
    } else {
        "Upload PDF"
    }));

    render_messages(document, state)?;

    let loading = state.is_loading();
    let textarea = by_id::<HtmlTextAreaElement>(document, INPUT_ID)?;
    textarea.set_disabled(loading);
    if textarea.value() != state.input_text() {
        textarea.set_value(state.input_text());
    }

    let send_button = by_id::<HtmlButtonElement>(document, SEND_BUTTON_ID)?;
    send_button.set_disabled(loading);
    if loading {
        send_button.set_inner_html(r#"<span class="spinner"></span>"#);
    } else {
        send_button.set_text_content(Some("Send"));
    }

    Ok(())
}

fn render_messages(document: &Document, state: &ChatState) -> Result<(), JsValue> {
    let list = by_id::<Element>(document, MESSAGES_ID)?;
    list.set_inner_html("");

    for turn in state.turns() {
        let item = document.create_element("div")?;
        let mut class = String::from("chat-message");
        class.push_str(match turn.role() {
            Role::User => " message-user",
            Role::Assistant => " message-assistant",
        });
        if turn.is_pending() {
            class.push_str(" message-pending");
            let indicator = document.create_element("div")?;
            indicator.set_class_name("typing-indicator");
            indicator.set_inner_html("<span></span><span></span><span></span>");
            item.append_child(&indicator)?;
        } else {
            if turn.is_failed() {
                class.push_str(" message-error");
            }
            // Never interpret turn content as markup.
            item.set_text_content(Some(turn.content()));
        }
        item.set_class_name(&class);
        list.append_child(&item)?;
    }

    list.set_scroll_top(list.scroll_height());
    Ok(())
}

// Marks the widget while the latest reply is the failure text.
fn root_class(state: &ChatState) -> &'static str {
    match state.last_settlement() {
        Some(Settlement::Failure) => "chat-widget chat-failed",
        _ => "chat-widget",
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has an unexpected element type", id)))
}

fn set_visible(element: &HtmlElement, visible: bool) -> Result<(), JsValue> {
    element
        .style()
        .set_property("display", if visible { "" } else { "none" })
}

fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(
        r#"
.chat-widget { display: flex; flex-direction: column; gap: 8px; max-width: 640px; font-family: sans-serif; }
.chat-toolbar { display: flex; align-items: center; gap: 12px; }
.last-upload { font-size: 0.85em; color: #555; }
.chat-welcome { text-align: center; color: #444; }
.chat-messages { display: flex; flex-direction: column; gap: 6px; max-height: 420px; overflow-y: auto; }
.chat-message { padding: 8px 12px; border-radius: 8px; white-space: pre-wrap; max-width: 80%; }
.message-user { align-self: flex-end; background: #2563eb; color: #fff; }
.message-assistant { align-self: flex-start; background: #f1f5f9; color: #111; }
.message-error { background: #fee2e2; color: #991b1b; }
.chat-failed .chat-input { border-color: #dc2626; }
.typing-indicator span { display: inline-block; width: 6px; height: 6px; margin: 0 2px; border-radius: 50%; background: #94a3b8; animation: chat-blink 1.2s infinite; }
.typing-indicator span:nth-child(2) { animation-delay: 0.2s; }
.typing-indicator span:nth-child(3) { animation-delay: 0.4s; }
.chat-input-area { display: flex; gap: 8px; }
.chat-input { flex: 1; resize: none; padding: 8px; }
.spinner { display: inline-block; width: 14px; height: 14px; border: 2px solid #cbd5e1; border-top-color: #2563eb; border-radius: 50%; animation: chat-spin 0.8s linear infinite; }
@keyframes chat-blink { 0%, 80%, 100% { opacity: 0.3; } 40% { opacity: 1; } }
@keyframes chat-spin { to { transform: rotate(360deg); } }
"#,
    ));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document
            .body()
            .ok_or_else(|| JsValue::from_str("Document has no body"))?
            .append_child(&style)?,
    };
    Ok(())
}
