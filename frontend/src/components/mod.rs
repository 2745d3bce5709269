pub mod chat_widget;

// Re-export commonly used items
pub use chat_widget::{mount, render, BrowserHost};
