// User-facing strings - these are the single source of truth for copy
pub const NO_RESPONSE_FALLBACK: &str = "No response received.";
pub const GENERIC_FAILURE: &str = "Something went wrong.";
pub const INVALID_FILE_PROMPT: &str = "Please select a valid PDF file.";
pub const UPLOAD_SUCCESS: &str = "PDF uploaded successfully!";
pub const UPLOAD_FAILED_FALLBACK: &str = "Upload failed.";
pub const WELCOME_TITLE: &str = "Welcome!";
pub const WELCOME_BODY: &str = "You can ask about your policy or upload a PDF for custom Q&A.";
pub const INPUT_PLACEHOLDER: &str = "Ask me anything...";

// Upload constraints
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

// Transport defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001"; // Local proxy server
pub const SESSION_ID_PREFIX: &str = "chat";
pub const TOAST_LIFETIME_MS: u32 = 4000;
