pub mod client;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod utils;

pub use client::{Oracle, OracleRequest};
#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiConfig, Model as GeminiModel};
pub use utils::{extract_json_from_markdown, parse_structured};
#[cfg(feature = "gemini")]
pub use utils::{check_response_status, handle_http_error};
