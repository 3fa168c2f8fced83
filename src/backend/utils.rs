use tracing::{debug, error, trace};

use crate::error::PredictionError;
use crate::model::StructuredOutput;

/// Extract JSON from markdown code blocks if present, otherwise return the content as-is.
///
/// Models sometimes wrap JSON replies in ```json ... ``` or ``` ... ``` fences
/// even when a JSON response type was requested.
pub fn extract_json_from_markdown(content: &str) -> String {
    let trimmed = content.trim();

    if trimmed.starts_with("```")
        && let Some(start_idx) = trimmed.find('\n')
    {
        let after_start = &trimmed[start_idx + 1..];
        if let Some(end_idx) = after_start.rfind("```") {
            return after_start[..end_idx].trim().to_string();
        }
    }

    trimmed.to_string()
}

/// Parse oracle text into `T` and run its contract checks.
///
/// Any deserialization failure (invalid JSON, missing field, wrong type,
/// unknown literal) becomes [`PredictionError::MalformedResponse`].
pub fn parse_structured<T: StructuredOutput>(text: &str) -> Result<T, PredictionError> {
    if text.trim().is_empty() {
        error!("Oracle returned empty text");
        return Err(PredictionError::EmptyResponse);
    }

    let json_content = extract_json_from_markdown(text);
    trace!(json = %json_content, "Attempting to parse response as JSON");

    let parsed: T = serde_json::from_str(&json_content).map_err(|e| {
        error!(error = %e, "JSON parsing error");
        PredictionError::MalformedResponse(format!("Failed to parse response: {}", e))
    })?;

    parsed.validate().inspect_err(|e| {
        error!(error = %e, "Response failed contract checks");
    })?;

    debug!("Parsed and validated structured response");
    Ok(parsed)
}

#[cfg(feature = "gemini")]
mod http {
    use reqwest::Response;
    use tracing::error;

    use crate::error::PredictionError;

    /// Convert a reqwest error to a PredictionError, handling timeout errors specially.
    pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> PredictionError {
        error!(error = %e, "HTTP request to {} failed", provider_name);
        if e.is_timeout() {
            PredictionError::Timeout
        } else {
            PredictionError::Http(e)
        }
    }

    /// Check HTTP response status and extract error message if unsuccessful.
    pub async fn check_response_status(
        response: Response,
        provider_name: &str,
    ) -> Result<Response, PredictionError> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            error!(
                status = %status,
                error = %error_text,
                "{} API returned error response", provider_name
            );
            return Err(PredictionError::Api(format!(
                "{} API error ({}): {}",
                provider_name, status, error_text
            )));
        }
        Ok(response)
    }
}

#[cfg(feature = "gemini")]
pub use http::{check_response_status, handle_http_error};
