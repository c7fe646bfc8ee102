use thiserror::Error;

/// Failure of the external text-generation call.
///
/// Caught at the generation boundary and returned as a value; the caller maps
/// it to an error response instead of inspecting generated text for failure
/// markers.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text generation request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("text generation backend returned HTTP {status} for {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed response from text generation backend: {0}")]
    MalformedResponse(String),

    #[error("text generation failed: {0}")]
    Backend(String),
}
