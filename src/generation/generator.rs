use crate::generation::error::GenerationError;

/// The injected text-generation collaborator.
///
/// Implementations are constructed once at startup and passed by reference
/// into [`crate::Climatrend::summarize`]; the core never reconstructs or
/// globally shares a backend handle. One call means one attempt: retries, if
/// wanted, belong to the caller.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    /// Sends the prompt to the backend and returns the generated text, or a
    /// [`GenerationError`] carrying the underlying cause.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
