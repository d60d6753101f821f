use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// TextService Trait
// =============================================================================

/// A stateless prompt-in, text-out completion service.
///
/// Every call is independent: implementations carry no conversation state
/// between invocations and perform no retries of their own.
#[async_trait]
pub trait TextService: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: TextService + ?Sized> TextService for Box<T> {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        (**self).invoke(prompt).await
    }
}

#[async_trait]
impl<T: TextService + ?Sized> TextService for std::sync::Arc<T> {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        (**self).invoke(prompt).await
    }
}
