use super::PortResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Send a prompt to the text-generation service and return its raw reply.
    async fn generate(&self, prompt: &str) -> PortResult<String>;
}
