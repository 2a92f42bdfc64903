use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModeratorError {
    #[error("moderator unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationOutcome {
    Allow,
    Veto { reason: String },
}

/// Content-moderation decision for chat text. A veto suppresses relay and
/// is reported only to the sender.
#[async_trait]
pub trait ModeratorPort: Send + Sync {
    async fn check(&self, text: &str) -> Result<ModerationOutcome, ModeratorError>;
}

#[cfg(test)]
mockall::mock! {
    pub Moderator {}

    #[async_trait]
    impl ModeratorPort for Moderator {
        async fn check(&self, text: &str) -> Result<ModerationOutcome, ModeratorError>;
    }
}
