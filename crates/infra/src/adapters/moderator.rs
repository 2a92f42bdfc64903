use async_trait::async_trait;
use rendezvous_core::ports::{ModerationOutcome, ModeratorError, ModeratorPort};

const DEFAULT_BANNED_WORDS: &[&str] = &["kill yourself", "csam", "cp"];

/// A stand-in `ModeratorPort` that vetoes messages containing any word from
/// a fixed, case-insensitive list. This is deliberately crude — a real
/// deployment would front a trained classifier or a third-party moderation
/// API — but it gives the relay something real to check against so
/// `message-blocked` has a genuine trigger in a deployment that has not
/// wired up a real moderation backend yet.
pub struct WordListModerator {
    banned_words: Vec<String>,
}

impl WordListModerator {
    pub fn new(banned_words: impl IntoIterator<Item = String>) -> Self {
        Self {
            banned_words: banned_words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

impl Default for WordListModerator {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS.iter().map(|w| w.to_string()))
    }
}

#[async_trait]
impl ModeratorPort for WordListModerator {
    async fn check(&self, text: &str) -> Result<ModerationOutcome, ModeratorError> {
        let lowered = text.to_lowercase();
        match self.banned_words.iter().find(|word| lowered.contains(word.as_str())) {
            Some(_) => Ok(ModerationOutcome::Veto {
                reason: "message violates community guidelines".to_string(),
            }),
            None => Ok(ModerationOutcome::Allow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_ordinary_text() {
        let moderator = WordListModerator::default();
        let outcome = moderator.check("hey, how's it going?").await.unwrap();
        assert_eq!(outcome, ModerationOutcome::Allow);
    }

    #[tokio::test]
    async fn vetoes_banned_words_case_insensitively() {
        let moderator = WordListModerator::new(vec!["banned".to_string()]);
        let outcome = moderator.check("this is BANNED content").await.unwrap();
        assert!(matches!(outcome, ModerationOutcome::Veto { .. }));
    }

    #[tokio::test]
    async fn custom_word_lists_replace_rather_than_extend_the_default() {
        let moderator = WordListModerator::new(vec!["widget".to_string()]);
        let outcome = moderator.check("csam is still in the default list").await.unwrap();
        assert_eq!(outcome, ModerationOutcome::Allow);
    }
}
