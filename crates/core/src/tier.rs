use serde::{Deserialize, Serialize};

/// Subscription tier, influencing match scoring and (outside the core)
/// daily quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
    Pro,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Free, Tier::Premium, Tier::Pro];
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Free
    }
}
