use super::id_macro::impl_id;
use serde::{Deserialize, Serialize};

/// Stable identity handed back by `IdentityStorePort::authenticate`. Block
/// checks are always performed over `UserId`, never `SessionId` — a user can
/// reconnect under a fresh session and still be recognized as blocked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl_id!(UserId);
