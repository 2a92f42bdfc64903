use super::id_macro::impl_id;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a connection's session, stable for the lifetime of
/// that connection. Never carries any meaning about the user behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl_id!(SessionId);
