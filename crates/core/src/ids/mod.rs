mod id_macro;
mod session_id;
mod user_id;

pub use session_id::SessionId;
pub use user_id::UserId;
