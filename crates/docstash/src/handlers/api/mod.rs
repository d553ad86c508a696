//! `/api` handlers.

mod documents;
mod users;
mod verification;

pub use documents::{get_messages, get_settings, put_messages, put_settings};
pub use users::{delete_user, get_user, list_users, upsert_user};
pub use verification::send_verification_code;
