//! HTTP request handlers.

pub mod api;
pub(crate) mod envelope;
mod health;
mod version;

pub use health::{livez, readyz};
pub use version::version;
