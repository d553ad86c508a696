//! Storage abstraction layer for docstash.
//!
//! Trait interfaces for each document live here, with file-based
//! implementations in the `file` submodule.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     HTTP handlers                           │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │ uses traits
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │          store/ (UserStore, SettingsStore, MessageStore)    │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │ implementations
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  store/file/ (FileUserStore, ... over JsonDocumentStore)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Naming Conventions
//!
//! - `list` - enumerate all records of a collection
//! - `get` - read a record or a whole singleton document
//! - `upsert` - replace in place or append
//! - `put` - replace a whole singleton document
//! - `delete` - remove a record

pub mod error;

mod settings;
mod user;

pub mod file;

pub use error::{StorageError, StorageResult};
pub use settings::{MessageStore, SettingsStore};
pub use user::UserStore;
