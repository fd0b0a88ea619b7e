//! File-backed configuration storage.

pub mod config_storage;
pub mod secret_storage;

pub use config_storage::ConfigStorage;
pub use secret_storage::{SecretStorage, SecretStorageError};
