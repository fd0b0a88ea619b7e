//! Infrastructure layer for Daytrip: path resolution and config/secret files.

pub mod paths;
pub mod secret_service;
pub mod storage;

pub use paths::DaytripPaths;
pub use secret_service::SecretServiceImpl;
pub use storage::{ConfigStorage, SecretStorage};
