//! apg-config
//!
//! Application configuration model: storage keys, default sources and the
//! data directory, plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{resolve_base_dir, ConfigManager, HOME_ENV};
pub use model::{AppConfig, DefaultSources};
