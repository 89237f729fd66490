//! Store settings and their loading.
/// Config file loader
mod loader;
/// Configuration types and settings
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_dir,
    load_settings,
};
pub use types::StoreSettings;

pub use crate::error::{
    ConfigError,
    ValidationError,
};
