//! PlanTrace Settings Crate
//!
//! Editor tuning (snap radii, gesture timing, zoom limits, history depth,
//! catalog selection) and its persistence as TOML or JSON.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{
    CatalogVariant, Config, GestureSettings, HistorySettings, IngestSettings, SnapSettings,
    ViewSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
