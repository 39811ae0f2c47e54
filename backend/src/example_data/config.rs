//! Example data configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Configuration values controlling example data seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Enable example data seeding on startup.
    pub enabled: Option<bool>,
}

impl ExampleDataSettings {
    /// Whether seeding should run; off unless explicitly enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }
}
