use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::Breakpoints;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Minimum number of rendered pages; the loop-style pager needs a floor
    /// of slides even for near-empty levels.
    #[serde(default = "default_min_pages")]
    pub min_pages: usize,
    #[serde(default = "default_wide_width")]
    pub wide_width: u16,
    #[serde(default = "default_medium_width")]
    pub medium_width: u16,
    /// Page transition length in event ticks.
    #[serde(default = "default_transition_ticks")]
    pub transition_ticks: u16,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_min_pages() -> usize {
    4
}
fn default_wide_width() -> u16 {
    100
}
fn default_medium_width() -> u16 {
    60
}
fn default_transition_ticks() -> u16 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            min_pages: default_min_pages(),
            wide_width: default_wide_width(),
            medium_width: default_medium_width(),
            transition_ticks: default_transition_ticks(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config.normalized())
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cardwalk")
            .join("config.toml")
    }

    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            wide: self.wide_width,
            medium: self.medium_width,
        }
    }

    /// Clamp hand-edited values back into workable ranges: the pager needs at
    /// least two pages to loop over, and the width cutoffs must stay ordered.
    pub fn normalized(mut self) -> Self {
        self.min_pages = self.min_pages.max(2);
        if self.medium_width >= self.wide_width {
            self.medium_width = default_medium_width();
            self.wide_width = default_wide_width();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(config.min_pages, 4);
        assert_eq!(config.wide_width, 100);
        assert_eq!(config.medium_width, 60);
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
theme = "catppuccin-mocha"
min_pages = 6
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.min_pages, 6);
        assert_eq!(config.transition_ticks, 3);
    }

    #[test]
    fn test_normalized_clamps_min_pages() {
        let config: Config = toml::from_str("min_pages = 0").unwrap();
        assert_eq!(config.normalized().min_pages, 2);
    }

    #[test]
    fn test_normalized_resets_disordered_widths() {
        let config: Config = toml::from_str("wide_width = 50\nmedium_width = 80").unwrap();
        let config = config.normalized();
        assert_eq!(config.wide_width, 100);
        assert_eq!(config.medium_width, 60);
    }
}
