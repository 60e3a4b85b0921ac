//! Application settings
//!
//! The defaults are embedded below. A TOML document saved in localStorage
//! under [`STORAGE_KEY`] is merged over them key by key, so an override only
//! needs the keys it changes.

use contracts::shared::record::Coercion;
use serde::Deserialize;
use thiserror::Error;

pub const STORAGE_KEY: &str = "pos_admin_config";

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
# empty: same host as the page, port 3000
base_url = ""

[list]
page_size = 10
page_sizes = [10, 20, 50, 100]

[edit]
numeric_input = "strict"

[persistence]
mode = "remote"
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub edit: EditConfig,
    pub persistence: PersistenceConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub page_size: usize,
    pub page_sizes: Vec<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EditConfig {
    pub numeric_input: Coercion,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PersistenceConfig {
    pub mode: PersistenceMode,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceMode {
    /// Writes go to the API first, the list follows on success
    Remote,
    /// Everything stays in the browser, starting from sample records
    Local,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
            },
            list: ListConfig {
                page_size: 10,
                page_sizes: vec![10, 20, 50, 100],
            },
            edit: EditConfig {
                numeric_input: Coercion::Strict,
            },
            persistence: PersistenceConfig {
                mode: PersistenceMode::Remote,
            },
        }
    }
}

impl AppConfig {
    /// Parse the embedded defaults with an optional override document on top
    pub fn from_toml(overrides: Option<&str>) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(DEFAULT_CONFIG)?;
        if let Some(overrides) = overrides {
            let overrides: toml::Table = toml::from_str(overrides)?;
            merge(&mut table, overrides);
        }
        let config: AppConfig = toml::Value::Table(table).try_into()?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.list.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "list.page_size",
                reason: "must be greater than zero".into(),
            });
        }
        if self.list.page_sizes.iter().all(|s| *s == 0) {
            return Err(ConfigError::Invalid {
                key: "list.page_sizes",
                reason: "needs at least one positive size".into(),
            });
        }
        Ok(())
    }

    pub fn is_remote(&self) -> bool {
        self.persistence.mode == PersistenceMode::Remote
    }
}

fn merge(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match value {
            toml::Value::Table(section) => match base.get_mut(&key) {
                Some(toml::Value::Table(base_section)) => merge(base_section, section),
                _ => {
                    base.insert(key, toml::Value::Table(section));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

fn read_override() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(STORAGE_KEY)
        .ok()?
}

/// Load settings for this browser. A broken override is ignored with a warning.
pub fn load_config() -> AppConfig {
    let overrides = read_override();
    match AppConfig::from_toml(overrides.as_deref()) {
        Ok(config) => {
            if overrides.is_some() {
                log::info!("Using configuration override from localStorage");
            }
            config
        }
        Err(e) => {
            log::warn!("Ignoring configuration override: {}", e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::from_toml(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.is_remote());
    }

    #[test]
    fn test_override_merges_per_key() {
        let config = AppConfig::from_toml(Some(
            r#"
            [list]
            page_size = 20

            [edit]
            numeric_input = "lenient"
            "#,
        ))
        .unwrap();
        assert_eq!(config.list.page_size, 20);
        assert_eq!(config.list.page_sizes, vec![10, 20, 50, 100]);
        assert_eq!(config.edit.numeric_input, Coercion::Lenient);
        assert_eq!(config.api.base_url, "");
    }

    #[test]
    fn test_local_persistence() {
        let config = AppConfig::from_toml(Some("[persistence]\nmode = \"local\"")).unwrap();
        assert_eq!(config.persistence.mode, PersistenceMode::Local);
        assert!(!config.is_remote());
    }

    #[test]
    fn test_bad_overrides_are_rejected() {
        assert!(matches!(
            AppConfig::from_toml(Some("[list\npage_size = 1")),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AppConfig::from_toml(Some("[list]\npage_size = 0")),
            Err(ConfigError::Invalid {
                key: "list.page_size",
                ..
            })
        ));
        assert!(AppConfig::from_toml(Some("[edit]\nnumeric_input = \"loose\"")).is_err());
    }
}
