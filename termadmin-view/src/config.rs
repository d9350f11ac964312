//! Presenter configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use termadmin_core::error::{CoreError, CoreResult};
use termadmin_core::types::{PagingState, DEFAULT_PAGE_SIZE};

use crate::error::{ViewError, ViewResult};

/// List presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    pub page_size: u32,
    pub max_page_size: u32,
    /// Initial value of the hidden-items toggle
    pub show_hidden: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 100,
            show_hidden: false,
        }
    }
}

impl PresenterConfig {
    /// Reject settings no page size can satisfy.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_page_size == 0 {
            return Err(CoreError::ConfigError(
                "max_page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Initial paging state for a list presenter.
    pub fn paging_state(&self) -> PagingState {
        PagingState {
            page_size: self.page_size,
            show_hidden: self.show_hidden,
            ..PagingState::default()
        }
        .validated(self.max_page_size)
    }
}

/// Configuration service trait
pub trait ConfigService: Send + Sync {
    /// Load the configuration
    fn load(&self) -> ViewResult<PresenterConfig>;

    /// Save the configuration
    fn save(&self, config: &PresenterConfig) -> ViewResult<()>;
}

/// TOML file backed configuration
pub struct TomlConfigService {
    path: PathBuf,
}

impl TomlConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/termadmin/view.toml`
    pub fn default_path() -> ViewResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("termadmin").join("view.toml"))
            .ok_or(ViewError::NoConfigDir)
    }

    pub fn at_default_path() -> ViewResult<Self> {
        Self::default_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ViewError {
        ViewError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigService for TomlConfigService {
    fn load(&self) -> ViewResult<PresenterConfig> {
        if !self.path.exists() {
            log::debug!("No config at {}, using defaults", self.path.display());
            return Ok(PresenterConfig::default());
        }
        let text = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let config: PresenterConfig = toml::from_str(&text)?;
        config.validate()?;
        log::info!("Loaded presenter config from {}", self.path.display());
        Ok(config)
    }

    fn save(&self, config: &PresenterConfig) -> ViewResult<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let text = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}
