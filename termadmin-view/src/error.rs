//! View layer error type

use std::path::PathBuf;

use termadmin_core::error::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    /// Reading or writing the config file failed
    #[error("Config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`PresenterConfig`](crate::config::PresenterConfig)
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    /// The platform has no config directory
    #[error("No config directory available")]
    NoConfigDir,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ViewResult<T> = std::result::Result<T, ViewError>;
