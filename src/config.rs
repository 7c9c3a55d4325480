//! Generator configuration
//!
//! [`GeneratorConfig`] is built once per invocation and read-only afterwards.
//! Defaults can be taken from the environment with
//! [`GeneratorConfig::from_env`]; explicit `with_*` calls override them.
//!
//! # Environment Variables
//!
//! - `PYSTARTUP_DEFAULT_APP_DIR`: fallback app directory - default: "/opt/defaultsite"
//! - `PYSTARTUP_DEFAULT_APP_MODULE`: fallback module - default: "application:app"
//! - `PYSTARTUP_PACKAGES_DIR`: packages subdirectory - default: "__oryx_packages__"
//! - `PYSTARTUP_BIND`: gunicorn bind address - default: unset
//! - `PYSTARTUP_VIRTUAL_ENV_NAME`: legacy virtual environment name - default: unset

use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_APP_DIR: &str = "/opt/defaultsite";
pub const DEFAULT_APP_MODULE: &str = "application:app";
pub const DEFAULT_PACKAGES_DIR: &str = "__oryx_packages__";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Default app module must not be empty")]
    MissingDefaultModule,

    #[error("Packages directory name must not be empty")]
    MissingPackagesDir,

    #[error("Invalid bind address '{0}': must not contain whitespace or quotes")]
    InvalidBindHost(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub source_path: PathBuf,
    /// Used verbatim as the launch command; disables detection
    pub user_startup_command: Option<String>,
    pub default_app_dir: PathBuf,
    pub default_app_module: String,
    pub bind_host: Option<String>,
    /// Legacy virtual environment directory, relative to the source path
    pub virtual_env_name: Option<String>,
    pub packages_dir: String,
}

impl GeneratorConfig {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            user_startup_command: None,
            default_app_dir: PathBuf::from(DEFAULT_APP_DIR),
            default_app_module: DEFAULT_APP_MODULE.to_string(),
            bind_host: None,
            virtual_env_name: None,
            packages_dir: DEFAULT_PACKAGES_DIR.to_string(),
        }
    }

    /// Same as [`GeneratorConfig::new`] with defaults read from `PYSTARTUP_*`
    pub fn from_env(source_path: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(source_path);

        if let Some(dir) = non_empty_var("PYSTARTUP_DEFAULT_APP_DIR") {
            config.default_app_dir = PathBuf::from(dir);
        }
        if let Some(module) = non_empty_var("PYSTARTUP_DEFAULT_APP_MODULE") {
            config.default_app_module = module;
        }
        if let Some(dir) = non_empty_var("PYSTARTUP_PACKAGES_DIR") {
            config.packages_dir = dir;
        }
        config.bind_host = non_empty_var("PYSTARTUP_BIND");
        config.virtual_env_name = non_empty_var("PYSTARTUP_VIRTUAL_ENV_NAME");

        config
    }

    pub fn with_user_startup_command(mut self, command: Option<String>) -> Self {
        self.user_startup_command = non_empty(command);
        self
    }

    pub fn with_default_app_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_app_dir = dir.into();
        self
    }

    pub fn with_default_app_module(mut self, module: impl Into<String>) -> Self {
        self.default_app_module = module.into();
        self
    }

    pub fn with_bind_host(mut self, bind_host: Option<String>) -> Self {
        self.bind_host = non_empty(bind_host);
        self
    }

    pub fn with_virtual_env_name(mut self, name: Option<String>) -> Self {
        self.virtual_env_name = non_empty(name);
        self
    }

    pub fn with_packages_dir(mut self, dir: impl Into<String>) -> Self {
        self.packages_dir = dir.into();
        self
    }

    /// Absolute location of the packages directory inside the app
    pub fn packages_path(&self) -> PathBuf {
        self.source_path.join(&self.packages_dir)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_app_module.trim().is_empty() {
            return Err(ConfigError::MissingDefaultModule);
        }
        if self.packages_dir.trim().is_empty() {
            return Err(ConfigError::MissingPackagesDir);
        }
        if let Some(bind) = &self.bind_host {
            if bind.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
                return Err(ConfigError::InvalidBindHost(bind.clone()));
            }
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_var(key: &str) -> Option<String> {
    non_empty(env::var(key).ok())
}
