//! Framework detection
//!
//! Detection is an ordered chain of [`DetectionRule`]s. Each rule inspects the
//! application tree and either claims it, returning the module gunicorn should
//! serve, or passes. The first rule that claims the tree wins; the caller
//! falls back to the configured default app when none does.

use crate::error::GeneratorError;
use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod chain;
pub mod django;
pub mod flask;

pub use chain::DetectorChain;
pub use django::DjangoRule;
pub use flask::{FlaskRule, FLASK_CANDIDATES};

/// Kind of application the startup command was resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    Django,
    Flask,
    Default,
}

impl AppType {
    pub fn name(&self) -> &'static str {
        match self {
            AppType::Django => "Django",
            AppType::Flask => "Flask",
            AppType::Default => "Default",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a successful detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub app_type: AppType,
    /// WSGI module identifier, e.g. `mysite.wsgi` or `app:app`
    pub module: String,
    /// Directory gunicorn changes into before importing the module
    pub app_dir: PathBuf,
}

/// Read-only inputs shared by every rule
pub struct DetectionContext<'a> {
    pub file_system: &'a dyn FileSystem,
    pub source_path: &'a Path,
    pub virtual_env_name: Option<&'a str>,
}

impl<'a> DetectionContext<'a> {
    pub fn new(file_system: &'a dyn FileSystem, source_path: &'a Path) -> Self {
        Self {
            file_system,
            source_path,
            virtual_env_name: None,
        }
    }

    pub fn with_virtual_env_name(mut self, name: Option<&'a str>) -> Self {
        self.virtual_env_name = name;
        self
    }
}

/// A single heuristic in the detection chain
pub trait DetectionRule: Send + Sync {
    fn app_type(&self) -> AppType;

    /// Returns `Ok(None)` when the tree does not look like this rule's
    /// framework. Errors are fatal for the whole detection.
    fn detect(&self, ctx: &DetectionContext<'_>) -> Result<Option<Detection>, GeneratorError>;
}
