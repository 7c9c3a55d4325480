//! pystartup - startup script generator for Python web applications
//!
//! Given the directory of a deployed Python app, pystartup produces a
//! `/bin/sh` script that registers the app's packages directory (or activates
//! a legacy virtual environment) and launches the app with gunicorn.
//!
//! # Core Concepts
//!
//! - **Detection**: an ordered chain of rules classifies the app. A
//!   `wsgi.py` inside a first-level directory means Django; a top-level
//!   `application.py`, `app.py`, `index.py` or `server.py` means Flask.
//!   Otherwise the configured default app is served.
//! - **Generation**: the script is plain text, rebuilt from scratch on every
//!   call. Nothing is written to the app directory at generation time.
//!
//! # Example Usage
//!
//! ```no_run
//! use pystartup::{GeneratorConfig, RealFileSystem, ScriptGenerator};
//! use std::sync::Arc;
//!
//! let config = GeneratorConfig::new("/home/site/wwwroot")
//!     .with_virtual_env_name(Some("antenv".to_string()));
//! let span = tracing::info_span!("startup");
//! let generator = ScriptGenerator::new(config, Arc::new(RealFileSystem::new()), span);
//!
//! let script = generator.generate_entrypoint_script()?;
//! std::fs::write("/tmp/startup.sh", script)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod fs;
pub mod generator;
pub mod util;

pub use config::{ConfigError, GeneratorConfig};
pub use detection::{AppType, Detection, DetectionContext, DetectionRule, DetectorChain};
pub use error::GeneratorError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use generator::{gunicorn_command, ScriptGenerator, StartupPlan};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
