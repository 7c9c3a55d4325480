//! Startup script generation
//!
//! [`ScriptGenerator`] turns a [`GeneratorConfig`] into a `/bin/sh` script that
//! prepares the Python environment and launches the app. The launch command
//! is either the user's own command, used verbatim, or a gunicorn invocation
//! for the module found by the [`DetectorChain`]. When no rule matches, the
//! configured default app is served.
//!
//! # Example
//!
//! ```no_run
//! use pystartup::{GeneratorConfig, ScriptGenerator};
//!
//! let config = GeneratorConfig::new("/home/site/wwwroot")
//!     .with_bind_host(Some("0.0.0.0:8000".to_string()));
//! let script = ScriptGenerator::with_real_fs(config).generate_entrypoint_script()?;
//! print!("{}", script);
//! # Ok::<(), pystartup::GeneratorError>(())
//! ```

pub mod command;
pub mod script;

use crate::config::GeneratorConfig;
use crate::detection::{AppType, Detection, DetectionContext, DetectorChain};
use crate::error::GeneratorError;
use crate::fs::{FileSystem, RealFileSystem};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, info_span, Span};

pub use command::gunicorn_command;
pub use script::{ScriptBuilder, PTH_FILE_NAME};

/// How the app is going to be started
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupPlan {
    /// Final line of the generated script
    pub command: String,
    /// `None` when the user supplied their own startup command
    pub detection: Option<Detection>,
}

impl StartupPlan {
    pub fn app_type(&self) -> Option<AppType> {
        self.detection.as_ref().map(|d| d.app_type)
    }
}

pub struct ScriptGenerator {
    config: GeneratorConfig,
    file_system: Arc<dyn FileSystem>,
    detectors: DetectorChain,
    span: Span,
}

impl ScriptGenerator {
    /// Log events are emitted inside `span`
    pub fn new(config: GeneratorConfig, file_system: Arc<dyn FileSystem>, span: Span) -> Self {
        Self {
            config,
            file_system,
            detectors: DetectorChain::with_defaults(),
            span,
        }
    }

    pub fn with_real_fs(config: GeneratorConfig) -> Self {
        let span = info_span!("python.scriptgenerator", source = %config.source_path.display());
        Self::new(config, Arc::new(RealFileSystem::new()), span)
    }

    pub fn with_detectors(mut self, detectors: DetectorChain) -> Self {
        self.detectors = detectors;
        self
    }

    /// Picks the launch command without rendering the script.
    ///
    /// A user startup command short-circuits detection, so the source tree
    /// is not read at all in that case.
    pub fn resolve_startup(&self) -> Result<StartupPlan, GeneratorError> {
        let _enter = self.span.enter();

        if let Some(command) = &self.config.user_startup_command {
            info!("Using user-provided startup command");
            return Ok(StartupPlan {
                command: command.clone(),
                detection: None,
            });
        }

        let ctx = DetectionContext::new(self.file_system.as_ref(), &self.config.source_path)
            .with_virtual_env_name(self.config.virtual_env_name.as_deref());

        let detection = match self.detectors.detect(&ctx)? {
            Some(detection) => {
                info!("Detected {} app.", detection.app_type);
                detection
            }
            None => {
                info!(
                    default_app = %self.config.default_app_dir.display(),
                    "Using default app"
                );
                Detection {
                    app_type: AppType::Default,
                    module: self.config.default_app_module.clone(),
                    app_dir: self.config.default_app_dir.clone(),
                }
            }
        };

        info!(app_module = %detection.module, "Generating command for app module");
        let command = gunicorn_command(
            &detection.module,
            self.config.bind_host.as_deref(),
            Some(detection.app_dir.as_path()),
        );

        Ok(StartupPlan {
            command,
            detection: Some(detection),
        })
    }

    pub fn generate_entrypoint_script(&self) -> Result<String, GeneratorError> {
        {
            let _enter = self.span.enter();
            info!(
                "Generating script for source at '{}'",
                self.config.source_path.display()
            );
        }

        let mut builder = ScriptBuilder::new();
        builder
            .preamble(&self.config.source_path)
            .environment_setup(
                &self.config.packages_path(),
                self.config.virtual_env_name.as_deref(),
            );

        let plan = self.resolve_startup()?;
        builder.line(&plan.command);

        let _enter = self.span.enter();
        info!(
            app_type = plan.app_type().map(|t| t.name()).unwrap_or(""),
            app_module = plan.detection.as_ref().map(|d| d.module.as_str()).unwrap_or(""),
            venv = self.config.virtual_env_name.as_deref().unwrap_or(""),
            "Finalizing script"
        );

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use std::path::PathBuf;

    fn generator(fs: MockFileSystem, config: GeneratorConfig) -> ScriptGenerator {
        ScriptGenerator::new(config, Arc::new(fs), Span::none())
    }

    fn last_line(script: &str) -> &str {
        script.trim_end_matches('\n').lines().last().unwrap()
    }

    #[test]
    fn test_django_app() {
        let fs = MockFileSystem::new();
        fs.add_file("myproj/wsgi.py");
        fs.add_file("app.py");

        let plan = generator(fs, GeneratorConfig::new("/mock"))
            .resolve_startup()
            .unwrap();

        assert_eq!(plan.app_type(), Some(AppType::Django));
        assert_eq!(plan.command, "GUNICORN_CMD_ARGS=\"--chdir=/mock\" gunicorn myproj.wsgi");
    }

    #[test]
    fn test_flask_app() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py");

        let plan = generator(fs, GeneratorConfig::new("/mock"))
            .resolve_startup()
            .unwrap();

        assert_eq!(plan.app_type(), Some(AppType::Flask));
        assert_eq!(plan.detection.unwrap().module, "app:app");
    }

    #[test]
    fn test_default_app() {
        let fs = MockFileSystem::new();
        fs.add_file("README.md");

        let config = GeneratorConfig::new("/mock")
            .with_default_app_dir("/opt/defaultsite")
            .with_default_app_module("application:app")
            .with_bind_host(Some(":8080".to_string()));
        let plan = generator(fs, config).resolve_startup().unwrap();

        let detection = plan.detection.unwrap();
        assert_eq!(detection.app_type, AppType::Default);
        assert_eq!(detection.module, "application:app");
        assert_eq!(detection.app_dir, PathBuf::from("/opt/defaultsite"));
        assert_eq!(
            plan.command,
            "GUNICORN_CMD_ARGS=\"--bind=:8080 --chdir=/opt/defaultsite\" gunicorn application:app"
        );
    }

    #[test]
    fn test_user_command_skips_detection() {
        // The source directory does not exist; any read would fail.
        let fs = MockFileSystem::new();
        let config = GeneratorConfig::new("/missing")
            .with_user_startup_command(Some("python manage.py runserver".to_string()));

        let script = generator(fs, config).generate_entrypoint_script().unwrap();

        assert_eq!(last_line(&script), "python manage.py runserver");
        assert!(!script.contains("gunicorn app"));
    }

    #[test]
    fn test_listing_failure_aborts_generation() {
        let fs = MockFileSystem::new();
        fs.deny_read("/mock");

        let err = generator(fs, GeneratorConfig::new("/mock"))
            .generate_entrypoint_script()
            .unwrap_err();

        assert!(matches!(err, GeneratorError::ListDirectory { .. }));
    }

    #[test]
    fn test_script_layout() {
        let fs = MockFileSystem::new();
        fs.add_file("server.py");

        let config = GeneratorConfig::new("/mock")
            .with_virtual_env_name(Some("antenv".to_string()))
            .with_bind_host(Some("0.0.0.0:8000".to_string()));
        let script = generator(fs, config).generate_entrypoint_script().unwrap();

        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("cd /mock\n"));
        assert!(script.contains("APP_PACKAGES_PATH=/mock/__oryx_packages__\n"));
        assert!(script.contains("elif [ -d antenv ]; then\n"));
        assert!(script.ends_with(
            "fi\nGUNICORN_CMD_ARGS=\"--bind=0.0.0.0:8000 --chdir=/mock\" gunicorn server:app\n"
        ));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let fs = MockFileSystem::new();
        fs.add_file("mysite/wsgi.py");
        let generator = generator(fs, GeneratorConfig::new("/mock"));

        let first = generator.generate_entrypoint_script().unwrap();
        let second = generator.generate_entrypoint_script().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_detectors() {
        let fs = MockFileSystem::new();
        fs.add_file("myproj/wsgi.py");

        let plan = generator(fs, GeneratorConfig::new("/mock"))
            .with_detectors(DetectorChain::new())
            .resolve_startup()
            .unwrap();

        assert_eq!(plan.app_type(), Some(AppType::Default));
    }
}
