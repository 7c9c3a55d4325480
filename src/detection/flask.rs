//! Flask-style detection: a well-known top-level module defining `app`
//!
//! Only the file name is checked. The module is assumed to expose a
//! variable named `app`; its contents are never read.

use super::{AppType, Detection, DetectionContext, DetectionRule};
use crate::error::GeneratorError;
use tracing::info;

/// Candidate entrypoint files, highest priority first
pub const FLASK_CANDIDATES: &[&str] = &["application.py", "app.py", "index.py", "server.py"];

pub struct FlaskRule {
    candidates: Vec<String>,
}

impl FlaskRule {
    pub fn new() -> Self {
        Self::with_candidates(FLASK_CANDIDATES.iter().copied())
    }

    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

impl Default for FlaskRule {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionRule for FlaskRule {
    fn app_type(&self) -> AppType {
        AppType::Flask
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Result<Option<Detection>, GeneratorError> {
        for candidate in &self.candidates {
            let full_path = ctx.source_path.join(candidate);
            if !ctx.file_system.exists(&full_path) {
                continue;
            }

            info!(file = %full_path.display(), "Found file to run the app with");
            let module_name = candidate.strip_suffix(".py").unwrap_or(candidate);
            return Ok(Some(Detection {
                app_type: AppType::Flask,
                module: format!("{}:app", module_name),
                app_dir: ctx.source_path.to_path_buf(),
            }));
        }

        Ok(None)
    }
}
