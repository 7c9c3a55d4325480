//! Django-style detection: a `wsgi.py` inside a first-level project directory

use super::{AppType, Detection, DetectionContext, DetectionRule};
use crate::error::GeneratorError;
use tracing::debug;

pub const WSGI_FILE_NAME: &str = "wsgi.py";

pub struct DjangoRule;

impl DetectionRule for DjangoRule {
    fn app_type(&self) -> AppType {
        AppType::Django
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Result<Option<Detection>, GeneratorError> {
        let root_entries = ctx
            .file_system
            .read_dir(ctx.source_path)
            .map_err(|e| GeneratorError::list_directory(ctx.source_path, e))?;

        for dir in root_entries.iter().filter(|e| e.is_dir()) {
            if ctx.virtual_env_name == Some(dir.file_name()) {
                debug!(dir = dir.file_name(), "Skipping virtual environment directory");
                continue;
            }

            let sub_entries = ctx
                .file_system
                .read_dir(dir.path())
                .map_err(|e| GeneratorError::list_directory(dir.path(), e))?;

            let has_wsgi = sub_entries
                .iter()
                .any(|e| !e.is_dir() && e.file_name() == WSGI_FILE_NAME);

            if has_wsgi {
                return Ok(Some(Detection {
                    app_type: AppType::Django,
                    module: format!("{}.wsgi", dir.file_name()),
                    app_dir: ctx.source_path.to_path_buf(),
                }));
            }
        }

        Ok(None)
    }
}
