//! Shell script assembly

use std::path::Path;

/// `.pth` file written into site-packages so the interpreter finds the
/// packages directory
pub const PTH_FILE_NAME: &str = "pystartup.pth";

pub const MISSING_ENV_WARNING: &str =
    "WARNING: Could not find packages folder or virtual environment.";

#[derive(Debug, Default)]
pub struct ScriptBuilder {
    buf: String,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(line.as_ref());
        self.buf.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Shebang plus a `cd` into the app, so relative paths resolve the way
    /// the app expects
    pub fn preamble(&mut self, source_path: &Path) -> &mut Self {
        self.line("#!/bin/sh")
            .blank()
            .line("# Enter the app directory so relative paths resolve as the app expects")
            .line(format!("cd {}", source_path.display()))
            .blank()
    }

    /// Packages directory first, then the legacy virtual environment, then a
    /// warning. The script keeps going with the base interpreter in the last
    /// case.
    pub fn environment_setup(
        &mut self,
        packages_path: &Path,
        virtual_env_name: Option<&str>,
    ) -> &mut Self {
        self.line("# Register the packages folder with the interpreter through a .pth file")
            .line(format!("APP_PACKAGES_PATH={}", packages_path.display()))
            .line("if [ -d $APP_PACKAGES_PATH ]; then")
            .line("  SITE_PACKAGES_PATH=$(python -c \"import site; print(site.getsitepackages()[0])\")")
            .line(format!(
                "  echo $APP_PACKAGES_PATH > $SITE_PACKAGES_PATH\"/{}\"",
                PTH_FILE_NAME
            ))
            .line("  PATH=\"$APP_PACKAGES_PATH/bin:$PATH\"");

        if let Some(venv) = virtual_env_name {
            self.line(format!("elif [ -d {} ]; then", venv))
                .line(format!("  . {}/bin/activate", venv))
                .blank()
                .line("  # Builds that used a virtual environment need gunicorn inside it")
                .line("  pip install gunicorn");
        }

        self.line("else")
            .line(format!("  echo \"{}\"", MISSING_ENV_WARNING))
            .line("fi")
    }

    pub fn build(self) -> String {
        self.buf
    }
}
