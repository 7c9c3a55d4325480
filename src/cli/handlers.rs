//! Subcommand handlers. Each returns the process exit code.

use super::commands::{AppArgs, DetectArgs, ScriptArgs};
use super::output::OutputFormatter;
use crate::config::GeneratorConfig;
use crate::generator::ScriptGenerator;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_CONFIG: i32 = 2;

pub fn handle_script(args: &ScriptArgs) -> i32 {
    let config = match load_config(&args.app) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let script = match ScriptGenerator::with_real_fs(config).generate_entrypoint_script() {
        Ok(script) => script,
        Err(e) => {
            error!("Script generation failed: {}", e);
            return EXIT_FAILURE;
        }
    };

    let result = match &args.output {
        Some(path) => write_script(path, &script).map(|_| {
            info!(path = %path.display(), "Wrote startup script");
        }),
        None => {
            print!("{}", script);
            Ok(())
        }
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            EXIT_FAILURE
        }
    }
}

pub fn handle_detect(args: &DetectArgs) -> i32 {
    let config = match load_config(&args.app) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let plan = match ScriptGenerator::with_real_fs(config).resolve_startup() {
        Ok(plan) => plan,
        Err(e) => {
            error!("Detection failed: {}", e);
            return EXIT_FAILURE;
        }
    };

    match OutputFormatter::new(args.format.into()).format(&plan) {
        Ok(output) => {
            print!("{}", output);
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            EXIT_FAILURE
        }
    }
}

fn load_config(args: &AppArgs) -> std::result::Result<GeneratorConfig, i32> {
    let current_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("Failed to determine current directory: {}", e);
            return Err(EXIT_FAILURE);
        }
    };

    let config = args.to_config(current_dir);
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(EXIT_INVALID_CONFIG);
    }
    Ok(config)
}

/// Writes the script and marks it executable
pub fn write_script(path: &Path, script: &str) -> Result<()> {
    fs::write(path, script)
        .with_context(|| format!("Failed to write startup script to {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to make {} executable", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_script() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("startup.sh");

        write_script(&path, "#!/bin/sh\ngunicorn app:app\n").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "#!/bin/sh\ngunicorn app:app\n"
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_write_script_missing_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/startup.sh");

        let err = write_script(&path, "#!/bin/sh\n").unwrap_err();
        assert!(err.to_string().contains("Failed to write startup script"));
    }
}
