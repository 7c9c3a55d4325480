//! gunicorn launch command formatting

use std::path::Path;

pub const GUNICORN_ARGS_ENV: &str = "GUNICORN_CMD_ARGS";

/// Builds the gunicorn invocation for `module`.
///
/// `--bind` and `--chdir` go through `GUNICORN_CMD_ARGS`, which gunicorn
/// parses like its own command line. With neither set the bare command is
/// returned.
pub fn gunicorn_command(module: &str, bind_host: Option<&str>, app_dir: Option<&Path>) -> String {
    let mut args = Vec::new();

    if let Some(bind) = bind_host.filter(|b| !b.is_empty()) {
        args.push(format!("--bind={}", bind));
    }
    if let Some(dir) = app_dir.filter(|d| !d.as_os_str().is_empty()) {
        args.push(format!("--chdir={}", dir.display()));
    }

    if args.is_empty() {
        format!("gunicorn {}", module)
    } else {
        format!("{}=\"{}\" gunicorn {}", GUNICORN_ARGS_ENV, args.join(" "), module)
    }
}
