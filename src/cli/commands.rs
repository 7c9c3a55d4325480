use crate::config::GeneratorConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generates startup scripts for Python web applications
#[derive(Parser, Debug)]
#[command(
    name = "pystartup",
    about = "Generates startup scripts for Python web applications",
    version,
    long_about = "pystartup inspects an application directory, detects Django- or \
                  Flask-style layouts, and writes a /bin/sh script that prepares \
                  the Python environment and launches the app with gunicorn."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate the startup script",
        long_about = "Detects the app type and writes the startup script.\n\n\
                      Examples:\n  \
                      pystartup script /home/site/wwwroot\n  \
                      pystartup script --bind-port 8000 -o /tmp/startup.sh\n  \
                      pystartup script --user-startup-command 'python run.py'"
    )]
    Script(ScriptArgs),

    #[command(
        about = "Show which app type and command would be used",
        long_about = "Runs detection only and prints the result.\n\n\
                      Examples:\n  \
                      pystartup detect\n  \
                      pystartup detect /home/site/wwwroot --format json"
    )]
    Detect(DetectArgs),
}

/// Options shared by every subcommand that builds a generator config
#[derive(Args, Debug, Clone)]
pub struct AppArgs {
    #[arg(
        value_name = "APP_PATH",
        help = "Path to the application (defaults to current directory)"
    )]
    pub app_path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "COMMAND",
        help = "Startup command to use verbatim instead of detection"
    )]
    pub user_startup_command: Option<String>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Directory of the app served when nothing is detected"
    )]
    pub default_app_dir: Option<PathBuf>,

    #[arg(
        long,
        value_name = "MODULE",
        help = "Module served when nothing is detected (e.g. application:app)"
    )]
    pub default_app_module: Option<String>,

    #[arg(
        long,
        value_name = "HOST",
        conflicts_with = "bind_port",
        help = "Address gunicorn binds to (e.g. 0.0.0.0:8000)"
    )]
    pub bind: Option<String>,

    #[arg(long, value_name = "PORT", help = "Port gunicorn binds to on all interfaces")]
    pub bind_port: Option<u16>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Legacy virtual environment directory inside the app"
    )]
    pub virtual_env_name: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Packages directory inside the app"
    )]
    pub packages_dir: Option<String>,
}

impl AppArgs {
    /// Environment defaults overridden by whatever was given on the command line
    pub fn to_config(&self, current_dir: PathBuf) -> GeneratorConfig {
        let source_path = self.app_path.clone().unwrap_or(current_dir);
        let mut config = GeneratorConfig::from_env(source_path)
            .with_user_startup_command(self.user_startup_command.clone());

        if let Some(dir) = &self.default_app_dir {
            config = config.with_default_app_dir(dir.clone());
        }
        if let Some(module) = &self.default_app_module {
            config = config.with_default_app_module(module.clone());
        }
        if let Some(bind) = self.bind_host() {
            config = config.with_bind_host(Some(bind));
        }
        if self.virtual_env_name.is_some() {
            config = config.with_virtual_env_name(self.virtual_env_name.clone());
        }
        if let Some(dir) = &self.packages_dir {
            config = config.with_packages_dir(dir.clone());
        }

        config
    }

    fn bind_host(&self) -> Option<String> {
        self.bind
            .clone()
            .or_else(|| self.bind_port.map(|port| format!(":{}", port)))
    }
}

#[derive(Args, Debug, Clone)]
pub struct ScriptArgs {
    #[command(flatten)]
    pub app: AppArgs,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the script to a file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    #[command(flatten)]
    pub app: AppArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
