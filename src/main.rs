use pystartup::cli::commands::{CliArgs, Commands};
use pystartup::cli::handlers::{handle_detect, handle_script};
use pystartup::util::logging::{self, parse_level, LoggingConfig};
use pystartup::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("pystartup v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Script(script_args) => handle_script(script_args),
        Commands::Detect(detect_args) => handle_detect(detect_args),
    };

    std::process::exit(exit_code);
}

/// Flags override the level from the environment; JSON output stays env-driven.
fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    logging::init_logging(config);
}
