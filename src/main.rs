use clap::Parser;
use sourdough_planner::app::{handle_fatal_error, init_logging, AppConfig};
use sourdough_planner::cli::{execute_command, Cli};
use sourdough_planner::config::load_planner_config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let config = match load_planner_config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&AppConfig::new(verbose));
            handle_fatal_error(e.into(), verbose)
        }
    };

    init_logging(&AppConfig::new(verbose).with_configured_level(config.log_level.as_str()));

    if let Err(e) = execute_command(cli, config).await {
        handle_fatal_error(e, verbose)
    }
}
