use std::time::Duration;

use clap::Parser;
use env_logger::Env;

use portfolio_ui::cli::{handle_config_action, run_page, Args, Command, RunOptions};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Command::Run {
            page,
            script,
            until,
            realtime,
            base_url,
            config,
        } => {
            let options = RunOptions {
                page,
                script,
                until: until.map(Duration::from_millis),
                realtime,
                base_url,
                config,
            };
            if let Err(e) = run_page(options).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Config { action } => handle_config_action(action),
    }
}
