use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod commands;
mod error;
mod guard;
mod handlers;
mod state;

#[cfg(test)]
mod tests;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(
            "devlog=info".parse().expect("static directive parses"),
        ))
        .init();

    let result = match cli.command {
        Some(Commands::Serve(args)) => commands::serve::run(args).await,
        Some(Commands::Health(args)) => commands::health::run(&args).await,
        None => {
            eprintln!("No command given. Run `devlog serve --help` to start the server.");
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
