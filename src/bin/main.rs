use std::error::Error;

use chrono::Utc;
use clap::Parser;
use hs_jwt::commands::sign::SignCommand;
use hs_jwt::parameters::{Commands, build_claims, build_signer};
use tracing::{Level, debug};

#[derive(Parser, Debug)]
#[command(name = "hs-jwt-cli", version, about)]
struct Cli {
    /// Maximum level of the log events written to stderr
    #[arg(long, global = true, default_value_t = Level::WARN)]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    // A missing .env file is fine, the secret may come from elsewhere.
    match dotenvy::dotenv() {
        Ok(path) => debug!("loaded environment from {}", path.display()),
        Err(e) => debug!("no .env file loaded: {e}"),
    }

    match cli.command {
        Commands::Sign(args) => {
            let claims = build_claims(&args.claims, Utc::now())?;
            let signer = build_signer(&args)?;
            let output = SignCommand::new(signer).run(&claims, args.output_format)?;
            println!("{output}");
            Ok(())
        }
    }
}
