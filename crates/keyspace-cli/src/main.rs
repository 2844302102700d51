use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use keyspace_core::config::KeyspaceParams;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON preset with positions/depths/macs; explicit flags override it.
    #[arg(global = true, short, long)]
    params: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count legal keys for one parameter set.
    Count(cmd::count::CountArgs),
    /// Cross-check every engine over a grid of small parameter sets.
    Verify(cmd::verify::VerifyArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match &cli.command {
        Commands::Count(args) => {
            let sub_matches = matches
                .subcommand_matches("count")
                .unwrap_or_else(|| unreachable!("count subcommand parsed without matches"));

            let params = match &cli.params {
                Some(path) => {
                    info!("📂 Loading parameters from: {}", path);
                    KeyspaceParams::load_from_file(path).map(|mut p| {
                        p.merge_from_cli(&args.config.params, sub_matches);
                        p
                    })
                }
                None => Ok(args.config.params),
            };

            params.and_then(|p| cmd::count::run(args, p)).map(|_| true)
        }
        Commands::Verify(args) => cmd::verify::run(args),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => {
            error!("❌ Engines disagree; see the report above.");
            process::exit(2);
        }
        Err(e) => {
            error!("❌ {}", e);
            process::exit(1);
        }
    }
}
