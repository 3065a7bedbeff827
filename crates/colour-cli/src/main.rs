//! Colour CLI binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use colour_cli::cli::{Cli, Commands};
use colour_cli::commands;
use colour_cli::error::CliResult;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("colour_cli=debug,colour_client=debug,colour_chain=debug,colour_core=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    match &cli.command {
        Commands::Init => commands::init::run(cli, &mut stdout),
        Commands::List => commands::list::run(cli, &mut stdout),
        Commands::Show { hash } => commands::show::run(cli, hash, &mut stdout),
        Commands::Showall { mode } => commands::showall::run(cli, mode, &mut stdout),
        Commands::Purchase => commands::unimplemented("purchase"),
        Commands::Vote => commands::unimplemented("vote"),
        Commands::Customer => commands::unimplemented("customer"),
        Commands::Subscription => commands::unimplemented("subscription"),
    }
}
