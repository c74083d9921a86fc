use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lunchline", version, about = "Lunchline lunch-order CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu
    Menu {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate an order right now (or at --at) and print the verdict as JSON
    Status {
        #[command(flatten)]
        order: commands::OrderArgs,
    },
    /// Print the order message
    Compose {
        #[command(flatten)]
        order: commands::OrderArgs,
    },
    /// Send the order message through the chat link
    Send {
        #[command(flatten)]
        order: commands::OrderArgs,
        #[command(flatten)]
        options: commands::send::SendOptions,
    },
    /// Re-evaluate periodically and print one JSON event per cycle
    Watch {
        #[command(flatten)]
        order: commands::OrderArgs,
        #[command(flatten)]
        options: commands::watch::WatchOptions,
    },
    /// Configuration management
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Menu { json } => commands::menu::run(json),
        Commands::Status { order } => commands::status::run(order),
        Commands::Compose { order } => commands::compose::run(order),
        Commands::Send { order, options } => commands::send::run(order, options),
        Commands::Watch { order, options } => commands::watch::run(order, options),
        Commands::Config(args) => commands::config::run(args),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "lunchline", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
