use anyhow::Result;
use clap::{Parser, Subcommand};

use banker::cli::{
    handle_account_command, handle_backends_command, handle_plot_command,
    handle_transaction_command, AccountCommands, PlotArgs, TransactionCommands,
};
use banker::config::{BankerPaths, Settings};
use banker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "banker",
    version,
    about = "Terminal personal-finance manager",
    long_about = "banker records accounts and transactions and plots balance \
                  history with whichever plotting backend this build provides: \
                  a terminal chart, an SVG image or a plain-text table."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// List plotting backends and their availability
    Backends,

    /// Plot balance history
    Plot(PlotArgs),
}

fn main() -> Result<()> {
    banker::logging::init();
    let cli = Cli::parse();

    let paths = BankerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialized banker at: {}", paths.base_dir().display());
            println!();
            println!("Run 'banker account create <NAME>' to add your first account.");
        }
        Some(Commands::Config) => {
            println!("banker configuration");
            println!("====================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!(
                "  Backend order:     {}",
                settings
                    .plot
                    .backend_order
                    .iter()
                    .map(|b| b.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("  Granularity:       {:?}", settings.plot.granularity);
        }
        Some(Commands::Account(cmd)) => handle_account_command(&storage, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Backends) => handle_backends_command(&settings)?,
        Some(Commands::Plot(args)) => handle_plot_command(&storage, &settings, args)?,
        None => {
            println!("banker - terminal personal finance");
            println!();
            println!("Run 'banker --help' for usage information.");
        }
    }

    Ok(())
}
