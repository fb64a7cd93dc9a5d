use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use bookkeeper::cli::{
    handle_audit_command, handle_budget_command, handle_category_command, handle_expense_command,
};
use bookkeeper::config::{paths::BookkeeperPaths, settings::Settings};
use bookkeeper::controller::Controller;
use bookkeeper::services::SystemClock;
use bookkeeper::storage::Storage;

#[derive(Parser)]
#[command(
    name = "bookkeeper",
    version,
    about = "Personal expense tracker with a category tree and day/week/month budgets",
    long_about = "Bookkeeper records expenses under a tree of categories and tracks \
                  spending against daily, weekly and monthly limits. The category \
                  tree is edited as indented text; existing expenses follow their \
                  category by name."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category tree commands
    #[command(subcommand)]
    Category(bookkeeper::cli::CategoryCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(bookkeeper::cli::ExpenseCommands),

    /// Budget limit and spending commands
    #[command(subcommand)]
    Budget(bookkeeper::cli::BudgetCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory, settings and default records
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(settings: &Settings) -> Result<()> {
    let directive = settings.log_filter.as_deref().unwrap_or("bookkeeper=warn");
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(directive))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BookkeeperPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings)?;

    let storage = Storage::open(paths.clone())?;
    let clock = SystemClock;
    let controller = Controller::new(&storage, &settings, &clock);

    match cli.command {
        Some(Commands::Category(cmd)) => handle_category_command(&controller, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&controller, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&controller, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing Bookkeeper at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Day, week and month limits start at 0.");
            println!("Define categories with 'bookkeeper category commit <FILE>', one per line,");
            println!("indenting children with a tab or {} spaces.", settings.indent_width);
        }
        Some(Commands::Config) => {
            println!("Bookkeeper Configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Store file:     {}", paths.store_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Date format:     {}", settings.date_format);
            println!("  Currency symbol: {:?}", settings.currency_symbol);
            println!("  Indent width:    {}", settings.indent_width);
            if let Some(filter) = &settings.log_filter {
                println!("  Log filter:      {}", filter);
            }
        }
        None => {
            println!("Bookkeeper - expenses, categories and budgets");
            println!();
            println!("Run 'bookkeeper --help' for usage information.");
        }
    }

    Ok(())
}
