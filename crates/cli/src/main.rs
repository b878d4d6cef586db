use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use directories::ProjectDirs;

use financeflow_core::models::setup::SetupAmounts;
use financeflow_core::models::transaction::{TransactionDraft, TransactionKind};
use financeflow_core::random::SeededRandom;
use financeflow_core::storage::file::FileStore;
use financeflow_core::storage::manager::StorageManager;
use financeflow_core::FinanceTracker;

mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Personal income/expense dashboard", long_about = None)]
struct Args {
    /// Directory holding the stored transactions and flags.
    #[arg(long, env = "FINANCEFLOW_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Seed for the trend filler bars, for identical output across runs.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the dashboard (default).
    Show,
    /// Record a transaction.
    Add {
        #[arg(long, short)]
        description: String,
        /// Positive amount; "650.50" or "650,50".
        #[arg(long, short)]
        amount: String,
        #[arg(long, short, value_enum, default_value_t = Kind::Expense)]
        kind: Kind,
        #[arg(long, short, default_value = "Outros")]
        category: String,
        /// YYYY-MM-DD, defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// First-run setup: seed the ledger from recurring monthly amounts.
    Setup {
        #[arg(long, default_value_t = 0.0)]
        salary: f64,
        #[arg(long, default_value_t = 0.0)]
        rent: f64,
        #[arg(long, default_value_t = 0.0)]
        transport: f64,
        #[arg(long, default_value_t = 0.0)]
        bills: f64,
    },
    /// List every transaction in entry order.
    List,
    /// Print all transactions as JSON.
    Export,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Income,
    Expense,
}

impl From<Kind> for TransactionKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Income => TransactionKind::Income,
            Kind::Expense => TransactionKind::Expense,
        }
    }
}

fn data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let proj = ProjectDirs::from("com", "FinanceFlow", "financeflow")
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

fn main() -> Result<()> {
    financeflow_core::init_tracing();
    let args = Args::parse();

    let dir = data_dir(args.data_dir)?;
    let store = FileStore::open(&dir)
        .with_context(|| format!("Failed to open data dir {}", dir.display()))?;
    tracing::debug!(dir = %dir.display(), "Opened store");

    let mut tracker = match args.seed {
        Some(seed) => {
            let settings = StorageManager::load_settings(&store);
            FinanceTracker::open_with(Box::new(store), settings, Box::new(SeededRandom::new(seed)))
        }
        None => FinanceTracker::open(Box::new(store)),
    };

    match args.command.unwrap_or(Command::Show) {
        Command::Show => {
            if tracker.needs_setup() {
                println!(
                    "Setup pending: run `financeflow setup --salary ... --rent ... \
                     --transport ... --bills ...`."
                );
                println!();
            }
            render::dashboard(tracker.dashboard());
        }
        Command::Add {
            description,
            amount,
            kind,
            category,
            date,
        } => {
            let mut draft =
                TransactionDraft::from_form(&description, &amount, kind.into(), &category)?;
            if let Some(date) = date {
                draft = draft.on(date);
            }
            let id = tracker.add_transaction(draft)?;
            println!("Recorded transaction {id}");
            println!();
            render::dashboard(tracker.dashboard());
        }
        Command::Setup {
            salary,
            rent,
            transport,
            bills,
        } => {
            let count = tracker.complete_setup(SetupAmounts::new(salary, rent, transport, bills))?;
            println!("Setup complete: {count} recurring entries recorded");
            println!();
            render::dashboard(tracker.dashboard());
        }
        Command::List => render::transactions(tracker.transactions(), tracker.settings()),
        Command::Export => println!("{}", tracker.export_transactions_to_json()?),
    }

    if tracker.has_unsaved_changes() {
        anyhow::bail!("Changes could not be saved to {}", dir.display());
    }
    Ok(())
}
