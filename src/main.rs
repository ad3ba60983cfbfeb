use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use budget_tracker::{
    Config, Database, Error, ErrorKind, TransactionId, TransactionType,
    config::DEFAULT_CONFIG_FILE,
    db::repository,
    operations::{
        add::{TransactionInput, add_transaction_to_db},
        display::{format_summary, format_table, format_transaction},
        edit::{EditInput, edit_transaction_in_db},
        export::{DEFAULT_CSV_FILENAME, export_transactions_to_csv},
        import::{ImportFormat, import_transactions_to_db},
        list::{ListArgs, list_transactions_from_db},
        plot::{expenses_by_category, run_plot},
        remove::{RemoveOutcome, remove_transaction_from_db},
        summary::build_summary,
    },
    query::FilterInput,
};

/// Track income and expenses from the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// File path to the JSON settings file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the transactions table if it does not exist yet.
    InitDb,
    /// Record money coming in.
    AddIncome(AddArgs),
    /// Record money going out.
    AddExpense(AddArgs),
    /// Show a single transaction.
    GetTransaction { id: TransactionId },
    /// List transactions, optionally filtered and ordered.
    GetTransactions(ListOptions),
    /// Show income, expense and net totals.
    ViewSummary(SummaryOptions),
    /// Change some fields of a stored transaction.
    EditTransaction {
        id: TransactionId,
        #[command(flatten)]
        fields: EditOptions,
    },
    /// Delete a transaction, or all of them with -1.
    DeleteTransaction {
        #[arg(allow_negative_numbers = true)]
        id: TransactionId,
    },
    /// Update the settings file.
    Configure {
        #[arg(long)]
        db_path: Option<PathBuf>,
        #[arg(long)]
        currency_symbol: Option<String>,
    },
    /// Write transactions to a CSV file.
    ExportCsv {
        #[command(flatten)]
        list: ListOptions,
        #[arg(long, default_value = DEFAULT_CSV_FILENAME)]
        filename: PathBuf,
    },
    /// Draw a bar chart of expenses by category.
    PlotExpenses {
        /// Only include expenses from this month (YYYY-MM).
        #[arg(long)]
        month: Option<String>,
    },
    /// Bulk load transactions from a JSON or CSV file.
    Seed { file: PathBuf },
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    amount: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Defaults to today (YYYY-MM-DD).
    #[arg(long)]
    date: Option<String>,
}

#[derive(Args, Debug)]
struct ListOptions {
    #[arg(long)]
    start_date: Option<String>,
    #[arg(long)]
    end_date: Option<String>,
    /// MM (with --year) or YYYY-MM.
    #[arg(long)]
    month: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// income or expense.
    #[arg(long = "type")]
    transaction_type: Option<String>,
    /// date, description, category, amount or type.
    #[arg(long)]
    order_by: Option<String>,
    /// asc or desc.
    #[arg(long)]
    order_direction: Option<String>,
}

impl From<ListOptions> for ListArgs {
    fn from(options: ListOptions) -> Self {
        Self {
            filter: FilterInput {
                start_date: options.start_date,
                end_date: options.end_date,
                month: options.month,
                year: options.year,
                category: options.category,
                transaction_type: options.transaction_type,
            },
            order_by: options.order_by,
            order_direction: options.order_direction,
        }
    }
}

#[derive(Args, Debug)]
struct SummaryOptions {
    #[arg(long)]
    month: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long = "type")]
    transaction_type: Option<String>,
    /// Break expenses down by category.
    #[arg(long)]
    expense: bool,
    /// Break income down by category.
    #[arg(long)]
    income: bool,
}

#[derive(Args, Debug)]
struct EditOptions {
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    amount: Option<String>,
    #[arg(long = "type")]
    transaction_type: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.kind() {
                ErrorKind::Validation => eprintln!("Error: {error}"),
                ErrorKind::NotFound => eprintln!("Not found: {error}"),
                ErrorKind::Store => eprintln!("Something went wrong: {error}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::load(&cli.config)?;

    let symbol = config.currency_symbol.as_str();
    // Configure must not create a database at the old path.
    let open = || Database::open(&config.db_path);

    match cli.command {
        Command::Configure {
            db_path,
            currency_symbol,
        } => configure(&cli.config, &config, db_path, currency_symbol)?,
        Command::InitDb => {
            println!("Database initialized at {}.", open()?.path().display());
        }
        Command::AddIncome(args) => add(&open()?, args, TransactionType::Income, symbol)?,
        Command::AddExpense(args) => add(&open()?, args, TransactionType::Expense, symbol)?,
        Command::GetTransaction { id } => match repository::get_transaction(&open()?, id)? {
            Some(transaction) => println!("{}", format_transaction(&transaction, symbol)),
            None => println!("No transaction exists with that ID."),
        },
        Command::GetTransactions(options) => {
            let (filter, transactions) = list_transactions_from_db(&open()?, &options.into())?;
            println!(
                "Found {} transaction(s) ({}):",
                transactions.len(),
                filter.description
            );
            println!("{}", format_table(&transactions, symbol));
        }
        Command::ViewSummary(options) => {
            let filter = FilterInput {
                month: options.month,
                year: options.year,
                category: options.category,
                transaction_type: options.transaction_type,
                ..Default::default()
            };
            let report = build_summary(&open()?, &filter)?;
            println!(
                "{}",
                format_summary(&report, symbol, options.expense, options.income)
            );
        }
        Command::EditTransaction { id, fields } => {
            let input = EditInput {
                date: fields.date,
                description: fields.description,
                category: fields.category,
                amount: fields.amount,
                transaction_type: fields.transaction_type,
            };
            let transaction = edit_transaction_in_db(&open()?, id, &input)?;
            println!("Transaction updated successfully!");
            println!("{}", format_transaction(&transaction, symbol));
        }
        Command::DeleteTransaction { id } => match remove_transaction_from_db(&open()?, id)? {
            RemoveOutcome::All => println!("All transactions deleted."),
            RemoveOutcome::Removed(id) => println!("Transaction {id} deleted."),
            RemoveOutcome::NotFound(id) => return Err(Error::NotFound(id)),
        },
        Command::ExportCsv { list, filename } => {
            let count = export_transactions_to_csv(&open()?, &list.into(), &filename)?;
            println!("Exported {count} transaction(s) to {}.", filename.display());
        }
        Command::PlotExpenses { month } => {
            let plot = expenses_by_category(&open()?, month.as_deref())?;
            if plot.expenses.is_empty() {
                println!("No expenses found for the specified period.");
            } else {
                run_plot(&plot, symbol)?;
            }
        }
        Command::Seed { file } => {
            let format = ImportFormat::from_path(&file);
            let report = import_transactions_to_db(&open()?, format, &file)?;
            println!(
                "Imported {} transaction(s), skipped {}.",
                report.inserted, report.skipped
            );
        }
    }

    Ok(())
}

fn add(
    database: &Database,
    args: AddArgs,
    transaction_type: TransactionType,
    symbol: &str,
) -> Result<(), Error> {
    let input = TransactionInput {
        date: args.date,
        description: args.description,
        category: args.category,
        amount: args.amount,
    };
    let transaction = add_transaction_to_db(database, &input, transaction_type)?;
    println!("Transaction added successfully!");
    println!("{}", format_transaction(&transaction, symbol));
    Ok(())
}

fn configure(
    path: &Path,
    config: &Config,
    db_path: Option<PathBuf>,
    currency_symbol: Option<String>,
) -> Result<(), Error> {
    if db_path.is_none() && currency_symbol.is_none() {
        return Err(Error::InvalidArgument(
            "give --db-path and/or --currency-symbol".to_string(),
        ));
    }

    config.with_changes(db_path, currency_symbol).save(path)?;
    println!("Configuration saved successfully!");
    Ok(())
}
