mod backup;
mod cli;
mod error;
mod export;
mod fmt;
mod models;
mod notify;
mod picker;
mod reports;
mod selection;
mod settings;
mod store;
mod suggest;
mod tui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use notify::{Notification, NotificationSink, TerminalNotifier};

fn init_logging() {
    let filter = EnvFilter::try_from_env("BUDGET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Add {
            description,
            amount,
            date,
            txn_type,
            category,
        } => cli::transactions::add(&description, &amount, date.as_deref(), txn_type, category),
        Commands::Delete { id, yes } => cli::transactions::delete(id, yes),
        Commands::List { limit } => cli::transactions::list(limit),
        Commands::Summary => cli::summary::summary(),
        Commands::Chart { kind, save } => cli::summary::chart(kind, save),
        Commands::Suggest {
            term,
            field,
            txn_type,
            scores,
            amount,
            all,
        } => match amount {
            Some(amount) => cli::suggest::similar(&amount),
            None if all => cli::suggest::all(field, txn_type),
            None => cli::suggest::suggest(term.as_deref().unwrap_or(""), field, txn_type, scores),
        },
        Commands::Pick { field, txn_type } => cli::suggest::pick(field, txn_type),
        Commands::Export { output } => cli::export::run(output),
        Commands::Backup { output } => cli::backup::backup(output),
        Commands::Restore { file, yes } => cli::backup::restore(&file, yes),
        Commands::Currency { code } => cli::currency::run(code.as_deref()),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        TerminalNotifier.notify(Notification::error(format!("Error: {e}")));
        std::process::exit(1);
    }
}
