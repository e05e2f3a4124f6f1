use clap::Parser;
use divvy::args::{AddSubcommand, Args, Command, EditSubcommand, ListSubcommand, RemoveSubcommand};
use divvy::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().divvy_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.currency()).await?.print(),

        Command::Add(add_args) => {
            let config = Config::load(home).await?;
            match add_args.subcommand() {
                AddSubcommand::Person(args) => {
                    commands::add_person(config, args.clone()).await?.print()
                }
                AddSubcommand::Expense(args) => {
                    commands::add_expense(config, args.clone()).await?.print()
                }
            }
        }

        Command::Edit(edit_args) => {
            let config = Config::load(home).await?;
            match edit_args.subcommand() {
                EditSubcommand::Expense(args) => {
                    commands::edit_expense(config, args.clone()).await?.print()
                }
            }
        }

        Command::Remove(remove_args) => {
            let config = Config::load(home).await?;
            match remove_args.subcommand() {
                RemoveSubcommand::Person(args) => {
                    commands::remove_person(config, args.clone()).await?.print()
                }
                RemoveSubcommand::Expense(args) => {
                    commands::remove_expense(config, args.clone()).await?.print()
                }
            }
        }

        Command::List(list_args) => {
            let config = Config::load(home).await?;
            match list_args.subcommand() {
                ListSubcommand::People => commands::list_people(config).await?.print(),
                ListSubcommand::Expenses(args) => {
                    commands::list_expenses(config, args.clone()).await?.print()
                }
            }
        }

        Command::Balances => {
            let config = Config::load(home).await?;
            commands::balances(config).await?.print()
        }

        Command::Settle(settle_args) => {
            let config = Config::load(home).await?;
            match settle_args.pay() {
                Some(number) => commands::settle_pay(config, number).await?.print(),
                None => commands::settle(config).await?.print(),
            }
        }

        Command::Currency(currency_args) => {
            let config = Config::load(home).await?;
            commands::currency(config, currency_args.clone())
                .await?
                .print()
        }

        Command::Export(export_args) => {
            let config = Config::load(home).await?;
            commands::export(config, export_args.clone()).await?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
