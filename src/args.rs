//! These structs provide the CLI interface for the divvy CLI.

use crate::currency::Currency;
use crate::model::{Amount, Category};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// divvy: A command-line tool for splitting group expenses.
///
/// Track who paid for what within a group of people, see everyone's running
/// balance, and get a short list of payments that settles the whole group up.
///
/// Data lives in plain JSON files under a home directory ($HOME/divvy by
/// default, override with --divvy-home or DIVVY_HOME) so it is easy to
/// inspect, back up and put under version control. Run `divvy init` once to
/// create the directory, then `divvy add person` and `divvy add expense` to
/// start recording.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration files.
    ///
    /// This is the first command you should run when setting up the divvy CLI.
    /// It creates the divvy home directory (--divvy-home, or $HOME/divvy by
    /// default), an empty ledger, and a config file holding the display
    /// currency.
    Init(InitArgs),
    /// Add a person or an expense to the ledger.
    Add(AddArgs),
    /// Edit an expense.
    Edit(EditArgs),
    /// Remove a person or an expense from the ledger.
    Remove(RemoveArgs),
    /// List the people or the expenses in the ledger.
    List(ListArgs),
    /// Show each person's net balance.
    Balances,
    /// Suggest payments that settle the group, or record one of them.
    Settle(SettleArgs),
    /// Show or change the display currency.
    Currency(CurrencyArgs),
    /// Export the ledger as JSON or CSV.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where divvy data and configuration is held. Defaults to ~/divvy
    #[arg(long, env = "DIVVY_HOME", default_value_t = default_divvy_home())]
    divvy_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, divvy_home: PathBuf) -> Self {
        Self {
            log_level,
            divvy_home: divvy_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn divvy_home(&self) -> &DisplayPath {
        &self.divvy_home
    }
}

/// Args for the `divvy init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The currency amounts are displayed in. One of:
    /// USD, EUR, GBP, JPY, INR, CAD, AUD, CNY
    #[arg(long, default_value_t = Currency::Usd)]
    currency: Currency,
}

impl InitArgs {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

/// Args for the `divvy add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[command(subcommand)]
    subcommand: AddSubcommand,
}

impl AddArgs {
    pub fn new(subcommand: AddSubcommand) -> Self {
        Self { subcommand }
    }

    pub fn subcommand(&self) -> &AddSubcommand {
        &self.subcommand
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AddSubcommand {
    /// Add a person to the group.
    Person(AddPersonArgs),
    /// Record an expense.
    Expense(AddExpenseArgs),
}

/// Args for the `divvy add person` command.
#[derive(Debug, Parser, Clone)]
pub struct AddPersonArgs {
    /// The person's name. Must be unique within the group.
    name: String,

    /// A display color in '#RRGGBB' form. Defaults to the next free palette color.
    #[arg(long)]
    color: Option<String>,
}

impl AddPersonArgs {
    pub fn new(name: impl Into<String>, color: Option<String>) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// Args for the `divvy add expense` command.
#[derive(Debug, Parser, Clone)]
pub struct AddExpenseArgs {
    /// What the expense was for, e.g. "Dinner at Luigi's".
    title: String,

    /// The total amount, e.g. 42.50
    #[arg(long)]
    amount: Amount,

    /// The name (or id) of the person who paid.
    #[arg(long)]
    paid_by: String,

    /// The expense category. One of:
    /// Food, Transport, Shopping, Entertainment, Bills, Other
    #[arg(long, default_value_t = Category::Other)]
    category: Category,

    /// How to divide the amount: "equal" or "custom"
    #[arg(long, default_value_t = SplitMethod::Equal)]
    split: SplitMethod,

    /// For an equal split: who shares the expense, as a comma-separated list
    /// of names. Defaults to everyone in the group.
    #[arg(long, value_delimiter = ',')]
    among: Option<Vec<String>>,

    /// For a custom split: one person's share as NAME=AMOUNT, e.g.
    /// --share Alice=12.50. Repeat the flag for each person.
    #[arg(long = "share")]
    shares: Vec<String>,

    /// A free-form note.
    #[arg(long)]
    note: Option<String>,
}

impl AddExpenseArgs {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        amount: Amount,
        paid_by: impl Into<String>,
        category: Category,
        split: SplitMethod,
        among: Option<Vec<String>>,
        shares: Vec<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            paid_by: paid_by.into(),
            category,
            split,
            among,
            shares,
            note,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn paid_by(&self) -> &str {
        &self.paid_by
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn split(&self) -> SplitMethod {
        self.split
    }

    pub fn among(&self) -> Option<&[String]> {
        self.among.as_deref()
    }

    pub fn shares(&self) -> &[String] {
        &self.shares
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Args for the `divvy edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    #[command(subcommand)]
    subcommand: EditSubcommand,
}

impl EditArgs {
    pub fn new(subcommand: EditSubcommand) -> Self {
        Self { subcommand }
    }

    pub fn subcommand(&self) -> &EditSubcommand {
        &self.subcommand
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum EditSubcommand {
    /// Edit an expense.
    Expense(EditExpenseArgs),
}

/// Args for the `divvy edit expense` command.
#[derive(Debug, Parser, Clone)]
pub struct EditExpenseArgs {
    /// The id of the expense to edit, as shown by `divvy list expenses`.
    id: String,

    /// A new title.
    #[arg(long)]
    title: Option<String>,

    /// A new total amount. Changing the amount requires respecifying the
    /// split with --split (plus --among or --share).
    #[arg(long)]
    amount: Option<Amount>,

    /// A new payer, by name or id.
    #[arg(long)]
    paid_by: Option<String>,

    /// A new category. One of:
    /// Food, Transport, Shopping, Entertainment, Bills, Other
    #[arg(long)]
    category: Option<Category>,

    /// Redivide the amount: "equal" or "custom"
    #[arg(long)]
    split: Option<SplitMethod>,

    /// For an equal split: who shares the expense, as a comma-separated list
    /// of names. Defaults to everyone in the group.
    #[arg(long, value_delimiter = ',')]
    among: Option<Vec<String>>,

    /// For a custom split: one person's share as NAME=AMOUNT. Repeat the flag
    /// for each person.
    #[arg(long = "share")]
    shares: Vec<String>,

    /// A new note. Pass an empty string to clear the note.
    #[arg(long)]
    note: Option<String>,
}

impl EditExpenseArgs {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: Option<String>,
        amount: Option<Amount>,
        paid_by: Option<String>,
        category: Option<Category>,
        split: Option<SplitMethod>,
        among: Option<Vec<String>>,
        shares: Vec<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title,
            amount,
            paid_by,
            category,
            split,
            among,
            shares,
            note,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn paid_by(&self) -> Option<&str> {
        self.paid_by.as_deref()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn split(&self) -> Option<SplitMethod> {
        self.split
    }

    pub fn among(&self) -> Option<&[String]> {
        self.among.as_deref()
    }

    pub fn shares(&self) -> &[String] {
        &self.shares
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Args for the `divvy remove` command.
#[derive(Debug, Parser, Clone)]
pub struct RemoveArgs {
    #[command(subcommand)]
    subcommand: RemoveSubcommand,
}

impl RemoveArgs {
    pub fn new(subcommand: RemoveSubcommand) -> Self {
        Self { subcommand }
    }

    pub fn subcommand(&self) -> &RemoveSubcommand {
        &self.subcommand
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum RemoveSubcommand {
    /// Remove a person. Refused while any expense still references them.
    Person(RemovePersonArgs),
    /// Remove an expense.
    Expense(RemoveExpenseArgs),
}

/// Args for the `divvy remove person` command.
#[derive(Debug, Parser, Clone)]
pub struct RemovePersonArgs {
    /// The name (or id) of the person to remove.
    person: String,
}

impl RemovePersonArgs {
    pub fn new(person: impl Into<String>) -> Self {
        Self {
            person: person.into(),
        }
    }

    pub fn person(&self) -> &str {
        &self.person
    }
}

/// Args for the `divvy remove expense` command.
#[derive(Debug, Parser, Clone)]
pub struct RemoveExpenseArgs {
    /// The id of the expense to remove, as shown by `divvy list expenses`.
    id: String,
}

impl RemoveExpenseArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `divvy list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    #[command(subcommand)]
    subcommand: ListSubcommand,
}

impl ListArgs {
    pub fn new(subcommand: ListSubcommand) -> Self {
        Self { subcommand }
    }

    pub fn subcommand(&self) -> &ListSubcommand {
        &self.subcommand
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ListSubcommand {
    /// List everyone in the group with what they paid and their balance.
    People,
    /// List expenses, newest first.
    Expenses(ListExpensesArgs),
}

/// Args for the `divvy list expenses` command.
#[derive(Debug, Parser, Clone)]
pub struct ListExpensesArgs {
    /// Show at most this many expenses.
    #[arg(long)]
    limit: Option<usize>,
}

impl ListExpensesArgs {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Args for the `divvy settle` command.
#[derive(Debug, Parser, Clone)]
pub struct SettleArgs {
    /// Record suggestion number N from the suggestion list as a completed
    /// payment. The payment is stored as a settlement expense, which zeroes
    /// the pair's debt when balances are recomputed.
    #[arg(long)]
    pay: Option<usize>,
}

impl SettleArgs {
    pub fn new(pay: Option<usize>) -> Self {
        Self { pay }
    }

    pub fn pay(&self) -> Option<usize> {
        self.pay
    }
}

/// Args for the `divvy currency` command.
#[derive(Debug, Parser, Clone)]
pub struct CurrencyArgs {
    /// Switch the display currency. One of:
    /// USD, EUR, GBP, JPY, INR, CAD, AUD, CNY
    #[arg(long)]
    set: Option<Currency>,
}

impl CurrencyArgs {
    pub fn new(set: Option<Currency>) -> Self {
        Self { set }
    }

    pub fn set(&self) -> Option<Currency> {
        self.set
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    #[default]
    Equal,
    Custom,
}

serde_plain::derive_display_from_serialize!(SplitMethod);
serde_plain::derive_fromstr_from_deserialize!(SplitMethod);

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

serde_plain::derive_display_from_serialize!(ExportFormat);
serde_plain::derive_fromstr_from_deserialize!(ExportFormat);

/// Args for the `divvy export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The output format: "json" or "csv"
    #[arg(long, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Write to this file instead of printing.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(format: ExportFormat, output: Option<PathBuf>) -> Self {
        Self { format, output }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

fn default_divvy_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("divvy"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --divvy-home or DIVVY_HOME instead of relying on the default \
                divvy home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("divvy")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
