//! Pure functions that turn a pile of expenses into who-owes-whom.
//!
//! [`calculate_balances`] nets every expense into a per-person balance and
//! [`calculate_settlements`] turns those balances into a minimal payment
//! plan. Neither touches storage, so both can run on any snapshot of the
//! ledger.

mod balance;
mod settle;

pub use balance::{calculate_balances, net_total};
pub use settle::calculate_settlements;
