pub mod args;
mod backup;
pub mod commands;
mod config;
mod currency;
pub mod engine;
mod error;
pub mod model;
mod store;
mod utils;

pub use config::Config;
pub use currency::Currency;
pub use error::Error;
pub use error::Result;
