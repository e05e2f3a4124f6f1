//! Crate-wide error aliases. All fallible paths return `anyhow` errors with context attached at
//! the point of failure.

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
