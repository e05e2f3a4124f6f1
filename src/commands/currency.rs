//! The `divvy currency` command.

use crate::args::CurrencyArgs;
use crate::commands::Out;
use crate::{Config, Currency, Result};

/// Shows the display currency, or switches it when `--set` is given.
///
/// The currency is a display setting. Stored amounts are plain decimal numbers and switching
/// never converts them.
pub async fn currency(mut config: Config, args: CurrencyArgs) -> Result<Out<Currency>> {
    match args.set() {
        Some(new) => {
            config.set_currency(new).await?;
            let message = format!("Currency set to {} ({})", new.code(), new.symbol());
            Ok(Out::new(message, new))
        }
        None => {
            let current = config.currency();
            let mut lines = vec![
                format!("Current currency: {} ({})", current.code(), current.symbol()),
                "Available:".to_string(),
            ];
            for currency in Currency::ALL {
                lines.push(format!(
                    "  {} ({}) {}",
                    currency.code(),
                    currency.symbol(),
                    currency.name()
                ));
            }
            Ok(Out::new(lines.join("\n"), current))
        }
    }
}
