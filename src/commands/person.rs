//! Person command handlers.

use crate::args::{AddPersonArgs, RemovePersonArgs};
use crate::commands::{resolve_person, save_with_backup, Out};
use crate::engine::calculate_balances;
use crate::model::{validate_color, Amount, Person, PersonId};
use crate::{Config, Result};
use serde::Serialize;

/// Adds a person to the group.
///
/// The name must be unique within the group. When no color is given, the next free color from
/// the palette is assigned so that everyone ends up visually distinct.
///
/// # Errors
/// - Returns an error if the name is empty or already taken, or if the color is malformed.
pub async fn add_person(config: Config, args: AddPersonArgs) -> Result<Out<Person>> {
    let mut ledger = config.store().read().await?;

    let color = match args.color() {
        Some(color) => {
            validate_color(color)?;
            color.to_string()
        }
        None => ledger.next_color().to_string(),
    };

    let person = Person::new(args.name().trim(), color);
    ledger.add_person(person.clone())?;
    save_with_backup(&config, &ledger).await?;

    let message = format!("Added {} to the group", person.name());
    Ok(Out::new(message, person))
}

/// Removes a person from the group.
///
/// # Errors
/// - Returns an error if no person matches, or if any expense still references them. Those
///   expenses carry the person's share of the money, so they must be deleted or edited first.
pub async fn remove_person(config: Config, args: RemovePersonArgs) -> Result<Out<Person>> {
    let mut ledger = config.store().read().await?;

    let id = resolve_person(&ledger, args.person())?;
    let person = ledger.remove_person(&id)?;
    save_with_backup(&config, &ledger).await?;

    let message = format!("Removed {} from the group", person.name());
    Ok(Out::new(message, person))
}

/// A person together with their derived money totals, for `divvy list people`.
#[derive(Debug, Clone, Serialize)]
pub struct PersonSummary {
    id: PersonId,
    name: String,
    color: String,
    paid: Amount,
    balance: Amount,
}

/// Lists everyone in the group with what they paid in total and where their balance stands.
pub async fn list_people(config: Config) -> Result<Out<Vec<PersonSummary>>> {
    let ledger = config.store().read().await?;
    if ledger.people().is_empty() {
        return Ok("No people yet. Add someone with 'divvy add person NAME'.".into());
    }

    let currency = config.currency();
    let balances = calculate_balances(ledger.expenses(), ledger.people());
    let mut lines = Vec::new();
    let mut summaries = Vec::new();
    for person in ledger.people() {
        let paid = ledger.person_paid_total(person.id());
        let balance = balances
            .get(person.id())
            .copied()
            .unwrap_or(Amount::ZERO);
        let standing = if balance > Amount::EPSILON {
            format!("owed {}", currency.format(balance))
        } else if balance < -Amount::EPSILON {
            format!("owes {}", currency.format(balance.abs()))
        } else {
            "settled up".to_string()
        };
        lines.push(format!(
            "{}: paid {}, {}",
            person.name(),
            currency.format(paid),
            standing
        ));
        summaries.push(PersonSummary {
            id: person.id().clone(),
            name: person.name().to_string(),
            color: person.color().to_string(),
            paid,
            balance,
        });
    }

    Ok(Out::new(lines.join("\n"), summaries))
}
