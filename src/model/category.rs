//! Expense category tags.

/// The closed set of tags an expense can carry. Categories are labels only; they have no effect
/// on balance or settlement computation. `Other` is the default and is always used for expenses
/// synthesized from confirmed settlements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    #[default]
    Other,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);
