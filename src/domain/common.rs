use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Records carrying a monetary amount.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Records stamped with the instant they were registered. The stamp may be
/// missing on malformed documents.
pub trait Dated {
    fn date(&self) -> Option<DateTime<Utc>>;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Parses a user supplied amount the lenient way form inputs are read: anything
/// that is not a number becomes `NaN` instead of an error.
pub fn parse_amount(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Sums the amounts of any collection of records. `NaN` propagates.
pub fn sum_amounts<'a, T, I>(records: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records.into_iter().fold(0.0, |acc, record| acc + record.amount())
}
