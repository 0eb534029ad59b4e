//! Stocktake and transfer submissions

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Location, Staff};
use crate::counting::CountSheet;
use crate::types::{Session, SubmissionKind};
use crate::validation::ValidationError;

/// One counted product, in total units
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockItemSubmission {
    product_name: String,
    quantity: u32,
}

impl StockItemSubmission {
    pub fn new(product_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Drop zero lines and refuse an empty result
fn counted_items(
    items: Vec<StockItemSubmission>,
    kind: SubmissionKind,
) -> Result<Vec<StockItemSubmission>, ValidationError> {
    let items: Vec<_> = items.into_iter().filter(|i| i.quantity > 0).collect();
    if items.is_empty() {
        return Err(ValidationError::EmptyCount(kind));
    }
    Ok(items)
}

/// Opening or closing count at one location
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StocktakePayload {
    #[serde(with = "iso_millis")]
    timestamp: DateTime<Utc>,
    staff_name: String,
    bar_name: String,
    session: Session,
    items: Vec<StockItemSubmission>,
}

impl StocktakePayload {
    pub fn build(
        staff: &Staff,
        location: &Location,
        session: Session,
        sheet: &CountSheet,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::from_parts(&staff.name, &location.name, session, sheet.items(), timestamp)
    }

    pub fn from_parts(
        staff_name: &str,
        bar_name: &str,
        session: Session,
        items: Vec<StockItemSubmission>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            timestamp,
            staff_name: staff_name.to_string(),
            bar_name: bar_name.to_string(),
            session,
            items: counted_items(items, SubmissionKind::Stocktake)?,
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn staff_name(&self) -> &str {
        &self.staff_name
    }

    pub fn bar_name(&self) -> &str {
        &self.bar_name
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn items(&self) -> &[StockItemSubmission] {
        &self.items
    }
}

/// Units moved between two locations
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    #[serde(with = "iso_millis")]
    timestamp: DateTime<Utc>,
    staff_name: String,
    source: String,
    destination: String,
    items: Vec<StockItemSubmission>,
}

impl TransferPayload {
    /// Same source and destination is allowed here; the form decides whether to warn.
    pub fn build(
        staff: &Staff,
        source: &Location,
        destination: &Location,
        sheet: &CountSheet,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::from_parts(&staff.name, &source.name, &destination.name, sheet.items(), timestamp)
    }

    pub fn from_parts(
        staff_name: &str,
        source: &str,
        destination: &str,
        items: Vec<StockItemSubmission>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            timestamp,
            staff_name: staff_name.to_string(),
            source: source.to_string(),
            destination: destination.to_string(),
            items: counted_items(items, SubmissionKind::Transfer)?,
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn staff_name(&self) -> &str {
        &self.staff_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn items(&self) -> &[StockItemSubmission] {
        &self.items
    }
}

/// A finished form, tagged by `type` on the wire
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Submission {
    Stocktake(StocktakePayload),
    Transfer(TransferPayload),
}

impl Submission {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Submission::Stocktake(_) => SubmissionKind::Stocktake,
            Submission::Transfer(_) => SubmissionKind::Transfer,
        }
    }

    pub fn staff_name(&self) -> &str {
        match self {
            Submission::Stocktake(p) => p.staff_name(),
            Submission::Transfer(p) => p.staff_name(),
        }
    }

    pub fn items(&self) -> &[StockItemSubmission] {
        match self {
            Submission::Stocktake(p) => p.items(),
            Submission::Transfer(p) => p.items(),
        }
    }

    pub fn total_units(&self) -> u64 {
        self.items().iter().map(|i| u64::from(i.quantity())).sum()
    }

    /// What the confirmation step shows before anything is sent
    pub fn summary(&self) -> SubmissionSummary<'_> {
        let (title, details) = match self {
            Submission::Stocktake(p) => (
                "Confirm Stocktake",
                vec![
                    ("Staff", p.staff_name().to_string()),
                    ("Location", p.bar_name().to_string()),
                    ("Session", p.session().to_string()),
                ],
            ),
            Submission::Transfer(p) => (
                "Confirm Transfer",
                vec![
                    ("Staff", p.staff_name().to_string()),
                    ("From", p.source().to_string()),
                    ("To", p.destination().to_string()),
                ],
            ),
        };

        SubmissionSummary {
            title,
            details,
            items: self.items(),
        }
    }
}

impl From<StocktakePayload> for Submission {
    fn from(payload: StocktakePayload) -> Self {
        Submission::Stocktake(payload)
    }
}

impl From<TransferPayload> for Submission {
    fn from(payload: TransferPayload) -> Self {
        Submission::Transfer(payload)
    }
}

/// Title, label/value pairs and item lines for the confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary<'a> {
    pub title: &'static str,
    pub details: Vec<(&'static str, String)>,
    pub items: &'a [StockItemSubmission],
}

/// `2025-07-04T18:30:00.000Z`, the shape browsers produce with `toISOString`
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
