//! Checks that run on the device before anything is sent
//!
//! Every failure here is shown as a short notice and blocks transmission.

use thiserror::Error;

use crate::models::{AppConfig, Location, Staff};
use crate::types::SubmissionKind;

/// Local, pre-network failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Select who you are before submitting")]
    NoStaffSelected,

    #[error("Select a {0} location")]
    MissingLocation(&'static str),

    #[error("Location {0} is not in the current configuration")]
    UnknownLocation(String),

    #[error("Staff member {0} is not on the roster")]
    UnknownStaff(String),

    #[error("PIN required")]
    PinRequired,

    #[error("Incorrect PIN. Try again.")]
    IncorrectPin,

    #[error("{}", empty_count_message(.0))]
    EmptyCount(SubmissionKind),
}

fn empty_count_message(kind: &SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Stocktake => "No items counted!",
        SubmissionKind::Transfer => "No items selected for transfer!",
    }
}

/// Resolve a location selection against the loaded configuration
pub fn require_location<'a>(
    config: &'a AppConfig,
    location_id: &str,
    field: &'static str,
) -> Result<&'a Location, ValidationError> {
    if location_id.trim().is_empty() {
        return Err(ValidationError::MissingLocation(field));
    }
    config
        .location(location_id)
        .ok_or_else(|| ValidationError::UnknownLocation(location_id.to_string()))
}

/// Pick a roster entry, checking the PIN when one is set
pub fn authenticate<'a>(
    config: &'a AppConfig,
    staff_id: &str,
    pin: Option<&str>,
) -> Result<&'a Staff, ValidationError> {
    let staff = config
        .staff_member(staff_id)
        .ok_or_else(|| ValidationError::UnknownStaff(staff_id.to_string()))?;

    if !staff.requires_pin() {
        return Ok(staff);
    }
    match pin {
        None => Err(ValidationError::PinRequired),
        Some(entered) if staff.verify_pin(entered) => Ok(staff),
        Some(_) => Err(ValidationError::IncorrectPin),
    }
}

// ============================================================================
// PIN keypad
// ============================================================================

pub const PIN_LENGTH: usize = 4;

/// State after a keypad press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinProgress {
    /// Digits entered so far
    Incomplete(usize),
    Accepted,
    /// Wrong code; the entry has been cleared
    Rejected,
}

/// Keypad entry that judges itself on the last digit
#[derive(Debug, Clone)]
pub struct PinEntry {
    target: String,
    digits: String,
}

impl PinEntry {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            digits: String::with_capacity(PIN_LENGTH),
        }
    }

    pub fn push_digit(&mut self, digit: char) -> PinProgress {
        if !digit.is_ascii_digit() {
            return PinProgress::Incomplete(self.digits.len());
        }
        self.digits.push(digit);
        if self.digits.len() < PIN_LENGTH {
            return PinProgress::Incomplete(self.digits.len());
        }

        let accepted = self.digits == self.target;
        self.digits.clear();
        if accepted {
            PinProgress::Accepted
        } else {
            PinProgress::Rejected
        }
    }

    pub fn delete(&mut self) {
        self.digits.pop();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}
