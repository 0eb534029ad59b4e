//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of location stock can sit in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum LocationType {
    Storage,
    Satellite,
    #[default]
    Bar,
}

impl LocationType {
    /// Case-insensitive match against the remote spelling
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "storage" => Some(LocationType::Storage),
            "satellite" => Some(LocationType::Satellite),
            "bar" => Some(LocationType::Bar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Storage => "Storage",
            LocationType::Satellite => "Satellite",
            LocationType::Bar => "Bar",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roster roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StaffRole {
    Admin,
    Staff,
    Logistics,
}

impl StaffRole {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(StaffRole::Admin),
            "staff" => Some(StaffRole::Staff),
            "logistics" => Some(StaffRole::Logistics),
            _ => None,
        }
    }
}

/// Stocktake session within an event day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Session {
    #[default]
    Opening,
    Closing,
}

impl Session {
    /// Case-insensitive match against the form's labels
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "opening" => Some(Session::Opening),
            "closing" => Some(Session::Closing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Opening => "Opening",
            Session::Closing => "Closing",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two kinds of submission the form produces
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Stocktake,
    Transfer,
}

impl SubmissionKind {
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionKind::Stocktake => "stocktake",
            SubmissionKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
