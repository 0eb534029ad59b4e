//! Staff roster models

use serde::{Deserialize, Serialize};

use crate::types::StaffRole;

/// A roster entry staff select themselves from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<StaffRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_location: Option<String>,
    /// Four-digit code checked on the device, never sent anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
}

impl Staff {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: None,
            assigned_location: None,
            pin: None,
        }
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    pub fn requires_pin(&self) -> bool {
        self.pin.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// True when no PIN is set or the entry matches exactly
    pub fn verify_pin(&self, entered: &str) -> bool {
        match self.pin.as_deref() {
            Some(pin) if !pin.is_empty() => pin == entered,
            _ => true,
        }
    }
}
