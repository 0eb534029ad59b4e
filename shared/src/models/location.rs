//! Event locations

use serde::{Deserialize, Serialize};

use crate::types::LocationType;

/// A bar, satellite point or storage area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub location_type: LocationType,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location_type: LocationType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location_type,
        }
    }
}
