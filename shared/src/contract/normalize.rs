//! Normalization of remote collections into the internal configuration shape
//!
//! Each collection is handled on its own. A missing or non-array collection is
//! replaced by the built-in data for that entity only, so one broken sheet tab
//! does not take the rest of the event down with it.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

use super::document::{json_kind, DocumentError, RemoteDocument};
use crate::fallback::{fallback_locations, fallback_products, fallback_staff};
use crate::models::{AppConfig, Location, OpeningSnapshot, Product, Staff, DEFAULT_CATEGORY};
use crate::types::{LocationType, StaffRole};

// ============================================================================
// Key tables
// ============================================================================

/// Collection keys, first match wins
pub const PRODUCT_COLLECTION_KEYS: &[&str] = &["products", "items"];
pub const LOCATION_COLLECTION_KEYS: &[&str] = &["locations"];
pub const STAFF_COLLECTION_KEYS: &[&str] = &["staff"];
pub const SNAPSHOT_COLLECTION_KEYS: &[&str] = &["openingSnapshot", "opening_snapshot"];

const NAME_KEYS: &[&str] = &["name"];
const PRODUCT_NAME_KEYS: &[&str] = &["name", "productName"];
const CASE_SIZE_KEYS: &[&str] = &["caseSize", "case_size"];
const ASSIGNED_LOCATION_KEYS: &[&str] = &["assignedLocation", "assigned_location"];

// ============================================================================
// Entry points
// ============================================================================

/// Classify and normalize a raw configuration document
pub fn normalize_document(raw: Value) -> Result<AppConfig, DocumentError> {
    let collections = RemoteDocument::classify(raw)?.into_collections()?;
    normalize_collections(&collections)
}

/// Normalize an already unwrapped collection map
pub fn normalize_collections(doc: &Map<String, Value>) -> Result<AppConfig, DocumentError> {
    let products = resolve_array(doc, PRODUCT_COLLECTION_KEYS);
    let locations = resolve_array(doc, LOCATION_COLLECTION_KEYS);
    let staff = resolve_array(doc, STAFF_COLLECTION_KEYS);

    if products.is_none() && locations.is_none() && staff.is_none() {
        return Err(DocumentError::Malformed(
            "no products, locations or staff collection".to_string(),
        ));
    }

    let products = match products {
        Some(entries) => normalize_products(entries),
        None => {
            tracing::warn!("Configuration has no products collection, using built-in products");
            fallback_products()
        }
    };
    let locations = match locations {
        Some(entries) => normalize_locations(entries),
        None => {
            tracing::warn!("Configuration has no locations collection, using built-in locations");
            fallback_locations()
        }
    };
    let staff = match staff {
        Some(entries) => normalize_staff(entries),
        None => {
            tracing::warn!("Configuration has no staff collection, using built-in roster");
            fallback_staff()
        }
    };

    let opening_snapshot = SNAPSHOT_COLLECTION_KEYS
        .iter()
        .find_map(|key| doc.get(*key).filter(|v| !v.is_null()))
        .and_then(normalize_snapshot);

    Ok(AppConfig {
        products,
        locations,
        staff,
        opening_snapshot,
    })
}

fn resolve_array<'a>(doc: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a [Value]> {
    keys.iter()
        .find_map(|key| doc.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
}

// ============================================================================
// Collections
// ============================================================================

pub fn normalize_products(entries: &[Value]) -> Vec<Product> {
    let mut ids = IdAllocator::new('p');
    named_entries(entries, PRODUCT_NAME_KEYS, "product")
        .map(|(index, obj, name)| Product {
            id: ids.assign(field(obj, &["id"]).and_then(text), &name, index),
            category: field(obj, &["category"])
                .and_then(text)
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            case_size: case_size(field(obj, CASE_SIZE_KEYS)),
            name,
        })
        .collect()
}

pub fn normalize_locations(entries: &[Value]) -> Vec<Location> {
    let mut ids = IdAllocator::new('l');
    named_entries(entries, NAME_KEYS, "location")
        .map(|(index, obj, name)| Location {
            id: ids.assign(field(obj, &["id"]).and_then(text), &name, index),
            location_type: field(obj, &["type"])
                .and_then(Value::as_str)
                .and_then(LocationType::parse)
                .unwrap_or_default(),
            name,
        })
        .collect()
}

pub fn normalize_staff(entries: &[Value]) -> Vec<Staff> {
    let mut ids = IdAllocator::new('s');
    named_entries(entries, NAME_KEYS, "staff")
        .map(|(index, obj, name)| Staff {
            id: ids.assign(field(obj, &["id"]).and_then(text), &name, index),
            role: field(obj, &["role"]).and_then(Value::as_str).and_then(|raw| {
                let role = StaffRole::parse(raw);
                if role.is_none() {
                    tracing::debug!("Ignoring unknown role {:?} for {}", raw, name);
                }
                role
            }),
            assigned_location: field(obj, ASSIGNED_LOCATION_KEYS).and_then(text),
            pin: field(obj, &["pin"]).and_then(pin_text),
            name,
        })
        .collect()
}

pub fn normalize_snapshot(value: &Value) -> Option<OpeningSnapshot> {
    let Some(locations) = value.as_object() else {
        tracing::warn!("Ignoring opening snapshot: expected an object, found {}", json_kind(value));
        return None;
    };

    let snapshot = locations
        .iter()
        .filter_map(|(location, counts)| {
            let counts = counts.as_object()?;
            let counts: BTreeMap<String, u32> = counts
                .iter()
                .filter_map(|(product, count)| Some((product.clone(), snapshot_count(count)?)))
                .collect();
            Some((location.clone(), counts))
        })
        .collect();

    Some(OpeningSnapshot(snapshot))
}

/// Object entries that carry a usable name, with their position in the source array
fn named_entries<'a>(
    entries: &'a [Value],
    name_keys: &'a [&'a str],
    entity: &'static str,
) -> impl Iterator<Item = (usize, &'a Map<String, Value>, String)> + 'a {
    entries.iter().enumerate().filter_map(move |(index, entry)| {
        let Some(obj) = entry.as_object() else {
            tracing::debug!("Skipping {} entry {}: {}", entity, index, json_kind(entry));
            return None;
        };
        let Some(name) = field(obj, name_keys).and_then(text) else {
            tracing::debug!("Skipping {} entry {}: no name", entity, index);
            return None;
        };
        Some((index, obj, name))
    })
}

// ============================================================================
// Ids
// ============================================================================

/// Hands out ids that are unique within one collection
struct IdAllocator {
    prefix: char,
    taken: HashSet<String>,
}

impl IdAllocator {
    fn new(prefix: char) -> Self {
        Self {
            prefix,
            taken: HashSet::new(),
        }
    }

    /// Explicit id, else a slug of the name, else a positional token;
    /// suffixed with `-2`, `-3`, ... while taken.
    fn assign(&mut self, explicit: Option<String>, name: &str, index: usize) -> String {
        let base = explicit
            .or_else(|| Some(slugify(name)).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| format!("{}{}", self.prefix, index + 1));

        let mut candidate = base.clone();
        let mut suffix = 2;
        while !self.taken.insert(candidate.clone()) {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        candidate
    }
}

/// Lower-case alphanumeric runs joined by `-`
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

// ============================================================================
// Field coercion
// ============================================================================

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key).filter(|v| !v.is_null()))
}

/// Trimmed, non-empty text; numbers are rendered as written
fn text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn case_size(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f.trunc() as u64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 1.0).map(|f| f.trunc() as u64))
        }
        _ => None,
    };

    parsed
        .map(|n| n.clamp(1, u64::from(u32::MAX)) as u32)
        .unwrap_or(1)
}

/// Sheets hand numeric-looking PINs over as numbers; keep them as text
fn pin_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => n
            .as_u64()
            .map(|v| v.to_string())
            .or_else(|| {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| format!("{}", f as u64))
            }),
        _ => None,
    }
}

fn snapshot_count(value: &Value) -> Option<u32> {
    let count = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    Some(count.min(u64::from(u32::MAX)) as u32)
}
