//! WebAssembly module for the festival stock counting form
//!
//! Provides client-side computation for:
//! - Case/loose unit totals and count input parsing
//! - PIN checks on the keypad
//! - Configuration normalization with built-in fallback
//! - Submission request bodies in the script's vocabulary

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{
    fallback_config, normalize_document, CountSheet, EnvelopeMode, StockItemSubmission,
    StocktakePayload, Submission, SubmissionMapper, TransferPayload, Vocabulary,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Units from a case count and loose units, never negative
#[wasm_bindgen]
pub fn calculate_total_units(cases: f64, loose: f64, case_size: u32) -> u32 {
    shared::total_units(cases.trunc() as i64, loose.trunc() as i64, case_size)
}

/// Read a count input field; blank or garbage is zero
#[wasm_bindgen]
pub fn parse_count_input(text: &str) -> f64 {
    shared::parse_count(text) as f64
}

/// Run a keypad entry against a PIN; true once the last digit matches
#[wasm_bindgen]
pub fn check_pin(target: &str, entered: &str) -> bool {
    let mut entry = PinEntry::new(target);
    entered
        .chars()
        .any(|digit| entry.push_digit(digit) == PinProgress::Accepted)
}

/// Normalize a fetched configuration document into the form's model.
///
/// Anything unusable logs a console warning and yields the built-in dataset.
#[wasm_bindgen]
pub fn normalize_config(raw_json: &str) -> Result<String, JsValue> {
    let config = serde_json::from_str::<Value>(raw_json)
        .map_err(|e| format!("invalid JSON: {}", e))
        .and_then(|raw| normalize_document(raw).map_err(|e| e.to_string()))
        .unwrap_or_else(|reason| {
            web_sys::console::warn_1(&format!("Using built-in configuration: {}", reason).into());
            fallback_config()
        });

    serde_json::to_string(&config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Products grouped by category in first-seen order
#[wasm_bindgen]
pub fn group_products(config_json: &str) -> Result<String, JsValue> {
    let config: AppConfig = serde_json::from_str(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {}", e)))?;

    let groups: Vec<Value> = config
        .products_by_category()
        .into_iter()
        .map(|group| {
            serde_json::json!({
                "category": group.category,
                "products": group.products,
            })
        })
        .collect();

    serde_json::to_string(&groups).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Request body for a stocktake.
///
/// `counts_json` maps product name to total units. The timestamp comes from
/// the page clock as an RFC 3339 string.
#[wasm_bindgen]
pub fn build_stocktake_body(
    staff_name: &str,
    bar_name: &str,
    session: &str,
    counts_json: &str,
    timestamp: &str,
    vocabulary: &str,
    envelope: &str,
) -> Result<String, JsValue> {
    let session = Session::parse(session)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown session: {}", session)))?;
    let payload = StocktakePayload::from_parts(
        staff_name,
        bar_name,
        session,
        count_items(counts_json)?,
        parse_timestamp(timestamp)?,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    encode(mapper(vocabulary, envelope)?, &Submission::Stocktake(payload))
}

/// Request body for a transfer; see [`build_stocktake_body`] for the inputs
#[wasm_bindgen]
pub fn build_transfer_body(
    staff_name: &str,
    source: &str,
    destination: &str,
    counts_json: &str,
    timestamp: &str,
    vocabulary: &str,
    envelope: &str,
) -> Result<String, JsValue> {
    let payload = TransferPayload::from_parts(
        staff_name,
        source,
        destination,
        count_items(counts_json)?,
        parse_timestamp(timestamp)?,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    encode(mapper(vocabulary, envelope)?, &Submission::Transfer(payload))
}

fn count_items(counts_json: &str) -> Result<Vec<StockItemSubmission>, JsValue> {
    let counts: Map<String, Value> = serde_json::from_str(counts_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid counts JSON: {}", e)))?;

    let mut sheet = CountSheet::new();
    for (product, total) in &counts {
        let total = total.as_u64().unwrap_or(0).min(u64::from(u32::MAX)) as u32;
        sheet.set(product, total);
    }
    Ok(sheet.items())
}

fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>, JsValue> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| JsValue::from_str(&format!("Invalid timestamp: {}", e)))
}

fn mapper(vocabulary: &str, envelope: &str) -> Result<SubmissionMapper, JsValue> {
    let vocabulary: Vocabulary = from_label(&vocabulary.to_lowercase(), "vocabulary")?;
    let envelope: EnvelopeMode = from_label(&envelope.to_lowercase(), "envelope")?;
    Ok(SubmissionMapper::new(vocabulary, envelope))
}

fn from_label<T: serde::de::DeserializeOwned>(label: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_value(Value::String(label.to_string()))
        .map_err(|_| JsValue::from_str(&format!("Unknown {}: {}", what, label)))
}

fn encode(mapper: SubmissionMapper, submission: &Submission) -> Result<String, JsValue> {
    mapper
        .encode(submission)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
