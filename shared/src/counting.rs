//! Case/loose unit arithmetic and the per-form count sheet

use crate::models::{Product, StockItemSubmission};

/// Total units from a case count and loose units, floored at zero.
///
/// Computed in 128-bit space so extreme inputs saturate instead of wrapping.
pub fn total_units(cases: i64, loose: i64, case_size: u32) -> u32 {
    let total = i128::from(cases) * i128::from(case_size) + i128::from(loose);
    total.clamp(0, i128::from(u32::MAX)) as u32
}

/// Read a count field the way the numeric inputs do: leading integer digits,
/// blank or garbage counts as zero.
pub fn parse_count(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value: i64 = 0;
    let mut seen = false;
    for d in digits {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(d - b'0'));
    }

    match (seen, negative) {
        (false, _) => 0,
        (true, true) => -value,
        (true, false) => value,
    }
}

/// Running totals for one form, keyed by product name in entry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountSheet {
    entries: Vec<(String, u32)>,
}

impl CountSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the total for a product
    pub fn set(&mut self, product_name: &str, total: u32) {
        match self.entries.iter_mut().find(|(name, _)| name == product_name) {
            Some(entry) => entry.1 = total,
            None => self.entries.push((product_name.to_string(), total)),
        }
    }

    /// Record a case + loose count for a product and return the stored total
    pub fn record(&mut self, product: &Product, cases: i64, loose: i64) -> u32 {
        let total = total_units(cases, loose, product.case_size);
        self.set(&product.name, total);
        total
    }

    pub fn get(&self, product_name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == product_name)
            .map(|(_, total)| *total)
    }

    /// Non-zero lines, ready for a payload
    pub fn items(&self) -> Vec<StockItemSubmission> {
        self.entries
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|(name, total)| StockItemSubmission::new(name.clone(), *total))
            .collect()
    }

    /// Every recorded line, zeros included
    pub fn entries(&self) -> Vec<StockItemSubmission> {
        self.entries
            .iter()
            .map(|(name, total)| StockItemSubmission::new(name.clone(), *total))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, total)| *total == 0)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
