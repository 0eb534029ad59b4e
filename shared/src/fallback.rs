//! Built-in event data used whenever the remote sheet cannot be read

use crate::models::{AppConfig, Location, Product, Staff};
use crate::types::LocationType;

pub fn fallback_products() -> Vec<Product> {
    vec![
        Product::new("p1", "Spirits", "Bombay Sapphire Gin", 6),
        Product::new("p2", "Spirits", "Jack Daniels Bourbon", 6),
        Product::new("p3", "Spirits", "Absolut 1L", 6),
        Product::new("p4", "Soft Drinks", "RedBull", 24),
        Product::new("p5", "Soft Drinks", "Coke 330ml", 24),
        Product::new("p6", "Soft Drinks", "Soda 330ml", 24),
        Product::new("p7", "Soft Drinks", "Tonic 200ml", 24),
        Product::new("p8", "Mixers", "Lime Cordial", 12),
        Product::new("p9", "Wines", "House Red", 6),
        Product::new("p10", "Wines", "House White", 6),
    ]
}

pub fn fallback_locations() -> Vec<Location> {
    vec![
        Location::new("l1", "Bar 1A", LocationType::Bar),
        Location::new("l2", "Bar 1B", LocationType::Bar),
        Location::new("l3", "Bar 2", LocationType::Bar),
        Location::new("l4", "Promoter Box", LocationType::Satellite),
        Location::new("l5", "VIP", LocationType::Satellite),
        Location::new("l6", "Main Storage", LocationType::Storage),
    ]
}

pub fn fallback_staff() -> Vec<Staff> {
    vec![
        Staff::new("s1", "Manager Dave"),
        Staff::new("s2", "Sarah Lead"),
        Staff::new("s3", "Bar Staff 1"),
        Staff::new("s4", "Logistics Team"),
    ]
}

/// The complete fallback configuration
pub fn fallback_config() -> AppConfig {
    AppConfig {
        products: fallback_products(),
        locations: fallback_locations(),
        staff: fallback_staff(),
        opening_snapshot: None,
    }
}
