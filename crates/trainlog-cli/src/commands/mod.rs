pub mod check;
pub mod config;
pub mod records;
pub mod reset;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod timer;

use trainlog_core::CategoryKey;

/// Parse a category name argument.
pub fn parse_category(name: &str) -> Result<CategoryKey, Box<dyn std::error::Error>> {
    CategoryKey::parse(name)
        .ok_or_else(|| format!("unknown category '{name}' (skill|strength|volume|cardio)").into())
}
