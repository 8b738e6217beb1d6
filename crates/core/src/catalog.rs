//! Catalog loading from the comma-separated fleet listing.
//!
//! Each line reads `car_id,make,model,year,car_type,is_available`. Blank
//! lines and the header are ignored; any other line that does not parse is
//! skipped and counted so the fleet still loads with whatever is valid.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::{inventory::CarInventory, models::Car};

const FIELD_COUNT: usize = 6;

/// Outcome of a catalog load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogReport {
    /// Cars added to the inventory.
    pub loaded: usize,
    /// Lines that were rejected.
    pub skipped: usize,
}

/// Read the catalog at `path` into `inventory`.
///
/// Fails only when the file itself cannot be read.
pub fn load_catalog(path: impl AsRef<Path>, inventory: &mut CarInventory) -> Result<CatalogReport> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let report = parse_catalog(&content, inventory);
    info!(
        "loaded {} cars from {} ({} lines skipped)",
        report.loaded,
        path.display(),
        report.skipped
    );
    Ok(report)
}

/// Parse catalog text into `inventory`.
pub fn parse_catalog(content: &str, inventory: &mut CarInventory) -> CatalogReport {
    let mut report = CatalogReport::default();
    for (number, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.to_lowercase().starts_with("car_id") {
            continue;
        }

        let car = match parse_line(line) {
            Ok(car) => car,
            Err(reason) => {
                debug!("skipping catalog line {}: {reason}", number + 1);
                report.skipped += 1;
                continue;
            }
        };

        match inventory.add(car) {
            Ok(()) => report.loaded += 1,
            Err(err) => {
                warn!("skipping catalog line {}: {err}", number + 1);
                report.skipped += 1;
            }
        }
    }
    report
}

fn parse_line(line: &str) -> Result<Car, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let &[id, make, model, year, car_type, available] = fields.as_slice() else {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            fields.len()
        ));
    };

    let id = id
        .parse()
        .map_err(|_| format!("invalid car id '{id}'"))?;
    let year = year
        .parse()
        .map_err(|_| format!("invalid year '{year}'"))?;

    Ok(Car::new(
        id,
        make,
        model,
        year,
        car_type,
        available.eq_ignore_ascii_case("true"),
    ))
}
