//! # Reference Tables
//!
//! Read-only lookup data the design pipeline draws on:
//!
//! - [`roller_catalog`] - standard cylindrical roller dimensions
//! - [`race_groove`] - race-groove clearance F by (bore, outer diameter)
//! - [`fc_factor`] - ISO 281 fc geometry factor by Dwe/Dpw
//! - [`bearing_catalog`] - optional bearing designations for prefill
//!
//! Tables are loaded once (from a directory of CSV files, or from the
//! built-in datasets compiled into the crate) and never mutated afterwards,
//! so a single [`LookupTables`] can be shared across threads freely.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::tables::LookupTables;
//!
//! let tables = LookupTables::builtin();
//! assert!(!tables.rollers.is_empty());
//! assert!(!tables.fc.is_empty());
//! ```

pub mod bearing_catalog;
pub mod fc_factor;
pub mod race_groove;
pub mod roller_catalog;

pub use bearing_catalog::{BearingCatalog, BearingRecord};
pub use fc_factor::{FcFactorRecord, FcTable};
pub use race_groove::{RaceGrooveRecord, RaceGrooveTable};
pub use roller_catalog::{RollerCatalog, RollerRecord};

use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

use crate::errors::{CalcError, CalcResult};

/// File names expected inside a table directory
pub const ROLLER_CATALOG_FILE: &str = "roller_catalog.csv";
pub const RACE_GROOVE_FILE: &str = "race_groove.csv";
pub const FC_FACTOR_FILE: &str = "fc_factor.csv";
pub const BEARING_CATALOG_FILE: &str = "bearing_catalog.csv";

static BUILTIN: Lazy<LookupTables> = Lazy::new(|| LookupTables {
    rollers: roller_catalog::builtin(),
    race_groove: race_groove::builtin(),
    fc: fc_factor::builtin(),
    bearings: bearing_catalog::builtin(),
});

/// The complete set of reference tables for one process.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    pub rollers: RollerCatalog,
    pub race_groove: RaceGrooveTable,
    pub fc: FcTable,
    pub bearings: BearingCatalog,
}

impl LookupTables {
    /// Built-in datasets, parsed on first use.
    pub fn builtin() -> &'static LookupTables {
        &BUILTIN
    }

    /// Load all tables from a directory of CSV files.
    ///
    /// The roller, race-groove and fc files are required. The bearing
    /// catalog is optional; when absent the catalog is left empty.
    pub fn load_from_dir(dir: &Path) -> CalcResult<Self> {
        let rollers = RollerCatalog::load_from_csv(&dir.join(ROLLER_CATALOG_FILE))?;
        let race_groove = RaceGrooveTable::load_from_csv(&dir.join(RACE_GROOVE_FILE))?;
        let fc = FcTable::load_from_csv(&dir.join(FC_FACTOR_FILE))?;

        let bearing_path = dir.join(BEARING_CATALOG_FILE);
        let bearings = if bearing_path.exists() {
            BearingCatalog::load_from_csv(&bearing_path)?
        } else {
            BearingCatalog::default()
        };

        tracing::info!(
            dir = %dir.display(),
            rollers = rollers.len(),
            race_groove = race_groove.len(),
            fc = fc.len(),
            bearings = bearings.len(),
            "loaded reference tables"
        );

        Ok(LookupTables {
            rollers,
            race_groove,
            fc,
            bearings,
        })
    }
}

/// Open a CSV file and deserialize every row, reporting the path on failure.
pub(crate) fn read_csv_file<T: DeserializeOwned>(path: &Path) -> CalcResult<Vec<T>> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    read_csv_str(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => {
            CalcError::file_error("parse", path.display().to_string(), reason)
        }
        other => other,
    })
}

/// Deserialize CSV text into rows. Header names are matched case-insensitively.
pub(crate) fn read_csv_str<T: DeserializeOwned>(text: &str) -> CalcResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: csv::StringRecord = reader
        .headers()?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    reader.set_headers(headers);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
