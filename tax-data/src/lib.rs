//! Per-year schedule data for the tax engine.
//!
//! A schedule directory holds `rates.csv` and `brackets.csv`. Loading
//! overlays whatever tables they contain onto a base
//! [`tax_core::TaxYearSchedule`], usually a built-in year.

mod loader;

pub use loader::{
    BRACKETS_FILE, BracketRecord, RATES_FILE, RateRecord, ScheduleLoader, ScheduleLoaderError,
};
