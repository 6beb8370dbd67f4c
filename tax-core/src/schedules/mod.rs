//! Built-in tax year schedules.
//!
//! Each function returns a complete, valid [`TaxYearSchedule`]. Other years
//! can be loaded from CSV with the `tax-data` crate, optionally layered on
//! top of one of these.

mod kz_2026;

pub use kz_2026::{MRP_2026, kz_2026};

use crate::models::TaxYearSchedule;

/// Built-in schedule for `tax_year`, if one ships with the crate.
pub fn builtin(tax_year: i32) -> Option<TaxYearSchedule> {
    match tax_year {
        2026 => Some(kz_2026()),
        _ => None,
    }
}

/// Years with a built-in schedule.
pub const BUILTIN_YEARS: &[i32] = &[2026];
