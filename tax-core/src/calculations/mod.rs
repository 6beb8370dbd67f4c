//! The three tax calculators and the rate resolution they share.
//!
//! Each calculator borrows the part of a [`crate::TaxYearSchedule`] it needs
//! and exposes a pure `compute` that validates its input before doing any
//! arithmetic.

pub mod common;
mod error;
pub mod land;
pub mod property;
pub mod resolver;
pub mod transport;

pub use error::InvalidInput;
pub use land::{EffectiveRate, LandTaxCalculator, LandTaxInput};
pub use property::{PropertyAreaInput, PropertyTaxCalculator, PropertyTaxInput, PropertyValueInput};
pub use transport::{EARLIEST_MANUFACTURE_YEAR, TransportTaxCalculator, TransportTaxInput};
