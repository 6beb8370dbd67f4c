//! CSV loader for fleet transport tax input.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive and must match exactly.
//!
//! | Column             | Required | Type    | Notes                                     |
//! |--------------------|----------|---------|-------------------------------------------|
//! | `vehicle_class`    | yes      | string  | passenger, truck, motorcycle, bus, special, trailer |
//! | `metric`           | yes      | decimal | cc, tons, seats or hp depending on class  |
//! | `manufacture_year` | yes      | integer | e.g. `2016`                               |
//! | `plate`            | no       | string  | Shown next to the result                  |
//!
//! ### Example
//!
//! ```csv
//! vehicle_class,metric,manufacture_year,plate
//! passenger,1800,2016,123ABC02
//! truck,3.5,2019,
//! ```
//!
//! A bad row does not stop the load: it is collected in
//! [`FleetLoad::rejected`] with its row number and the remaining rows are
//! still returned.
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::VehicleClass;
use tax_core::calculations::TransportTaxInput;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct CsvRow {
    vehicle_class: String,
    metric: Decimal,
    manufacture_year: i32,
    #[serde(default)]
    plate: Option<String>,
}

/// Errors that can occur while loading fleet data.
#[derive(Debug, thiserror::Error)]
pub enum FleetLoadError {
    /// The row could not be deserialised (missing column, type mismatch,
    /// etc.). `row` is 1-based, header excluded.
    #[error("row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: unknown vehicle class '{class}'")]
    UnknownVehicleClass { class: String, row: usize },

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FleetLoadError {
    /// Data row the error belongs to; `None` for file-level errors.
    pub fn row(&self) -> Option<usize> {
        match self {
            FleetLoadError::Parse { row, .. } | FleetLoadError::UnknownVehicleClass { row, .. } => {
                Some(*row)
            }
            FleetLoadError::Io { .. } => None,
        }
    }

    /// The message without its row prefix.
    pub fn reason(&self) -> String {
        match self {
            FleetLoadError::Parse { source, .. } => source.to_string(),
            FleetLoadError::UnknownVehicleClass { class, .. } => {
                format!("unknown vehicle class '{class}'")
            }
            FleetLoadError::Io { .. } => self.to_string(),
        }
    }
}

/// One accepted fleet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetEntry {
    /// 1-based data row number.
    pub row: usize,
    pub plate: Option<String>,
    pub input: TransportTaxInput,
}

/// Result of loading a fleet file.
#[derive(Debug, Default)]
pub struct FleetLoad {
    pub entries: Vec<FleetEntry>,
    pub rejected: Vec<FleetLoadError>,
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<FleetEntry, FleetLoadError> {
    let vehicle_class = VehicleClass::parse(row.vehicle_class.trim()).ok_or_else(|| {
        FleetLoadError::UnknownVehicleClass {
            class: row.vehicle_class.clone(),
            row: row_number,
        }
    })?;

    Ok(FleetEntry {
        row: row_number,
        plate: row.plate.filter(|p| !p.is_empty()),
        input: TransportTaxInput {
            vehicle_class,
            metric: row.metric,
            manufacture_year: row.manufacture_year,
        },
    })
}

/// Parse CSV text and split it into accepted entries and rejected rows.
/// Accepted entries keep file order.
pub fn load_from_str(input: &str) -> FleetLoad {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true) // the trailing plate column may be left off
        .from_reader(input.as_bytes());

    let mut load = FleetLoad::default();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row_number = idx + 1;
        let converted = result
            .map_err(|source| FleetLoadError::Parse {
                row: row_number,
                source,
            })
            .and_then(|row| convert_row(row, row_number));

        match converted {
            Ok(entry) => load.entries.push(entry),
            Err(err) => {
                warn!(%err, "skipping fleet row");
                load.rejected.push(err);
            }
        }
    }
    load
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
///
/// # Errors
///
/// Returns [`FleetLoadError::Io`] when the file cannot be read. Row-level
/// problems are reported in the returned [`FleetLoad`].
pub fn load_from_file(path: &Path) -> Result<FleetLoad, FleetLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FleetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(load_from_str(&contents))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
vehicle_class,metric,manufacture_year
passenger,1800,2016
";

    const MIXED_CSV: &str = "\
vehicle_class,metric,manufacture_year,plate
passenger,1800,2016,123ABC02
truck,3.5,2019,
spaceship,1,2020,X1
bus,30,2010,777KZ01
";

    #[test]
    fn test_minimal_csv_parses_required_fields() {
        let load = load_from_str(MINIMAL_CSV);

        assert!(load.rejected.is_empty());
        assert_eq!(
            load.entries,
            vec![FleetEntry {
                row: 1,
                plate: None,
                input: TransportTaxInput {
                    vehicle_class: VehicleClass::Passenger,
                    metric: dec!(1800),
                    manufacture_year: 2016,
                },
            }]
        );
    }

    #[test]
    fn test_plate_present_and_absent() {
        let load = load_from_str(MIXED_CSV);

        assert_eq!(load.entries[0].plate.as_deref(), Some("123ABC02"));
        assert_eq!(load.entries[1].plate, None);
    }

    #[test]
    fn test_bad_row_is_skipped_and_reported() {
        let load = load_from_str(MIXED_CSV);

        assert_eq!(load.entries.len(), 3);
        assert_eq!(
            load.entries.iter().map(|e| e.row).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );
        assert_eq!(load.rejected.len(), 1);
        match &load.rejected[0] {
            FleetLoadError::UnknownVehicleClass { class, row } => {
                assert_eq!(class, "spaceship");
                assert_eq!(*row, 3);
            }
            other => panic!("expected UnknownVehicleClass, got {:?}", other),
        }
        assert_eq!(load.rejected[0].row(), Some(3));
        assert_eq!(load.rejected[0].reason(), "unknown vehicle class 'spaceship'");
        assert_eq!(
            load.rejected[0].to_string(),
            "row 3: unknown vehicle class 'spaceship'"
        );
    }

    #[test]
    fn test_non_numeric_metric_is_parse_error() {
        let csv = "vehicle_class,metric,manufacture_year\npassenger,big,2016\ntruck,5,2020\n";

        let load = load_from_str(csv);

        assert_eq!(load.entries.len(), 1);
        assert!(matches!(
            load.rejected[0],
            FleetLoadError::Parse { row: 1, .. }
        ));
    }

    #[test]
    fn test_missing_required_column_rejects_every_row() {
        let csv = "vehicle_class,manufacture_year\npassenger,2016\nbus,2018\n";

        let load = load_from_str(csv);

        assert!(load.entries.is_empty());
        assert_eq!(load.rejected.len(), 2);
    }

    #[test]
    fn test_whitespace_and_column_order() {
        let csv = "\
manufacture_year , plate , vehicle_class , metric
2020 , 01KZ , special , 150
";
        let load = load_from_str(csv);

        assert_eq!(load.entries.len(), 1);
        assert_eq!(load.entries[0].input.vehicle_class, VehicleClass::Special);
        assert_eq!(load.entries[0].input.metric, dec!(150));
        assert_eq!(load.entries[0].plate.as_deref(), Some("01KZ"));
    }

    #[test]
    fn test_empty_input_returns_empty_load() {
        let load = load_from_str("");

        assert!(load.entries.is_empty());
        assert!(load.rejected.is_empty());
    }

    #[test]
    fn test_values_are_not_validated_here() {
        // Range checks belong to the calculator.
        let load = load_from_str("vehicle_class,metric,manufacture_year\nbus,0,1800\n");

        assert_eq!(load.entries.len(), 1);
        assert_eq!(load.entries[0].input.metric, Decimal::ZERO);
    }
}
