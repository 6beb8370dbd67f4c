use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use tax_core::{
    BenefitPolicy, BracketError, BracketSchedule, LandCategory, LandUse, PurposeDefinition,
    RateTable, ScheduleError, TaxBracket, TaxYearSchedule, VehicleClass,
};
use thiserror::Error;
use tracing::{debug, info};

/// File name of the keyed rate table inside a schedule directory.
pub const RATES_FILE: &str = "rates.csv";

/// File name of the bracket schedules inside a schedule directory.
pub const BRACKETS_FILE: &str = "brackets.csv";

/// Key naming a table's fallback rate.
const DEFAULT_KEY: &str = "default";

/// Errors that can occur when loading schedule data.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown table '{0}'")]
    UnknownTable(String),

    #[error("unknown key '{key}' in table '{table}'")]
    UnknownKey { table: String, key: String },

    #[error("records mix tax years {expected} and {found}")]
    MixedTaxYears { expected: i32, found: i32 },

    #[error("invalid value {value} for '{key}' in table '{table}'")]
    InvalidScalar {
        table: String,
        key: String,
        value: Decimal,
    },

    #[error("invalid brackets for '{schedule}': {source}")]
    InvalidBrackets {
        schedule: String,
        #[source]
        source: BracketError,
    },

    #[error("invalid schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of `rates.csv`.
///
/// - `tax_year`: The tax year (e.g., 2026)
/// - `table`: Dotted table name (e.g., `land.base.settlement`)
/// - `key`: Region, tier, type, purpose or scalar name, or `default`
/// - `rate`: The value as a decimal
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RateRecord {
    pub tax_year: i32,
    pub table: String,
    pub key: String,
    pub rate: Decimal,
}

/// A single row of `brackets.csv`.
///
/// - `tax_year`: The tax year (e.g., 2026)
/// - `schedule`: `property.value` or `transport.<class>`
/// - `max`: Inclusive upper bound (empty for unlimited)
/// - `rate`: Marginal rate, or a number of index units for transport
/// - `base_tax`: Tax accumulated below this bracket
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
    pub base_tax: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for per-year schedule data from CSV files.
///
/// Records are overlaid on a base schedule: every table that appears in the
/// records replaces the base table wholesale, so a data directory only needs
/// to list what changed from the base year.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse rate records from a CSV reader.
    pub fn parse_rates<R: Read>(reader: R) -> Result<Vec<RateRecord>, ScheduleLoaderError> {
        parse(reader)
    }

    /// Parse bracket records from a CSV reader. Row order is preserved.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, ScheduleLoaderError> {
        parse(reader)
    }

    /// Overlays `rates` and `brackets` on `base` and validates the result.
    ///
    /// All records must carry the same tax year, which becomes the year of
    /// the returned schedule. With no records at all, `base` is returned
    /// unchanged (after validation).
    pub fn build(
        base: TaxYearSchedule,
        rates: &[RateRecord],
        brackets: &[BracketRecord],
    ) -> Result<TaxYearSchedule, ScheduleLoaderError> {
        let mut schedule = base;
        if let Some(year) = common_tax_year(rates, brackets)? {
            schedule.tax_year = year;
        }

        for (table, rows) in group_by(rates, |r| r.table.as_str()) {
            apply_rate_table(&mut schedule, table, &rows)?;
            debug!(table, rows = rows.len(), "applied rate table");
        }

        for (name, rows) in group_by(brackets, |r| r.schedule.as_str()) {
            apply_bracket_schedule(&mut schedule, name, &rows)?;
            debug!(schedule = name, rows = rows.len(), "applied bracket schedule");
        }

        schedule.validate()?;
        Ok(schedule)
    }

    /// Reads [`RATES_FILE`] and [`BRACKETS_FILE`] from `dir` and overlays them
    /// on `base`. A missing file contributes no records.
    pub fn load_dir(
        base: TaxYearSchedule,
        dir: &Path,
    ) -> Result<TaxYearSchedule, ScheduleLoaderError> {
        let rates = match open_optional(&dir.join(RATES_FILE))? {
            Some(file) => Self::parse_rates(file)?,
            None => Vec::new(),
        };
        let brackets = match open_optional(&dir.join(BRACKETS_FILE))? {
            Some(file) => Self::parse_brackets(file)?,
            None => Vec::new(),
        };

        info!(
            dir = %dir.display(),
            rates = rates.len(),
            brackets = brackets.len(),
            "loading schedule data"
        );

        Self::build(base, &rates, &brackets)
    }
}

fn parse<R, T>(reader: R) -> Result<Vec<T>, ScheduleLoaderError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

fn open_optional(path: &Path) -> Result<Option<File>, ScheduleLoaderError> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ScheduleLoaderError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn common_tax_year(
    rates: &[RateRecord],
    brackets: &[BracketRecord],
) -> Result<Option<i32>, ScheduleLoaderError> {
    let mut years = rates
        .iter()
        .map(|r| r.tax_year)
        .chain(brackets.iter().map(|b| b.tax_year));

    let Some(expected) = years.next() else {
        return Ok(None);
    };
    match years.find(|year| *year != expected) {
        Some(found) => Err(ScheduleLoaderError::MixedTaxYears { expected, found }),
        None => Ok(Some(expected)),
    }
}

/// Groups records by name in order of first appearance, keeping file order
/// within each group.
fn group_by<'a, T>(
    records: &'a [T],
    name: impl Fn(&'a T) -> &'a str,
) -> Vec<(&'a str, Vec<&'a T>)> {
    let mut groups: Vec<(&str, Vec<&T>)> = Vec::new();
    for record in records {
        let key = name(record);
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, rows)) => rows.push(record),
            None => groups.push((key, vec![record])),
        }
    }
    groups
}

fn apply_rate_table(
    schedule: &mut TaxYearSchedule,
    table: &str,
    rows: &[&RateRecord],
) -> Result<(), ScheduleLoaderError> {
    if let Some(category) = table.strip_prefix("land.base.") {
        let category = parse_table_code::<LandCategory>(table, category)?;
        schedule
            .land
            .base_rates
            .insert(category, keyed_table(table, rows)?);
        return Ok(());
    }

    if let Some(category) = table.strip_prefix("land.purpose.") {
        let category = parse_table_code::<LandCategory>(table, category)?;
        let definitions = rows
            .iter()
            .map(|row| {
                LandUse::from_codes(category, &row.key)
                    .map(|land_use| PurposeDefinition::new(land_use, row.rate))
                    .map_err(|_| unknown_key(table, &row.key))
            })
            .collect::<Result<Vec<_>, _>>()?;
        schedule.land.replace_purposes(category, definitions);
        return Ok(());
    }

    match table {
        "land.benefit" => {
            schedule.land.benefit_limits = BenefitPolicy::new(keyed_table(table, rows)?);
        }
        "property.area_rate" => {
            schedule.property.area_rates = keyed_table(table, rows)?;
        }
        "property.multiplier" => {
            schedule.property.type_multipliers = keyed_table(table, rows)?;
        }
        "property.benefit_area" => {
            schedule.property.benefit_areas = BenefitPolicy::new(keyed_table(table, rows)?);
        }
        "transport.index" => {
            for row in rows {
                match row.key.as_str() {
                    "index_constant" => schedule.transport.index_constant = row.rate,
                    _ => return Err(unknown_key(table, &row.key)),
                }
            }
        }
        "transport.age_discount" => {
            let discount = &mut schedule.transport.age_discount;
            for row in rows {
                match row.key.as_str() {
                    "min_age_years" => discount.min_age_years = whole_years(table, row)?,
                    "coefficient" => discount.coefficient = row.rate,
                    _ => return Err(unknown_key(table, &row.key)),
                }
            }
        }
        _ => return Err(ScheduleLoaderError::UnknownTable(table.to_string())),
    }

    Ok(())
}

fn apply_bracket_schedule(
    schedule: &mut TaxYearSchedule,
    name: &str,
    rows: &[&BracketRecord],
) -> Result<(), ScheduleLoaderError> {
    let brackets = rows
        .iter()
        .map(|row| TaxBracket {
            upper: row.max,
            rate: row.rate,
            base_tax: row.base_tax,
        })
        .collect();
    let brackets =
        BracketSchedule::new(brackets).map_err(|source| ScheduleLoaderError::InvalidBrackets {
            schedule: name.to_string(),
            source,
        })?;

    if name == "property.value" {
        schedule.property.value_brackets = brackets;
    } else if let Some(class) = name.strip_prefix("transport.") {
        let class = parse_table_code::<VehicleClass>(name, class)?;
        schedule.transport.brackets.insert(class, brackets);
    } else {
        return Err(ScheduleLoaderError::UnknownTable(name.to_string()));
    }

    Ok(())
}

/// Builds a table from `key,rate` rows, where the key `default` sets the
/// fallback rate.
fn keyed_table<K>(
    table: &str,
    rows: &[&RateRecord],
) -> Result<RateTable<K>, ScheduleLoaderError>
where
    K: Ord + FromStr,
{
    let mut rates = RateTable::new(None);
    for row in rows {
        if row.key == DEFAULT_KEY {
            rates.set_default(Some(row.rate));
        } else {
            let key = row
                .key
                .parse::<K>()
                .map_err(|_| unknown_key(table, &row.key))?;
            rates.insert(key, row.rate);
        }
    }
    Ok(rates)
}

fn parse_table_code<K: FromStr>(
    table: &str,
    code: &str,
) -> Result<K, ScheduleLoaderError> {
    code.parse()
        .map_err(|_| ScheduleLoaderError::UnknownTable(table.to_string()))
}

fn whole_years(
    table: &str,
    row: &RateRecord,
) -> Result<i32, ScheduleLoaderError> {
    let invalid = || ScheduleLoaderError::InvalidScalar {
        table: table.to_string(),
        key: row.key.clone(),
        value: row.rate,
    };
    if !row.rate.fract().is_zero() {
        return Err(invalid());
    }
    row.rate.to_i32().ok_or_else(invalid)
}

fn unknown_key(
    table: &str,
    key: &str,
) -> ScheduleLoaderError {
    ScheduleLoaderError::UnknownKey {
        table: table.to_string(),
        key: key.to_string(),
    }
}
