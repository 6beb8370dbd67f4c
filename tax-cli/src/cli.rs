use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::utils::parse_decimal;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Kazakhstan land, property and transport tax calculator.
///
/// Computes a tax from the built-in 2026 rates, or from rate data overlaid
/// with `--rates-dir`, and prints a labelled breakdown.
#[derive(Debug, Parser)]
#[command(name = "salyq", version, about, long_about = None)]
pub struct Cli {
    /// Directory with rates.csv and/or brackets.csv overlaid on the
    /// built-in schedule
    #[arg(long, global = true, value_name = "DIR")]
    pub rates_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `warn,tax_core=trace`. Overrides RUST_LOG
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Also append log records to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Land tax for one plot
    Land(LandArgs),

    /// Property tax by assessed value or by floor area
    #[command(subcommand)]
    Property(PropertyCommand),

    /// Transport tax for one vehicle
    Transport(TransportArgs),

    /// List the purposes of a land category
    Purposes(PurposesArgs),

    /// Transport tax for every vehicle in a fleet CSV
    Fleet(FleetArgs),
}

// Codes are taken as plain strings and parsed by the app so an unknown code
// is reported as invalid input like any other.

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct LandArgs {
    /// Land category code (agricultural, settlement, ...)
    #[arg(long)]
    pub category: String,

    /// Purpose code within the category (arable, residential, ...)
    #[arg(long)]
    pub purpose: String,

    /// Region code (astana, akmola, almaty-region, ...)
    #[arg(long)]
    pub region: String,

    /// Plot area in hectares
    #[arg(long, value_parser = parse_decimal, allow_hyphen_values = true)]
    pub area: Decimal,

    /// Owner is eligible for the land benefit
    #[arg(long)]
    pub benefits: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum PropertyCommand {
    /// Progressive tax on the assessed value
    Value(PropertyValueArgs),

    /// Flat per-square-metre tax
    Area(PropertyAreaArgs),
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct PropertyValueArgs {
    /// Assessed value in tenge
    #[arg(long, value_parser = parse_decimal, allow_hyphen_values = true)]
    pub value: Decimal,

    /// Owner is eligible for the property benefit
    #[arg(long)]
    pub benefits: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct PropertyAreaArgs {
    /// Floor area in square metres
    #[arg(long, value_parser = parse_decimal, allow_hyphen_values = true)]
    pub area: Decimal,

    /// Property type code (apartment, house, dacha, garage)
    #[arg(long = "type")]
    pub property_type: String,

    /// City tier code (astana, almaty, shymkent, regional, district, rural)
    #[arg(long = "city")]
    pub city_tier: String,

    /// Owner is eligible for the property benefit
    #[arg(long)]
    pub benefits: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct TransportArgs {
    /// Vehicle class code (passenger, truck, motorcycle, bus, special, trailer)
    #[arg(long)]
    pub class: String,

    /// Size metric: cc, tons, seats or hp depending on the class
    #[arg(long, value_parser = parse_decimal, allow_hyphen_values = true)]
    pub metric: Decimal,

    /// Year of manufacture
    #[arg(long, allow_hyphen_values = true)]
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct PurposesArgs {
    /// Land category code
    #[arg(long)]
    pub category: String,

    /// Also show the effective rate per hectare in this region
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct FleetArgs {
    /// CSV with columns vehicle_class, metric, manufacture_year[, plate]
    #[arg(long)]
    pub file: PathBuf,
}
