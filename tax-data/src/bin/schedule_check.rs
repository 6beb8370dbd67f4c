use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tax_core::schedules;
use tax_core::{LandCategory, VehicleClass};
use tax_data::ScheduleLoader;
use tracing_subscriber::EnvFilter;

/// Validate a schedule data directory.
///
/// The directory may contain `rates.csv` (columns tax_year, table, key,
/// rate) and `brackets.csv` (columns tax_year, schedule, max, rate,
/// base_tax). Their tables are overlaid on a built-in base year and the
/// resulting schedule is checked for consistency.
#[derive(Parser, Debug)]
#[command(name = "schedule-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing rates.csv and/or brackets.csv
    #[arg(short, long)]
    dir: PathBuf,

    /// Built-in tax year the data is layered on
    #[arg(short, long, default_value_t = 2026)]
    base_year: i32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let base = schedules::builtin(args.base_year).ok_or_else(|| {
        anyhow!(
            "no built-in schedule for {} (available: {:?})",
            args.base_year,
            schedules::BUILTIN_YEARS
        )
    })?;

    let schedule = ScheduleLoader::load_dir(base, &args.dir)
        .with_context(|| format!("Invalid schedule data in: {}", args.dir.display()))?;

    println!("Schedule data in {} is valid.", args.dir.display());
    println!("  tax year:           {}", schedule.tax_year);
    for category in LandCategory::ALL {
        println!(
            "  land {:<13} {} regional rates, {} purposes",
            category.as_str(),
            schedule.land.base_rates[category].len(),
            schedule.land.purposes_for(*category).count()
        );
    }
    println!(
        "  property value:     {} brackets",
        schedule.property.value_brackets.len()
    );
    for class in VehicleClass::ALL {
        println!(
            "  transport {:<10} {} brackets",
            class.as_str(),
            schedule.transport.brackets[class].len()
        );
    }
    println!(
        "  index constant:     {}",
        schedule.transport.index_constant
    );

    Ok(())
}
