//! Command execution: parse codes, run the calculators against the loaded
//! schedule and hand the results to the renderer.

use std::path::Path;

use tax_core::calculations::{
    LandTaxCalculator, LandTaxInput, PropertyAreaInput, PropertyTaxCalculator,
    PropertyValueInput, TransportTaxCalculator, TransportTaxInput,
};
use tax_core::schedules::kz_2026;
use tax_core::{
    CityTier, InvalidInput, LandCategory, LandUse, PropertyType, Region, TaxYearSchedule,
    VehicleClass,
};
use tax_data::{ScheduleLoader, ScheduleLoaderError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cli::{
    Command, FleetArgs, LandArgs, PropertyAreaArgs, PropertyCommand, PropertyValueArgs,
    PurposesArgs, TransportArgs,
};
use crate::csv_loader::{self, FleetLoadError};
use crate::render::{Breakdown, FleetLine, FleetReport, PurposeLine, render, render_purposes};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("cannot load rate data: {0}")]
    Schedule(#[from] ScheduleLoaderError),

    #[error(transparent)]
    Fleet(#[from] FleetLoadError),
}

/// Runs commands against one tax year schedule.
#[derive(Debug, Clone)]
pub struct App {
    schedule: TaxYearSchedule,
}

impl App {
    pub fn new(schedule: TaxYearSchedule) -> Self {
        Self { schedule }
    }

    /// The built-in 2026 schedule.
    pub fn builtin() -> Self {
        Self::new(kz_2026())
    }

    /// The built-in schedule with the CSV tables in `dir` overlaid on it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Schedule`] if the data cannot be read or the
    /// resulting schedule is invalid.
    pub fn with_rates_dir(dir: &Path) -> Result<Self, AppError> {
        let schedule = ScheduleLoader::load_dir(kz_2026(), dir)?;
        info!(tax_year = schedule.tax_year, dir = %dir.display(), "using overlaid rate data");
        Ok(Self::new(schedule))
    }

    pub fn schedule(&self) -> &TaxYearSchedule {
        &self.schedule
    }

    /// Executes `command` and returns the text to print.
    pub fn run(
        &self,
        command: &Command,
    ) -> Result<String, AppError> {
        debug!(?command, tax_year = self.schedule.tax_year, "running command");
        let output = match command {
            Command::Land(args) => self.land(args)?.to_string(),
            Command::Property(PropertyCommand::Value(args)) => {
                self.property_value(args)?.to_string()
            }
            Command::Property(PropertyCommand::Area(args)) => {
                self.property_area(args)?.to_string()
            }
            Command::Transport(args) => self.transport(args)?.to_string(),
            Command::Purposes(args) => self.purposes(args)?,
            Command::Fleet(args) => self.fleet(args)?.to_string(),
        };
        Ok(output)
    }

    pub fn land(
        &self,
        args: &LandArgs,
    ) -> Result<Breakdown, AppError> {
        let input = LandTaxInput::from_codes(
            &args.category,
            &args.purpose,
            &args.region,
            args.area,
            args.benefits,
        )?;
        let result = LandTaxCalculator::new(&self.schedule.land).compute(&input)?;
        Ok(render(&result))
    }

    pub fn property_value(
        &self,
        args: &PropertyValueArgs,
    ) -> Result<Breakdown, AppError> {
        let input = PropertyValueInput {
            assessed_value: args.value,
            has_benefits: args.benefits,
        };
        let result = PropertyTaxCalculator::new(&self.schedule.property).compute_by_value(&input)?;
        Ok(render(&result))
    }

    pub fn property_area(
        &self,
        args: &PropertyAreaArgs,
    ) -> Result<Breakdown, AppError> {
        let input = PropertyAreaInput {
            area: args.area,
            property_type: args.property_type.parse::<PropertyType>()?,
            city_tier: args.city_tier.parse::<CityTier>()?,
            has_benefits: args.benefits,
        };
        let result = PropertyTaxCalculator::new(&self.schedule.property).compute_by_area(&input)?;
        Ok(render(&result))
    }

    pub fn transport(
        &self,
        args: &TransportArgs,
    ) -> Result<Breakdown, AppError> {
        let input = TransportTaxInput {
            vehicle_class: args.class.parse::<VehicleClass>()?,
            metric: args.metric,
            manufacture_year: args.year,
        };
        let result = TransportTaxCalculator::for_year(&self.schedule).compute(&input)?;
        Ok(render(&result))
    }

    pub fn purposes(
        &self,
        args: &PurposesArgs,
    ) -> Result<String, AppError> {
        let category: LandCategory = args.category.parse()?;
        let region = args
            .region
            .as_deref()
            .map(str::parse::<Region>)
            .transpose()?;

        let calculator = LandTaxCalculator::new(&self.schedule.land);
        let lines: Vec<PurposeLine> = LandUse::all_for(category)
            .into_iter()
            .map(|land_use| PurposeLine {
                land_use,
                multiplier: self.schedule.land.multiplier(land_use),
                rate: region.map(|region| calculator.effective_rate(land_use, region).rate),
            })
            .collect();

        Ok(render_purposes(category, region, &lines))
    }

    /// Computes every row of a fleet file. Rows that fail to load or fail
    /// validation are listed in [`FleetReport::rejected`]; only an unreadable
    /// file is an error.
    pub fn fleet(
        &self,
        args: &FleetArgs,
    ) -> Result<FleetReport, AppError> {
        let load = csv_loader::load_from_file(&args.file)?;
        let calculator = TransportTaxCalculator::for_year(&self.schedule);

        let mut report = FleetReport::default();
        for err in load.rejected {
            report.rejected.push((err.row().unwrap_or(0), err.reason()));
        }
        for entry in load.entries {
            match calculator.compute(&entry.input) {
                Ok(result) => report.lines.push(FleetLine {
                    row: entry.row,
                    plate: entry.plate,
                    result,
                }),
                Err(err) => {
                    warn!(row = entry.row, %err, "fleet row failed validation");
                    report.rejected.push((entry.row, err.to_string()));
                }
            }
        }
        report.rejected.sort_by_key(|(row, _)| *row);

        info!(
            computed = report.lines.len(),
            rejected = report.rejected.len(),
            "fleet computed"
        );
        Ok(report)
    }
}
