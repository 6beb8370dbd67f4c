//! Turns calculation results into labelled, human readable breakdowns.
//!
//! Amounts are rounded to whole tenge here and nowhere else.

use std::fmt;

use rust_decimal::Decimal;
use tax_core::{
    BenefitApplied, CalculationDetails, CalculationResult, LandCategory, LandDetails, LandUse,
    PropertyAreaDetails, PropertyValueDetails, Region, TransportDetails,
};

use crate::labels::label;
use crate::utils::{
    format_decimal, format_number, format_percent, format_quantity, format_tenge,
    hectares_to_sotok,
};

/// A titled list of `label: value` rows, optional notes and a final amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    title: String,
    rows: Vec<(String, String)>,
    notes: Vec<String>,
    total_label: String,
    total: Decimal,
}

impl Breakdown {
    pub fn new(
        title_key: &str,
        total: Decimal,
    ) -> Self {
        Self {
            title: label(title_key),
            rows: Vec::new(),
            notes: Vec::new(),
            total_label: label("field.tax"),
            total,
        }
    }

    pub fn row(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> &mut Self {
        self.rows.push((label(key), value.into()));
        self
    }

    pub fn note(
        &mut self,
        text: impl Into<String>,
    ) -> &mut Self {
        self.notes.push(text.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Value of the first row labelled `key`.
    pub fn value_of(
        &self,
        key: &str,
    ) -> Option<&str> {
        let wanted = label(key);
        self.rows
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for Breakdown {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .chain(std::iter::once(self.total_label.chars().count()))
            .max()
            .unwrap_or(0)
            + 1;

        writeln!(f, "{}", self.title)?;
        for (name, value) in &self.rows {
            writeln!(f, "  {:<width$} {}", format!("{name}:"), value)?;
        }
        for note in &self.notes {
            writeln!(f, "  * {note}")?;
        }
        write!(
            f,
            "  {:<width$} {}",
            format!("{}:", self.total_label),
            format_tenge(self.total)
        )
    }
}

/// Builds the breakdown matching the calculator that produced `result`.
pub fn render(result: &CalculationResult) -> Breakdown {
    match &result.details {
        CalculationDetails::Land(details) => render_land(result, details),
        CalculationDetails::PropertyByValue(details) => render_property_value(result, details),
        CalculationDetails::PropertyByArea(details) => render_property_area(result, details),
        CalculationDetails::Transport(details) => render_transport(result, details),
    }
}

fn hectares(value: Decimal) -> String {
    let ha = format!("{} {}", format_decimal(value), label("unit.ha"));
    match hectares_to_sotok(value) {
        Some(sotok) => format!("{ha} ({} {})", format_decimal(sotok), label("unit.sotok")),
        None => ha,
    }
}

fn square_metres(value: Decimal) -> String {
    format!("{} {}", format_decimal(value), label("unit.sqm"))
}

fn per_unit(
    rate: Decimal,
    unit_key: &str,
) -> String {
    format!("{} ₸/{}", format_decimal(rate), label(unit_key))
}

fn render_land(
    result: &CalculationResult,
    details: &LandDetails,
) -> Breakdown {
    let mut out = Breakdown::new("title.land", result.tax_amount);
    out.row("field.category", label(&details.land_use.category().display_key()))
        .row("field.purpose", label(&details.land_use.display_key()))
        .row("field.area", hectares(details.total_area))
        .row(
            "field.region",
            format!(
                "{} ({})",
                label(&details.region.display_key()),
                label(&details.locality.display_key())
            ),
        )
        .row("field.base_rate", per_unit(details.region_rate, "unit.ha"))
        .row("field.multiplier", format_decimal(details.purpose_multiplier))
        .row("field.effective_rate", per_unit(result.applied_rate, "unit.ha"));

    if let BenefitApplied::Deduction { allowance, .. } = result.benefit {
        out.row("field.benefit_area", hectares(allowance))
            .row("field.taxable_area", hectares(result.taxable_base));
        if details.tax_without_benefit > result.tax_amount {
            out.row("field.tax_without_benefit", format_tenge(details.tax_without_benefit))
                .row(
                    "field.saving",
                    format_tenge(details.tax_without_benefit - result.tax_amount),
                );
        }
        if result.taxable_base.is_zero() {
            out.note(label("note.area_covered"));
        }
    }
    out
}

/// 1-based bracket number with its range, `suffix` appended to the bounds.
fn bracket_range(
    index: usize,
    lower: Decimal,
    upper: Option<Decimal>,
    suffix: &str,
) -> String {
    match upper {
        Some(upper) => format!(
            "{} ({} – {}{suffix})",
            index + 1,
            format_number(lower),
            format_number(upper)
        ),
        None => format!("{} (> {}{suffix})", index + 1, format_number(lower)),
    }
}

fn render_property_value(
    result: &CalculationResult,
    details: &PropertyValueDetails,
) -> Breakdown {
    let mut out = Breakdown::new("title.property_value", result.tax_amount);
    out.row("field.value", format_tenge(details.assessed_value));

    if details.exempt {
        let threshold = details.exemption_threshold.unwrap_or(details.assessed_value);
        out.note(format!("{} {}", label("note.exempt"), format_tenge(threshold)));
        return out;
    }

    out.row(
        "field.bracket",
        bracket_range(
            details.bracket_index,
            details.bracket_lower,
            details.bracket_upper,
            " ₸",
        ),
    )
    .row("field.marginal_rate", format_percent(details.marginal_rate))
    .row("field.excess", format_tenge(details.excess));
    if details.base_tax > Decimal::ZERO {
        out.row("field.base_tax", format_tenge(details.base_tax));
    }

    if let BenefitApplied::FullExemption { waived_tax } = result.benefit {
        out.row("field.tax_before_benefit", format_tenge(waived_tax))
            .note(label("note.full_exemption"));
    }
    out
}

fn render_property_area(
    result: &CalculationResult,
    details: &PropertyAreaDetails,
) -> Breakdown {
    let mut out = Breakdown::new("title.property_area", result.tax_amount);
    out.row("field.property_type", label(&details.property_type.display_key()))
        .row("field.city_tier", label(&details.city_tier.display_key()))
        .row("field.area", square_metres(details.total_area))
        .row("field.base_rate", per_unit(details.base_rate, "unit.sqm"))
        .row("field.multiplier", format_decimal(details.multiplier));

    if let BenefitApplied::Deduction { allowance, .. } = result.benefit {
        out.row("field.benefit_area", square_metres(allowance))
            .row("field.taxable_area", square_metres(result.taxable_base));
        if result.taxable_base.is_zero() {
            out.note(label("note.area_covered"));
        }
    }
    out
}

fn render_transport(
    result: &CalculationResult,
    details: &TransportDetails,
) -> Breakdown {
    let metric = details.vehicle_class.metric();
    let mut out = Breakdown::new("title.transport", result.tax_amount);
    out.row("field.vehicle", label(&details.vehicle_class.display_key()))
        .row(
            &metric.display_key(),
            format!("{} {}", format_quantity(details.metric), label(metric.unit_key())),
        )
        .row(
            "field.year",
            format!(
                "{} ({} {} {})",
                details.manufacture_year,
                label("field.age"),
                details.vehicle_age,
                label("unit.years")
            ),
        )
        .row(
            "field.bracket",
            bracket_range(
                details.bracket_index,
                details.bracket_lower,
                details.bracket_upper,
                "",
            ),
        )
        .row(
            "field.rate_mrp",
            format!(
                "{} {}",
                format_decimal(details.rate_in_index_units),
                label("unit.mrp")
            ),
        )
        .row("field.mrp", format_tenge(details.index_constant));

    if details.age_coefficient != Decimal::ONE {
        out.row("field.base_tax", format_tenge(details.base_tax))
            .row("field.age_coefficient", format_decimal(details.age_coefficient))
            .note(label("note.age_discount"));
    }
    out
}

/// One purpose in a `purposes` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurposeLine {
    pub land_use: LandUse,
    pub multiplier: Decimal,
    /// Effective rate per hectare, when a region was given.
    pub rate: Option<Decimal>,
}

pub fn render_purposes(
    category: LandCategory,
    region: Option<Region>,
    lines: &[PurposeLine],
) -> String {
    let mut out = format!(
        "{}: {}",
        label("title.purposes"),
        label(&category.display_key())
    );
    if let Some(region) = region {
        out.push_str(&format!(" ({})", label(&region.display_key())));
    }

    let names: Vec<String> = lines.iter().map(|l| label(&l.land_use.display_key())).collect();
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

    for (line, name) in lines.iter().zip(&names) {
        out.push_str(&format!(
            "\n  {:<14} {:<width$}  x{}",
            line.land_use.purpose_code(),
            name,
            format_decimal(line.multiplier)
        ));
        if let Some(rate) = line.rate {
            out.push_str(&format!("  {}", per_unit(rate, "unit.ha")));
        }
    }
    out
}

/// A computed fleet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetLine {
    pub row: usize,
    pub plate: Option<String>,
    pub result: CalculationResult,
}

/// Per-vehicle results of a fleet file plus the rows that were rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetReport {
    pub lines: Vec<FleetLine>,
    /// `(row, reason)` in file order.
    pub rejected: Vec<(usize, String)>,
}

impl FleetReport {
    /// Sum of the unrounded per-vehicle amounts.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.result.tax_amount).sum()
    }
}

impl fmt::Display for FleetReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", label("title.fleet"))?;
        for line in &self.lines {
            let CalculationDetails::Transport(details) = &line.result.details else {
                continue;
            };
            let metric = details.vehicle_class.metric();
            write!(f, "  row {:>3}  ", line.row)?;
            if let Some(plate) = &line.plate {
                write!(f, "{plate}  ")?;
            }
            writeln!(
                f,
                "{}, {} {}, {}: {}",
                label(&details.vehicle_class.display_key()),
                format_quantity(details.metric),
                label(metric.unit_key()),
                details.manufacture_year,
                format_tenge(line.result.tax_amount)
            )?;
        }
        for (row, reason) in &self.rejected {
            writeln!(f, "  row {row:>3}  rejected: {reason}")?;
        }
        write!(f, "  {}: {}", label("field.total"), format_tenge(self.total()))
    }
}
