//! Training zones report
//!
//! Builds the four report sections from gathered inputs and renders them as
//! text. The same structure serializes to JSON for `report --json`.

use serde::Serialize;
use std::fmt;
use training_zones_shared::{
    compute_heart_rate_zones, compute_power_zones, compute_training_paces, pace_to_display_string,
    speed_to_pace_string, HeartRateZoneSet, PhysiologicalInputs, PowerZoneSet, TrainingPaceTable,
    UnitSystem,
};

use super::gather::GatheredInputs;
use crate::error::CliResult;

pub const NOT_SET: &str = "Not Set";
pub const NOT_CALCULATED: &str = "Not Calculated";
pub const NOT_FOUND: &str = "Not Found";

pub const HR_ZONES_UNAVAILABLE: &str = "Heart rate zones are not available because your resting and maximum heart rates have not been calculated and age has not been set.";
pub const POWER_ZONES_UNAVAILABLE: &str =
    "Cycling power zones were not calculated because your FTP has not been set.";
pub const PACES_UNAVAILABLE: &str = "To calculate run paces VO\u{00B2}Max (Cardio Fitness Score) must be calculated, or a hard run of at least 5 KM must be known.";

/// One zone boundary ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneBar {
    pub value: f64,
    /// Boundary truncated to a whole number
    pub label: String,
    pub description: &'static str,
}

impl ZoneBar {
    fn new(value: f64, description: &'static str) -> Self {
        Self {
            value,
            label: (value.trunc() as i64).to_string(),
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartRateSection {
    pub age_years: Option<f64>,
    pub resting_hr: Option<f64>,
    pub max_hr: Option<f64>,
    pub method: Option<&'static str>,
    pub zones: Vec<ZoneBar>,
    pub notice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerSection {
    pub ftp_watts: Option<f64>,
    pub zones: Vec<ZoneBar>,
    pub notice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AerobicSection {
    pub vo2max: Option<f64>,
    /// Best 5K-or-longer pace, formatted in the report's unit system
    pub best_5k_pace: Option<String>,
    pub best_12_minute_distance_meters: Option<f64>,
    pub notice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceLine {
    pub name: &'static str,
    pub description: &'static str,
    /// Meters per minute
    pub speed: f64,
    pub pace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceSection {
    pub method: Option<&'static str>,
    pub paces: Vec<PaceLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub units: UnitSystem,
    pub heart_rate: HeartRateSection,
    pub power: PowerSection,
    pub aerobic: AerobicSection,
    pub paces: PaceSection,
}

/// Report service
pub struct ReportService;

impl ReportService {
    /// Build the report from gathered inputs
    ///
    /// A section whose inputs are missing carries a notice instead of zones.
    /// Inputs that are present but unusable are errors.
    pub fn build(gathered: &GatheredInputs, units: UnitSystem) -> CliResult<Report> {
        let inputs = &gathered.inputs;

        let heart_rate = if inputs.has_hr_data() {
            let zone_set =
                compute_heart_rate_zones(inputs.resting_hr, inputs.max_hr, inputs.age_years)?;
            HeartRateSection::from_zones(inputs, &zone_set)
        } else {
            HeartRateSection::unavailable(inputs)
        };

        let power = match inputs.ftp_watts.filter(|_| inputs.has_power_data()) {
            Some(ftp) => PowerSection::from_zones(&compute_power_zones(ftp)?),
            None => PowerSection::unavailable(),
        };

        Ok(Report {
            units,
            heart_rate,
            power,
            aerobic: AerobicSection::new(gathered, units),
            paces: PaceSection::from_table(&compute_training_paces(inputs)?, units),
        })
    }
}

impl HeartRateSection {
    fn unavailable(inputs: &PhysiologicalInputs) -> Self {
        Self {
            age_years: inputs.age_years,
            resting_hr: inputs.known_resting_hr(),
            max_hr: inputs.known_max_hr(),
            method: None,
            zones: Vec::new(),
            notice: Some(HR_ZONES_UNAVAILABLE),
        }
    }

    pub fn from_zones(inputs: &PhysiologicalInputs, zone_set: &HeartRateZoneSet) -> Self {
        Self {
            method: Some(zone_set.method.name()),
            zones: zone_set
                .described()
                .map(|(value, description)| ZoneBar::new(value, description))
                .collect(),
            notice: None,
            ..Self::unavailable(inputs)
        }
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HeartRateSection {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = self.notice {
            writeln!(out, "{notice}")?;
        }
        writeln!(
            out,
            "Age (Years): {}",
            or_placeholder(self.age_years.map(|age| format!("{age:.2} years")), NOT_FOUND)
        )?;
        writeln!(
            out,
            "Resting Heart Rate: {}",
            or_placeholder(self.resting_hr.map(|bpm| format!("{bpm} bpm")), NOT_FOUND)
        )?;
        writeln!(
            out,
            "Maximum Heart Rate: {}",
            or_placeholder(
                self.max_hr.map(|bpm| format!("{} bpm", bpm.trunc() as i64)),
                NOT_CALCULATED
            )
        )?;
        write_bars(out, &self.zones, "BPM")?;
        if let Some(method) = self.method {
            writeln!(out, "Calculated Using {method}")?;
        }
        Ok(())
    }
}

impl PowerSection {
    fn unavailable() -> Self {
        Self {
            ftp_watts: None,
            zones: Vec::new(),
            notice: Some(POWER_ZONES_UNAVAILABLE),
        }
    }

    pub fn from_zones(zone_set: &PowerZoneSet) -> Self {
        Self {
            ftp_watts: Some(zone_set.ftp_watts),
            zones: zone_set
                .described()
                .map(|(value, description)| ZoneBar::new(value, description))
                .collect(),
            notice: None,
        }
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PowerSection {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = self.notice {
            writeln!(out, "{notice}")?;
        }
        writeln!(
            out,
            "Functional Threshold Power: {}",
            or_placeholder(self.ftp_watts.map(|ftp| format!("{ftp} watts")), NOT_SET)
        )?;
        write_bars(out, &self.zones, "Watts")
    }
}

impl AerobicSection {
    fn new(gathered: &GatheredInputs, units: UnitSystem) -> Self {
        let inputs = &gathered.inputs;
        Self {
            vo2max: inputs.vo2max,
            best_5k_pace: gathered
                .best_efforts
                .best_5k_pace_secs_per_meter
                .map(|pace| pace_to_display_string(pace, units)),
            best_12_minute_distance_meters: inputs.cooper_distance_meters,
            notice: (!(inputs.has_run_data() || inputs.has_hr_data())).then_some(PACES_UNAVAILABLE),
        }
    }
}

impl fmt::Display for AerobicSection {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = self.notice {
            writeln!(out, "{notice}")?;
        }
        writeln!(
            out,
            "VO\u{00B2} Max: {}",
            or_placeholder(self.vo2max.map(|v| format!("{v} ml/kg/min")), NOT_SET)
        )?;
        writeln!(
            out,
            "Best Recent 5 KM (Or Greater) Effort: {}",
            or_placeholder(self.best_5k_pace.clone(), NOT_CALCULATED)
        )?;
        writeln!(
            out,
            "Best Recent 12 Minute Effort (Cooper Test): {}",
            or_placeholder(
                self.best_12_minute_distance_meters
                    .map(|meters| format!("{meters:.1}")),
                NOT_CALCULATED
            )
        )
    }
}

impl PaceSection {
    pub fn from_table(table: &TrainingPaceTable, units: UnitSystem) -> Self {
        Self {
            method: table.method.map(|method| method.name()),
            paces: table
                .iter()
                .map(|(category, speed)| PaceLine {
                    name: category.label(),
                    description: category.description(),
                    speed,
                    pace: speed_to_pace_string(speed, units),
                })
                .collect(),
        }
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PaceSection {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(method) = self.method else {
            return writeln!(out, "{NOT_CALCULATED}");
        };
        for line in &self.paces {
            writeln!(out, "{:<28} {}", format!("{}:", line.name), line.pace)?;
        }
        writeln!(out, "Calculated Using {method}")
    }
}

impl Report {
    /// Render the report as plain text
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(out, "Heart Rate Zones")?;
        writeln!(out, "{}", self.heart_rate)?;

        heading(out, "Cycling Power Zones")?;
        writeln!(out, "{}", self.power)?;

        heading(out, "Aerobic Performance")?;
        writeln!(out, "{}", self.aerobic)?;

        heading(out, &format!("Run Training Paces ({})", self.units.pace_label()))?;
        write!(out, "{}", self.paces)
    }
}

fn heading(out: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value.unwrap_or_else(|| placeholder.to_string())
}

fn write_bars(out: &mut fmt::Formatter<'_>, bars: &[ZoneBar], units: &str) -> fmt::Result {
    for (zone, bar) in bars.iter().enumerate() {
        writeln!(
            out,
            "  Zone {}: {:>5} {}  {}",
            zone + 1,
            bar.label,
            units,
            bar.description
        )?;
    }
    Ok(())
}
