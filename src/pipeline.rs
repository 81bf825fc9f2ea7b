//! Report pipeline plumbing.
//!
//! A host feeds [`DeviceReport`]s to a [`PipelineElement`] one at a time.
//! The element rewrites the position of reports that carry one and hands
//! every report, modified or not, to a single downstream [`ReportSink`].

use crate::config::Properties;
use crate::filters::{PositionFilter, Reconstructor};
use crate::sample::Sample;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Report from a pen or puck in range of the tablet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabletReport {
    /// Position in device coordinates
    pub position: Sample,
    /// Raw pen pressure
    pub pressure: u32,
    /// Pen button states
    pub buttons: Vec<bool>,
}

/// Report from express keys or other auxiliary controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxReport {
    /// Auxiliary button states
    pub buttons: Vec<bool>,
}

/// Anything a device can send down the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceReport {
    /// Position-bearing report
    Tablet(TabletReport),
    /// Buttons only
    Auxiliary(AuxReport),
    /// Tool left the sensing area
    OutOfRange,
    /// Unparsed payload forwarded as-is
    Raw(Vec<u8>),
}

impl DeviceReport {
    /// Tablet report at `position` with no pressure or buttons
    #[must_use]
    pub fn at(position: Sample) -> Self {
        Self::Tablet(TabletReport {
            position,
            pressure: 0,
            buttons: Vec::new(),
        })
    }

    #[must_use]
    pub fn position(&self) -> Option<Sample> {
        match self {
            Self::Tablet(report) => Some(report.position),
            _ => None,
        }
    }

    /// Mutable access to the position, if the report has one
    pub fn position_mut(&mut self) -> Option<&mut Sample> {
        match self {
            Self::Tablet(report) => Some(&mut report.position),
            _ => None,
        }
    }
}

/// Downstream consumer of reports
pub trait ReportSink {
    /// Accept the next report
    fn emit(&mut self, report: DeviceReport);
}

impl ReportSink for Vec<DeviceReport> {
    fn emit(&mut self, report: DeviceReport) {
        self.push(report);
    }
}

/// Adapts a closure into a [`ReportSink`]
pub struct FnSink<F>(pub F);

impl<F: FnMut(DeviceReport)> ReportSink for FnSink<F> {
    fn emit(&mut self, report: DeviceReport) {
        (self.0)(report);
    }
}

/// Where in the host chain an element must run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePosition {
    /// On raw device coordinates, before any geometric transform
    PreTransform,
    /// On transformed output coordinates
    PostTransform,
}

/// A stage in the host's report pipeline
pub trait PipelineElement {
    /// Required placement in the chain
    fn position(&self) -> PipelinePosition;

    /// Process one report and forward it to `sink`
    fn consume(&mut self, report: DeviceReport, sink: &mut dyn ReportSink);
}

/// Pipeline stage that runs a [`Reconstructor`] over tablet reports
#[derive(Debug, Clone, Default)]
pub struct ReconstructorElement {
    reconstructor: Reconstructor,
}

impl ReconstructorElement {
    #[must_use]
    pub fn new(reconstructor: Reconstructor) -> Self {
        Self { reconstructor }
    }

    #[must_use]
    pub fn reconstructor(&self) -> &Reconstructor {
        &self.reconstructor
    }

    pub fn reconstructor_mut(&mut self) -> &mut Reconstructor {
        &mut self.reconstructor
    }

    /// Set a host property by its display name
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownProperty` if `name` is not exposed
    pub fn set_property(&mut self, name: &str, value: f64) -> Result<()> {
        self.reconstructor.set_property(name, value)
    }
}

impl PipelineElement for ReconstructorElement {
    fn position(&self) -> PipelinePosition {
        PipelinePosition::PreTransform
    }

    fn consume(&mut self, mut report: DeviceReport, sink: &mut dyn ReportSink) {
        if let Some(position) = report.position_mut() {
            *position = self.reconstructor.apply(*position);
        }
        sink.emit(report);
    }
}

/// Pipeline stage that runs any [`PositionFilter`] over tablet reports
pub struct FilterElement {
    filter: Box<dyn PositionFilter>,
}

impl FilterElement {
    #[must_use]
    pub fn new(filter: Box<dyn PositionFilter>) -> Self {
        Self { filter }
    }

    /// Name of the wrapped filter
    #[must_use]
    pub fn filter_name(&self) -> &str {
        self.filter.name()
    }
}

impl PipelineElement for FilterElement {
    fn position(&self) -> PipelinePosition {
        PipelinePosition::PreTransform
    }

    fn consume(&mut self, mut report: DeviceReport, sink: &mut dyn ReportSink) {
        if let Some(position) = report.position_mut() {
            *position = self.filter.apply(*position);
        }
        sink.emit(report);
    }
}

/// Parse one line of a text sample stream.
///
/// `x,y[,pressure]` becomes a tablet report. Lines that do not start with a
/// number are kept verbatim as raw reports. Blank lines and `#` comments
/// yield `None`.
///
/// # Errors
///
/// Returns `Error::ParseError` when a line starts with a number but the rest
/// of it is not a valid position
pub fn parse_report_line(line_no: usize, line: &str) -> Result<Option<DeviceReport>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    let Ok(x) = fields[0].parse::<f64>() else {
        return Ok(Some(DeviceReport::Raw(trimmed.as_bytes().to_vec())));
    };

    let parse_err = |message: String| Error::ParseError { line: line_no, message };
    if !(2..=3).contains(&fields.len()) {
        return Err(parse_err(format!("expected x,y[,pressure], got {} fields", fields.len())));
    }
    let y = fields[1]
        .parse::<f64>()
        .map_err(|e| parse_err(format!("invalid y '{}': {e}", fields[1])))?;
    let pressure = match fields.get(2) {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|e| parse_err(format!("invalid pressure '{raw}': {e}")))?,
        None => 0,
    };

    Ok(Some(DeviceReport::Tablet(TabletReport {
        position: Sample::new(x, y),
        pressure,
        buttons: Vec::new(),
    })))
}

/// Render a report back into the line format read by [`parse_report_line`]
#[must_use]
pub fn format_report(report: &DeviceReport) -> String {
    match report {
        DeviceReport::Tablet(tablet) if tablet.pressure > 0 => format!("{},{}", tablet.position, tablet.pressure),
        DeviceReport::Tablet(tablet) => tablet.position.to_string(),
        DeviceReport::Auxiliary(aux) => format!("# aux {:?}", aux.buttons),
        DeviceReport::OutOfRange => "# out of range".to_string(),
        DeviceReport::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}
