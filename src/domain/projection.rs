// Projection output primitives
use thiserror::Error;

/// Output surface a projection is computed against. Presentation hands in
/// whatever the current element size is; projections never cache it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Circle,
    Rect,
}

impl MarkerStyle {
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some("rect") => MarkerStyle::Rect,
            _ => MarkerStyle::Circle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub style: MarkerStyle,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
}

impl TrendPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Result of a scatter/trend projection. Recomputed on every render pass,
/// never stored.
#[derive(Debug, Clone, Default)]
pub struct ScatterProjection {
    pub points: Vec<ProjectedPoint>,
    pub means: Vec<TrendPoint>,
    pub trendline: Vec<TrendPoint>,
    pub gradient: bool,
}

/// Severity band for the remaining-volume bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    Ok,
}

impl Severity {
    pub fn as_class(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::Ok => "ok",
        }
    }
}

/// Remaining-volume bar: offsets in viewport units, label already
/// formatted to two decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct RemainingBar {
    pub top: f64,
    pub height: f64,
    pub label: String,
    pub severity: Severity,
}

/// One bar of a multi-category chart, in percent of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub x_percent: f64,
    pub width_percent: f64,
    pub y_percent: f64,
    pub height_percent: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("empty series: {0}")]
    EmptySeries(&'static str),
    #[error("invalid sample: {0}")]
    InvalidSample(String),
}
