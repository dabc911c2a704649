// Chart projection engine - pure series-to-coordinates math
use crate::domain::projection::{
    BarLayout, MarkerStyle, ProjectedPoint, ProjectionError, RemainingBar, ScatterProjection,
    Severity, TrendPoint, Viewport,
};
use crate::domain::telemetry::{KegRecord, Sample, SampleSet};

pub const REMAINING_LOW: f64 = 0.20;
pub const REMAINING_MEDIUM: f64 = 0.45;

const DEFAULT_RADIUS: f64 = 2.0;

/// Which primitives a scatter/trend projection should compute. Gradient is
/// a fill hint carried through unchanged; it never alters coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderModes {
    pub points: bool,
    pub means: bool,
    pub trendline: bool,
    pub gradient: bool,
}

/// Placement of one stacked trendline on a shared canvas. `bottom` is the
/// normalization constant for the running sum (total keg volume for
/// consumption charts); an anchored line opens at its offset origin.
#[derive(Debug, Clone, Copy)]
pub struct StackedLayout {
    pub bottom: f64,
    pub vertical_fix: f64,
    pub start_percent: f64,
    pub width_percent: f64,
    pub anchored: bool,
}

/// A projected stacked trendline plus its final y, which the next overlay
/// on the same canvas continues from.
#[derive(Debug, Clone)]
pub struct StackedTrendline {
    pub points: Vec<TrendPoint>,
    pub final_y: f64,
}

/// The consumption chart: the "used so far" line and the prediction line
/// sharing one canvas without overlap.
#[derive(Debug, Clone)]
pub struct ConsumptionOverlay {
    pub actual: Vec<TrendPoint>,
    pub prediction: Vec<TrendPoint>,
}

/// Arithmetic mean of one x-bucket's samples. An empty bucket cannot be
/// charted and is an error, never NaN.
pub fn bucket_mean(samples: &[f64]) -> Result<f64, ProjectionError> {
    if samples.is_empty() {
        return Err(ProjectionError::EmptySeries("bucket has no samples"));
    }
    ensure_finite(samples)?;
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Severity band for a remaining-volume fraction. Band boundaries are
/// inclusive on the upper side: 0.20 is medium, 0.45 is ok.
pub fn severity(value: f64) -> Severity {
    if value < REMAINING_LOW {
        Severity::Low
    } else if value < REMAINING_MEDIUM {
        Severity::Medium
    } else {
        Severity::Ok
    }
}

/// Project a sample set onto a viewport as points, per-bucket means, and a
/// trendline through the means.
///
/// X convention: category-slot normalization. Each x bucket occupies an
/// equal-width slot in first-seen order and its points are centered in the
/// slot: `x = (i / n) * width + (width / n) / 2`. Y is SVG-style inverted:
/// `y = height - raw_y`.
pub fn project_scatter(
    set: &SampleSet,
    viewport: Viewport,
    modes: RenderModes,
) -> Result<ScatterProjection, ProjectionError> {
    let buckets = bucketize(&set.points)?;
    if buckets.is_empty() {
        return Err(ProjectionError::EmptySeries("sample set has no points"));
    }

    let style = MarkerStyle::from_hint(set.marker.as_deref());
    let radius = set.radius.unwrap_or(DEFAULT_RADIUS);
    let slot = viewport.width / buckets.len() as f64;

    let mut projection = ScatterProjection {
        gradient: modes.gradient,
        ..Default::default()
    };

    for (i, (_, samples)) in buckets.iter().enumerate() {
        let screen_x = slot * i as f64 + slot / 2.0;

        if modes.points {
            for &y in samples {
                projection.points.push(ProjectedPoint {
                    x: screen_x,
                    y: viewport.height - y,
                    style,
                    radius,
                });
            }
        }

        if modes.means || modes.trendline {
            let mean = bucket_mean(samples)?;
            let point = TrendPoint::new(screen_x, viewport.height - mean);
            if modes.means {
                projection.means.push(point);
            }
            if modes.trendline {
                projection.trendline.push(point);
            }
        }
    }

    Ok(projection)
}

/// Project a cumulative ("used so far") trendline. Each point's y is the
/// running sum of the day totals so far, normalized by `layout.bottom` and
/// scaled into `[vertical_fix, vertical_fix + height]`; x spans
/// `width_percent * width` starting at `start_percent * width`, scaled by
/// the final sample's x.
pub fn project_stacked_trendline(
    set: &SampleSet,
    layout: &StackedLayout,
    viewport: Viewport,
) -> Result<StackedTrendline, ProjectionError> {
    if set.points.is_empty() {
        return Err(ProjectionError::EmptySeries("stacked trendline has no points"));
    }
    if !layout.bottom.is_finite() || layout.bottom <= 0.0 {
        return Err(ProjectionError::InvalidSample(format!(
            "normalization constant {} is not a positive number",
            layout.bottom
        )));
    }

    let start = layout.start_percent * viewport.width;
    let span = layout.width_percent * viewport.width;
    let last_x = set.points.last().map(|p| p.x).unwrap_or(1.0);
    let length = if last_x == 0.0 { 1.0 } else { last_x };

    let mut points = Vec::with_capacity(set.points.len() + 1);
    if layout.anchored {
        points.push(TrendPoint::new(start, layout.vertical_fix));
    }

    let mut running = 0.0;
    let mut final_y = layout.vertical_fix;

    for sample in &set.points {
        running += day_total(sample)?;
        let y = layout.vertical_fix + running / layout.bottom * viewport.height;
        let x = start + sample.x / length * span;
        final_y = y;
        points.push(TrendPoint::new(x, y));
    }

    Ok(StackedTrendline { points, final_y })
}

/// Project the consumption chart for one keg: the actual line covers the
/// used fraction of the canvas, the prediction line continues from the
/// actual line's final y across the remaining fraction.
pub fn project_consumption(
    keg: &KegRecord,
    viewport: Viewport,
) -> Result<ConsumptionOverlay, ProjectionError> {
    let volume = keg.volume.ok_or(ProjectionError::EmptySeries("keg has no volume"))?;
    let actual_set = keg
        .consumption
        .get("actual")
        .ok_or(ProjectionError::EmptySeries("no 'actual' consumption set"))?;
    let prediction_set = keg
        .consumption
        .get("prediction")
        .ok_or(ProjectionError::EmptySeries("no 'prediction' consumption set"))?;

    let used = 1.0 - keg.remaining.value;

    let actual = project_stacked_trendline(
        actual_set,
        &StackedLayout {
            bottom: volume,
            vertical_fix: 0.0,
            start_percent: 0.0,
            width_percent: used,
            anchored: true,
        },
        viewport,
    )?;

    let prediction = project_stacked_trendline(
        prediction_set,
        &StackedLayout {
            bottom: volume,
            vertical_fix: actual.final_y,
            start_percent: used,
            width_percent: keg.remaining.value,
            anchored: false,
        },
        viewport,
    )?;

    Ok(ConsumptionOverlay {
        actual: actual.points,
        prediction: prediction.points,
    })
}

/// Project the remaining-volume fraction as a single bar with a severity
/// band and a two-decimal percent label.
pub fn project_remaining(value: f64, viewport: Viewport) -> Result<RemainingBar, ProjectionError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ProjectionError::InvalidSample(format!(
            "remaining fraction {} outside [0, 1]",
            value
        )));
    }

    let top = (1.0 - value) * viewport.height;
    Ok(RemainingBar {
        top,
        height: viewport.height - top,
        label: format!("{:.2}", value * 100.0),
        severity: severity(value),
    })
}

/// Lay out a multi-category bar chart in percent of the canvas. Bars get
/// equal widths and heights proportional to the maximum value in the
/// current set, so the maximum is computed before any bar is placed.
pub fn project_bars(values: &[f64]) -> Result<Vec<BarLayout>, ProjectionError> {
    if values.is_empty() {
        return Ok(Vec::new());
    }
    ensure_finite(values)?;

    let max = values.iter().cloned().fold(f64::MIN, f64::max);
    if max <= 0.0 {
        return Err(ProjectionError::InvalidSample(
            "bar maximum is not a positive number".to_string(),
        ));
    }

    let width = 100.0 / values.len() as f64;
    let bars = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let height = value / max * 100.0;
            BarLayout {
                x_percent: width * i as f64,
                width_percent: width,
                y_percent: 100.0 - height,
                height_percent: height,
            }
        })
        .collect();

    Ok(bars)
}

/// Group samples into buckets by x, preserving first-seen x order.
fn bucketize(points: &[Sample]) -> Result<Vec<(f64, Vec<f64>)>, ProjectionError> {
    let mut buckets: Vec<(f64, Vec<f64>)> = Vec::new();

    for sample in points {
        if !sample.x.is_finite() {
            return Err(ProjectionError::InvalidSample(format!(
                "x value {} is not finite",
                sample.x
            )));
        }
        ensure_finite(&sample.y)?;

        match buckets.iter_mut().find(|(x, _)| *x == sample.x) {
            Some((_, ys)) => ys.extend_from_slice(&sample.y),
            None => buckets.push((sample.x, sample.y.clone())),
        }
    }

    Ok(buckets)
}

fn day_total(sample: &Sample) -> Result<f64, ProjectionError> {
    if sample.y.is_empty() {
        return Err(ProjectionError::EmptySeries("sample has no y values"));
    }
    ensure_finite(&sample.y)?;
    if !sample.x.is_finite() {
        return Err(ProjectionError::InvalidSample(format!(
            "x value {} is not finite",
            sample.x
        )));
    }
    Ok(sample.y.iter().sum())
}

fn ensure_finite(values: &[f64]) -> Result<(), ProjectionError> {
    for &v in values {
        if !v.is_finite() {
            return Err(ProjectionError::InvalidSample(format!(
                "sample value {} is not finite",
                v
            )));
        }
    }
    Ok(())
}
