// SVG markup adapter - maps projection output to renderable fragments
use crate::application::chart_projection::{self, ConsumptionOverlay};
use crate::application::keg_store::KegStateStore;
use crate::domain::catalog::tap_menu_label;
use crate::domain::projection::{
    BarLayout, MarkerStyle, ProjectedPoint, RemainingBar, ScatterProjection, TrendPoint, Viewport,
};

const EMPTY_CHART: &str = "<svg class='chart-empty'></svg>";

/// Rendered markup for one dashboard pass. Charts that could not be
/// projected fall back to an empty placeholder instead of crashing the
/// render.
#[derive(Debug, Clone)]
pub struct DashboardMarkup {
    pub temperature: String,
    pub consumption: String,
    pub remaining: String,
    pub tap_menu: Vec<String>,
}

/// Render the currently selected keg. None before the first snapshot or
/// when the server reports no kegs; callers check before rendering.
pub fn render_dashboard(store: &KegStateStore, viewport: Viewport) -> Option<DashboardMarkup> {
    let keg = store.current()?;

    let consumption = match chart_projection::project_consumption(keg, viewport) {
        Ok(overlay) => consumption_svg(&overlay),
        Err(e) => {
            tracing::debug!("consumption chart not renderable: {}", e);
            EMPTY_CHART.to_string()
        }
    };

    let remaining = match chart_projection::project_remaining(keg.remaining.value, viewport) {
        Ok(bar) => remaining_svg(&bar, viewport),
        Err(e) => {
            tracing::debug!("remaining chart not renderable: {}", e);
            EMPTY_CHART.to_string()
        }
    };

    let tap_menu = store
        .kegs()
        .iter()
        .enumerate()
        .map(|(i, keg)| tap_menu_label(i, keg))
        .collect();

    Some(DashboardMarkup {
        temperature: temperature_text(store.temperature()),
        consumption,
        remaining,
        tap_menu,
    })
}

pub fn temperature_text(temperature: Option<f64>) -> String {
    match temperature {
        Some(t) => format!("{:.2} °F", t),
        None => "--".to_string(),
    }
}

pub fn scatter_svg(projection: &ScatterProjection) -> String {
    let mut inner = String::new();

    if projection.gradient {
        inner.push_str(
            "<defs><linearGradient id='chart-fill' x1='0' y1='0' x2='0' y2='1'>\
             <stop offset='0%' class='chart-fill-top'></stop>\
             <stop offset='100%' class='chart-fill-bottom'></stop>\
             </linearGradient></defs>",
        );
    }

    for point in &projection.points {
        inner.push_str(&point_fragment(point, "chart-point"));
    }
    for mean in &projection.means {
        inner.push_str(&point_fragment(
            &ProjectedPoint {
                x: mean.x,
                y: mean.y,
                style: MarkerStyle::Circle,
                radius: 2.0,
            },
            "chart-day-mean",
        ));
    }
    if !projection.trendline.is_empty() {
        inner.push_str(&polyline_fragment(&projection.trendline, "chart-trendline"));
    }

    wrap_svg(&inner)
}

pub fn consumption_svg(overlay: &ConsumptionOverlay) -> String {
    let mut inner = String::new();
    inner.push_str(&polyline_fragment(&overlay.actual, "chart-trendline"));
    inner.push_str(&polyline_fragment(&overlay.prediction, "chart-prediction"));
    wrap_svg(&inner)
}

pub fn remaining_svg(bar: &RemainingBar, viewport: Viewport) -> String {
    let inner = format!(
        "<rect x='0' y='{}' width='{}' height='{}' class='{}'></rect>\
         <text x='50%' y='50%' class='remaining-text'>{}%</text>",
        bar.top,
        viewport.width,
        bar.height,
        bar.severity.as_class(),
        bar.label
    );
    wrap_svg(&inner)
}

pub fn bars_svg(bars: &[BarLayout]) -> String {
    let inner: String = bars
        .iter()
        .map(|bar| {
            format!(
                "<rect x='{}%' y='{}%' width='{}%' height='{}%'></rect>",
                bar.x_percent, bar.y_percent, bar.width_percent, bar.height_percent
            )
        })
        .collect();
    wrap_svg(&inner)
}

fn point_fragment(point: &ProjectedPoint, class: &str) -> String {
    match point.style {
        MarkerStyle::Rect => format!(
            "<rect x='{}' y='{}' width='{}' height='{}' class='{}'></rect>",
            point.x, point.y, point.radius, point.radius, class
        ),
        MarkerStyle::Circle => format!(
            "<circle cx='{}' cy='{}' r='{}' class='{}'></circle>",
            point.x, point.y, point.radius, class
        ),
    }
}

fn polyline_fragment(points: &[TrendPoint], class: &str) -> String {
    let coords: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
    format!(
        "<polyline points='{}' class='{}'></polyline>",
        coords.join(" "),
        class
    )
}

fn wrap_svg(inner: &str) -> String {
    format!("<svg>{}</svg>", inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::projection::Severity;
    use crate::domain::telemetry::{AcceptedSnapshot, Beer, KegRecord, Remaining, SeriesSpec};
    use std::collections::BTreeMap;

    fn keg(name: &str, remaining: f64) -> KegRecord {
        KegRecord {
            id: 1,
            beer: Beer {
                id: 2,
                name: name.to_string(),
                brand: None,
                abv: None,
                ibu: None,
                rating: None,
                attributes: BTreeMap::new(),
            },
            consumption: SeriesSpec::default(),
            remaining: Remaining { value: remaining },
            volume: None,
        }
    }

    #[test]
    fn test_temperature_text() {
        assert_eq!(temperature_text(Some(70.256)), "70.26 °F");
        assert_eq!(temperature_text(None), "--");
    }

    #[test]
    fn test_remaining_svg_carries_severity_class() {
        let bar = RemainingBar {
            top: 25.0,
            height: 75.0,
            label: "75.00".to_string(),
            severity: Severity::Ok,
        };
        let svg = remaining_svg(&bar, Viewport::new(100.0, 100.0));

        assert!(svg.contains("class='ok'"));
        assert!(svg.contains(">75.00%</text>"));
        assert!(svg.contains("y='25'"));
    }

    #[test]
    fn test_scatter_svg_points_and_gradient() {
        let projection = ScatterProjection {
            points: vec![
                ProjectedPoint {
                    x: 10.0,
                    y: 90.0,
                    style: MarkerStyle::Circle,
                    radius: 2.0,
                },
                ProjectedPoint {
                    x: 30.0,
                    y: 80.0,
                    style: MarkerStyle::Rect,
                    radius: 3.0,
                },
            ],
            means: vec![],
            trendline: vec![TrendPoint::new(10.0, 90.0), TrendPoint::new(30.0, 80.0)],
            gradient: true,
        };
        let svg = scatter_svg(&projection);

        assert!(svg.contains("<circle cx='10' cy='90' r='2' class='chart-point'>"));
        assert!(svg.contains("<rect x='30' y='80' width='3' height='3' class='chart-point'>"));
        assert!(svg.contains("class='chart-trendline'"));
        assert!(svg.contains("linearGradient"));
    }

    #[test]
    fn test_bars_svg_percent_units() {
        let bars = vec![BarLayout {
            x_percent: 0.0,
            width_percent: 50.0,
            y_percent: 50.0,
            height_percent: 50.0,
        }];
        let svg = bars_svg(&bars);
        assert!(svg.contains("<rect x='0%' y='50%' width='50%' height='50%'>"));
    }

    #[test]
    fn test_polyline_classes() {
        let overlay = ConsumptionOverlay {
            actual: vec![TrendPoint::new(0.0, 0.0), TrendPoint::new(10.0, 20.0)],
            prediction: vec![TrendPoint::new(10.0, 20.0), TrendPoint::new(20.0, 40.0)],
        };
        let svg = consumption_svg(&overlay);

        assert!(svg.contains("points='0,0 10,20' class='chart-trendline'"));
        assert!(svg.contains("points='10,20 20,40' class='chart-prediction'"));
    }

    #[test]
    fn test_render_dashboard_empty_store() {
        let store = KegStateStore::new();
        assert!(render_dashboard(&store, Viewport::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn test_render_dashboard_placeholder_on_unprojectable_chart() {
        // No consumption sets and no volume: chart falls back to the
        // placeholder, the rest still renders.
        let mut store = KegStateStore::new();
        store.apply(AcceptedSnapshot {
            update_id: 1,
            temperature: Some(68.0),
            kegs: vec![keg("Helles", 0.10)],
        });

        let markup = render_dashboard(&store, Viewport::new(100.0, 100.0)).unwrap();
        assert_eq!(markup.consumption, EMPTY_CHART);
        assert!(markup.remaining.contains("class='low'"));
        assert_eq!(markup.temperature, "68.00 °F");
        assert_eq!(markup.tap_menu, vec!["Tap 1: Helles (10.00% remaining)"]);
    }
}
