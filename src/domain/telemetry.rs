// Telemetry data domain models
use serde::Deserialize;
use std::collections::BTreeMap;

/// One `(x, samples)` pair in a consumption series. A day with several
/// pour readings carries all of them under a single x value.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    pub x: f64,
    #[serde(deserialize_with = "one_or_many")]
    pub y: Vec<f64>,
}

impl Sample {
    pub fn new(x: f64, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    pub fn single(x: f64, y: f64) -> Self {
        Self { x, y: vec![y] }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YSamples {
    One(f64),
    Many(Vec<f64>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match YSamples::deserialize(deserializer)? {
        YSamples::One(y) => Ok(vec![y]),
        YSamples::Many(ys) => Ok(ys),
    }
}

/// An ordered sequence of samples plus rendering hints. The hints are
/// carried through to the projection untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleSet {
    #[serde(default)]
    pub points: Vec<Sample>,
    pub radius: Option<f64>,
    pub marker: Option<String>,
}

impl SampleSet {
    pub fn new(points: Vec<Sample>) -> Self {
        Self {
            points,
            radius: None,
            marker: None,
        }
    }
}

/// Named collection of sample sets. The consumption overlay reads the
/// conventional set names "actual" and "prediction".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SeriesSpec {
    pub sets: BTreeMap<String, SampleSet>,
}

impl SeriesSpec {
    pub fn get(&self, name: &str) -> Option<&SampleSet> {
        self.sets.get(name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Beer {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub abv: Option<f64>,
    pub ibu: Option<f64>,
    pub rating: Option<f64>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Remaining {
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KegRecord {
    pub id: i64,
    pub beer: Beer,
    pub consumption: SeriesSpec,
    pub remaining: Remaining,
    /// Total keg volume, the normalization constant for the stacked
    /// consumption overlay. Absent when the server has no fill record.
    pub volume: Option<f64>,
}

/// Payload body of one inbound stream event. The update id travels as
/// event metadata, not in the body.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotPayload {
    pub temperature: Option<f64>,
    #[serde(default)]
    pub kegs: Vec<KegRecord>,
}

/// A snapshot that passed the sequencer: payload plus the event id that
/// carried it.
#[derive(Debug, Clone)]
pub struct AcceptedSnapshot {
    pub update_id: i64,
    pub temperature: Option<f64>,
    pub kegs: Vec<KegRecord>,
}

impl AcceptedSnapshot {
    pub fn new(update_id: i64, payload: SnapshotPayload) -> Self {
        Self {
            update_id,
            temperature: payload.temperature,
            kegs: payload.kegs,
        }
    }
}
