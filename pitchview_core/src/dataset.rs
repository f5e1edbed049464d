//! Trajectory dataset model and loader.
//!
//! A dataset is a JSON array of records:
//!
//! ```text
//! [ { "name": "Fastball", "samples": [ {"x": 0, "y": 50, "z": 6, "time": 0}, ... ] }, ... ]
//! ```
//!
//! The data generator's own field names (`pitch_name`, `pitch_trajectory`)
//! are accepted as aliases.

use crate::error::DatasetError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One timestamped sample, in domain units (feet, seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub time: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, z: f64, time: f64) -> Self {
        Self { x, y, z, time }
    }
}

/// A raw trajectory as stored on disk, sentinel sample included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    #[serde(alias = "pitch_name")]
    pub name: String,

    #[serde(alias = "pitch_trajectory")]
    pub samples: Vec<Sample>,
}

/// Playback timing derived from a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Time of the last recorded sample, in milliseconds
    pub duration_ms: f64,

    /// Stagger before this trajectory starts, in milliseconds
    pub delay_ms: f64,
}

impl TrajectoryRecord {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    /// Duration is read from the final raw sample, sentinel included.
    pub fn timing(&self) -> Timing {
        Timing {
            duration_ms: self.samples.last().map_or(0.0, |s| s.time * 1000.0),
            delay_ms: 0.0,
        }
    }

    /// Whether sample times never decrease.
    pub fn is_time_ordered(&self) -> bool {
        self.samples.windows(2).all(|pair| pair[0].time <= pair[1].time)
    }
}

/// Parses a dataset from a JSON string.
pub fn parse_dataset(json: &str) -> Result<Vec<TrajectoryRecord>, DatasetError> {
    let records: Vec<TrajectoryRecord> = serde_json::from_str(json)?;
    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(records)
}

/// Loads a dataset from a JSON file.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<TrajectoryRecord>, DatasetError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let records = parse_dataset(&json)?;
    tracing::info!(
        path = %path.display(),
        trajectories = records.len(),
        "Loaded dataset"
    );
    Ok(records)
}

/// Built-in two-pitch dataset for demos and smoke tests.
///
/// Both records carry six raw samples, the last one being the generator's
/// overrun past home plate. The shadow pitch drifts right and sinks.
pub fn sample_dataset() -> Vec<TrajectoryRecord> {
    let main: Vec<Sample> = (0..6)
        .map(|k| {
            let k = k as f64;
            Sample::new(10.0 * k, 50.0 - 10.0 * k, 6.0 - 0.5 * k, 0.1 * k)
        })
        .collect();

    let shadow = main
        .iter()
        .enumerate()
        .map(|(k, s)| Sample::new(s.x + 0.4 * k as f64, s.y, s.z - 0.15 * k as f64, s.time))
        .collect();

    vec![
        TrajectoryRecord::new("Test", main),
        TrajectoryRecord::new("Test (shadow)", shadow),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_generator_field_names() {
        let json = r#"[
            { "pitch_name": "Slider",
              "pitch_trajectory": [
                { "x": 0, "y": 50, "z": 6, "time": 0 },
                { "x": 10, "y": 40, "z": 5.5, "time": 0.1 }
              ] }
        ]"#;

        let records = parse_dataset(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Slider");
        assert_eq!(records[0].samples[1], Sample::new(10.0, 40.0, 5.5, 0.1));
    }

    #[test]
    fn test_parse_plain_field_names() {
        let json = r#"[{ "name": "A", "samples": [] }]"#;
        let records = parse_dataset(json).unwrap();
        assert_eq!(records[0].name, "A");
        assert!(records[0].samples.is_empty());
    }

    #[test]
    fn test_empty_dataset_is_error() {
        assert!(matches!(parse_dataset("[]"), Err(DatasetError::Empty)));
        assert!(matches!(parse_dataset("{"), Err(DatasetError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_dataset("/nonexistent/pitches.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn test_timing_uses_last_raw_sample() {
        let records = sample_dataset();
        let timing = records[0].timing();
        assert_relative_eq!(timing.duration_ms, 500.0, epsilon = 1e-9);
        assert_relative_eq!(timing.delay_ms, 0.0);

        assert_eq!(TrajectoryRecord::new("empty", vec![]).timing().duration_ms, 0.0);
    }

    #[test]
    fn test_sample_dataset_shape() {
        let records = sample_dataset();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.samples.len() == 6));
        assert!(records.iter().all(TrajectoryRecord::is_time_ordered));
        assert_eq!(records[0].samples[0], Sample::new(0.0, 50.0, 6.0, 0.0));
    }
}
