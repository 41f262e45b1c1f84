//! Sweep shape classification by corner counting.
//!
//! Each response peak is the estimated frame-to-frame motion. While the
//! camera travels along one edge of its path the peak stays put (up to
//! correlation jitter); when the camera turns a corner the peak jumps.
//! Counting jumps larger than a small radius therefore counts the edges of
//! the path: three for a triangle, four for a rectangle.

use serde::Serialize;

use scanpath_common::config::AnalysisDefaults;
use scanpath_common::error::{ScanpathError, ScanpathResult};
use scanpath_frame_model::{CorrelationSequence, PeakLocation, SweepShape};

/// Corner detection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Peaks within this Manhattan distance of the last corner are jitter.
    pub radius: usize,

    /// A jump back onto the first corner closes the path instead of
    /// counting as another corner.
    pub close_on_origin: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            close_on_origin: true,
        }
    }
}

impl From<&AnalysisDefaults> for ClassifierConfig {
    fn from(defaults: &AnalysisDefaults) -> Self {
        Self {
            radius: defaults.corner_radius,
            close_on_origin: defaults.close_on_origin,
        }
    }
}

/// Full record of a classification decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CornerTrace {
    /// Peak of every response map, in order.
    pub peaks: Vec<PeakLocation>,

    /// Peaks recorded as corners; the first is the starting corner.
    pub corners: Vec<PeakLocation>,

    /// Whether the path returned onto its first corner.
    pub closed: bool,

    /// Resulting shape.
    pub shape: SweepShape,
}

impl CornerTrace {
    /// Number of corners including the implicit starting corner.
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }
}

/// Decides triangular vs. rectangular sweeps from a correlation sequence.
#[derive(Debug, Clone, Default)]
pub struct PathClassifier {
    config: ClassifierConfig,
}

impl PathClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a correlation sequence.
    pub fn classify(&self, sequence: &CorrelationSequence) -> ScanpathResult<SweepShape> {
        Ok(self.trace(sequence)?.shape)
    }

    /// Classify and keep the peaks and corners behind the decision.
    pub fn trace(&self, sequence: &CorrelationSequence) -> ScanpathResult<CornerTrace> {
        let peaks = sequence
            .iter()
            .enumerate()
            .map(|(index, map)| {
                map.peak().ok_or_else(|| {
                    ScanpathError::insufficient_data(format!("response map {index} is empty"))
                })
            })
            .collect::<ScanpathResult<Vec<_>>>()?;

        self.trace_peaks(&peaks)
    }

    /// Count corners over an explicit list of peak locations.
    pub fn trace_peaks(&self, peaks: &[PeakLocation]) -> ScanpathResult<CornerTrace> {
        let Some((&origin, rest)) = peaks.split_first() else {
            return Err(ScanpathError::insufficient_data(
                "cannot classify an empty correlation sequence",
            ));
        };

        let radius = self.config.radius;
        let mut reference = origin;
        let mut corners = vec![origin];
        let mut closed = false;

        for (index, peak) in rest.iter().enumerate() {
            if peak.manhattan_distance(&reference) <= radius {
                continue;
            }

            if self.config.close_on_origin && peak.manhattan_distance(&origin) <= radius {
                tracing::debug!(map = index + 1, %peak, "path closed onto first corner");
                closed = true;
                reference = *peak;
                continue;
            }

            tracing::debug!(map = index + 1, %peak, from = %reference, "corner");
            corners.push(*peak);
            reference = *peak;
        }

        let shape = SweepShape::from_corner_count(corners.len());
        tracing::debug!(corners = corners.len(), %shape, "classified sweep");

        Ok(CornerTrace {
            peaks: peaks.to_vec(),
            corners,
            closed,
            shape,
        })
    }
}

/// Classify with the default radius of 5.
pub fn classify(sequence: &CorrelationSequence) -> ScanpathResult<SweepShape> {
    PathClassifier::default().classify(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peaks(points: &[(usize, usize)]) -> Vec<PeakLocation> {
        points
            .iter()
            .map(|&(r, c)| PeakLocation::new(r, c))
            .collect()
    }

    #[test]
    fn test_empty_sequence_is_insufficient_data() {
        let err = classify(&CorrelationSequence::new()).unwrap_err();
        assert!(matches!(err, ScanpathError::InsufficientData { .. }));
    }

    #[test]
    fn test_single_map_is_one_corner() {
        let trace = PathClassifier::default()
            .trace_peaks(&peaks(&[(55, 60)]))
            .unwrap();
        assert_eq!(trace.corner_count(), 1);
        assert_eq!(trace.shape, SweepShape::Indeterminate);
    }

    #[test]
    fn test_jitter_within_radius_is_ignored() {
        // Exactly 5 away stays on the same segment; 6 away is a corner.
        let trace = PathClassifier::default()
            .trace_peaks(&peaks(&[(55, 60), (57, 63), (55, 60), (60, 61)]))
            .unwrap();
        assert_eq!(trace.corner_count(), 2);
        assert_eq!(trace.corners, peaks(&[(55, 60), (60, 61)]));
    }

    #[test]
    fn test_distance_is_measured_from_last_corner() {
        // Each step is 4 from its predecessor but drifts away from the corner.
        let trace = PathClassifier::default()
            .trace_peaks(&peaks(&[(50, 50), (50, 54), (50, 58), (50, 62)]))
            .unwrap();
        assert_eq!(trace.corners, peaks(&[(50, 50), (50, 58)]));
    }

    #[test]
    fn test_velocity_peaks_of_square_sweep() {
        let trace = PathClassifier::default()
            .trace_peaks(&peaks(&[
                (55, 60),
                (55, 60),
                (60, 55),
                (60, 55),
                (55, 50),
                (55, 50),
                (50, 55),
                (50, 55),
            ]))
            .unwrap();
        assert_eq!(trace.shape, SweepShape::Rectangular);
        assert!(!trace.closed);
    }

    #[test]
    fn test_return_to_origin_counts_without_closing_rule() {
        let points = peaks(&[(0, 0), (50, 50), (0, 50), (0, 0)]);

        let closing = PathClassifier::default().trace_peaks(&points).unwrap();
        assert_eq!(closing.corner_count(), 3);
        assert!(closing.closed);

        let strict = PathClassifier::new(ClassifierConfig {
            close_on_origin: false,
            ..Default::default()
        })
        .trace_peaks(&points)
        .unwrap();
        assert_eq!(strict.corner_count(), 4);
        assert!(!strict.closed);
    }

    #[test]
    fn test_config_from_analysis_defaults() {
        let defaults = AnalysisDefaults {
            corner_radius: 9,
            close_on_origin: false,
            ..Default::default()
        };
        let config = ClassifierConfig::from(&defaults);
        assert_eq!(config.radius, 9);
        assert!(!config.close_on_origin);
    }

    #[test]
    fn test_trace_serializes() {
        let trace = PathClassifier::default()
            .trace_peaks(&peaks(&[(1, 2)]))
            .unwrap();
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["shape"], "indeterminate");
        assert_eq!(json["corners"][0]["col"], 2);
    }
}
