use serde::{Deserialize, Serialize};

/// Time-aligned upload/download series for the traffic chart.
///
/// Invariant: the three vectors always have equal length. [`new`]
/// enforces this by truncating to the shortest input, so a backend
/// that returns ragged arrays never produces a misaligned chart.
///
/// [`new`]: HistorySeries::new
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub time: Vec<String>,
    pub upload: Vec<f64>,
    pub download: Vec<f64>,
}

impl HistorySeries {
    pub fn new(mut time: Vec<String>, mut upload: Vec<f64>, mut download: Vec<f64>) -> Self {
        let len = time.len().min(upload.len()).min(download.len());
        time.truncate(len);
        upload.truncate(len);
        download.truncate(len);
        Self {
            time,
            upload,
            download,
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Largest rate across both series, used to scale the chart's Y axis.
    pub fn max_rate(&self) -> f64 {
        self.upload
            .iter()
            .chain(self.download.iter())
            .copied()
            .fold(0.0_f64, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_input_truncates_to_shortest() {
        let series = HistorySeries::new(
            vec!["12:00".into(), "12:01".into(), "12:02".into()],
            vec![1.0, 2.0],
            vec![3.0, 4.0, 5.0],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.time.len(), 2);
        assert_eq!(series.upload.len(), 2);
        assert_eq!(series.download.len(), 2);
    }

    #[test]
    fn max_rate_spans_both_series() {
        let series = HistorySeries::new(
            vec!["a".into(), "b".into()],
            vec![1.5, 9.0],
            vec![4.0, 2.0],
        );
        assert!((series.max_rate() - 9.0).abs() < f64::EPSILON);
    }
}
