//! Single-channel histogram computation.

use serde::{Deserialize, Serialize};

use crate::image::Plane;

/// Histogram of an 8-bit plane (256 bins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHistogram {
    /// Bin counts, one per sample value.
    pub bins: Vec<u32>,
    /// Largest bin count (for normalization).
    pub peak: u32,
    /// Number of samples counted.
    pub total: u64,
}

/// Compact description of a channel histogram, as carried in reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramSummary {
    /// Mean sample value.
    pub mean: f64,
    /// Most frequent sample value (the lowest one on ties).
    pub mode: u8,
    /// Number of samples at `mode`.
    pub peak: u32,
}

impl ChannelHistogram {
    /// Most frequent sample value, or `None` for an empty plane.
    pub fn mode(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        self.bins.iter().position(|&n| n == self.peak).map(|v| v as u8)
    }

    pub fn summary(&self) -> Option<HistogramSummary> {
        Some(HistogramSummary {
            mean: self.mean()?,
            mode: self.mode()?,
            peak: self.peak,
        })
    }

    /// Mean sample value, or `None` for an empty plane.
    pub fn mean(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let sum: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(v, &n)| v as f64 * n as f64)
            .sum();
        Some(sum / self.total as f64)
    }
}

/// Compute the histogram of a plane.
pub fn compute(plane: &Plane) -> ChannelHistogram {
    let mut bins = vec![0u32; 256];
    for &v in &plane.data {
        bins[v as usize] += 1;
    }
    let peak = bins.iter().copied().max().unwrap_or(0);
    ChannelHistogram {
        bins,
        peak,
        total: plane.data.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_empty_plane() {
        let hist = compute(&Plane::filled(0, 0, 0));
        assert_eq!(hist.bins.len(), 256);
        assert_eq!(hist.peak, 0);
        assert_eq!(hist.mean(), None);
        assert_eq!(hist.summary(), None);
    }

    #[test]
    fn test_histogram_counts_match() {
        let plane = Plane::from_fn(4, 5, |x, _| if x < 2 { 10 } else { 200 });
        let hist = compute(&plane);
        assert_eq!(hist.bins[10], 10);
        assert_eq!(hist.bins[200], 10);
        assert_eq!(hist.bins.iter().sum::<u32>(), 20);
        assert_eq!(hist.peak, 10);
        assert!((hist.mean().unwrap() - 105.0).abs() < 1e-9);
        assert_eq!(hist.mode(), Some(10));
    }

    #[test]
    fn test_summary_reports_mode_and_peak() {
        let plane = Plane::from_fn(5, 2, |x, _| if x == 0 { 40 } else { 90 });
        let summary = compute(&plane).summary().unwrap();
        assert_eq!(summary.mode, 90);
        assert_eq!(summary.peak, 8);
        assert!((summary.mean - 80.0).abs() < 1e-9);
    }
}
