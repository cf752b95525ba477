//! # Frame timing
//!
//! Rolling frame-time statistics for the HUD.
//!
//! ```rust
//! use std::time::Duration;
//! use neighborhood::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//! for _ in 0..10 {
//!     monitor.record_frame(Duration::from_millis(16));
//! }
//! monitor.refresh();
//! assert!((monitor.metrics().fps - 62.5).abs() < 0.1);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Averaged frame statistics
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
        }
    }
}

pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    last_frame: Option<Instant>,
    current_metrics: PerformanceMetrics,
    since_update: Duration,
    update_interval: Duration,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_config(120, Duration::from_millis(100))
    }

    /// Keeps `max_samples` frames and recomputes metrics every `update_interval`.
    pub fn with_config(max_samples: usize, update_interval: Duration) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples: max_samples.max(1),
            last_frame: None,
            current_metrics: PerformanceMetrics::default(),
            since_update: Duration::ZERO,
            update_interval,
        }
    }

    /// Marks a frame boundary and returns the time since the previous one.
    ///
    /// The first call only starts the clock and returns zero.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = self
            .last_frame
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);
        if !elapsed.is_zero() {
            self.record_frame(elapsed);
        }
        elapsed
    }

    /// Adds one frame time; metrics refresh once per update interval.
    pub fn record_frame(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);

        self.since_update += frame_time;
        if self.since_update >= self.update_interval {
            self.since_update = Duration::ZERO;
            self.refresh();
        }
    }

    /// Recomputes metrics from the current samples.
    pub fn refresh(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time_ms = total_time.as_secs_f32() * 1000.0 / self.frame_times.len() as f32;

        self.current_metrics.frame_time_ms = avg_frame_time_ms;
        self.current_metrics.fps = if avg_frame_time_ms > 0.0 {
            1000.0 / avg_frame_time_ms
        } else {
            0.0
        };

        if let (Some(min_time), Some(max_time)) =
            (self.frame_times.iter().min(), self.frame_times.iter().max())
        {
            self.current_metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Frame times in milliseconds, oldest first, for graphing
    pub fn frame_time_history(&self) -> Vec<f32> {
        self.frame_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_metrics_average_over_window() {
        let mut monitor = PerformanceMonitor::with_config(4, Duration::from_secs(60));
        for ms in [10, 20, 30, 40] {
            monitor.record_frame(Duration::from_millis(ms));
        }
        monitor.refresh();

        let metrics = monitor.metrics();
        assert_relative_eq!(metrics.frame_time_ms, 25.0, epsilon = 1e-3);
        assert_relative_eq!(metrics.fps, 40.0, epsilon = 1e-2);
        assert_relative_eq!(metrics.min_frame_time_ms, 10.0, epsilon = 1e-3);
        assert_relative_eq!(metrics.max_frame_time_ms, 40.0, epsilon = 1e-3);
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut monitor = PerformanceMonitor::with_config(2, Duration::from_secs(60));
        for ms in [100, 10, 10] {
            monitor.record_frame(Duration::from_millis(ms));
        }
        assert_eq!(monitor.frame_time_history().len(), 2);
        monitor.refresh();
        assert_relative_eq!(monitor.metrics().max_frame_time_ms, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_metrics_refresh_on_interval() {
        let mut monitor = PerformanceMonitor::with_config(10, Duration::from_millis(50));
        monitor.record_frame(Duration::from_millis(20));
        assert_eq!(monitor.metrics().fps, 0.0);
        monitor.record_frame(Duration::from_millis(30));
        assert!(monitor.metrics().fps > 0.0);
    }

    #[test]
    fn test_first_tick_only_starts_clock() {
        let mut monitor = PerformanceMonitor::new();
        assert_eq!(monitor.tick(), Duration::ZERO);
        assert!(monitor.frame_time_history().is_empty());
    }
}
