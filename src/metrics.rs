//! Performance metrics and statistics tracking for the screening service.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for the screening pipeline
pub struct ScreeningMetrics {
    /// Total records screened
    pub records_screened: AtomicU64,
    /// Records predicted positive
    pub positive_predictions: AtomicU64,
    /// Records that failed to encode
    pub encoding_failures: AtomicU64,
    /// Processing times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Probability distribution buckets [0.0-0.1) .. [0.9-1.0]
    probability_buckets: RwLock<[u64; 10]>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl ScreeningMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            records_screened: AtomicU64::new(0),
            positive_predictions: AtomicU64::new(0),
            encoding_failures: AtomicU64::new(0),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            probability_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record one screened record
    pub fn record_screening(&self, processing_time: Duration, probability: f64, label: u8) {
        self.records_screened.fetch_add(1, Ordering::Relaxed);
        if label == 1 {
            self.positive_predictions.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            // Keep only the most recent samples for memory efficiency
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        let bucket = (probability * 10.0).min(9.0) as usize;
        if let Ok(mut buckets) = self.probability_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a record that failed encoding
    pub fn record_failure(&self) {
        self.encoding_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = self.processing_times.read().unwrap();
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Get current throughput (records per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.records_screened.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Get the probability distribution
    pub fn get_probability_distribution(&self) -> [u64; 10] {
        *self.probability_buckets.read().unwrap()
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let screened = self.records_screened.load(Ordering::Relaxed);
        let positives = self.positive_predictions.load(Ordering::Relaxed);
        let failures = self.encoding_failures.load(Ordering::Relaxed);
        let positive_rate = if screened > 0 {
            (positives as f64 / screened as f64) * 100.0
        } else {
            0.0
        };

        let stats = self.get_processing_stats();
        let distribution = self.get_probability_distribution();

        info!(
            screened,
            positives,
            failures,
            positive_rate = format!("{:.1}%", positive_rate),
            throughput = format!("{:.1} rec/s", self.get_throughput()),
            "Screening metrics summary"
        );
        info!(
            mean_us = stats.mean_us,
            p50_us = stats.p50_us,
            p95_us = stats.p95_us,
            p99_us = stats.p99_us,
            "Processing time"
        );
        for (i, &count) in distribution.iter().enumerate() {
            if count > 0 {
                info!(
                    bucket = format!("{:.1}-{:.1}", i as f64 / 10.0, (i + 1) as f64 / 10.0),
                    count, "Probability bucket"
                );
            }
        }
    }
}

impl Default for ScreeningMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Periodic metrics reporter
pub struct MetricsReporter {
    metrics: Arc<ScreeningMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<ScreeningMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}
