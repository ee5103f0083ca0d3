use crate::model::{RateReading, Sample};

/// Bytes moved between two accepted samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteDelta {
    pub upload: u64,
    pub download: u64,
}

/// Outcome of one tick: the reading to publish and, when the tick produced
/// a trustworthy comparison, the byte delta to accumulate.
#[derive(Clone, Debug, PartialEq)]
pub struct RateUpdate {
    pub reading: RateReading,
    pub delta: Option<ByteDelta>,
}

impl RateUpdate {
    fn zeroed() -> Self {
        Self {
            reading: RateReading::default(),
            delta: None,
        }
    }
}

/// Turns successive counter samples into throughput readings.
///
/// Counters are cumulative, so a reading only makes sense between two
/// samples of the same interface taken at different instants with
/// non-decreasing counters. Anything else publishes a safe value instead
/// of a garbage spike.
#[derive(Default)]
pub struct RateEngine {
    previous: Option<Sample>,
    last_reading: RateReading,
}

impl RateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds in the next sample. The sample becomes the new baseline
    /// whether or not it produced a valid comparison.
    pub fn update(&mut self, current: Sample) -> RateUpdate {
        let update = self.classify(&current);
        self.last_reading = update.reading;
        self.previous = Some(current);
        update
    }

    fn classify(&self, current: &Sample) -> RateUpdate {
        let Some(previous) = &self.previous else {
            return RateUpdate::zeroed();
        };
        if previous.interface != current.interface {
            // Counters from different interfaces are not comparable.
            return RateUpdate::zeroed();
        }

        let elapsed = current
            .taken_at
            .duration_since(previous.taken_at)
            .as_secs_f64();
        if elapsed <= 0.0 {
            // Degenerate interval, keep showing the last reading.
            return RateUpdate {
                reading: self.last_reading,
                delta: None,
            };
        }

        if current.sent_bytes < previous.sent_bytes
            || current.received_bytes < previous.received_bytes
        {
            // Counter reset or wraparound.
            return RateUpdate::zeroed();
        }

        let upload = current.sent_bytes - previous.sent_bytes;
        let download = current.received_bytes - previous.received_bytes;
        RateUpdate {
            reading: RateReading {
                upload_bps: upload as f64 / elapsed,
                download_bps: download as f64 / elapsed,
            },
            delta: Some(ByteDelta { upload, download }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn sample(interface: &str, sent: u64, received: u64, at: Instant) -> Sample {
        Sample {
            interface: interface.to_string(),
            sent_bytes: sent,
            received_bytes: received,
            taken_at: at,
        }
    }

    #[test]
    fn first_sample_reports_zero() {
        let mut engine = RateEngine::new();
        let update = engine.update(sample("en0", 5_000, 9_000, Instant::now()));
        assert_eq!(update.reading, RateReading::default());
        assert_eq!(update.delta, None);
    }

    #[test]
    fn steady_traffic_yields_rate_and_delta() {
        let mut engine = RateEngine::new();
        let t0 = Instant::now();
        engine.update(sample("en0", 0, 0, t0));
        let update = engine.update(sample("en0", 1_000_000, 2_000_000, t0 + Duration::from_secs(1)));
        assert_eq!(update.reading.upload_bps, 1_000_000.0);
        assert_eq!(update.reading.download_bps, 2_000_000.0);
        assert_eq!(
            update.delta,
            Some(ByteDelta {
                upload: 1_000_000,
                download: 2_000_000,
            })
        );
    }

    #[test]
    fn fractional_interval_scales_rate() {
        let mut engine = RateEngine::new();
        let t0 = Instant::now();
        engine.update(sample("en0", 0, 0, t0));
        let update = engine.update(sample("en0", 500_000, 250_000, t0 + Duration::from_millis(500)));
        assert_eq!(update.reading.upload_bps, 1_000_000.0);
        assert_eq!(update.reading.download_bps, 500_000.0);
    }

    #[test]
    fn interface_change_publishes_zero() {
        let mut engine = RateEngine::new();
        let t0 = Instant::now();
        engine.update(sample("en0", 9_000_000, 9_000_000, t0));
        let update = engine.update(sample("en1", 50, 50, t0 + Duration::from_secs(1)));
        assert_eq!(update.reading, RateReading::default());
        assert_eq!(update.delta, None);

        // The new interface becomes the baseline for the next tick.
        let update = engine.update(sample("en1", 150, 250, t0 + Duration::from_secs(2)));
        assert_eq!(update.reading.upload_bps, 100.0);
        assert_eq!(update.reading.download_bps, 200.0);
    }

    #[test]
    fn counter_regression_publishes_zero_and_realigns() {
        let mut engine = RateEngine::new();
        let t0 = Instant::now();
        engine.update(sample("en0", 1_000, 2_000, t0));
        let update = engine.update(sample("en0", 100, 200, t0 + Duration::from_secs(1)));
        assert_eq!(update.reading, RateReading::default());
        assert_eq!(update.delta, None);

        let update = engine.update(sample("en0", 600, 700, t0 + Duration::from_secs(2)));
        assert_eq!(update.reading.upload_bps, 500.0);
        assert_eq!(update.reading.download_bps, 500.0);
        assert_eq!(
            update.delta,
            Some(ByteDelta {
                upload: 500,
                download: 500,
            })
        );
    }

    #[test]
    fn single_counter_regression_is_enough_to_zero() {
        let mut engine = RateEngine::new();
        let t0 = Instant::now();
        engine.update(sample("en0", 1_000, 2_000, t0));
        let update = engine.update(sample("en0", 1_500, 1_999, t0 + Duration::from_secs(1)));
        assert_eq!(update.reading, RateReading::default());
        assert_eq!(update.delta, None);
    }

    #[test]
    fn zero_elapsed_holds_previous_reading() {
        let mut engine = RateEngine::new();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_secs(1);
        engine.update(sample("en0", 0, 0, t0));
        engine.update(sample("en0", 1_000, 2_000, t1));

        let update = engine.update(sample("en0", 1_500, 2_600, t1));
        assert_eq!(update.reading.upload_bps, 1_000.0);
        assert_eq!(update.reading.download_bps, 2_000.0);
        assert_eq!(update.delta, None);

        // The degenerate sample still realigned the baseline.
        let update = engine.update(sample("en0", 2_000, 3_000, t0 + Duration::from_secs(2)));
        assert_eq!(update.reading.upload_bps, 500.0);
        assert_eq!(update.reading.download_bps, 400.0);
    }

    #[test]
    fn idle_interface_reports_zero_rate_with_empty_delta() {
        let mut engine = RateEngine::new();
        let t0 = Instant::now();
        engine.update(sample("en0", 700, 800, t0));
        let update = engine.update(sample("en0", 700, 800, t0 + Duration::from_secs(1)));
        assert_eq!(update.reading, RateReading::default());
        assert_eq!(
            update.delta,
            Some(ByteDelta {
                upload: 0,
                download: 0,
            })
        );
    }
}
