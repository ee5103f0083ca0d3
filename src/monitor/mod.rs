mod daily;
mod interface;
mod rate;
mod sampler;

pub use daily::TotalsStore;
pub use interface::spawn_path_watcher;

use daily::DailyAccumulator;
use interface::select_active;
use rate::RateEngine;
use sampler::{CounterSampler, SysinfoSource};

use std::time::Instant;

use chrono::{Local, NaiveDate};

use crate::model::{InterfaceInfo, PathUpdate, RateReading, Sample, TrafficSnapshot};

/// Owns the whole sampling pipeline: which interface to watch, the rate
/// baseline, and the day's running totals.
pub struct NetworkMonitor {
    sampler: CounterSampler<SysinfoSource>,
    engine: RateEngine,
    daily: DailyAccumulator,
    active: Option<InterfaceInfo>,
    reading: RateReading,
}

impl NetworkMonitor {
    pub fn new(store: TotalsStore) -> Self {
        Self {
            sampler: CounterSampler::new(SysinfoSource::new()),
            engine: RateEngine::new(),
            daily: DailyAccumulator::load(store, Local::now().date_naive()),
            active: None,
            reading: RateReading::default(),
        }
    }

    /// Re-selects the active interface after a path change.
    pub fn apply_path_update(&mut self, update: &PathUpdate) {
        let selected = select_active(&update.interfaces).cloned();
        if selected != self.active {
            match &selected {
                Some(info) => log::info!("active interface: {} ({})", info.name, info.kind),
                None => log::info!("no active interface"),
            }
            self.active = selected;
        }
    }

    /// One sampling tick. Without an active interface, or when its
    /// counters are unavailable, the last reading stays in place.
    pub fn tick(&mut self) -> TrafficSnapshot {
        if let Some(active) = self.active.clone() {
            match self.sampler.sample(&active.name, Instant::now()) {
                Some(sample) => self.ingest(sample, Local::now().date_naive()),
                None => log::debug!("{}: no counters this tick", active.name),
            }
        }
        self.snapshot()
    }

    fn ingest(&mut self, sample: Sample, today: NaiveDate) {
        let update = self.engine.update(sample);
        self.reading = update.reading;
        if let Some(delta) = update.delta {
            self.daily.apply_delta(delta.upload, delta.download, today);
        }
    }

    pub fn snapshot(&self) -> TrafficSnapshot {
        TrafficSnapshot {
            interface: self.active.clone(),
            reading: self.reading,
            totals: *self.daily.totals(),
        }
    }
}
