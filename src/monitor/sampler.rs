use std::time::Instant;

use sysinfo::Networks;

use crate::model::Sample;

/// One interface's cumulative byte counters as reported by the OS.
#[derive(Clone, Debug)]
pub struct LinkCounters {
    pub interface: String,
    pub sent_bytes: u64,
    pub received_bytes: u64,
}

/// Source of link-layer counter records.
pub trait CounterSource {
    fn refresh(&mut self);
    fn link_counters(&self) -> Vec<LinkCounters>;
}

/// Reads counters from the OS interface table via sysinfo.
pub struct SysinfoSource {
    networks: Networks,
}

impl SysinfoSource {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for SysinfoSource {
    fn refresh(&mut self) {
        self.networks.refresh(true);
    }

    fn link_counters(&self) -> Vec<LinkCounters> {
        self.networks
            .iter()
            .map(|(name, data)| LinkCounters {
                interface: name.clone(),
                sent_bytes: data.total_transmitted(),
                received_bytes: data.total_received(),
            })
            .collect()
    }
}

/// Samples one interface's counters, summing every record that carries its
/// name.
pub struct CounterSampler<S> {
    source: S,
}

impl<S: CounterSource> CounterSampler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns `None` when the interface reports no counters this tick,
    /// for example right after it disappeared.
    pub fn sample(&mut self, interface: &str, now: Instant) -> Option<Sample> {
        self.source.refresh();

        let mut sent = 0u64;
        let mut received = 0u64;
        let mut found = false;
        for record in self.source.link_counters() {
            if record.interface == interface {
                sent += record.sent_bytes;
                received += record.received_bytes;
                found = true;
            }
        }
        if !found {
            return None;
        }

        Some(Sample {
            interface: interface.to_string(),
            sent_bytes: sent,
            received_bytes: received,
            taken_at: now,
        })
    }
}
