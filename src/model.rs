use std::fmt;
use std::time::Instant;

use chrono::NaiveDate;

/// One reading of an interface's cumulative link-layer byte counters.
#[derive(Clone, Debug)]
pub struct Sample {
    pub interface: String,
    pub sent_bytes: u64,
    pub received_bytes: u64,
    pub taken_at: Instant,
}

/// Current throughput in bytes per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RateReading {
    pub upload_bps: f64,
    pub download_bps: f64,
}

/// Bytes moved so far during one local calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub upload_bytes: u64,
    pub download_bytes: u64,
}

impl DailyTotals {
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            upload_bytes: 0,
            download_bytes: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceKind {
    Wifi,
    Wired,
    Other,
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InterfaceKind::Wifi => "wifi",
            InterfaceKind::Wired => "wired",
            InterfaceKind::Other => "other",
        };
        write!(f, "{label}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub name: String,
    pub kind: InterfaceKind,
}

/// One network path change: the set of usable interfaces, in enumeration
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathUpdate {
    pub interfaces: Vec<InterfaceInfo>,
}

/// Everything the presentation layer needs for one frame.
#[derive(Clone, Debug)]
pub struct TrafficSnapshot {
    pub interface: Option<InterfaceInfo>,
    pub reading: RateReading,
    pub totals: DailyTotals,
}
