use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::DailyTotals;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// On-disk record of one day's totals. Byte counts travel as JSON numbers;
/// a single day of traffic fits in an f64 without loss.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedTotals {
    date: String,
    upload_bytes: f64,
    download_bytes: f64,
}

/// Reads and writes the daily totals file.
pub struct TotalsStore {
    path: PathBuf,
}

impl TotalsStore {
    pub const FILENAME: &'static str = "daily_totals.json";

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Per-user totals file under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("netgauge")
            .join(Self::FILENAME)
    }

    fn load(&self) -> Option<DailyTotals> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let state: PersistedTotals = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("ignoring malformed totals file {}: {err}", self.path.display());
                return None;
            }
        };
        let date = match NaiveDate::parse_from_str(&state.date, DATE_FORMAT) {
            Ok(date) => date,
            Err(err) => {
                log::warn!("ignoring totals with bad date {:?}: {err}", state.date);
                return None;
            }
        };
        Some(DailyTotals {
            date,
            upload_bytes: state.upload_bytes.max(0.0) as u64,
            download_bytes: state.download_bytes.max(0.0) as u64,
        })
    }

    fn save(&self, totals: &DailyTotals) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let state = PersistedTotals {
            date: totals.date.format(DATE_FORMAT).to_string(),
            upload_bytes: totals.upload_bytes as f64,
            download_bytes: totals.download_bytes as f64,
        };
        let json = serde_json::to_string_pretty(&state).context("failed to serialize totals")?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Day-bucketed upload and download totals, persisted after every change
/// so a crash loses at most the current tick.
pub struct DailyAccumulator {
    totals: DailyTotals,
    store: TotalsStore,
}

impl DailyAccumulator {
    /// Restores persisted totals when they belong to `today`, otherwise
    /// starts the day at zero and persists that immediately.
    pub fn load(store: TotalsStore, today: NaiveDate) -> Self {
        let totals = match store.load() {
            Some(saved) if saved.date == today => {
                log::info!(
                    "restored totals for {}: up {} B, down {} B",
                    saved.date,
                    saved.upload_bytes,
                    saved.download_bytes
                );
                saved
            }
            _ => {
                let fresh = DailyTotals::zero(today);
                if let Err(err) = store.save(&fresh) {
                    log::warn!("failed to persist totals: {err:#}");
                }
                fresh
            }
        };
        Self { totals, store }
    }

    /// Adds an accepted delta, rolling the bucket over first when the
    /// local date has advanced.
    pub fn apply_delta(&mut self, upload: u64, download: u64, today: NaiveDate) {
        if self.totals.date != today {
            self.totals = DailyTotals::zero(today);
        }
        self.totals.upload_bytes = self.totals.upload_bytes.saturating_add(upload);
        self.totals.download_bytes = self.totals.download_bytes.saturating_add(download);
        if let Err(err) = self.store.save(&self.totals) {
            log::warn!("failed to persist totals: {err:#}");
        }
    }

    pub fn totals(&self) -> &DailyTotals {
        &self.totals
    }
}
