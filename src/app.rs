use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Settings;
use crate::model::{PathUpdate, TrafficSnapshot};
use crate::monitor::{NetworkMonitor, TotalsStore};

/// What the main loop should do after a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Redraw,
    Quit,
}

pub struct App {
    settings: Settings,
    settings_path: PathBuf,
    monitor: NetworkMonitor,
    latest: TrafficSnapshot,
}

impl App {
    pub fn new(settings: Settings, settings_path: PathBuf, store: TotalsStore) -> Self {
        let monitor = NetworkMonitor::new(store);
        let latest = monitor.snapshot();
        Self {
            settings,
            settings_path,
            monitor,
            latest,
        }
    }

    pub fn tick(&mut self) {
        self.latest = self.monitor.tick();
    }

    pub fn apply_path_update(&mut self, update: &PathUpdate) {
        self.monitor.apply_path_update(update);
        self.latest = self.monitor.snapshot();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Ignored;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyOutcome::Quit
            }
            KeyCode::Char('u') => {
                self.settings.speed_unit = self.settings.speed_unit.cycled();
                self.save_settings();
                KeyOutcome::Redraw
            }
            KeyCode::Char('t') => {
                self.settings.text_scale = self.settings.text_scale.cycled();
                self.save_settings();
                KeyOutcome::Redraw
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn save_settings(&self) {
        if let Err(err) = self.settings.save(&self.settings_path) {
            log::warn!("failed to save settings: {err:#}");
        }
    }

    pub fn snapshot(&self) -> &TrafficSnapshot {
        &self.latest
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
