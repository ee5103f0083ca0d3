use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Display unit for throughput readings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    /// Decimal megabits per second.
    Bits,
    /// Decimal megabytes per second.
    #[default]
    Bytes,
}

impl SpeedUnit {
    pub fn cycled(self) -> Self {
        match self {
            SpeedUnit::Bits => SpeedUnit::Bytes,
            SpeedUnit::Bytes => SpeedUnit::Bits,
        }
    }
}

impl AsRef<str> for SpeedUnit {
    fn as_ref(&self) -> &str {
        match self {
            SpeedUnit::Bits => "Mbps",
            SpeedUnit::Bytes => "MB/s",
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Emphasis level for the speed readout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextScale {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextScale {
    pub fn cycled(self) -> Self {
        match self {
            TextScale::Small => TextScale::Medium,
            TextScale::Medium => TextScale::Large,
            TextScale::Large => TextScale::Small,
        }
    }
}

impl AsRef<str> for TextScale {
    fn as_ref(&self) -> &str {
        match self {
            TextScale::Small => "small",
            TextScale::Medium => "medium",
            TextScale::Large => "large",
        }
    }
}

impl fmt::Display for TextScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub speed_unit: SpeedUnit,
    pub text_scale: TextScale,
}

impl Settings {
    pub const FILENAME: &'static str = "settings.json";

    /// Per-user settings file under the platform config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("netgauge")
            .join(Self::FILENAME)
    }

    /// Reads settings from `path`, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("no settings file at {}, using defaults", path.display());
            return Self::default();
        }
        fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))
            .and_then(|file| {
                serde_json::from_reader(file)
                    .with_context(|| format!("failed to parse {}", path.display()))
            })
            .unwrap_or_else(|err| {
                log::error!("invalid settings: {err:#}, using defaults");
                Self::default()
            })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let file = fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, self).context("failed to serialize settings")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bytes_and_medium() {
        let settings = Settings::default();
        assert_eq!(settings.speed_unit, SpeedUnit::Bytes);
        assert_eq!(settings.text_scale, TextScale::Medium);
    }

    #[test]
    fn unit_cycles_between_both_values() {
        assert_eq!(SpeedUnit::Bytes.cycled(), SpeedUnit::Bits);
        assert_eq!(SpeedUnit::Bits.cycled(), SpeedUnit::Bytes);
    }

    #[test]
    fn scale_cycles_through_all_values() {
        assert_eq!(TextScale::Small.cycled(), TextScale::Medium);
        assert_eq!(TextScale::Medium.cycled(), TextScale::Large);
        assert_eq!(TextScale::Large.cycled(), TextScale::Small);
    }

    #[test]
    fn saves_and_reloads_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netgauge").join(Settings::FILENAME);
        let settings = Settings {
            speed_unit: SpeedUnit::Bits,
            text_scale: TextScale::Large,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILENAME);
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILENAME);
        std::fs::write(&path, r#"{"speed_unit":"bits","launch_at_login":true}"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.speed_unit, SpeedUnit::Bits);
        assert_eq!(settings.text_scale, TextScale::Medium);
    }
}
