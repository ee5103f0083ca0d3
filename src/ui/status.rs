use std::io::Write;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use crate::config::{Settings, TextScale};
use crate::format::{format_rate, format_total};
use crate::model::TrafficSnapshot;

/// Redraws the status screen from one snapshot. Pure function of its
/// inputs, so the main loop can call it after any event.
pub fn draw(out: &mut impl Write, snapshot: &TrafficSnapshot, settings: &Settings) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print("netgauge"))?;

    let speed = format!(
        "↓ {} / ↑ {}",
        format_rate(snapshot.reading.download_bps, settings.speed_unit),
        format_rate(snapshot.reading.upload_bps, settings.speed_unit),
    );
    let emphasis = match settings.text_scale {
        TextScale::Small => Attribute::Dim,
        TextScale::Medium => Attribute::NormalIntensity,
        TextScale::Large => Attribute::Bold,
    };
    queue!(
        out,
        MoveTo(2, 2),
        SetAttribute(emphasis),
        Print(speed),
        SetAttribute(Attribute::Reset),
    )?;

    let interface = match &snapshot.interface {
        Some(info) => format!("{} ({})", info.name, info.kind),
        None => "no active interface".to_string(),
    };
    queue!(out, MoveTo(2, 3), SetAttribute(Attribute::Dim))?;
    queue!(out, Print(interface), SetAttribute(Attribute::Reset))?;

    queue!(out, MoveTo(2, 5), Print("Today's Data Usage"))?;
    let totals = format!(
        "Uploaded {}    Downloaded {}",
        format_total(snapshot.totals.upload_bytes),
        format_total(snapshot.totals.download_bytes),
    );
    queue!(out, MoveTo(2, 6), Print(totals))?;

    let hints = format!(
        "[u] unit: {}   [t] text: {}   [q] quit",
        settings.speed_unit, settings.text_scale,
    );
    queue!(out, MoveTo(2, 8), SetAttribute(Attribute::Dim))?;
    queue!(out, Print(hints), SetAttribute(Attribute::Reset))?;

    out.flush()?;
    Ok(())
}
