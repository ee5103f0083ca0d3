mod app;
mod config;
mod format;
mod model;
mod monitor;
mod ui;

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::{self, Receiver};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};

use app::{App, KeyOutcome};
use config::Settings;
use model::PathUpdate;
use monitor::{spawn_path_watcher, TotalsStore};

/// Sampling period for the rate pipeline.
const TICK_PERIOD: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    init_logging();

    let settings_path = Settings::default_path();
    let settings = Settings::load(&settings_path);
    let store = TotalsStore::new(TotalsStore::default_path());
    let mut app = App::new(settings, settings_path, store);

    let (path_tx, path_rx) = channel::unbounded();
    spawn_path_watcher(path_tx);
    let key_rx = spawn_input_reader();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run(&mut app, &mut stdout, path_rx, key_rx);

    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;

    result
}

fn run(
    app: &mut App,
    out: &mut impl Write,
    path_rx: Receiver<PathUpdate>,
    key_rx: Receiver<KeyEvent>,
) -> Result<()> {
    let ticker = channel::tick(TICK_PERIOD);

    // Take one sample up front so the first timed tick has a baseline.
    app.tick();
    ui::status::draw(out, app.snapshot(), app.settings())?;

    loop {
        crossbeam::select! {
            recv(ticker) -> _ => {
                app.tick();
                ui::status::draw(out, app.snapshot(), app.settings())?;
            }
            recv(path_rx) -> update => {
                if let Ok(update) = update {
                    app.apply_path_update(&update);
                    ui::status::draw(out, app.snapshot(), app.settings())?;
                }
            }
            recv(key_rx) -> key => match key {
                Ok(key) => match app.handle_key(key) {
                    KeyOutcome::Quit => return Ok(()),
                    KeyOutcome::Redraw => {
                        ui::status::draw(out, app.snapshot(), app.settings())?
                    }
                    KeyOutcome::Ignored => {}
                },
                // Input thread is gone, nothing left to listen to.
                Err(_) => return Ok(()),
            },
        }
    }
}

/// Forwards terminal key events over a channel so the main loop can wait
/// on keys, ticks, and path changes in one place.
fn spawn_input_reader() -> Receiver<KeyEvent> {
    let (tx, rx) = channel::unbounded();
    thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if tx.send(key).is_err() {
                    return;
                }
            }
            Ok(_) => {}
            Err(_) => return,
        }
    });
    rx
}

fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("netgauge=info"),
    )
    .init();
}
