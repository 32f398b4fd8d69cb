use std::io::{stdout, BufWriter};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use cookies_for_cletus::assets::Assets;
use cookies_for_cletus::clock::FrameLimiter;
use cookies_for_cletus::config::GameConfig;
use cookies_for_cletus::display::TerminalCanvas;
use cookies_for_cletus::game::{run, Session};
use cookies_for_cletus::input::TerminalInput;

const TITLE: &str = "Cookies for Cletus";

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::default();

    // Sprites are loaded before the terminal is touched so a broken asset
    // directory reports a plain error.
    let asset_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let assets = Assets::load(&asset_dir, &config)
        .with_context(|| format!("failed to load sprites from {}", asset_dir.display()))?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(TITLE))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = play(&mut out, rx, config, assets);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn play<W: std::io::Write>(
    out: &mut W,
    rx: mpsc::Receiver<Event>,
    config: GameConfig,
    assets: Assets,
) -> anyhow::Result<()> {
    let mut canvas = TerminalCanvas::new(out, &config)?;
    let mut input = TerminalInput::new(rx, config.bonus_interval);
    let mut clock = FrameLimiter::new(config.fps);
    let mut session = Session::new(config, assets, thread_rng());

    log::info!("{} started", TITLE);
    run(&mut session, &mut canvas, &mut input, &mut clock).context("game loop failed")?;
    Ok(())
}
