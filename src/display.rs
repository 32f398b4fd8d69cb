/// Rendering layer — all terminal I/O lives here.
///
/// `render` turns a `Snapshot` into calls on a `Canvas`; no game logic is
/// performed.  `TerminalCanvas` projects the world (1280×960 by default)
/// onto whatever grid of terminal cells is available.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::assets::{Image, Tint};
use crate::config::GameConfig;
use crate::game::Snapshot;

/// World-space margin of the HUD labels.
const HUD_MARGIN: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// HUD labels.
    Main,
    /// The large game-over banner.
    Banner,
}

/// Presentation surface.  Coordinates are world pixels.
pub trait Canvas {
    /// Start a frame with an empty background.
    fn clear(&mut self) -> std::io::Result<()>;
    fn draw_image(&mut self, image: &Image, x: i32, y: i32) -> std::io::Result<()>;
    fn draw_text(&mut self, text: &str, font: Font, tint: Tint, x: i32, y: i32) -> std::io::Result<()>;
    /// World-space size of `text` when drawn in `font`.
    fn text_size(&self, text: &str, font: Font) -> (i32, i32);
    /// Flush the frame.
    fn present(&mut self) -> std::io::Result<()>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<C: Canvas>(canvas: &mut C, snapshot: &Snapshot<'_>, config: &GameConfig) -> std::io::Result<()> {
    canvas.clear()?;

    for sprite in &snapshot.sprites {
        canvas.draw_image(sprite.image, sprite.x, sprite.y)?;
    }

    draw_hud(canvas, snapshot, config)?;

    if snapshot.lost {
        draw_game_over(canvas, config)?;
    }

    canvas.present()
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<C: Canvas>(canvas: &mut C, snapshot: &Snapshot<'_>, config: &GameConfig) -> std::io::Result<()> {
    // Lives — top left
    let lives = format!("Lives: {}", snapshot.lives);
    canvas.draw_text(&lives, Font::Main, Tint::White, HUD_MARGIN, HUD_MARGIN)?;

    // Score — top right
    let score = format!("Score: {}", snapshot.score);
    let (w, _) = canvas.text_size(&score, Font::Main);
    canvas.draw_text(&score, Font::Main, Tint::White, config.width - w - HUD_MARGIN, HUD_MARGIN)?;

    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<C: Canvas>(canvas: &mut C, config: &GameConfig) -> std::io::Result<()> {
    let label = "GAME OVER";
    let (w, h) = canvas.text_size(label, Font::Banner);
    canvas.draw_text(
        label,
        Font::Banner,
        Tint::Red,
        config.width / 2 - w / 2,
        config.height / 2 - h / 2,
    )
}

// ── Terminal canvas ───────────────────────────────────────────────────────────

fn color(tint: Tint) -> Color {
    match tint {
        Tint::White => Color::White,
        Tint::Yellow => Color::Yellow,
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Cyan => Color::Cyan,
        Tint::Magenta => Color::Magenta,
        Tint::Brown => Color::DarkYellow,
        Tint::Grey => Color::DarkGrey,
        Tint::Blue => Color::Blue,
    }
}

/// Letter spacing of the banner font, in cells.
const BANNER_SPACING: usize = 2;

pub struct TerminalCanvas<W: Write> {
    out: W,
    world: (i32, i32),
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, config: &GameConfig) -> std::io::Result<TerminalCanvas<W>> {
        let (cols, rows) = terminal::size()?;
        Ok(TerminalCanvas {
            out,
            world: (config.width, config.height),
            cols: cols.max(1),
            rows: rows.max(1),
        })
    }

    /// World pixels per terminal cell, horizontally and vertically.
    fn cell(&self) -> (i32, i32) {
        (
            (self.world.0 / self.cols as i32).max(1),
            (self.world.1 / self.rows as i32).max(1),
        )
    }

    fn to_cell(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x * self.cols as i32 / self.world.0,
            y * self.rows as i32 / self.world.1,
        )
    }

    fn on_screen(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        // Pick up terminal resizes between frames
        let (cols, rows) = terminal::size()?;
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    /// Sample the image at the centre of every cell it covers.
    fn draw_image(&mut self, image: &Image, x: i32, y: i32) -> std::io::Result<()> {
        let (c0, r0) = self.to_cell(x, y);
        let (c1, r1) = self.to_cell(x + image.width() as i32, y + image.height() as i32);
        let cols = self.cols as i32;
        let rows = self.rows as i32;

        self.out.queue(style::SetForegroundColor(color(image.tint())))?;
        for row in r0.max(0)..=r1.min(rows - 1) {
            for col in c0.max(0)..=c1.min(cols - 1) {
                let px = (2 * col + 1) * self.world.0 / (2 * cols) - x;
                let py = (2 * row + 1) * self.world.1 / (2 * rows) - y;
                if let Some(glyph) = image.pixel(px, py) {
                    self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                    self.out.queue(Print(glyph))?;
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, font: Font, tint: Tint, x: i32, y: i32) -> std::io::Result<()> {
        let (col, row) = self.to_cell(x, y);
        if !self.on_screen(col.max(0), row) {
            return Ok(());
        }
        let rendered = match font {
            Font::Main => text.to_string(),
            Font::Banner => spaced(text),
        };
        self.out.queue(cursor::MoveTo(col.max(0) as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(color(tint)))?;
        self.out.queue(Print(rendered))?;
        Ok(())
    }

    fn text_size(&self, text: &str, font: Font) -> (i32, i32) {
        let (cw, ch) = self.cell();
        let chars = match font {
            Font::Main => text.chars().count(),
            Font::Banner => spaced(text).chars().count(),
        };
        (chars as i32 * cw, ch)
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

/// Banner letters are spread out to stand out from the HUD.
fn spaced(text: &str) -> String {
    let gap = " ".repeat(BANNER_SPACING - 1);
    text.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(&gap)
}
