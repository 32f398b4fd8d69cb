use std::path::Path;

use cookies_for_cletus::assets::{Assets, Image, Tint};
use cookies_for_cletus::config::GameConfig;
use cookies_for_cletus::display::{render, Canvas, Font};
use cookies_for_cletus::game::Session;
use cookies_for_cletus::input::FrameInput;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, PartialEq)]
enum Call {
    Clear,
    Image { x: i32, y: i32 },
    Text { text: String, font: Font, tint: Tint, x: i32, y: i32 },
    Present,
}

/// Canvas that records what it was asked to draw.  Every character is
/// 10×20 world pixels.
#[derive(Default)]
struct RecordingCanvas {
    calls: Vec<Call>,
}

impl RecordingCanvas {
    fn texts(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Text { .. })).collect()
    }

    fn images(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Image { .. })).count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) -> std::io::Result<()> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn draw_image(&mut self, _image: &Image, x: i32, y: i32) -> std::io::Result<()> {
        self.calls.push(Call::Image { x, y });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, font: Font, tint: Tint, x: i32, y: i32) -> std::io::Result<()> {
        self.calls.push(Call::Text { text: text.to_string(), font, tint, x, y });
        Ok(())
    }

    fn text_size(&self, text: &str, _font: Font) -> (i32, i32) {
        (text.chars().count() as i32 * 10, 20)
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

fn make_session() -> Session<StdRng> {
    let config = GameConfig::default();
    let assets = Assets::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"), &config).unwrap();
    Session::new(config, assets, StdRng::seed_from_u64(3))
}

#[test]
fn frame_is_cleared_drawn_and_presented() {
    let mut s = make_session();
    s.update(&FrameInput::default());
    let mut canvas = RecordingCanvas::default();

    render(&mut canvas, &s.snapshot(), &s.config).unwrap();

    assert_eq!(canvas.calls.first(), Some(&Call::Clear));
    assert_eq!(canvas.calls.last(), Some(&Call::Present));
    // Ten hippies plus the player
    assert_eq!(canvas.images(), 11);
}

#[test]
fn hud_shows_lives_left_and_score_right() {
    let mut s = make_session();
    s.player.score = 42;
    let mut canvas = RecordingCanvas::default();

    render(&mut canvas, &s.snapshot(), &s.config).unwrap();

    let texts = canvas.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(
        texts[0],
        &Call::Text {
            text: "Lives: 3".to_string(),
            font: Font::Main,
            tint: Tint::White,
            x: 5,
            y: 5,
        }
    );
    // "Score: 42" is 9 chars → 90 px wide
    assert_eq!(
        texts[1],
        &Call::Text {
            text: "Score: 42".to_string(),
            font: Font::Main,
            tint: Tint::White,
            x: 1280 - 90 - 5,
            y: 5,
        }
    );
}

#[test]
fn game_over_banner_is_centred() {
    let mut s = make_session();
    s.lives = 0;
    s.update(&FrameInput::default());
    let mut canvas = RecordingCanvas::default();

    render(&mut canvas, &s.snapshot(), &s.config).unwrap();

    let banner = canvas
        .calls
        .iter()
        .find(|c| matches!(c, Call::Text { font: Font::Banner, .. }));
    assert_eq!(
        banner,
        Some(&Call::Text {
            text: "GAME OVER".to_string(),
            font: Font::Banner,
            tint: Tint::Red,
            x: 640 - 45,
            y: 480 - 10,
        })
    );
}

#[test]
fn no_banner_while_running() {
    let s = make_session();
    let mut canvas = RecordingCanvas::default();
    render(&mut canvas, &s.snapshot(), &s.config).unwrap();
    assert!(!canvas
        .calls
        .iter()
        .any(|c| matches!(c, Call::Text { font: Font::Banner, .. })));
}
