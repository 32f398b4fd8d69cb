/// The simulation: owned game state, the per-frame update and the
/// `Running → Lost → Terminated` state machine.

use rand::Rng;

use crate::assets::{Assets, Image};
use crate::capabilities::{Collidable, Drawable, Scored, Shooter};
use crate::clock::FrameLimiter;
use crate::config::GameConfig;
use crate::display::{render, Canvas};
use crate::entities::{Cookie, Hippie, Player};
use crate::input::{FrameInput, GameEvent, InputSource};
use crate::wave::{roll_bonus, WaveController};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Game over screen; `frames` counts updates spent in this state.
    Lost { frames: u32 },
    Terminated,
}

/// One image placed in the world.
#[derive(Clone, Copy, Debug)]
pub struct SpriteRef<'a> {
    pub image: &'a Image,
    pub x: i32,
    pub y: i32,
}

/// Read-only view handed to the renderer.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    /// Back to front.
    pub sprites: Vec<SpriteRef<'a>>,
    pub lives: i32,
    pub score: i64,
    pub level: u32,
    pub lost: bool,
}

fn place(d: &dyn Drawable) -> SpriteRef<'_> {
    SpriteRef {
        image: d.image(),
        x: d.body().x,
        y: d.body().y,
    }
}

/// What a projectile ran into.
enum Target {
    Hippie(usize),
    Cookie(usize),
}

pub struct Session<R> {
    pub config: GameConfig,
    pub assets: Assets,
    pub player: Player,
    pub hippies: Vec<Hippie>,
    pub cookies: Vec<Cookie>,
    pub waves: WaveController,
    pub lives: i32,
    pub status: Status,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, assets: Assets, rng: R) -> Session<R> {
        let player = Player::new(&config, &assets);
        Session {
            player,
            hippies: Vec::new(),
            cookies: Vec::new(),
            waves: WaveController::new(&config),
            lives: config.starting_lives,
            status: Status::Running,
            config,
            assets,
            rng,
        }
    }

    pub fn score(&self) -> i64 {
        self.player.score
    }

    pub fn level(&self) -> u32 {
        self.waves.level
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let mut sprites: Vec<SpriteRef<'_>> = Vec::new();
        sprites.extend(self.hippies.iter().map(|h| place(h)));
        sprites.extend(self.cookies.iter().map(|c| place(c)));
        sprites.push(place(&self.player));
        sprites.extend(self.player.shots.iter().map(|s| place(s)));

        Snapshot {
            sprites,
            lives: self.lives,
            score: self.score(),
            level: self.level(),
            lost: matches!(self.status, Status::Lost { .. }),
        }
    }

    /// Advance one frame.  Rendering happens before this call.
    pub fn update(&mut self, input: &FrameInput) -> Status {
        match self.status {
            Status::Terminated => return self.status,
            Status::Lost { frames } => {
                let frames = frames + 1;
                self.status = if input.events.contains(&GameEvent::Quit)
                    || frames >= self.config.lost_frames()
                {
                    Status::Terminated
                } else {
                    Status::Lost { frames }
                };
                return self.status;
            }
            Status::Running => {}
        }

        // The firing pose lasts for exactly one rendered frame
        self.player.shooting = false;

        if self.lives <= 0 {
            log::info!("game over: score {} at level {}", self.score(), self.level());
            self.status = Status::Lost { frames: 0 };
            return self.status;
        }

        if self.hippies.is_empty() {
            self.hippies = self.waves.spawn_wave(&self.config, &self.assets, &mut self.rng);
        }

        for event in &input.events {
            match event {
                GameEvent::Quit => {
                    self.status = Status::Terminated;
                    return self.status;
                }
                GameEvent::BonusTick => {
                    if let Some(cookie) = roll_bonus(&self.config, &self.assets, &mut self.rng) {
                        self.cookies.push(cookie);
                    }
                }
            }
        }

        self.move_player(input.held.up, input.held.down);
        if input.held.fire {
            self.player.shoot();
        }
        self.move_hippies();
        self.move_cookies();
        self.player.cooldown();
        self.move_shots();

        self.status
    }

    /// Vertical movement, clamped to the play band.  Up wins over down.
    fn move_player(&mut self, up: bool, down: bool) {
        let top = self.config.top_margin();
        let bottom = self.config.height - self.config.bottom_margin();
        let speed = self.config.player_speed;
        let body = &mut self.player.body;
        let height = body.height();

        if up && body.y > top {
            body.y = (body.y - speed).max(top);
            self.player.walk.advance();
        } else if down && body.y + height < bottom {
            body.y = (body.y + speed).min(bottom - height);
            self.player.walk.advance();
        } else {
            self.player.walk.reset();
        }
    }

    /// Hippies that walk off the left edge cost a life each.
    fn move_hippies(&mut self) {
        let speed = self.waves.enemy_speed;
        let mut escaped: Vec<usize> = Vec::new();

        for (i, hippie) in self.hippies.iter_mut().enumerate() {
            hippie.advance(speed);
            if hippie.body.x <= -hippie.body.width() {
                escaped.push(i);
            }
        }

        if !escaped.is_empty() {
            log::debug!("{} hippies escaped", escaped.len());
            self.lives -= escaped.len() as i32;
            remove_indices(&mut self.hippies, &escaped);
        }
    }

    /// Cookies that touch the player grant a life; cookies leaving the
    /// screen vanish.
    fn move_cookies(&mut self) {
        let mut gone: Vec<usize> = Vec::new();

        for (i, cookie) in self.cookies.iter_mut().enumerate() {
            cookie.advance();
            if cookie.collides_with(&self.player) {
                log::debug!("cookie picked up");
                self.lives += 1;
                gone.push(i);
            } else if cookie.body.x <= -cookie.body.width() {
                gone.push(i);
            }
        }

        remove_indices(&mut self.cookies, &gone);
    }

    /// Move shots, drop those past the right edge, and resolve hits.  Each
    /// shot destroys at most one target.
    fn move_shots(&mut self) {
        let level = self.waves.level;
        let width = self.config.width;
        let mut spent: Vec<usize> = Vec::new();
        let mut dead_hippies: Vec<usize> = Vec::new();
        let mut dead_cookies: Vec<usize> = Vec::new();
        let mut gained: i64 = 0;

        for (si, shot) in self.player.shots.iter_mut().enumerate() {
            shot.advance();
            if shot.body.x >= width {
                spent.push(si);
                continue;
            }

            let hit = self
                .hippies
                .iter()
                .enumerate()
                .find(|(i, h)| !dead_hippies.contains(i) && shot.collides_with(*h))
                .map(|(i, _)| Target::Hippie(i))
                .or_else(|| {
                    self.cookies
                        .iter()
                        .enumerate()
                        .find(|(i, c)| !dead_cookies.contains(i) && shot.collides_with(*c))
                        .map(|(i, _)| Target::Cookie(i))
                });

            match hit {
                Some(Target::Hippie(i)) => {
                    gained += self.hippies[i].get_points(level);
                    dead_hippies.push(i);
                    spent.push(si);
                }
                Some(Target::Cookie(i)) => {
                    gained += self.cookies[i].get_points(level);
                    dead_cookies.push(i);
                    spent.push(si);
                }
                None => {}
            }
        }

        if gained != 0 {
            log::debug!("score {:+} at level {}", gained, level);
        }
        self.player.score += gained;
        remove_indices(&mut self.player.shots, &spent);
        remove_indices(&mut self.hippies, &dead_hippies);
        remove_indices(&mut self.cookies, &dead_cookies);
    }
}

/// Drop the items at `dead` (indices into the pre-pass collection).
fn remove_indices<T>(items: &mut Vec<T>, dead: &[usize]) {
    if dead.is_empty() {
        return;
    }
    *items = std::mem::take(items)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !dead.contains(i))
        .map(|(_, item)| item)
        .collect();
}

/// Paced main loop: render, sample input, update, until terminated.
pub fn run<R, C, I>(
    session: &mut Session<R>,
    canvas: &mut C,
    input: &mut I,
    clock: &mut FrameLimiter,
) -> std::io::Result<()>
where
    R: Rng,
    C: Canvas,
    I: InputSource,
{
    loop {
        let elapsed = clock.tick();
        render(canvas, &session.snapshot(), &session.config)?;

        let frame = input.poll(elapsed);
        if session.update(&frame) == Status::Terminated {
            log::info!(
                "session over after {} frames, final score {}",
                clock.frames(),
                session.score()
            );
            return Ok(());
        }
    }
}
