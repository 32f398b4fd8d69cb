/// Shared behaviour, split into small components and traits that each
/// concrete entity opts into.

use crate::assets::{Image, ImageHandle, Sprite};
use crate::collision::collide;

/// Walk cycle wraps once the counter reaches this value.
pub const WALK_CYCLE_LEN: u32 = 10;
/// Ticks each walk frame stays on screen.
pub const WALK_FRAME_TICKS: u32 = 5;

// ── Components ────────────────────────────────────────────────────────────────

/// Position plus bound sprite.
#[derive(Clone, Debug)]
pub struct Body {
    pub x: i32,
    pub y: i32,
    pub sprite: Sprite,
}

impl Body {
    pub fn new(x: i32, y: i32, sprite: Sprite) -> Body {
        Body { x, y, sprite }
    }

    pub fn width(&self) -> i32 {
        self.sprite.image.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.sprite.image.height() as i32
    }

    /// Rebind the sprite; its mask comes with it.
    pub fn set_sprite(&mut self, sprite: Sprite) {
        self.sprite = sprite;
    }
}

/// Fire-rate gate.  Ready when the counter is 0; arming sets it to 1 and
/// it counts up until it reaches `period`, then drops back to 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    counter: u32,
    period: u32,
}

impl Cooldown {
    pub fn new(period: u32) -> Cooldown {
        Cooldown { counter: 0, period }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_ready(&self) -> bool {
        self.counter == 0
    }

    pub fn arm(&mut self) {
        self.counter = 1;
    }

    pub fn advance(&mut self) {
        if self.counter >= self.period {
            self.counter = 0;
        } else if self.counter > 0 {
            self.counter += 1;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkCycle {
    count: u32,
}

impl WalkCycle {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn advance(&mut self) {
        self.count += 1;
        if self.count >= WALK_CYCLE_LEN {
            self.count = 0;
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Index into an animation of `frames` images.
    pub fn frame(&self, frames: usize) -> usize {
        if frames <= 1 {
            return 0;
        }
        (self.count / WALK_FRAME_TICKS) as usize % frames
    }
}

// ── Capabilities ──────────────────────────────────────────────────────────────

pub trait Drawable {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Image to show this frame.
    fn image(&self) -> &Image {
        self.body().sprite.image.as_ref()
    }
}

pub trait Movable: Drawable {
    fn translate(&mut self, dx: i32, dy: i32) {
        let body = self.body_mut();
        body.x += dx;
        body.y += dy;
    }
}

pub trait Animated: Drawable {
    fn walk(&self) -> &WalkCycle;
    fn walk_mut(&mut self) -> &mut WalkCycle;
    fn frames(&self) -> &[ImageHandle];

    /// Current walk frame, or the body image when there is nothing to cycle.
    fn walk_image(&self) -> &Image {
        let frames = self.frames();
        if frames.len() > 1 {
            frames[self.walk().frame(frames.len())].as_ref()
        } else {
            self.body().sprite.image.as_ref()
        }
    }
}

pub trait Shooter {
    /// Advance the fire-rate gate by one tick.
    fn cooldown(&mut self);
    /// Fire if the gate is open; otherwise do nothing.
    fn shoot(&mut self);
}

pub trait Collidable: Drawable {
    fn collides_with<T: Collidable + ?Sized>(&self, other: &T) -> bool {
        collide(self.body(), other.body())
    }
}

pub trait Scored {
    fn point_value(&self) -> i64;

    /// Score impact at the given difficulty level.
    fn get_points(&self, level: u32) -> i64 {
        self.point_value() * level as i64
    }
}
