/// All game entity types and the capabilities each one carries.

use std::rc::Rc;

use crate::assets::{Assets, Image, ImageHandle, Sprite};
use crate::capabilities::{
    Animated, Body, Collidable, Cooldown, Drawable, Movable, Scored, Shooter, WalkCycle,
};
use crate::config::GameConfig;

/// Points for destroying a hippie, before level scaling.
pub const HIPPIE_POINTS: i64 = 1;
/// Points for destroying a cookie, before level scaling.
pub const COOKIE_POINTS: i64 = -10;

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub body: Body,
    pub velocity: (i32, i32),
}

impl Projectile {
    pub fn new(x: i32, y: i32, sprite: Sprite, velocity: (i32, i32)) -> Projectile {
        Projectile {
            body: Body::new(x, y, sprite),
            velocity,
        }
    }

    pub fn advance(&mut self) {
        let (dx, dy) = self.velocity;
        self.translate(dx, dy);
    }
}

impl Drawable for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Movable for Projectile {}
impl Collidable for Projectile {}

// ── Bonus items ───────────────────────────────────────────────────────────────

/// A cookie drifting towards the left edge.  Touching it is worth a life;
/// shooting it costs points.
#[derive(Clone, Debug)]
pub struct Cookie {
    pub body: Body,
    pub velocity: (i32, i32),
}

impl Cookie {
    pub fn new(x: i32, y: i32, sprite: Sprite, velocity: (i32, i32)) -> Cookie {
        Cookie {
            body: Body::new(x, y, sprite),
            velocity,
        }
    }

    pub fn advance(&mut self) {
        let (dx, dy) = self.velocity;
        self.translate(dx, dy);
    }
}

impl Drawable for Cookie {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Movable for Cookie {}
impl Collidable for Cookie {}

impl Scored for Cookie {
    fn point_value(&self) -> i64 {
        COOKIE_POINTS
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Hippie {
    pub body: Body,
    pub walk: WalkCycle,
    frames: Rc<[ImageHandle]>,
}

impl Hippie {
    pub fn new(x: i32, y: i32, assets: &Assets) -> Hippie {
        Hippie {
            body: Body::new(x, y, assets.hippie.clone()),
            walk: WalkCycle::default(),
            frames: Rc::clone(&assets.hippie_walk),
        }
    }

    /// Walk `speed` pixels to the left.
    pub fn advance(&mut self, speed: i32) {
        self.translate(-speed, 0);
        self.walk.advance();
    }
}

impl Drawable for Hippie {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn image(&self) -> &Image {
        self.walk_image()
    }
}

impl Movable for Hippie {}
impl Collidable for Hippie {}

impl Animated for Hippie {
    fn walk(&self) -> &WalkCycle {
        &self.walk
    }
    fn walk_mut(&mut self) -> &mut WalkCycle {
        &mut self.walk
    }
    fn frames(&self) -> &[ImageHandle] {
        &self.frames
    }
}

impl Scored for Hippie {
    fn point_value(&self) -> i64 {
        HIPPIE_POINTS
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub walk: WalkCycle,
    pub cooldown: Cooldown,
    pub score: i64,
    /// Live projectiles, owned exclusively by the player.
    pub shots: Vec<Projectile>,
    /// Set by a successful shot; the next rendered frame shows the firing pose.
    pub shooting: bool,
    frames: Rc<[ImageHandle]>,
    shoot_pose: ImageHandle,
    shot_sprite: Sprite,
    shot_velocity: (i32, i32),
}

impl Player {
    /// A player at the left edge, vertically centred.
    pub fn new(config: &GameConfig, assets: &Assets) -> Player {
        let height = assets.cletus.image.height() as i32;
        Player {
            body: Body::new(5, config.height / 2 - height / 2, assets.cletus.clone()),
            walk: WalkCycle::default(),
            cooldown: Cooldown::new(config.cooldown_ticks),
            score: 0,
            shots: Vec::new(),
            shooting: false,
            frames: Rc::clone(&assets.cletus_walk),
            shoot_pose: Rc::clone(&assets.cletus_shoot),
            shot_sprite: assets.bullet.clone(),
            shot_velocity: config.shot_velocity,
        }
    }
}

impl Drawable for Player {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn image(&self) -> &Image {
        if self.shooting {
            self.shoot_pose.as_ref()
        } else {
            self.walk_image()
        }
    }
}

impl Movable for Player {}
impl Collidable for Player {}

impl Animated for Player {
    fn walk(&self) -> &WalkCycle {
        &self.walk
    }
    fn walk_mut(&mut self) -> &mut WalkCycle {
        &mut self.walk
    }
    fn frames(&self) -> &[ImageHandle] {
        &self.frames
    }
}

impl Shooter for Player {
    fn cooldown(&mut self) {
        self.cooldown.advance();
    }

    fn shoot(&mut self) {
        if !self.cooldown.is_ready() {
            return;
        }
        self.shots.push(Projectile::new(
            self.body.x,
            self.body.y,
            self.shot_sprite.clone(),
            self.shot_velocity,
        ));
        self.shooting = true;
        self.cooldown.arm();
    }
}
