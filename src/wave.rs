/// Wave and bonus spawning.

use rand::Rng;

use crate::assets::Assets;
use crate::config::GameConfig;
use crate::entities::{Cookie, Hippie};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveController {
    /// Current difficulty level; 0 before the first wave.
    pub level: u32,
    pub wave_length: u32,
    pub enemy_speed: i32,
    growth: u32,
}

impl WaveController {
    pub fn new(config: &GameConfig) -> WaveController {
        WaveController {
            level: 0,
            wave_length: config.initial_wave_length,
            enemy_speed: config.initial_enemy_speed,
            growth: config.wave_growth,
        }
    }

    /// Step to the next level and return how many hippies it brings.
    /// Speed grows by `level / 10` using the new level.
    pub fn advance(&mut self) -> u32 {
        self.level += 1;
        self.wave_length += self.growth;
        self.enemy_speed += (self.level / 10) as i32;
        self.wave_length
    }

    /// Advance to the next wave and spawn its hippies off the right edge.
    pub fn spawn_wave(
        &mut self,
        config: &GameConfig,
        assets: &Assets,
        rng: &mut impl Rng,
    ) -> Vec<Hippie> {
        let count = self.advance();
        let enemy_height = assets.hippie.image.height() as i32;
        let hippies: Vec<Hippie> = (0..count)
            .map(|_| {
                let (x, y) = spawn_point(config, enemy_height, rng);
                Hippie::new(x, y, assets)
            })
            .collect();
        log::info!(
            "wave {}: {} hippies at speed {}",
            self.level,
            hippies.len(),
            self.enemy_speed
        );
        hippies
    }
}

/// Random point in the spawn band right of the screen.
pub fn spawn_point(config: &GameConfig, enemy_height: i32, rng: &mut impl Rng) -> (i32, i32) {
    let (near, far) = config.spawn_offset;
    let x = rng.gen_range(config.width + near..config.width + far);
    let top = config.top_margin();
    let bottom = config.height - (config.bottom_margin() + enemy_height);
    let y = rng.gen_range(top..bottom.max(top + 1));
    (x, y)
}

/// One bonus-timer tick: a cookie with `bonus_chance` percent probability.
/// Cookies use the hippie spawn band.
pub fn roll_bonus(config: &GameConfig, assets: &Assets, rng: &mut impl Rng) -> Option<Cookie> {
    if rng.gen_range(1..=100) > config.bonus_chance {
        return None;
    }
    let enemy_height = assets.hippie.image.height() as i32;
    let (x, y) = spawn_point(config, enemy_height, rng);
    log::debug!("cookie spawned at ({}, {})", x, y);
    Some(Cookie::new(x, y, assets.cookie.clone(), config.cookie_velocity))
}
