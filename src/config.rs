/// Gameplay tuning and world geometry.
///
/// One immutable value built at startup and handed to the session, the
/// asset loader and the renderer.  Nothing here is read from the
/// environment or from files.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    /// World width in pixels.
    pub width: i32,
    /// World height in pixels.
    pub height: i32,
    /// Simulation ticks per second.
    pub fps: u32,
    /// Cooldown period between two shots, in ticks.
    pub cooldown_ticks: u32,
    /// Vertical player speed in pixels per tick.
    pub player_speed: i32,
    /// Velocity of player projectiles.
    pub shot_velocity: (i32, i32),
    /// Hippie speed for the first wave.
    pub initial_enemy_speed: i32,
    /// Wave length before the first wave is spawned.
    pub initial_wave_length: u32,
    /// Extra hippies per wave.
    pub wave_growth: u32,
    /// Velocity of falling cookies.
    pub cookie_velocity: (i32, i32),
    /// Wall-clock period of the bonus timer.
    pub bonus_interval: Duration,
    /// Percent chance that a bonus tick spawns a cookie.
    pub bonus_chance: u32,
    pub starting_lives: i32,
    /// Seconds the game-over screen stays up.
    pub lost_delay_secs: u32,
    /// Spawn band to the right of the screen: `[width + min, width + max)`.
    pub spawn_offset: (i32, i32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 960,
            fps: 30,
            cooldown_ticks: 15,
            player_speed: 7,
            shot_velocity: (5, 0),
            initial_enemy_speed: 1,
            initial_wave_length: 5,
            wave_growth: 5,
            cookie_velocity: (-2, 0),
            bonus_interval: Duration::from_millis(1000),
            bonus_chance: 10,
            starting_lives: 3,
            lost_delay_secs: 3,
            spawn_offset: (50, 500),
        }
    }
}

impl GameConfig {
    /// Square tile every sprite is scaled to.
    pub fn tile(&self) -> (u32, u32) {
        let side = (self.width / 20) as u32;
        (side, side)
    }

    /// Player sprite height; margins are derived from it.
    pub fn player_height(&self) -> i32 {
        self.tile().1 as i32
    }

    pub fn top_margin(&self) -> i32 {
        2 * self.player_height()
    }

    pub fn bottom_margin(&self) -> i32 {
        self.player_height()
    }

    /// Updates spent in the lost state before the session terminates.
    pub fn lost_frames(&self) -> u32 {
        self.lost_delay_secs * self.fps
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
