use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Platform;

/// Every tunable of the simulation. Built once, then only read.
///
/// Deserializing fills missing fields from [`SimConfig::default`], so a
/// session file only needs to name the values it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tick_rate: u32,

    // Physics
    pub gravity: f64,
    pub jump_force: f64,
    pub movement_speed: f64,
    pub air_resistance: f64,
    pub friction: f64,

    // Combat
    pub base_knockback: f64,
    pub max_knockback: f64,
    pub player_size: f64,
    pub damage_amount: f64,
    pub max_damage: f64,
    pub recovery_frames: i32,
    pub combo_window_frames: i32,
    pub aggression_threshold: f64,
    pub dash_aggression_multiplier: f64,
    pub dash_knockback_multiplier: f64,
    pub hit_damage_scale: f64,

    // Knockback response
    pub knockback_damage_scale: f64,
    pub knockback_vertical_bias: f64,
    pub knockback_horizontal_multiplier: f64,
    pub knockback_upward_bias: f64,
    pub stun_base_frames: f64,

    // Dash
    pub dash_force: f64,
    pub dash_length: i32,
    pub dash_cooldown: i32,
    pub dash_damage_bonus: f64,
    pub max_air_dash: u8,

    // Stage
    pub platform: Platform,
    pub world_left_boundary: f64,
    pub world_right_boundary: f64,
    pub spawn_distance: f64,
    pub spawn_height: f64,
    pub spawn_invincibility_frames: i32,

    // Match rules
    pub round_time_secs: u32,
    pub max_points: u32,
    pub respawn_delay_ms: u64,
    pub round_start_delay_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            movement_speed: MOVEMENT_SPEED,
            air_resistance: AIR_RESISTANCE,
            friction: FRICTION,
            base_knockback: BASE_KNOCKBACK,
            max_knockback: MAX_KNOCKBACK,
            player_size: PLAYER_SIZE,
            damage_amount: DAMAGE_AMOUNT,
            max_damage: MAX_DAMAGE,
            recovery_frames: RECOVERY_FRAMES,
            combo_window_frames: COMBO_WINDOW_FRAMES,
            aggression_threshold: AGGRESSION_THRESHOLD,
            dash_aggression_multiplier: DASH_AGGRESSION_MULTIPLIER,
            dash_knockback_multiplier: DASH_KNOCKBACK_MULTIPLIER,
            hit_damage_scale: HIT_DAMAGE_SCALE,
            knockback_damage_scale: KNOCKBACK_DAMAGE_SCALE,
            knockback_vertical_bias: KNOCKBACK_VERTICAL_BIAS,
            knockback_horizontal_multiplier: KNOCKBACK_HORIZONTAL_MULTIPLIER,
            knockback_upward_bias: KNOCKBACK_UPWARD_BIAS,
            stun_base_frames: STUN_BASE_FRAMES,
            dash_force: DASH_FORCE,
            dash_length: DASH_LENGTH,
            dash_cooldown: DASH_COOLDOWN,
            dash_damage_bonus: DASH_DAMAGE_BONUS,
            max_air_dash: MAX_AIR_DASH,
            platform: Platform {
                x: PLATFORM_X,
                y: PLATFORM_Y,
                width: PLATFORM_WIDTH,
                height: PLATFORM_HEIGHT,
            },
            world_left_boundary: WORLD_LEFT_BOUNDARY,
            world_right_boundary: WORLD_RIGHT_BOUNDARY,
            spawn_distance: SPAWN_DISTANCE,
            spawn_height: SPAWN_HEIGHT,
            spawn_invincibility_frames: SPAWN_INVINCIBILITY_FRAMES,
            round_time_secs: ROUND_TIME_SECS,
            max_points: MAX_POINTS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            round_start_delay_ms: ROUND_START_DELAY_MS,
        }
    }
}

impl SimConfig {
    /// Side length of a combatant's square body.
    pub fn body_size(&self) -> f64 {
        self.player_size * 2.0
    }

    /// Whole milliseconds covered by `frames` ticks.
    pub fn frames_to_ms(&self, frames: u64) -> u64 {
        frames * 1000 / u64::from(self.tick_rate)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.max_points == 0 {
            return Err(ConfigError::ZeroMaxPoints);
        }
        for (field, value) in [
            ("player_size", self.player_size),
            ("max_damage", self.max_damage),
            ("max_knockback", self.max_knockback),
            ("knockback_damage_scale", self.knockback_damage_scale),
            ("hit_damage_scale", self.hit_damage_scale),
            ("platform.width", self.platform.width),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("air_resistance", self.air_resistance),
            ("friction", self.friction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }
        if self.world_left_boundary >= self.world_right_boundary {
            return Err(ConfigError::InvertedWorld {
                left: self.world_left_boundary,
                right: self.world_right_boundary,
            });
        }
        if self.platform.x < self.world_left_boundary
            || self.platform.right() > self.world_right_boundary
        {
            return Err(ConfigError::PlatformOutsideWorld {
                x: self.platform.x,
                right: self.platform.right(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.platform.x, 180.0);
        assert_eq!(config.platform.y, 480.0);
        assert_eq!(config.platform.width, 840.0);
        assert_eq!(config.body_size(), 60.0);
    }

    #[test]
    fn frames_convert_to_ms() {
        let config = SimConfig::default();
        assert_eq!(config.frames_to_ms(90), 1500);
        assert_eq!(config.frames_to_ms(120), 2000);
        assert_eq!(config.frames_to_ms(1), 16);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "max_points": 5, "gravity": 0.8 }"#).unwrap();
        assert_eq!(config.max_points, 5);
        assert_eq!(config.gravity, 0.8);
        assert_eq!(config.dash_cooldown, DASH_COOLDOWN);
    }

    #[test]
    fn rejects_broken_values() {
        let mut config = SimConfig::default();
        config.tick_rate = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));

        let mut config = SimConfig::default();
        config.air_resistance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange { field: "air_resistance", .. })
        ));

        let mut config = SimConfig::default();
        config.world_right_boundary = config.world_left_boundary;
        assert!(matches!(config.validate(), Err(ConfigError::InvertedWorld { .. })));

        let mut config = SimConfig::default();
        config.platform.x = config.world_right_boundary;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PlatformOutsideWorld { .. })
        ));

        let mut config = SimConfig::default();
        config.player_size = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "player_size", .. })
        ));
    }
}
