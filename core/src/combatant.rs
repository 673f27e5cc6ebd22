use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimConfig;
use crate::types::*;

/// One fighter's kinematic and combat state.
///
/// The body is a square of side `2 * player_size` anchored at its top-left
/// corner; `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub side: Side,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f64,
    pub facing_right: bool,
    pub on_ground: bool,

    pub damage: f64,
    pub points: u32,

    pub stunned: bool,
    pub stun_frames_remaining: i32,
    pub is_dead: bool,
    pub recovery_frames_remaining: i32,
    pub invincible: bool,
    pub invincible_frames_remaining: i32,

    pub dash: DashState,
    pub is_attacking: bool,

    pub combo_count: u32,
    pub combo_frames_remaining: i32,
    pub last_attacker: Option<Side>,
}

impl Combatant {
    pub fn new(side: Side, spawn: Vec2, config: &SimConfig) -> Self {
        Self {
            side,
            position: spawn,
            velocity: Vec2::ZERO,
            size: config.body_size(),
            facing_right: true,
            on_ground: false,
            damage: 0.0,
            points: 0,
            stunned: false,
            stun_frames_remaining: 0,
            is_dead: false,
            recovery_frames_remaining: 0,
            invincible: false,
            invincible_frames_remaining: 0,
            dash: DashState::ready(config.max_air_dash),
            is_attacking: false,
            combo_count: 0,
            combo_frames_remaining: 0,
            last_attacker: None,
        }
    }

    // ── Geometry ────────────────────────────────────────────

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.size / 2.0,
            self.position.y + self.size / 2.0,
        )
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invincible || self.recovery_frames_remaining > 0
    }

    /// Share of the dash cooldown still to run, 0 when a dash is available.
    pub fn dash_cooldown_progress(&self, config: &SimConfig) -> f64 {
        if self.dash.can_dash || self.dash.is_dashing || config.dash_cooldown <= 0 {
            return 0.0;
        }
        (f64::from(self.dash.cooldown_frames_remaining) / f64::from(config.dash_cooldown))
            .clamp(0.0, 1.0)
    }

    // ── Intent step ─────────────────────────────────────────

    /// Turn held buttons into velocity, jumps and dashes.
    pub fn apply_intent(&mut self, intent: Intent, config: &SimConfig, events: &mut Vec<SimEvent>) {
        if self.is_dead {
            return;
        }

        if self.stunned {
            self.stun_frames_remaining -= 1;
            if self.stun_frames_remaining <= 0 {
                self.stunned = false;
                self.stun_frames_remaining = 0;
            }
            return;
        }

        if !self.dash.is_dashing {
            if intent.left() {
                self.velocity.x = -config.movement_speed;
                self.facing_right = false;
                self.dash.dash_direction = -1;
            } else if intent.right() {
                self.velocity.x = config.movement_speed;
                self.facing_right = true;
                self.dash.dash_direction = 1;
            } else {
                self.velocity.x = 0.0;
            }

            if intent.jump() && self.on_ground {
                self.velocity.y = config.jump_force;
                self.on_ground = false;
                debug!(side = ?self.side, "jump");
                events.push(SimEvent::Jumped { side: self.side });
            }
        }

        // Cooldown only runs once the dash itself is over.
        if !self.dash.can_dash && !self.dash.is_dashing {
            self.dash.cooldown_frames_remaining -= 1;
            if self.dash.cooldown_frames_remaining <= 0 {
                self.dash.cooldown_frames_remaining = 0;
                self.dash.can_dash = true;
            }
        }

        if intent.dash()
            && self.dash.can_dash
            && !self.dash.is_dashing
            && (self.on_ground || self.dash.air_dashes_remaining > 0)
        {
            let airborne = !self.on_ground;
            self.start_dash(config);
            if airborne {
                self.dash.air_dashes_remaining -= 1;
            }
            debug!(side = ?self.side, airborne, "dash");
            events.push(SimEvent::DashStarted {
                side: self.side,
                airborne,
            });
        }

        if self.dash.is_dashing {
            self.velocity.x = config.dash_force * f64::from(self.dash.dash_direction);
            self.dash.dash_frames_remaining -= 1;
            if self.dash.dash_frames_remaining <= 0 {
                self.stop_dash(config);
            }
        }

        if !self.on_ground {
            self.velocity.x *= config.air_resistance;
        }
    }

    fn start_dash(&mut self, config: &SimConfig) {
        self.dash.is_dashing = true;
        self.dash.dash_frames_remaining = config.dash_length;
        self.dash.can_dash = false;
        self.is_attacking = true;
    }

    fn stop_dash(&mut self, config: &SimConfig) {
        self.dash.is_dashing = false;
        self.dash.dash_frames_remaining = 0;
        self.is_attacking = false;
        self.dash.cooldown_frames_remaining = config.dash_cooldown;
        self.dash.can_dash = false;
    }

    // ── Integration step ────────────────────────────────────

    /// Gravity, position update, world clamp, platform landing and timers.
    pub fn integrate(&mut self, config: &SimConfig) {
        if self.is_dead {
            self.velocity.y += config.gravity;
            self.position.y += self.velocity.y;
            return;
        }

        self.velocity.y += config.gravity;
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;

        let max_x = config.world_right_boundary - self.size;
        if self.position.x < config.world_left_boundary {
            self.position.x = config.world_left_boundary;
            self.velocity.x = 0.0;
        } else if self.position.x > max_x {
            self.position.x = max_x;
            self.velocity.x = 0.0;
        }

        let platform = &config.platform;
        if self.bottom() > platform.y
            && self.top() < platform.y
            && platform.spans(self.center().x)
        {
            self.position.y = platform.y - self.size;
            self.velocity.y = 0.0;
            self.on_ground = true;
            self.dash.air_dashes_remaining = config.max_air_dash;
        } else {
            self.on_ground = false;
        }

        // Knocked-back bodies slide to a halt on the platform.
        if self.stunned && self.on_ground {
            self.velocity.x *= config.friction;
        }

        if self.recovery_frames_remaining > 0 {
            self.recovery_frames_remaining -= 1;
        }

        if self.invincible {
            self.invincible_frames_remaining -= 1;
            if self.invincible_frames_remaining <= 0 {
                self.invincible = false;
                self.invincible_frames_remaining = 0;
            }
        }

        if self.combo_frames_remaining > 0 {
            self.combo_frames_remaining -= 1;
        }
        if self.combo_frames_remaining == 0 {
            self.combo_count = 0;
        }
    }

    // ── Knockback ───────────────────────────────────────────

    /// Launch this combatant. Returns `false` when the hit was absorbed by
    /// invulnerability.
    pub fn apply_knockback(&mut self, direction: Vec2, force: f64, config: &SimConfig) -> bool {
        if self.is_invulnerable() {
            return false;
        }

        let knockback_bonus = 1.0 + self.damage / config.knockback_damage_scale;
        let total_force = (force * knockback_bonus).min(config.max_knockback);

        self.velocity.x = direction.x * total_force * config.knockback_horizontal_multiplier;
        self.velocity.y = direction.y * total_force - config.knockback_upward_bias;

        self.stunned = true;
        self.stun_frames_remaining = (config.stun_base_frames * knockback_bonus).floor() as i32;
        self.recovery_frames_remaining = config.recovery_frames;

        debug!(
            side = ?self.side,
            total_force,
            stun = self.stun_frames_remaining,
            "knockback"
        );
        true
    }

    /// Add hit damage, clamped to the configured maximum.
    pub fn take_damage(&mut self, amount: f64, config: &SimConfig) {
        self.damage = (self.damage + amount).clamp(0.0, config.max_damage);
    }

    // ── Round reset ─────────────────────────────────────────

    /// Put the combatant back on its spawn with a clean slate. Points and
    /// facing survive.
    pub fn reset_for_round(&mut self, spawn: Vec2, config: &SimConfig) {
        *self = Self {
            points: self.points,
            facing_right: self.facing_right,
            dash: DashState {
                dash_direction: self.dash.dash_direction,
                ..DashState::ready(config.max_air_dash)
            },
            ..Self::new(self.side, spawn, config)
        };
        if config.spawn_invincibility_frames > 0 {
            self.invincible = true;
            self.invincible_frames_remaining = config.spawn_invincibility_frames;
        }
    }
}
