// Default tunables. All values are per-tick at 60 Hz unless noted.

// Arena (pixels)
pub const ARENA_WIDTH: f64 = 1200.0;
pub const ARENA_HEIGHT: f64 = 800.0;

// Physics
pub const GRAVITY: f64 = 0.6;
pub const JUMP_FORCE: f64 = -12.0;
pub const MOVEMENT_SPEED: f64 = 6.0;
pub const AIR_RESISTANCE: f64 = 0.95;
pub const FRICTION: f64 = 0.85;

// Combat
pub const BASE_KNOCKBACK: f64 = 8.0;
pub const MAX_KNOCKBACK: f64 = 40.0;
pub const PLAYER_SIZE: f64 = 30.0;
pub const DAMAGE_AMOUNT: f64 = 6.0;
pub const MAX_DAMAGE: f64 = 100.0;
pub const RECOVERY_FRAMES: i32 = 15;
pub const COMBO_WINDOW_FRAMES: i32 = 120;
pub const AGGRESSION_THRESHOLD: f64 = 2.0;
pub const DASH_AGGRESSION_MULTIPLIER: f64 = 1.5;
pub const DASH_KNOCKBACK_MULTIPLIER: f64 = 1.8;
pub const HIT_DAMAGE_SCALE: f64 = 100.0;

// Knockback response
pub const KNOCKBACK_DAMAGE_SCALE: f64 = 75.0;
pub const KNOCKBACK_VERTICAL_BIAS: f64 = -0.15;
pub const KNOCKBACK_HORIZONTAL_MULTIPLIER: f64 = 2.0;
pub const KNOCKBACK_UPWARD_BIAS: f64 = 3.0;
pub const STUN_BASE_FRAMES: f64 = 8.0;

// Dash
pub const DASH_FORCE: f64 = 18.0;
pub const DASH_LENGTH: i32 = 10;
pub const DASH_COOLDOWN: i32 = 240; // 4 seconds
pub const DASH_DAMAGE_BONUS: f64 = 1.8;
pub const MAX_AIR_DASH: u8 = 1;

// Platform, relative to the arena
pub const PLATFORM_X: f64 = ARENA_WIDTH * 0.15;
pub const PLATFORM_Y: f64 = ARENA_HEIGHT * 0.6;
pub const PLATFORM_WIDTH: f64 = ARENA_WIDTH * 0.7;
pub const PLATFORM_HEIGHT: f64 = 20.0;

// Spawn offsets from the platform edges
pub const SPAWN_DISTANCE: f64 = 100.0;
pub const SPAWN_HEIGHT: f64 = 200.0;
pub const SPAWN_INVINCIBILITY_FRAMES: i32 = 0;

// Match rules
pub const ROUND_TIME_SECS: u32 = 60;
pub const MAX_POINTS: u32 = 3;
pub const RESPAWN_DELAY_MS: u64 = 1500;
pub const ROUND_START_DELAY_MS: u64 = 2000;

// Tick rate
pub const TICK_RATE: u32 = 60;

// World boundaries: one screen to the left, two to the right
pub const WORLD_LEFT_BOUNDARY: f64 = -ARENA_WIDTH;
pub const WORLD_RIGHT_BOUNDARY: f64 = ARENA_WIDTH * 2.0;
