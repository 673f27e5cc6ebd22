use crate::combatant::Combatant;
use crate::config::SimConfig;
use crate::error::Result;
use crate::state::Match;
use crate::types::*;

/// Spawn corners derived from the platform: Red near the left edge, Blue near
/// the right edge, both `spawn_height` above the surface.
pub fn spawn_points(config: &SimConfig) -> [Vec2; 2] {
    let platform = &config.platform;
    let y = platform.y - config.spawn_height;
    [
        Vec2::new(platform.x + config.spawn_distance, y),
        Vec2::new(platform.right() - config.spawn_distance, y),
    ]
}

/// Both combatants standing on their spawns. Blue starts facing Red.
pub fn create_combatants(config: &SimConfig) -> [Combatant; 2] {
    let [red_spawn, blue_spawn] = spawn_points(config);
    let red = Combatant::new(Side::Red, red_spawn, config);
    let mut blue = Combatant::new(Side::Blue, blue_spawn, config);
    blue.facing_right = false;
    blue.dash.dash_direction = -1;
    [red, blue]
}

/// A match in the menu, built from the stock tunables.
pub fn default_match() -> Result<Match> {
    Match::new(SimConfig::default())
}
