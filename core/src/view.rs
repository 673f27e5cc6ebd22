//! Read-only snapshots for renderers, HUDs and logs.
//!
//! Everything here is derived from a [`Match`] after a tick has finished; the
//! presentation layer never touches the simulation directly.

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::config::SimConfig;
use crate::state::Match;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    pub side: Side,
    pub position: Vec2,
    pub damage: f64,
    pub points: u32,
    pub is_dead: bool,
    pub is_dashing: bool,
    pub stunned: bool,
    pub facing_right: bool,
    pub combo_count: u32,
    /// 1.0 right after a dash, 0.0 once the next dash is available.
    pub dash_cooldown: f64,
}

impl CombatantView {
    pub fn of(c: &Combatant, config: &SimConfig) -> Self {
        Self {
            side: c.side,
            position: c.position,
            damage: c.damage,
            points: c.points,
            is_dead: c.is_dead,
            is_dashing: c.dash.is_dashing,
            stunned: c.stunned,
            facing_right: c.facing_right,
            combo_count: c.combo_count,
            dash_cooldown: c.dash_cooldown_progress(config),
        }
    }

    /// Damage label shown over the fighter, e.g. `42%` or `42% x3`.
    pub fn damage_label(&self) -> String {
        let mut label = format!("{}%", self.damage.trunc() as i64);
        if self.combo_count > 1 {
            label.push_str(&format!(" x{}", self.combo_count));
        }
        label
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub state: GameState,
    pub frame: Frame,
    pub round_number: u32,
    pub time_left_secs: f64,
    pub clock: String,
    pub showing_round_start: bool,
    pub round_winner: Option<RoundWinner>,
    pub match_winner: Option<RoundWinner>,
    pub combatants: [CombatantView; 2],
}

impl MatchView {
    pub fn of(m: &Match) -> Self {
        let time_left_secs = m.time_left_secs();
        Self {
            state: m.game_state(),
            frame: m.frame,
            round_number: m.round_number,
            time_left_secs,
            clock: format_clock(time_left_secs),
            showing_round_start: m.showing_round_start,
            round_winner: m.round_winner,
            match_winner: m.match_winner,
            combatants: [
                CombatantView::of(&m.combatants[0], &m.config),
                CombatantView::of(&m.combatants[1], &m.config),
            ],
        }
    }
}

/// `m:ss` countdown for the top bar.
pub fn format_clock(secs: f64) -> String {
    let whole = secs.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
