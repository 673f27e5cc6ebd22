use serde::{Deserialize, Serialize};
use tracing::info;

use crate::combatant::Combatant;
use crate::config::SimConfig;
use crate::error::{MatchError, Result};
use crate::init::{create_combatants, spawn_points};
use crate::types::*;

/// Round and match bookkeeping around the two combatants.
///
/// `phase` only ever holds Menu, Battle, Pause or GameOver; RoundEnd is
/// derived from `waiting_for_respawn` by [`Match::game_state`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub config: SimConfig,
    pub combatants: [Combatant; 2],
    pub phase: GameState,
    pub round_number: u32,
    /// Battle ticks simulated so far. Menus and pauses do not advance it.
    pub frame: Frame,
    pub round_started_at: Frame,
    pub first_to_fall: Option<Side>,
    pub round_winner: Option<RoundWinner>,
    pub match_winner: Option<RoundWinner>,
    pub waiting_for_respawn: bool,
    pub respawn_started_at: Frame,
    pub showing_round_start: bool,
    pub round_start_shown_at: Frame,
}

impl Match {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let combatants = create_combatants(&config);
        Ok(Self {
            config,
            combatants,
            phase: GameState::Menu,
            round_number: 1,
            frame: 0,
            round_started_at: 0,
            first_to_fall: None,
            round_winner: None,
            match_winner: None,
            waiting_for_respawn: false,
            respawn_started_at: 0,
            showing_round_start: false,
            round_start_shown_at: 0,
        })
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.combatants[side.index()]
    }

    pub fn game_state(&self) -> GameState {
        if self.phase == GameState::Battle && self.waiting_for_respawn {
            GameState::RoundEnd
        } else {
            self.phase
        }
    }

    pub fn scores(&self) -> [u32; 2] {
        [self.combatants[0].points, self.combatants[1].points]
    }

    /// Milliseconds of battle time since `since`.
    pub fn elapsed_ms(&self, since: Frame) -> u64 {
        self.config.frames_to_ms(self.frame.saturating_sub(since))
    }

    pub fn round_time_expired(&self) -> bool {
        self.elapsed_ms(self.round_started_at) >= u64::from(self.config.round_time_secs) * 1000
    }

    pub fn time_left_secs(&self) -> f64 {
        let elapsed = self.elapsed_ms(self.round_started_at) as f64 / 1000.0;
        (f64::from(self.config.round_time_secs) - elapsed).max(0.0)
    }

    /// Apply a menu or hotkey command. Returns the state after the change.
    pub fn handle_action(&mut self, action: MatchAction) -> Result<GameState> {
        let from = self.game_state();
        match (self.phase, action) {
            (GameState::Menu, MatchAction::StartGame) => {
                // A round decided before the abort does not get replayed.
                if self.waiting_for_respawn {
                    self.waiting_for_respawn = false;
                    self.round_number += 1;
                }
                self.reset_round(false);
                self.phase = GameState::Battle;
            }
            (GameState::Battle, MatchAction::Pause) => self.phase = GameState::Pause,
            (GameState::Pause, MatchAction::Resume) => self.phase = GameState::Battle,
            (GameState::Battle | GameState::Pause, MatchAction::Cancel) => {
                self.phase = GameState::Menu;
            }
            (GameState::GameOver, MatchAction::NewMatch) => {
                self.reset_match();
                self.phase = GameState::Battle;
            }
            (GameState::GameOver, MatchAction::ReturnToMenu) => {
                self.reset_match();
                self.phase = GameState::Menu;
            }
            _ => return Err(MatchError::InvalidTransition { from, action }),
        }

        let to = self.game_state();
        info!(?from, ?action, ?to, round = self.round_number, "state transition");
        Ok(to)
    }

    /// Put both combatants back on their spawns and restart the round clock.
    ///
    /// With `announce` set, physics stays frozen while the round banner is up.
    pub fn reset_round(&mut self, announce: bool) {
        let spawns = spawn_points(&self.config);
        for (combatant, spawn) in self.combatants.iter_mut().zip(spawns) {
            combatant.reset_for_round(spawn, &self.config);
        }
        self.first_to_fall = None;
        self.round_winner = None;
        self.round_started_at = self.frame;
        self.showing_round_start = announce;
        self.round_start_shown_at = self.frame;
    }

    /// Back to round one with zero points.
    pub fn reset_match(&mut self) {
        for combatant in &mut self.combatants {
            combatant.points = 0;
        }
        self.round_number = 1;
        self.match_winner = None;
        self.waiting_for_respawn = false;
        self.reset_round(false);
    }

    /// Award the round and start the respawn wait. Moves to GameOver once a
    /// score reaches `max_points`.
    pub(crate) fn finish_round(&mut self, winner: RoundWinner, events: &mut Vec<SimEvent>) {
        self.waiting_for_respawn = true;
        self.respawn_started_at = self.frame;
        self.round_winner = Some(winner);

        match winner {
            RoundWinner::Red => self.combatants[0].points += 1,
            RoundWinner::Blue => self.combatants[1].points += 1,
            RoundWinner::Tie => {
                self.combatants[0].points += 1;
                self.combatants[1].points += 1;
            }
        }

        let [red, blue] = self.scores();
        info!(round = self.round_number, ?winner, red, blue, "round over");
        events.push(SimEvent::RoundEnded { winner });

        if red >= self.config.max_points || blue >= self.config.max_points {
            let champion = if red > blue {
                RoundWinner::Red
            } else if blue > red {
                RoundWinner::Blue
            } else {
                RoundWinner::Tie
            };
            self.match_winner = Some(champion);
            self.phase = GameState::GameOver;
            info!(winner = ?champion, red, blue, "match over");
            events.push(SimEvent::MatchEnded { winner: champion });
        }
    }
}
