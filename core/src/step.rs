use tracing::{debug, info};

use crate::combat::resolve_contact;
use crate::state::Match;
use crate::types::*;

impl Match {
    /// Advance the battle by one tick and report what happened.
    ///
    /// Sub-step order:
    ///  0. No-op outside Battle
    ///  1. Advance the frame counter
    ///  2. Round timer expiry (lower damage wins, equal damage ties)
    ///  3. Unless the round banner is up:
    ///     a. Apply intents
    ///     b. Void detection (only while the round is still open)
    ///     c. Integrate both bodies
    ///     d. Contact resolution when both are alive
    ///     e. Fall resolution (the side that fell first loses)
    ///  4. Respawn once the respawn delay has passed
    ///  5. Lower the round banner once its delay has passed
    pub fn step(&mut self, intents: [Intent; 2]) -> Vec<SimEvent> {
        let mut events = Vec::new();

        // 0. Menus, pauses and the final screen freeze the simulation
        if self.phase != GameState::Battle {
            return events;
        }

        // 1. Advance frame
        self.frame += 1;

        // 2. Time-up check
        if !self.waiting_for_respawn && !self.showing_round_start && self.round_time_expired() {
            let [red, blue] = &self.combatants;
            let winner = if red.damage < blue.damage {
                RoundWinner::Red
            } else if blue.damage < red.damage {
                RoundWinner::Blue
            } else {
                RoundWinner::Tie
            };
            info!(red = red.damage, blue = blue.damage, "round timer expired");
            self.finish_round(winner, &mut events);
            if self.phase == GameState::GameOver {
                return events;
            }
        }

        // 3. Physics, frozen while the round banner is shown
        if !self.showing_round_start {
            // 3a. Intents
            for (combatant, intent) in self.combatants.iter_mut().zip(intents) {
                combatant.apply_intent(intent, &self.config, &mut events);
            }

            // 3b. Void detection. Once the round is decided nobody else can fall out of it.
            if !self.waiting_for_respawn {
                self.detect_falls(&mut events);
            }

            // 3c. Integrate
            for combatant in &mut self.combatants {
                combatant.integrate(&self.config);
            }

            // 3d. Contact
            if self.combatants.iter().all(|c| !c.is_dead) {
                let report = resolve_contact(&mut self.combatants, &self.config);
                events.extend(report.events());
            }

            // 3e. Fall resolution
            if !self.waiting_for_respawn {
                let loser = self.first_to_fall.take().or_else(|| {
                    self.combatants
                        .iter()
                        .find(|c| c.is_dead)
                        .map(|c| c.side)
                });
                if let Some(loser) = loser {
                    self.finish_round(loser.opponent().into(), &mut events);
                    if self.phase == GameState::GameOver {
                        return events;
                    }
                }
            }
        }

        // 4. Respawn
        if self.waiting_for_respawn
            && self.elapsed_ms(self.respawn_started_at) >= self.config.respawn_delay_ms
        {
            self.waiting_for_respawn = false;
            self.round_number += 1;
            self.reset_round(true);
            info!(round = self.round_number, "round started");
            events.push(SimEvent::RoundStarted {
                round: self.round_number,
            });
        }

        // 5. Round banner
        if self.showing_round_start
            && self.elapsed_ms(self.round_start_shown_at) >= self.config.round_start_delay_ms
        {
            self.showing_round_start = false;
        }

        events
    }

    /// Mark combatants whose body top has dropped below the platform as dead
    /// and remember who went first. Red is checked before Blue.
    fn detect_falls(&mut self, events: &mut Vec<SimEvent>) {
        let threshold = self.config.platform.y;
        for combatant in &mut self.combatants {
            if combatant.is_dead || combatant.top() <= threshold {
                continue;
            }
            combatant.is_dead = true;
            if self.first_to_fall.is_none() {
                self.first_to_fall = Some(combatant.side);
            }
            debug!(side = ?combatant.side, frame = self.frame, "fell into the void");
            events.push(SimEvent::Fell {
                side: combatant.side,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::types::button;

    const IDLE: [Intent; 2] = [NULL_INTENT; 2];

    fn battle_with(config: SimConfig) -> Match {
        let mut m = Match::new(config).unwrap();
        m.handle_action(MatchAction::StartGame).unwrap();
        m
    }

    fn battle() -> Match {
        battle_with(SimConfig::default())
    }

    /// Teleport a combatant just under the platform top, off to the side.
    fn drop_into_void(m: &mut Match, side: Side) {
        let y = m.config.platform.y + 1.0;
        let x = m.config.platform.x - 400.0;
        let c = m.combatant_mut(side);
        c.position = Vec2::new(x, y);
        c.velocity = Vec2::ZERO;
    }

    fn run(m: &mut Match, ticks: usize) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(m.step(IDLE));
        }
        events
    }

    #[test]
    fn step_advances_frame_only_in_battle() {
        let mut m = Match::new(SimConfig::default()).unwrap();
        assert!(m.step(IDLE).is_empty());
        assert_eq!(m.frame, 0);

        m.handle_action(MatchAction::StartGame).unwrap();
        m.step(IDLE);
        assert_eq!(m.frame, 1);

        m.handle_action(MatchAction::Pause).unwrap();
        let before = m.clone();
        m.step([Intent::new(button::RIGHT); 2]);
        assert_eq!(m, before);
    }

    #[test]
    fn combatants_land_on_the_platform() {
        let mut m = battle();
        run(&mut m, 60);
        for c in &m.combatants {
            assert!(c.on_ground);
            assert_eq!(c.bottom(), m.config.platform.y);
            assert!(!c.is_dead);
        }
    }

    #[test]
    fn timeout_lower_damage_wins() {
        let mut config = SimConfig::default();
        config.round_time_secs = 1;
        let mut m = battle_with(config);
        m.combatants[0].damage = 30.0;
        m.combatants[1].damage = 45.0;

        run(&mut m, 59);
        assert_eq!(m.game_state(), GameState::Battle);

        let events = m.step(IDLE);
        assert!(events.contains(&SimEvent::RoundEnded {
            winner: RoundWinner::Red
        }));
        assert_eq!(m.scores(), [1, 0]);
        assert_eq!(m.round_winner, Some(RoundWinner::Red));
        assert_eq!(m.game_state(), GameState::RoundEnd);
        assert_eq!(m.time_left_secs(), 0.0);
    }

    #[test]
    fn timeout_with_equal_damage_is_a_tie() {
        let mut config = SimConfig::default();
        config.round_time_secs = 1;
        let mut m = battle_with(config);
        m.combatants[0].damage = 50.0;
        m.combatants[1].damage = 50.0;

        run(&mut m, 60);
        assert_eq!(m.scores(), [1, 1]);
        assert_eq!(m.round_winner, Some(RoundWinner::Tie));
    }

    #[test]
    fn timer_expiry_beats_same_tick_fall() {
        let mut config = SimConfig::default();
        config.round_time_secs = 1;
        let mut m = battle_with(config);
        m.combatants[0].damage = 10.0;
        m.combatants[1].damage = 20.0;
        run(&mut m, 59);

        // tick 60: the clock runs out while red drops below the platform
        drop_into_void(&mut m, Side::Red);
        let events = m.step(IDLE);
        let ended: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SimEvent::RoundEnded { .. }))
            .collect();
        assert_eq!(
            ended,
            vec![&SimEvent::RoundEnded {
                winner: RoundWinner::Red
            }]
        );
        assert!(!events.contains(&SimEvent::Fell { side: Side::Red }));
        assert!(!m.combatant(Side::Red).is_dead);
        assert_eq!(m.scores(), [1, 0]);
    }

    #[test]
    fn first_to_fall_loses_once() {
        let mut m = battle();
        run(&mut m, 9);

        // tick 10: red drops out
        drop_into_void(&mut m, Side::Red);
        let events = m.step(IDLE);
        assert!(events.contains(&SimEvent::Fell { side: Side::Red }));
        assert!(events.contains(&SimEvent::RoundEnded {
            winner: RoundWinner::Blue
        }));
        assert!(m.combatant(Side::Red).is_dead);

        // tick 11, 12: blue follows but the round is already decided
        m.step(IDLE);
        drop_into_void(&mut m, Side::Blue);
        let events = m.step(IDLE);
        assert!(!events.iter().any(|e| matches!(e, SimEvent::RoundEnded { .. })));
        assert!(!m.combatant(Side::Blue).is_dead);

        run(&mut m, 20);
        assert_eq!(m.scores(), [0, 1]);
        assert_eq!(m.round_winner, Some(RoundWinner::Blue));
    }

    #[test]
    fn simultaneous_falls_favor_blue() {
        let mut m = battle();
        drop_into_void(&mut m, Side::Red);
        drop_into_void(&mut m, Side::Blue);
        m.step(IDLE);
        assert_eq!(m.scores(), [0, 1]);
        assert!(m.combatants.iter().all(|c| c.is_dead));
    }

    #[test]
    fn dead_stays_dead_until_respawn() {
        let mut m = battle();
        drop_into_void(&mut m, Side::Blue);
        m.step(IDLE);
        let mut last_y = m.combatant(Side::Blue).position.y;
        for _ in 0..80 {
            m.step([Intent::new(button::JUMP | button::LEFT); 2]);
            let blue = m.combatant(Side::Blue);
            assert!(blue.is_dead);
            assert!(blue.position.y > last_y, "keeps falling");
            last_y = blue.position.y;
        }
        assert_eq!(m.scores(), [1, 0]);
    }

    #[test]
    fn respawn_after_delay_then_banner_freezes_physics() {
        let mut m = battle();
        drop_into_void(&mut m, Side::Red);
        m.step(IDLE);
        assert!(m.waiting_for_respawn);

        // 1500 ms at 60 Hz is 90 ticks
        run(&mut m, 89);
        assert!(m.waiting_for_respawn);
        assert_eq!(m.round_number, 1);

        let events = m.step(IDLE);
        assert!(events.contains(&SimEvent::RoundStarted { round: 2 }));
        assert!(!m.waiting_for_respawn);
        assert!(m.showing_round_start);
        assert_eq!(m.game_state(), GameState::Battle);
        assert!(!m.combatant(Side::Red).is_dead);
        assert_eq!(m.scores(), [0, 1]);

        let frozen = m.combatants;
        for _ in 0..120 {
            m.step([Intent::new(button::RIGHT); 2]);
        }
        assert_eq!(m.combatants, frozen);
        assert!(!m.showing_round_start);

        m.step([Intent::new(button::RIGHT); 2]);
        assert!(m.combatant(Side::Red).position.x > frozen[0].position.x);
    }

    #[test]
    fn timer_does_not_fire_during_banner() {
        let mut config = SimConfig::default();
        config.round_time_secs = 1;
        let mut m = battle_with(config);
        m.reset_round(true);
        m.combatants[0].damage = 10.0;
        run(&mut m, 100);
        assert_eq!(m.scores(), [0, 0]);
        assert!(m.showing_round_start);

        // banner drops at 2000 ms, and the expired clock resolves right after
        run(&mut m, 21);
        assert!(!m.showing_round_start);
        assert_eq!(m.scores(), [0, 1]);
    }

    #[test]
    fn reaching_max_points_ends_the_match() {
        let mut config = SimConfig::default();
        config.max_points = 2;
        let mut m = battle_with(config);

        drop_into_void(&mut m, Side::Red);
        m.step(IDLE);
        run(&mut m, 90 + 120);
        assert_eq!(m.round_number, 2);
        assert_eq!(m.game_state(), GameState::Battle);

        drop_into_void(&mut m, Side::Red);
        let events = m.step(IDLE);
        assert!(events.contains(&SimEvent::MatchEnded {
            winner: RoundWinner::Blue
        }));
        assert_eq!(m.game_state(), GameState::GameOver);
        assert_eq!(m.match_winner, Some(RoundWinner::Blue));

        let frame = m.frame;
        assert!(m.step(IDLE).is_empty());
        assert_eq!(m.frame, frame);
    }

    #[test]
    fn dash_collision_trades_through_step() {
        let mut m = battle();
        run(&mut m, 60);
        let y = m.config.platform.y - m.config.body_size();
        let x = m.config.platform.x + 400.0;
        m.combatants[0].position = Vec2::new(x, y);
        m.combatants[1].position = Vec2::new(x + 80.0, y);

        let events = m.step([Intent::new(button::DASH), Intent::new(button::DASH | button::LEFT)]);
        let hits = events
            .iter()
            .filter(|e| matches!(e, SimEvent::Hit { .. }))
            .count();
        assert_eq!(hits, 2);
        assert!(events.contains(&SimEvent::Contact));
        assert!(m.combatants.iter().all(|c| c.damage > 0.0 && c.stunned));
    }
}
